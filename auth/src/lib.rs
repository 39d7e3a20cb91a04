//! Credential management and stateless session authentication.
//!
//! Provides the building blocks the user-management service composes:
//! - Password hashing (Argon2id)
//! - Bearer token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! Every operation is pure over its arguments and the signing secret, so all
//! types here can be shared across tasks behind an `Arc` without locking.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenVerifier, VerifyError};
//! use chrono::{Duration, Utc};
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret);
//! let verifier = TokenVerifier::new(secret);
//!
//! let now = Utc::now();
//! let token = issuer.issue(42, now, Duration::hours(1)).unwrap();
//! assert_eq!(verifier.verify(&token, now).unwrap(), "42");
//! assert_eq!(
//!     verifier.verify(&token, now + Duration::hours(1)),
//!     Err(VerifyError::Expired)
//! );
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let now = Utc::now();
//! let result = auth.authenticate("password123", &hash, 1, now).unwrap();
//!
//! // Protected request: recover the subject
//! let subject = auth.validate_token(&result.access_token, now).unwrap();
//! assert_eq!(subject, "1");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use jwt::VerifyError;
pub use password::PasswordError;
pub use password::PasswordHasher;
