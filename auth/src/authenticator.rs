use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::jwt::VerifyError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::DECOY_HASH;

/// Authentication coordinator combining password verification and token handling.
///
/// Owns the one signing secret of the process: issuer and verifier are built
/// from the same bytes here, so they can never disagree.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,

    /// Instant from which the token is rejected as expired
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing and verification
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(jwt_secret),
            token_verifier: TokenVerifier::new(jwt_secret),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token will attest to
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is unusable)
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, now)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs one full password verification against a decoy hash first, so
    /// the caller spends the same time as for a wrong password.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let _ = self.verify_password(password, DECOY_HASH);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// The reported `expires_at` is read back from the signed claims.
    ///
    /// # Errors
    /// * `InvalidLifetime`, `ExpiryOutOfRange` - The configured TTL cannot produce a token at `now`
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, TokenError> {
        let claims = Claims::new(subject, now, self.token_ttl)?;
        let expires_at = claims
            .expires_at()
            .ok_or(TokenError::ExpiryOutOfRange)?;

        Ok(AuthenticationResult {
            access_token: self.token_issuer.encode(&claims)?,
            expires_at,
        })
    }

    /// Validate a token at `now` and return its subject.
    ///
    /// # Errors
    /// * `SignatureInvalid`, `Expired`, `Malformed` - see [`TokenVerifier::verify`]
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<String, VerifyError> {
        self.token_verifier.verify(token, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(24));
        let now = Utc::now();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, 1, now)
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.expires_at.timestamp(), now.timestamp() + 24 * 60 * 60);

        let subject = authenticator
            .validate_token(&result.access_token, now)
            .expect("Token validation failed");
        assert_eq!(subject, "1");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(24));

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, 1, Utc::now());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unusable_hash() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(24));

        let result = authenticator.authenticate("my_password", "not-a-hash", 1, Utc::now());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issued_token_expires_after_ttl() {
        let authenticator = Authenticator::new(SECRET, Duration::minutes(15));
        let now = Utc::now();

        let result = authenticator.issue_token(7, now).unwrap();

        assert!(authenticator
            .validate_token(&result.access_token, now + Duration::minutes(14))
            .is_ok());
        assert_eq!(
            authenticator.validate_token(&result.access_token, result.expires_at),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn test_unknown_account_is_invalid_credentials() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(24));

        assert!(matches!(
            authenticator.reject_unknown_account("my_password"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET, Duration::hours(24));

        let result = authenticator.validate_token("invalid.token.here", Utc::now());
        assert!(matches!(result, Err(VerifyError::Malformed(_))));
    }

    #[test]
    fn test_rotated_secret_invalidates_tokens() {
        let now = Utc::now();
        let old = Authenticator::new(SECRET, Duration::hours(1));
        let rotated = Authenticator::new(b"another_secret_key_at_least_32_bytes", Duration::hours(1));

        let token = old.issue_token(1, now).unwrap().access_token;

        assert_eq!(
            rotated.validate_token(&token, now),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn test_reported_expiry_matches_verifier() {
        let authenticator = Authenticator::new(SECRET, Duration::seconds(1));
        let now = DateTime::from_timestamp(1_700_000_000, 100_000_000).unwrap();

        let result = authenticator.issue_token(1, now).unwrap();

        assert_eq!(
            result.expires_at,
            DateTime::from_timestamp(1_700_000_001, 0).unwrap()
        );
        assert!(authenticator
            .validate_token(&result.access_token, now)
            .is_ok());
        assert!(authenticator
            .validate_token(&result.access_token, result.expires_at - Duration::milliseconds(1))
            .is_ok());
        assert_eq!(
            authenticator.validate_token(&result.access_token, result.expires_at),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn test_unusable_ttl_fails_issuance_without_panicking() {
        let now = Utc::now();

        let sub_second = Authenticator::new(SECRET, Duration::milliseconds(500));
        assert!(matches!(
            sub_second.issue_token(1, now),
            Err(TokenError::InvalidLifetime(_))
        ));

        let overflowing = Authenticator::new(SECRET, Duration::try_hours(3_000_000_000).unwrap());
        assert_eq!(
            overflowing.issue_token(1, now).unwrap_err(),
            TokenError::ExpiryOutOfRange
        );
    }
}
