pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use errors::TokenError;
pub use errors::VerifyError;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
