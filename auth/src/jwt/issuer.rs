use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;

/// Creates signed, time-bounded bearer tokens.
///
/// Signs with HS256 using a secret fixed at construction. A `TokenVerifier`
/// built from the same secret accepts every token this issuer produces.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create an issuer for the given signing secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC key; should be at least 32 bytes
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token attesting to `subject` until `now + ttl`.
    ///
    /// Does not check that the subject exists.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is not a positive whole number of seconds
    /// * `ExpiryOutOfRange` - `now + ttl` cannot be represented
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(
        &self,
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        self.encode(&Claims::new(subject, now, ttl)?)
    }

    /// Sign prebuilt claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}
