use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Payload of a bearer token.
///
/// Carries only the RFC 7519 claims needed to bind a token to a subject for a
/// bounded window. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject, always in string form even when the underlying id is numeric
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject` valid from `now` for `ttl`.
    ///
    /// The window is anchored to the whole second of `now`, so `exp - iat`
    /// equals `ttl` exactly.
    ///
    /// # Arguments
    /// * `subject` - Identity the token attests to
    /// * `now` - Issuance instant
    /// * `ttl` - Validity window, a positive whole number of seconds
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is not positive or has a sub-second part
    /// * `ExpiryOutOfRange` - `now + ttl` overflows the calendar
    pub fn new(
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        if ttl <= Duration::zero() || ttl.subsec_nanos() != 0 {
            return Err(TokenError::InvalidLifetime(ttl));
        }

        let iat = now.timestamp();
        let exp = DateTime::from_timestamp(iat, 0)
            .and_then(|issued_at| issued_at.checked_add_signed(ttl))
            .ok_or(TokenError::ExpiryOutOfRange)?
            .timestamp();

        Ok(Self {
            sub: subject.to_string(),
            iat,
            exp,
        })
    }

    /// A token is live strictly before `exp`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Expiration as a UTC instant, if `exp` is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
