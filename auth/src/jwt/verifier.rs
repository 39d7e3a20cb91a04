use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::VerifyError;

/// Validates bearer tokens and recovers their subject.
///
/// Expiry is evaluated against the caller-supplied instant rather than the
/// system clock, so `exp` is compared exactly with no leeway.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for the given signing secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC key; must equal the issuer's secret
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify `token` at instant `now` and return its subject.
    ///
    /// The signature is checked before any claim is trusted.
    ///
    /// # Returns
    /// Subject exactly as encoded at issuance
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature does not match the secret
    /// * `Expired` - `now` is at or past `exp`
    /// * `Malformed` - Token is not a parseable HS256 JWT with `sub` and `exp`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, VerifyError> {
        let claims = self.decode(token)?;

        if claims.is_expired(now) {
            return Err(VerifyError::Expired);
        }

        Ok(claims.sub)
    }

    /// Check the signature and decode the claims without evaluating expiry.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature does not match the secret
    /// * `Malformed` - Token structure or claims are invalid
    pub fn decode(&self, token: &str) -> Result<Claims, VerifyError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => VerifyError::SignatureInvalid,
                _ => VerifyError::Malformed(e.to_string()),
            })
    }
}
