use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed Argon2id hash with default parameters that no password matches.
///
/// Verifying against it costs as much as checking a real stored hash.
pub const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$al5e+Cv3WW/R3gE0gRtgMg$yAlnFjhxvI0u4uI1Es9lsFd81li4HsTZAVsBeanMtW4";

/// One-way password transform and its verification predicate.
///
/// Uses Argon2id with default parameters and a fresh random salt per hash.
/// Stateless, so a single instance can be shared across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and derived hash). Hashing the
    /// same password twice yields two different strings.
    ///
    /// # Errors
    /// * `HashingFailed` - Salt encoding or the Argon2 computation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// Returns `false` for a wrong password and for a stored value that is
    /// not a parseable PHC string. Derived bytes are compared in constant time.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_phc_encoded_argon2id() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("s3cret").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("s3cret"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("s3cret").expect("Failed to hash password");
        let second = hasher.hash("s3cret").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("s3cret", &first));
        assert!(hasher.verify("s3cret", &second));
    }

    #[test]
    fn test_distinct_passwords_do_not_cross_verify() {
        let hasher = PasswordHasher::new();
        let passwords = ["alpha", "alpha ", "Alpha", "beta", "ünïcødé"];

        for (i, p1) in passwords.iter().enumerate() {
            let hash = hasher.hash(p1).expect("Failed to hash password");
            for (j, p2) in passwords.iter().enumerate() {
                assert_eq!(hasher.verify(p2, &hash), i == j, "{p2:?} against hash of {p1:?}");
            }
        }
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_verify_against_plaintext_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "password"));
    }

    #[test]
    fn test_decoy_hash_uses_default_parameters() {
        let hasher = PasswordHasher::new();
        let real = hasher.hash("s3cret").expect("Failed to hash password");

        let parameters = |phc: &str| phc.rsplitn(3, '$').nth(2).unwrap().to_string();

        assert!(PasswordHash::new(DECOY_HASH).is_ok());
        assert_eq!(parameters(DECOY_HASH), parameters(&real));
        assert!(!hasher.verify("s3cret", DECOY_HASH));
        assert!(!hasher.verify("", DECOY_HASH));
    }
}
