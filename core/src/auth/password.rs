//! Salted PBKDF2-HMAC-SHA256 password hashes.
//!
//! Stored form: `pbkdf2-sha256$<iterations>$<salt hex>$<hash hex>`.

use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("iteration count must be at least 1")]
    ZeroIterations,
    #[error("malformed password hash")]
    Malformed,
}

/// Hashes and verifies passwords with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Result<Self, PasswordError> {
        if iterations == 0 {
            return Err(PasswordError::ZeroIterations);
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt: [u8; SALT_LEN] = rand::random();
        self.hash_with_salt(password, &salt)
    }

    pub fn hash_with_salt(&self, password: &str, salt: &[u8]) -> Result<String, PasswordError> {
        let derived = derive(password.as_bytes(), salt, self.iterations);
        Ok(format!(
            "{SCHEME}${}${}${}",
            self.iterations,
            hex::encode(salt),
            hex::encode(derived)
        ))
    }

    /// Check `password` against a stored hash.
    ///
    /// The iteration count is taken from the stored string, so hashes made
    /// under an older work factor still verify.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        let mut parts = stored.split('$');
        let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) =
            (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PasswordError::Malformed);
        };
        if scheme != SCHEME {
            return Err(PasswordError::Malformed);
        }
        let iterations: u32 = iterations.parse().map_err(|_| PasswordError::Malformed)?;
        if iterations == 0 {
            return Err(PasswordError::Malformed);
        }
        let salt = hex::decode(salt).map_err(|_| PasswordError::Malformed)?;
        let expected = hex::decode(hash).map_err(|_| PasswordError::Malformed)?;

        let derived = derive(password.as_bytes(), &salt, iterations);
        Ok(derived.as_slice().ct_eq(expected.as_slice()).into())
    }
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    pbkdf2::pbkdf2_hmac_array::<Sha256, HASH_LEN>(password, salt, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_rfc7914_vector() {
        // PBKDF2-HMAC-SHA256, P="passwd", S="salt", c=1
        let derived = derive(b"passwd", b"salt", 1);
        assert_eq!(
            hex::encode(derived),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn matches_multi_iteration_vector() {
        // P="password", S="salt", c=2
        let derived = derive(b"password", b"salt", 2);
        assert_eq!(
            hex::encode(derived),
            "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"
        );
    }

    #[test]
    fn hash_format_and_verify() {
        let hasher = PasswordHasher::new(100).unwrap();
        let stored = hasher.hash("correct horse").unwrap();
        let parts: Vec<&str> = stored.split('$').collect();
        assert_eq!(parts[0], "pbkdf2-sha256");
        assert_eq!(parts[1], "100");
        assert_eq!(parts[2].len(), SALT_LEN * 2);
        assert_eq!(parts[3].len(), HASH_LEN * 2);

        assert!(hasher.verify("correct horse", &stored).unwrap());
        assert!(!hasher.verify("wrong horse", &stored).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = PasswordHasher::new(10).unwrap();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn verify_uses_stored_iterations() {
        let old = PasswordHasher::new(5).unwrap();
        let stored = old.hash_with_salt("pw123456", b"0123456789abcdef").unwrap();
        let current = PasswordHasher::new(50).unwrap();
        assert!(current.verify("pw123456", &stored).unwrap());
    }

    #[test]
    fn rejects_malformed_hashes() {
        let hasher = PasswordHasher::new(10).unwrap();
        let malformed = [
            "",
            "plain",
            "bcrypt$10$00$00",
            "pbkdf2-sha256$x$00$00",
            "pbkdf2-sha256$0$00$00",
            "pbkdf2-sha256$1$zz$00",
            "pbkdf2-sha256$1$00$00$extra",
        ];
        for bad in malformed {
            assert_eq!(hasher.verify("pw", bad), Err(PasswordError::Malformed), "{bad}");
        }
    }

    #[test]
    fn truncated_hash_does_not_verify() {
        let hasher = PasswordHasher::new(10).unwrap();
        let stored = hasher.hash_with_salt("pw123456", b"0123456789abcdef").unwrap();
        let truncated = &stored[..stored.len() - 2];
        assert!(!hasher.verify("pw123456", truncated).unwrap());
    }

    #[test]
    fn zero_iterations_rejected() {
        assert_eq!(PasswordHasher::new(0).unwrap_err(), PasswordError::ZeroIterations);
    }
}
