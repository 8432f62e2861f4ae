use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

/// Hashes a plaintext password with bcrypt at the default cost (12 rounds).
/// A hashing failure is fatal to the calling operation.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(AppError::internal)
}

/// Verifies a plaintext password against a stored digest.
///
/// Never fails: a malformed digest simply does not verify. bcrypt performs
/// the comparison in constant time internally.
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(password, digest).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        let digest = hash_password("Abcdef12").unwrap();
        assert_ne!(digest, "Abcdef12");
        assert!(verify_password("Abcdef12", &digest));
    }

    #[test]
    fn wrong_password_fails() {
        let digest = hash_password("Abcdef12").unwrap();
        assert!(!verify_password("Abcdef13", &digest));
        assert!(!verify_password("abcdef12", &digest));
    }

    #[test]
    fn malformed_digest_is_false_not_error() {
        assert!(!verify_password("Abcdef12", "not-a-bcrypt-digest"));
        assert!(!verify_password("Abcdef12", ""));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("Abcdef12").unwrap();
        let b = hash_password("Abcdef12").unwrap();
        assert_ne!(a, b);
    }
}
