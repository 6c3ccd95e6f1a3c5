//! Password hashing with bcrypt.

use crate::error::AppResult;

/// Hashes a plain text password with the default bcrypt cost.
pub fn hash_password(password: &str) -> AppResult<String> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Verifies a plain text password against a stored bcrypt hash.
///
/// Returns `Ok(false)` for a wrong password; an `Err` means the stored
/// hash itself was malformed.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    Ok(bcrypt::verify(password, password_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("rahasia123").expect("Failed to hash password");
        assert!(hash.starts_with("$2"));
        assert!(verify_password("rahasia123", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn different_hashes_for_same_password() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
