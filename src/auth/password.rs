use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Argon2id with default params; the PHC string carries salt and params.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow::anyhow!("argon2 hash failed: {e}"))
}

/// `Ok(false)` only for a mismatch. An unreadable stored hash is an error,
/// since it means the row is corrupt rather than the password wrong.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| anyhow::anyhow!("stored hash unreadable: {e}"))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow::anyhow!("argon2 verify failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_accepts_only_its_password() {
        let stored = hash_password("pasta-al-forno").unwrap();
        assert!(verify_password("pasta-al-forno", &stored).unwrap());
        assert!(!verify_password("pasta-al-forn0", &stored).unwrap());
        assert!(!verify_password("", &stored).unwrap());
    }

    #[test]
    fn same_password_gets_a_fresh_salt() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn stored_hash_is_argon2id_phc() {
        let stored = hash_password("plaintext-secret").unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(!stored.contains("plaintext-secret"));
    }

    #[test]
    fn unreadable_stored_hash_is_an_error() {
        let err = verify_password("anything", "plain-text-password").unwrap_err();
        assert!(err.to_string().contains("stored hash unreadable"));
    }
}
