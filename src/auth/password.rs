use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Fails both on a mismatch and on a stored hash that cannot be parsed.
pub fn verify_password(password: &str, hashed: &str) -> Result<(), argon2::password_hash::Error> {
    let argon2 = Argon2::default();
    let parsed = PasswordHash::new(hashed)?;

    argon2.verify_password(password.as_bytes(), &parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hashed = hash_password("emp123").unwrap();
        assert!(hashed.starts_with("$argon2"));
        assert!(verify_password("emp123", &hashed).is_ok());
        assert!(verify_password("emp124", &hashed).is_err());
    }

    #[test]
    fn garbage_hash_is_rejected() {
        assert!(verify_password("emp123", "not-a-hash").is_err());
    }
}
