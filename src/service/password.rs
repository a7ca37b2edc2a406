//! Admin password verification against a configured Argon2 PHC hash.
//!
//! The reference hash comes from `ADMIN_PASSWORD_HASH` and looks like
//! `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`. Verification re-derives the
//! hash with the parameters embedded in that string and compares in constant
//! time, so the plaintext is never compared directly.

use crate::error::RelayError;
use argon2::{
    Algorithm, Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

/// Check that `hash` is a PHC string produced by one of the Argon2 variants.
pub fn ensure_valid_hash(hash: &str) -> Result<(), RelayError> {
    let parsed = PasswordHash::new(hash.trim())
        .map_err(|e| RelayError::Config(format!("ADMIN_PASSWORD_HASH is not a PHC string: {e}")))?;
    Algorithm::try_from(parsed.algorithm).map_err(|_| {
        RelayError::Config(format!(
            "ADMIN_PASSWORD_HASH uses unsupported algorithm `{}`",
            parsed.algorithm
        ))
    })?;
    Ok(())
}

/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, `Err` if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, RelayError> {
    let parsed = PasswordHash::new(hash.trim())?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
