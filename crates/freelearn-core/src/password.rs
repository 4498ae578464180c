//! Password hashing with bcrypt.
//!
//! The work factor is fixed at [`BCRYPT_COST`]. Verification never fails for a
//! wrong password: it simply answers `false`.

use bcrypt::{hash, verify};
use tracing::warn;

/// bcrypt work factor used for every stored password.
pub const BCRYPT_COST: u32 = 12;

#[derive(Debug, thiserror::Error)]
#[error("failed to hash password: {0}")]
pub struct PasswordError(#[from] bcrypt::BcryptError);

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Ok(hash(password, BCRYPT_COST)?)
}

/// Checks `password` against a stored bcrypt `hash`.
///
/// An unparseable hash is logged and treated as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}
