//! Password hashing via bcrypt.
//!
//! bcrypt only keys on the first 72 bytes of input. Longer passwords are
//! rejected at this boundary instead of silently truncated, so two
//! passwords that differ only past byte 72 can never verify against the
//! same credential.

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Maximum accepted password length in bytes (bcrypt input limit).
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with bcrypt (cost 10). Rejects passwords longer than
/// [`MAX_PASSWORD_BYTES`].
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::ValidationError(format!(
            "Password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a stored bcrypt credential.
///
/// Never errors: a malformed stored credential or an over-long candidate
/// reports `false`.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.len() > MAX_PASSWORD_BYTES {
        return false;
    }
    bcrypt::verify(password, hash).unwrap_or(false)
}
