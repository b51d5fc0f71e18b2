use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password into a salted bcrypt digest safe to persist.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Verifies a plaintext password against a stored digest.
///
/// bcrypt recomputes and compares in constant time. A malformed stored
/// digest verifies as `false` rather than surfacing a distinct error: the
/// caller only ever learns "match" or "mismatch".
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}
