use thiserror::Error;

/// Error type for password operations.
///
/// Only hashing can fail; verification answers true or false, treating a
/// corrupted stored hash as a mismatch.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
