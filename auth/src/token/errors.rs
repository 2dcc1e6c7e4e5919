use thiserror::Error;

use super::claims::TokenType;

/// Error type for token operations.
///
/// The `Malformed` / `Expired` / `WrongType` distinction exists for
/// diagnostics only; callers facing the outside world collapse all three
/// into a single unauthenticated response.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed or has an invalid signature: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },
}
