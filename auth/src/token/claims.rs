use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Type tag embedded in every claim set.
///
/// An access token must never be accepted where a refresh token is
/// required, and vice versa. The tag is part of the signed payload, so it
/// cannot be altered without invalidating the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried by a signed token.
///
/// Immutable once signed: validity is determined entirely by the signature
/// and the embedded `exp`, never by server-side state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier, string-encoded)
    pub sub: String,

    /// Token type tag
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp), always `iat + ttl`
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject with expiration `ttl` from now.
    pub fn new(subject: impl Into<String>, token_type: TokenType, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.into(),
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}
