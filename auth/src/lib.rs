//! Authentication and session-token lifecycle library
//!
//! Provides the credential and token primitives for the account service:
//! - Password hashing (Argon2id) with constant-time verification
//! - Typed, self-contained access/refresh tokens with expiry enforcement
//! - A session issuer coordinating credential checks and token minting
//!
//! Tokens are tamper-evident and carry their own validity: a subject, a
//! type tag, and issuance/expiry timestamps signed with a process-wide
//! secret. No server-side session store exists, so a token stays valid
//! until its natural expiry.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Token Issuance and Verification
//! ```
//! use auth::{TokenCodec, TokenType};
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256, 60);
//! let token = codec.issue("user42", TokenType::Access, Duration::minutes(30)).unwrap();
//! let claims = codec.verify(&token, TokenType::Access).unwrap();
//! assert_eq!(claims.sub, "user42");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenConfig, TokenType};
//!
//! let config = TokenConfig::new("secret_key_at_least_32_bytes_long!", "HS256", 30, 7, 60).unwrap();
//! let auth = Authenticator::new(config);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint an access/refresh pair
//! let pair = auth.authenticate("password123", &hash, "user42").unwrap();
//!
//! // Validate the access token
//! let claims = auth.verify(&pair.access_token, TokenType::Access).unwrap();
//! assert_eq!(claims.sub, "user42");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenConfig;
pub use authenticator::TokenConfigError;
pub use authenticator::TokenPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenType;
