use chrono::Duration;
use jsonwebtoken::Algorithm;
use thiserror::Error;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenType;

/// Validated token-issuance configuration.
///
/// Loaded once at startup and injected into the [`Authenticator`]; nothing
/// here is read from ambient global state, and nothing changes after
/// construction.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    secret: String,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
    leeway_seconds: u64,
}

/// Configuration errors, all fatal at startup rather than per-request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384, or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Token TTLs must be positive")]
    NonPositiveTtl,

    #[error("Refresh token TTL must exceed access token TTL")]
    RefreshNotLongerThanAccess,
}

impl TokenConfig {
    /// Validate and build a token configuration.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `algorithm` - Signing algorithm name ("HS256", "HS384", or "HS512")
    /// * `access_ttl_minutes` - Access token lifetime
    /// * `refresh_ttl_days` - Refresh token lifetime, must exceed the access TTL
    /// * `leeway_seconds` - Clock-skew tolerance for expiry checks
    pub fn new(
        secret: impl Into<String>,
        algorithm: &str,
        access_ttl_minutes: i64,
        refresh_ttl_days: i64,
        leeway_seconds: u64,
    ) -> Result<Self, TokenConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }

        // Only HMAC algorithms pair with a shared-secret key.
        let algorithm = match algorithm {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => return Err(TokenConfigError::UnsupportedAlgorithm(other.to_string())),
        };

        if access_ttl_minutes <= 0 || refresh_ttl_days <= 0 {
            return Err(TokenConfigError::NonPositiveTtl);
        }

        let access_ttl = Duration::minutes(access_ttl_minutes);
        let refresh_ttl = Duration::days(refresh_ttl_days);
        if refresh_ttl <= access_ttl {
            return Err(TokenConfigError::RefreshNotLongerThanAccess);
        }

        Ok(Self {
            secret,
            algorithm,
            access_ttl,
            refresh_ttl,
            leeway_seconds,
        })
    }
}

/// Access/refresh token pair minted for one subject at one instant.
///
/// The two tokens are independent signed artifacts with independent
/// lifetimes.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Owns the credential hasher and the token codec; the surrounding service
/// delegates all credential and token work here.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl Authenticator {
    /// Create an authenticator from a validated configuration.
    pub fn new(config: TokenConfig) -> Self {
        let codec = TokenCodec::new(
            config.secret.as_bytes(),
            config.algorithm,
            config.leeway_seconds,
        );

        Self {
            password_hasher: PasswordHasher::new(),
            codec,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a token pair for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_pair(subject)?)
    }

    /// Mint a fresh token pair without password verification.
    ///
    /// Used by the refresh flow, where the caller has already been
    /// authenticated through a valid refresh token.
    ///
    /// # Errors
    /// * `SigningFailed` - Token signing failed
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, TokenError> {
        let access_token = self
            .codec
            .issue(subject, TokenType::Access, self.access_ttl)?;
        let refresh_token = self
            .codec
            .issue(subject, TokenType::Refresh, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `TokenError` - Signature, expiry, or type check failed
    pub fn verify(&self, token: &str, expected_type: TokenType) -> Result<Claims, TokenError> {
        self.codec.verify(token, expected_type)
    }

    /// Configured refresh token lifetime (drives the cookie Max-Age).
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Configured access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig::new(
            "test_secret_key_at_least_32_bytes!",
            "HS256",
            30,
            7,
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(test_config());

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let pair = authenticator
            .authenticate(password, &hash, "user42")
            .expect("Authentication failed");

        let access = authenticator
            .verify(&pair.access_token, TokenType::Access)
            .expect("Access token validation failed");
        assert_eq!(access.sub, "user42");
        assert_eq!(access.token_type, TokenType::Access);

        let refresh = authenticator
            .verify(&pair.refresh_token, TokenType::Refresh)
            .expect("Refresh token validation failed");
        assert_eq!(refresh.sub, "user42");
        assert!(refresh.exp > access.exp);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(test_config());

        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, "user42");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupted_stored_hash() {
        let authenticator = Authenticator::new(test_config());

        // A corrupted stored hash is a verification failure, not a fault.
        let result = authenticator.authenticate("my_password", "garbage", "user42");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_pair_tokens_are_not_interchangeable() {
        let authenticator = Authenticator::new(test_config());

        let pair = authenticator.issue_pair("user42").unwrap();

        assert!(matches!(
            authenticator.verify(&pair.refresh_token, TokenType::Access),
            Err(TokenError::WrongType { .. })
        ));
        assert!(matches!(
            authenticator.verify(&pair.access_token, TokenType::Refresh),
            Err(TokenError::WrongType { .. })
        ));
    }

    #[test]
    fn test_config_rejects_empty_secret() {
        let result = TokenConfig::new("", "HS256", 30, 7, 60);
        assert_eq!(result.unwrap_err(), TokenConfigError::EmptySecret);
    }

    #[test]
    fn test_config_rejects_unsupported_algorithm() {
        let result = TokenConfig::new("secret", "RS256", 30, 7, 60);
        assert!(matches!(
            result,
            Err(TokenConfigError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_config_rejects_refresh_not_longer_than_access() {
        // 1 day of minutes for access vs 1 day refresh
        let result = TokenConfig::new("secret", "HS256", 24 * 60, 1, 60);
        assert_eq!(
            result.unwrap_err(),
            TokenConfigError::RefreshNotLongerThanAccess
        );
    }

    #[test]
    fn test_config_rejects_non_positive_ttl() {
        let result = TokenConfig::new("secret", "HS256", 0, 7, 60);
        assert_eq!(result.unwrap_err(), TokenConfigError::NonPositiveTtl);
    }
}
