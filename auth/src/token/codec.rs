use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::TokenError;

/// Signs and verifies self-contained, expiring tokens.
///
/// Tokens carry a subject, a type tag, and issuance/expiry timestamps.
/// Verification is a pure function of (token, secret, current time): no
/// server-side session store is consulted.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    leeway_seconds: u64,
}

impl TokenCodec {
    /// Create a codec bound to a process-wide secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret (at least 32 bytes recommended)
    /// * `algorithm` - Signing algorithm (HMAC family)
    /// * `leeway_seconds` - Clock-skew tolerance applied to expiry checks
    pub fn new(secret: &[u8], algorithm: Algorithm, leeway_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            leeway_seconds,
        }
    }

    /// Issue a signed token for `subject`, expiring `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, token_type, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Decode a token, checking signature, expiry, and type tag.
    ///
    /// # Errors
    /// * `Malformed` - Structure or signature is invalid
    /// * `Expired` - Current time exceeds `exp` beyond the configured leeway
    /// * `WrongType` - Decoded type tag does not match `expected_type`
    pub fn verify(&self, token: &str, expected_type: TokenType) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = self.leeway_seconds;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;

        if claims.token_type != expected_type {
            return Err(TokenError::WrongType {
                expected: expected_type,
                actual: claims.token_type,
            });
        }

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }

        Ok(claims)
    }
}
