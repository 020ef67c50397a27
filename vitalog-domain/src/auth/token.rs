use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use tracing::{debug, error};

use crate::auth::Claims;

/// Errors raised while decoding or issuing bearer tokens
#[derive(Debug, Error)]
pub enum SecurityError {
    /// JWT validation error
    #[error("Token validation error: {0}")]
    TokenValidation(String),

    /// Expired token
    #[error("Token has expired")]
    TokenExpired,

    /// Invalid token structure
    #[error("Invalid token format")]
    InvalidToken,

    /// Configuration error
    #[error("Security configuration error: {0}")]
    ConfigError(String),
}

/// Verifies a bearer token string and returns its claims.
///
/// This is the "token codec" collaborator of the authentication resolver;
/// the production implementation is [`JwtCodec`], tests substitute stubs.
pub trait TokenCodec {
    fn decode(&self, token: &str) -> Result<Claims, SecurityError>;
}

/// HS256 JWT codec.
///
/// Token issuance lives in the auth subsystem that owns the users; the
/// `issue` method here exists for tests and operational tooling only and
/// is deliberately not exposed over HTTP.
#[derive(Clone)]
pub struct JwtCodec {
    secret: String,
    issuer: String,
}

impl JwtCodec {
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
        }
    }

    /// Build a codec from `JWT_SECRET` and `JWT_ISSUER`
    pub fn from_env() -> Result<Self, SecurityError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| {
            error!("JWT_SECRET environment variable not found");
            SecurityError::ConfigError("JWT_SECRET environment variable not found".to_string())
        })?;

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "vitalog-api".to_string());

        Ok(Self::new(secret, issuer))
    }

    /// Issue a token for the given subject, valid for `valid_secs` seconds
    pub fn issue(&self, subject: &str, valid_secs: i64) -> Result<String, SecurityError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + valid_secs,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            error!("Failed to encode JWT token: {}", e);
            SecurityError::TokenValidation(e.to_string())
        })
    }
}

impl TokenCodec for JwtCodec {
    fn decode(&self, token: &str) -> Result<Claims, SecurityError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[self.issuer.clone()]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SecurityError::TokenExpired,
            jsonwebtoken::errors::ErrorKind::InvalidToken => SecurityError::InvalidToken,
            _ => SecurityError::TokenValidation(e.to_string()),
        })?;

        debug!("Token verified for subject {}", token_data.claims.sub);
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> JwtCodec {
        JwtCodec::new("test_secret_key_for_testing_only", "test-issuer")
    }

    #[test]
    fn test_issue_and_decode_token() {
        let codec = test_codec();

        let token = codec.issue("17", 900).unwrap();
        assert!(!token.is_empty());

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "17");
        assert_eq!(claims.iss, "test-issuer");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = test_codec();

        // Negative validity puts the expiry in the past
        let token = codec.issue("17", -3600).unwrap();

        match codec.decode(&token) {
            Err(SecurityError::TokenExpired) => {}
            other => panic!("Expected TokenExpired but got: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let codec = test_codec();

        let result = codec.decode("not.a.token");
        assert!(matches!(
            result,
            Err(SecurityError::InvalidToken) | Err(SecurityError::TokenValidation(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = test_codec().issue("17", 900).unwrap();
        let other = JwtCodec::new("a_different_secret", "test-issuer");

        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let token = JwtCodec::new("test_secret_key_for_testing_only", "someone-else")
            .issue("17", 900)
            .unwrap();

        assert!(test_codec().decode(&token).is_err());
    }
}
