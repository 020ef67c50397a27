//! Authentication for the Vitalog API
//!
//! Resolves `Authorization: Bearer <token>` headers to existing users.
//! The token codec and the user directory are explicit parameters so the
//! resolver has no hidden global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use utoipa::ToSchema;

use vitalog_data::models::User;
use vitalog_data::repository::UserDirectory;

pub mod token;

pub use token::{JwtCodec, SecurityError, TokenCodec};

/// Claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (as timestamp)
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Why a request could not be authenticated.
///
/// The display strings are the exact reasons surfaced in 401 responses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header was sent
    #[error("Token missing")]
    MissingToken,

    /// Header present but not a well-formed `Bearer <token>` pair
    #[error("Invalid authorization header")]
    InvalidHeader,

    /// Token failed signature or expiry verification
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token subject does not correspond to an existing user
    #[error("User not found")]
    UserNotFound,

    /// The user directory itself failed
    #[error("User lookup failed: {0}")]
    Directory(String),
}

/// Resolve the caller from an `Authorization` header value.
///
/// The header must be exactly two whitespace-separated parts with a
/// case-insensitive `Bearer` scheme. The token is verified by `codec`
/// and its subject claim looked up in `directory`; any miss along the
/// way maps to a specific [`AuthError`].
pub async fn resolve_bearer_user(
    header: Option<&str>,
    codec: &(dyn TokenCodec + Sync),
    directory: &(dyn UserDirectory + Sync),
) -> Result<User, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;

    let mut parts = header.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => {
            warn!("Malformed Authorization header");
            return Err(AuthError::InvalidHeader);
        }
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        warn!("Authorization scheme is not Bearer");
        return Err(AuthError::InvalidHeader);
    }

    let claims = codec.decode(token).map_err(|e| {
        debug!("Token verification failed: {}", e);
        AuthError::InvalidToken
    })?;

    // A subject that is not a numeric user id cannot match any row, so it
    // falls into the same bucket as an unknown user.
    let user_id: i64 = claims.sub.parse().map_err(|_| {
        warn!("Token subject {:?} is not a user id", claims.sub);
        AuthError::UserNotFound
    })?;

    let user = directory
        .find_by_id(user_id)
        .await
        .map_err(|e| AuthError::Directory(e.to_string()))?
        .ok_or(AuthError::UserNotFound)?;

    debug!("Authenticated user {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalog_data::repository::InMemoryUserDirectory;

    /// Codec stub that accepts one fixed token
    struct StubCodec {
        subject: String,
    }

    impl TokenCodec for StubCodec {
        fn decode(&self, token: &str) -> Result<Claims, SecurityError> {
            if token == "good-token" {
                Ok(Claims {
                    sub: self.subject.clone(),
                    iss: "test".to_string(),
                    iat: 0,
                    exp: i64::MAX,
                })
            } else {
                Err(SecurityError::InvalidToken)
            }
        }
    }

    fn directory_with_user(id: i64) -> InMemoryUserDirectory {
        let directory = InMemoryUserDirectory::new();
        directory.insert(User {
            id,
            email: None,
            name: None,
        });
        directory
    }

    #[tokio::test]
    async fn test_missing_header() {
        let codec = StubCodec {
            subject: "1".to_string(),
        };
        let directory = directory_with_user(1);

        let err = resolve_bearer_user(None, &codec, &directory)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
        assert_eq!(err.to_string(), "Token missing");
    }

    #[tokio::test]
    async fn test_single_part_header() {
        let codec = StubCodec {
            subject: "1".to_string(),
        };
        let directory = directory_with_user(1);

        let err = resolve_bearer_user(Some("Bearer"), &codec, &directory)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidHeader);
        assert_eq!(err.to_string(), "Invalid authorization header");
    }

    #[tokio::test]
    async fn test_three_part_header() {
        let codec = StubCodec {
            subject: "1".to_string(),
        };
        let directory = directory_with_user(1);

        let err = resolve_bearer_user(Some("Bearer good-token extra"), &codec, &directory)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidHeader);
    }

    #[tokio::test]
    async fn test_wrong_scheme() {
        let codec = StubCodec {
            subject: "1".to_string(),
        };
        let directory = directory_with_user(1);

        let err = resolve_bearer_user(Some("Basic good-token"), &codec, &directory)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidHeader);
    }

    #[tokio::test]
    async fn test_scheme_is_case_insensitive() {
        let codec = StubCodec {
            subject: "1".to_string(),
        };
        let directory = directory_with_user(1);

        let user = resolve_bearer_user(Some("bearer good-token"), &codec, &directory)
            .await
            .unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_bad_token() {
        let codec = StubCodec {
            subject: "1".to_string(),
        };
        let directory = directory_with_user(1);

        let err = resolve_bearer_user(Some("Bearer bad-token"), &codec, &directory)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
        assert_eq!(err.to_string(), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let codec = StubCodec {
            subject: "99".to_string(),
        };
        let directory = directory_with_user(1);

        let err = resolve_bearer_user(Some("Bearer good-token"), &codec, &directory)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::UserNotFound);
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_non_numeric_subject() {
        let codec = StubCodec {
            subject: "alice".to_string(),
        };
        let directory = directory_with_user(1);

        let err = resolve_bearer_user(Some("Bearer good-token"), &codec, &directory)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::UserNotFound);
    }

    #[tokio::test]
    async fn test_resolves_existing_user() {
        let codec = StubCodec {
            subject: "7".to_string(),
        };
        let directory = directory_with_user(7);

        let user = resolve_bearer_user(Some("Bearer good-token"), &codec, &directory)
            .await
            .unwrap();
        assert_eq!(user.id, 7);
    }
}
