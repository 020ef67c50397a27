//! Authentication middleware for protected routes.
//!
//! Resolves the bearer user once per request and makes it available to
//! handlers as an `Extension<User>`.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use vitalog_domain::auth::{resolve_bearer_user, AuthError};

use crate::api::AppState;
use crate::entities::common::ErrorResponse;

/// Reject the request with the short reason the resolver produced.
fn unauthenticated(err: &AuthError) -> Response {
    ErrorResponse::unauthenticated(&err.to_string()).into_response()
}

/// Authentication middleware for protected routes
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => match value.to_str() {
            Ok(value) => Some(value.to_owned()),
            Err(_) => {
                warn!("Authorization header is not valid UTF-8");
                return unauthenticated(&AuthError::InvalidHeader);
            }
        },
        None => None,
    };

    match resolve_bearer_user(header.as_deref(), state.codec.as_ref(), state.users.as_ref()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(AuthError::Directory(reason)) => {
            // Directory outage is a server fault, not a caller fault
            error!("User lookup failed during authentication: {}", reason);
            ErrorResponse::internal_error().into_response()
        }
        Err(err) => unauthenticated(&err),
    }
}
