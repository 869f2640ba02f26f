//! Authentication middleware
//!
//! Guards routes behind a valid session token. A request without a token is
//! answered with 401; a bad or expired token with 403.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use sessiongate_shared::SessionClaims;

/// Authenticated user attached to the request by [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: SessionClaims,
}

/// Pull the token out of an `Authorization: Bearer <token>` header
///
/// The scheme word is not checked: whatever follows the first space is the
/// token. No header, or nothing after the space, yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

/// Middleware that validates the bearer token and attaches [`AuthUser`]
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = state.tokens().validate(bearer_token(request.headers()))?;

    request.extensions_mut().insert(AuthUser { claims });

    Ok(next.run(request).await)
}
