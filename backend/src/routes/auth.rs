//! Authentication routes
//!
//! Signup and login each answer with a fresh session token; `/homepage`
//! is the protected resource behind [`auth_middleware`](crate::auth::auth_middleware).

use crate::auth::AuthUser;
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Extension, Json, Router};
use sessiongate_shared::types::{HomepageResponse, LoginRequest, RegisterRequest, TokenResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new user and issue their first token
///
/// POST /signup
async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let user = state
        .credentials()
        .register(&req.username, &req.email, &req.password)
        .await?;
    let token = state.tokens().issue(user.id, &user.username)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Log in with username and password
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state.credentials().verify(&req.username, &req.password).await?;
    let token = state.tokens().issue(user.id, &user.username)?;
    Ok(Json(TokenResponse { token }))
}

/// Protected dashboard resource
///
/// GET /homepage
pub(super) async fn homepage(Extension(user): Extension<AuthUser>) -> Json<HomepageResponse> {
    Json(HomepageResponse {
        message: "User can access dashboard".to_string(),
        user: user.claims,
    })
}
