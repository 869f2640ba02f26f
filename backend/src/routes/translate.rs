//! Translation route
//!
//! POST /translate, open to unauthenticated callers.

use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;
use axum::{extract::State, Json};
use sessiongate_shared::types::{TranslateRequest, TranslateResponse};

pub(super) async fn translate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    let translation = state.translator().translate(&req.text_to_translate).await?;
    Ok(Json(TranslateResponse { translation }))
}
