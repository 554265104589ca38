//! Session token handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;
use tracing::info;

use crate::{error::ApiResult, models::MessageResponse, state::AppState};

/// Sign the posted payload and hand it back as the session cookie
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let token = state.token_service.issue(&payload)?;

    info!(
        "Issued session token valid for {}s",
        state.token_service.expiry()
    );

    let jar = jar.add(state.cookie_policy.session_cookie(token));
    Ok((jar, Json(MessageResponse::success())))
}

/// Clear the session cookie. Succeeds whether or not the caller had one.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(state.cookie_policy.removal_cookie());
    (jar, Json(MessageResponse::success()))
}
