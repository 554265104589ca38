//! Session middleware validating the token cookie

use auth::{Claims, TOKEN_COOKIE};
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;
use tracing::debug;

use crate::{error::ApiError, state::AppState};

/// Authenticated caller, as asserted by the token payload
#[derive(Debug, Clone)]
pub struct Session {
    pub claims: Claims,
}

impl Session {
    /// The `email` claim, when the client put one in its payload
    pub fn email(&self) -> Option<&str> {
        self.claims.get("email").and_then(Value::as_str)
    }
}

/// Reject the request with 401 unless it carries a valid `token` cookie
///
/// On success the decoded payload is available to handlers as
/// `Extension<Session>`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            debug!("No session cookie on {} {}", req.method(), req.uri().path());
            ApiError::Unauthorized
        })?;

    let claims = state.token_service.validate(token)?;

    req.extensions_mut().insert(Session { claims });

    Ok(next.run(req).await)
}
