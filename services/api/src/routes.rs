//! API service routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::require_session,
    repositories::Document,
    state::AppState,
};

pub mod auth;
pub mod bookings;
pub mod services;

/// Create the router for the API service
///
/// Reads and the auth endpoints are public. Everything that writes, and the
/// per-user booking listing, sits behind the session middleware.
pub fn create_router(state: AppState) -> Router {
    let session = middleware::from_fn_with_state(state.clone(), require_session);

    let protected_routes = Router::new()
        .route("/add-service", post(services::create_service))
        .route("/user/bookings", get(bookings::list_bookings))
        .route("/user/create-booking", post(bookings::create_booking))
        .route("/user/bookings/:id", patch(bookings::update_booking_status))
        .route_layer(session.clone());

    let public_routes = Router::new()
        .route("/services", get(services::list_services))
        .route(
            "/services/:id",
            get(services::get_service).merge(
                put(services::update_service)
                    .delete(services::delete_service)
                    .route_layer(session),
            ),
        )
        .route("/auth/access-token", post(auth::issue_token))
        .route("/auth/logout", post(auth::logout));

    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_check))
        .nest("/api/v1", public_routes.merge(protected_routes))
        .fallback(not_found)
        .with_state(state)
}

pub async fn greeting() -> &'static str {
    "Hello World!"
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    state.service_repository.ping().await?;

    Ok(Json(json!({
        "status": "ok",
        "service": "ridemate-api"
    })))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Parse a path identifier, rejecting anything that is not a UUID
pub(crate) fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Unwrap a JSON body that must be an object
pub(crate) fn json_object(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Document> {
    let Json(value) = payload?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("507f1f77bcf86cd799439011"),
            Err(ApiError::InvalidId(_))
        ));
    }

    #[test]
    fn only_objects_are_accepted_as_bodies() {
        assert!(json_object(Ok(Json(json!({ "a": 1 })))).is_ok());
        assert!(matches!(
            json_object(Ok(Json(json!([1, 2])))),
            Err(ApiError::BadRequest(_))
        ));
    }
}
