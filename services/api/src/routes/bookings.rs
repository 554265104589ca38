//! Booking handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::info;

use super::{json_object, parse_id};
use crate::{
    error::{ApiError, ApiResult},
    middleware::Session,
    models::booking::{BookingQuery, UpdateBookingStatusRequest, prepare_new_booking},
    state::AppState,
};

/// List bookings by user and/or provider email
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> ApiResult<impl IntoResponse> {
    let bookings = state.booking_repository.list_for_user(&query).await?;

    Ok(Json(bookings))
}

/// Create a booking from the posted document
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let booking = prepare_new_booking(json_object(payload)?).map_err(ApiError::BadRequest)?;
    let result = state.booking_repository.create(booking).await?;

    info!(
        "Booking {} created by {}",
        result.inserted_id,
        session.email().unwrap_or("<anonymous>")
    );

    Ok((StatusCode::CREATED, Json(result)))
}

/// Set the status of a booking
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookingStatusRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let status = request.status().map_err(ApiError::BadRequest)?;

    let result = state.booking_repository.update_status(id, status).await?;

    info!("Booking {} status set to {}", id, status);

    Ok(Json(result))
}
