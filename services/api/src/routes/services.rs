//! Service listing handlers

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
    error::ApiResult,
    middleware::Session,
    models::service::{ServiceQuery, UpdateServiceRequest},
    state::AppState,
};

/// List services, optionally filtered by name and provider email
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> ApiResult<impl IntoResponse> {
    let services = state.service_repository.list(&query).await?;

    Ok(Json(services))
}

/// Get a service by ID; responds with `null` when it does not exist
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let service = state.service_repository.find_by_id(id).await?;

    Ok(Json(service))
}

/// Create a service from the posted document
pub async fn create_service(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let service = json_object(payload)?;
    let result = state.service_repository.create(service).await?;

    info!(
        "Service {} created by {}",
        result.inserted_id,
        session.email().unwrap_or("<anonymous>")
    );

    Ok((StatusCode::CREATED, Json(result)))
}

/// Overwrite all listing fields of a service, creating it if needed
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateServiceRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let fields = request.into_fields();

    let result = state
        .service_repository
        .update_or_create(id, fields)
        .await?;

    if result.upserted_id.is_some() {
        info!("Service {} did not exist and was created by update", id);
    }

    Ok(Json(result))
}

/// Delete a service; deleting a missing service is not an error
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let result = state.service_repository.delete(id).await?;

    info!("Delete of service {} removed {} document(s)", id, result.deleted_count);

    Ok(Json(result))
}
