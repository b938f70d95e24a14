// src/handlers/locations.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminRole, RequireRole},
    },
    models::location::LocationDto,
};

// GET /api/locations
pub async fn list_locations(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<LocationDto>>, AppError> {
    let locations = app_state.location_service.list_locations().await?;
    Ok(Json(locations))
}

// GET /api/locations/{id}
pub async fn get_location(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<LocationDto>, AppError> {
    let location = app_state.location_service.get_location(id).await?;
    Ok(Json(location))
}

// POST /api/locations (somente Admin)
pub async fn create_location(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    WithRejection(Json(payload), _): WithRejection<Json<LocationDto>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let created = app_state.location_service.create_location(payload).await?;
    let location_header = format!("/api/locations/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location_header)],
        Json(created),
    ))
}

// PUT /api/locations/{id} (gerente do local ou Admin)
pub async fn update_location(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<LocationDto>, AppError>,
) -> Result<Json<LocationDto>, AppError> {
    let updated = app_state
        .location_service
        .update_location(user.caller(), id, payload)
        .await?;
    Ok(Json(updated))
}

// DELETE /api/locations/{id} (gerente do local ou Admin)
pub async fn delete_location(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    app_state
        .location_service
        .delete_location(user.caller(), id)
        .await?;
    Ok(StatusCode::OK)
}
