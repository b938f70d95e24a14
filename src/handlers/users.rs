// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::CreateUserPayload,
};

// POST /api/users (qualquer usuário autenticado)
pub async fn create_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(caller): AuthenticatedUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateUserPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("User {} is creating account '{}'", caller.subject, payload.user_name);

    let new_user = app_state.user_service.create_user(payload).await?;

    Ok((StatusCode::CREATED, Json(new_user)))
}
