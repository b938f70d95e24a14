// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo JSON ilegível ou com tipos errados
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    // Regra de negócio violada (ex.: cargo inexistente)
    #[error("{0}")]
    BadRequest(String),

    // Falhas reportadas pelo subsistema de identidade (ex.: nome duplicado)
    #[error("Identity errors: {0:?}")]
    IdentityErrors(Vec<String>),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(camel_case(&field), messages);
                }

                // Com uma única mensagem, ela mesma vira o erro principal.
                let mut all = details.values().flatten();
                let error = match (all.next(), all.next()) {
                    (Some(only), None) => only.clone(),
                    _ => "One or more fields are invalid.".to_string(),
                };

                let body = Json(json!({
                    "error": error,
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::IdentityErrors(descriptions) => {
                let body = Json(json!({
                    "error": "The identity store rejected the user.",
                    "details": descriptions,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidBody(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                let body = Json(json!({
                    "error": "The request body is invalid.",
                    "details": [rejection.body_text()],
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password.".to_string(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required.".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You are not allowed to modify this resource.".to_string(),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found.".to_string()),

            // Todos os outros erros (banco, hashing, JWT, interno) viram 500.
            ref e => {
                tracing::error!("Internal server error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// Os campos chegam com o nome Rust (`user_name`); o JSON da API usa camelCase.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
