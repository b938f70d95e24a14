// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    body::Body,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization, HeaderMapExt},
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::Claims,
    services::{authorization::has_role, location_service::Caller},
};

// Nome do cookie que carrega o JWT
pub const AUTH_COOKIE: &str = "auth_token";

/// Identidade extraída de um token válido.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Claim `sub` como veio no token (texto).
    pub subject: String,
    pub user_name: String,
    pub roles: Vec<String>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            user_name: claims.name,
            roles: claims.roles,
        }
    }
}

impl CurrentUser {
    pub fn user_id(&self) -> Option<i32> {
        self.subject.parse().ok()
    }

    pub fn is_in_role(&self, role: &str) -> bool {
        has_role(&self.roles, role)
    }

    pub fn caller(&self) -> Caller<'_> {
        Caller {
            id: Some(self.subject.as_str()),
            roles: &self.roles,
        }
    }
}

// Header Authorization primeiro, depois o cookie.
fn token_from_request(request: &Request<Body>) -> Option<String> {
    if let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(request.headers())
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

// O middleware em si. Nunca rejeita: sem token válido a requisição segue
// anônima e os extratores abaixo decidem.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = token_from_request(&request) {
        match app_state.auth_service.validate_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(CurrentUser::from(claims));
            }
            Err(e) => tracing::debug!("Ignoring invalid token: {}", e),
        }
    }

    next.run(request).await
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthorized)
    }
}
