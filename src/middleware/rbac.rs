// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::CurrentUser,
    models::auth::ROLE_ADMIN,
};

/// 1. O Trait que define um cargo exigido por uma rota
pub trait RoleDef: Send + Sync + 'static {
    fn name() -> &'static str;
}

/// 2. O Extractor (Guardião): 401 sem identidade, 403 sem o cargo
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::Unauthorized)?;

        let required_role = T::name();

        if !user.is_in_role(required_role) {
            tracing::warn!(
                "User {} lacks role '{}' required by {}",
                user.subject,
                required_role,
                parts.uri.path()
            );
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS CARGOS (TIPOS)
// ---

pub struct AdminRole;
impl RoleDef for AdminRole {
    fn name() -> &'static str { ROLE_ADMIN }
}
