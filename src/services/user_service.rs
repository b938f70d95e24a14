// src/services/user_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{CreateUserPayload, UserDto},
    services::auth::AuthService,
};

// Caracteres aceitos em nomes de usuário, além de letras e dígitos
const ALLOWED_USER_NAME_SYMBOLS: &str = "-._@+";

#[derive(Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    auth_service: AuthService,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, auth_service: AuthService) -> Self {
        Self {
            user_repo,
            auth_service,
        }
    }

    /// Cria uma conta com os cargos pedidos. Todos os cargos são conferidos
    /// antes de qualquer escrita; a conta e os vínculos são gravados juntos.
    pub async fn create_user(&self, mut payload: CreateUserPayload) -> Result<UserDto, AppError> {
        payload.validate()?;
        payload.roles = dedup_roles(payload.roles);

        for role in &payload.roles {
            if !self.user_repo.role_exists(role).await? {
                return Err(AppError::BadRequest(format!(
                    "Role '{}' does not exist.",
                    role
                )));
            }
        }

        let identity_errors = check_user_name(&payload.user_name);
        if !identity_errors.is_empty() {
            return Err(AppError::IdentityErrors(identity_errors));
        }

        let password_hash = self.auth_service.hash_password(&payload.password).await?;
        let user = self
            .user_repo
            .create_user(&payload.user_name, &password_hash, &payload.roles)
            .await?;

        tracing::info!("Created user {} ({})", user.id, user.user_name);

        Ok(UserDto {
            id: user.id,
            user_name: user.user_name,
            roles: payload.roles,
        })
    }
}

// Cargos repetidos (sem diferenciar maiúsculas) viram um só; vale a primeira grafia.
fn dedup_roles(roles: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(roles.len());
    for role in roles {
        if !unique.iter().any(|r| r.eq_ignore_ascii_case(&role)) {
            unique.push(role);
        }
    }
    unique
}

fn check_user_name(user_name: &str) -> Vec<String> {
    let valid = user_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || ALLOWED_USER_NAME_SYMBOLS.contains(c));

    if valid {
        Vec::new()
    } else {
        vec![format!(
            "Username '{}' is invalid, can only contain letters or digits.",
            user_name
        )]
    }
}
