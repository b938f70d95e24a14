// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User, UserDto, ROLE_ADMIN},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl: chrono::Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: String,
        token_ttl: chrono::Duration,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret,
            token_ttl,
            bcrypt_cost,
        }
    }

    /// Gera o hash bcrypt fora do runtime assíncrono.
    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))??;
        Ok(hashed)
    }

    pub async fn login_user(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<(String, UserDto), AppError> {
        let user = self
            .user_repo
            .find_by_user_name(user_name)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            tracing::debug!("Failed login for '{}'", user_name);
            return Err(AppError::InvalidCredentials);
        }

        let roles = self.user_repo.get_roles(user.id).await?;
        let token = self.create_token(&user, &roles)?;

        tracing::info!("User {} logged in", user.id);
        Ok((
            token,
            UserDto {
                id: user.id,
                user_name: user.user_name,
                roles,
            },
        ))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn create_token(&self, user: &User, roles: &[String]) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.user_name.clone(),
            roles: roles.to_vec(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    /// Dados atuais do usuário (cargos relidos do banco, não do token).
    pub async fn current_user(&self, user_id: i32) -> Result<UserDto, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let roles = self.user_repo.get_roles(user.id).await?;

        Ok(UserDto {
            id: user.id,
            user_name: user.user_name,
            roles,
        })
    }

    /// Cria o administrador inicial, se ainda não existir.
    pub async fn seed_admin(&self, user_name: &str, password: &str) -> Result<(), AppError> {
        if self.user_repo.find_by_user_name(user_name).await?.is_some() {
            tracing::debug!("Seed admin '{}' already present", user_name);
            return Ok(());
        }

        let password_hash = self.hash_password(password).await?;
        let admin = self
            .user_repo
            .create_user(user_name, &password_hash, &[ROLE_ADMIN.to_string()])
            .await?;

        tracing::info!("✅ Seeded administrator '{}' (id {})", admin.user_name, admin.id);
        Ok(())
    }
}
