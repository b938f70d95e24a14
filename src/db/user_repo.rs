// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{common::error::AppError, models::auth::User};

/// Armazenamento de usuários e cargos (o "subsistema de identidade").
/// Nomes de usuário e de cargo são comparados sem diferenciar maiúsculas.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, AppError>;

    /// Nomes dos cargos do usuário, em ordem alfabética.
    async fn get_roles(&self, user_id: i32) -> Result<Vec<String>, AppError>;

    async fn role_exists(&self, name: &str) -> Result<bool, AppError>;

    /// Cria a conta e vincula os cargos atomicamente. Os cargos já devem
    /// existir. Nome duplicado vira `AppError::IdentityErrors`.
    async fn create_user(
        &self,
        user_name: &str,
        password_hash: &str,
        roles: &[String],
    ) -> Result<User, AppError>;
}

pub(crate) fn duplicate_user_name(user_name: &str) -> AppError {
    AppError::IdentityErrors(vec![format!("Username '{}' is already taken.", user_name)])
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, user_name, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, user_name, password_hash FROM users WHERE UPPER(user_name) = UPPER($1)",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    async fn get_roles(&self, user_id: i32) -> Result<Vec<String>, AppError> {
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn role_exists(&self, name: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM roles WHERE UPPER(name) = UPPER($1))",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create_user(
        &self,
        user_name: &str,
        password_hash: &str,
        roles: &[String],
    ) -> Result<User, AppError> {
        // Usuário e vínculos entram juntos ou não entram.
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, password_hash)
            VALUES ($1, $2)
            RETURNING id, user_name, password_hash
            "#,
        )
        .bind(user_name)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return duplicate_user_name(user_name);
                }
            }
            e.into()
        })?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, r.id
            FROM roles r
            WHERE UPPER(r.name) IN (SELECT UPPER(x) FROM UNNEST($2::text[]) AS x)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user.id)
        .bind(roles)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }
}
