// src/db/location_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::location::{Location, NewLocation},
};

/// Acesso à tabela de locais, independente do mecanismo de armazenamento.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Todos os locais, em ordem de id.
    async fn list(&self) -> Result<Vec<Location>, AppError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Location>, AppError>;

    /// Persiste um novo local e devolve-o com o id gerado.
    async fn add(&self, location: NewLocation) -> Result<Location, AppError>;

    /// Sobrescreve o registro. `None` se ele não existir mais.
    async fn update(&self, location: &Location) -> Result<Option<Location>, AppError>;

    /// `true` se algo foi removido.
    async fn remove(&self, id: i32) -> Result<bool, AppError>;
}

// O repositório de locais no Postgres
#[derive(Clone)]
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    async fn list(&self) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, name, address, table_count, manager_id FROM locations ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Location>, AppError> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, address, table_count, manager_id FROM locations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    async fn add(&self, location: NewLocation) -> Result<Location, AppError> {
        let created = sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (name, address, table_count, manager_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, address, table_count, manager_id
            "#,
        )
        .bind(&location.name)
        .bind(&location.address)
        .bind(location.table_count)
        .bind(location.manager_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, location: &Location) -> Result<Option<Location>, AppError> {
        let updated = sqlx::query_as::<_, Location>(
            r#"
            UPDATE locations
            SET name = $2, address = $3, table_count = $4, manager_id = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, address, table_count, manager_id
            "#,
        )
        .bind(location.id)
        .bind(&location.name)
        .bind(&location.address)
        .bind(location.table_count)
        .bind(location.manager_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn remove(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
