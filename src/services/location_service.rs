// src/services/location_service.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::LocationRepository,
    models::location::{LocationDto, NewLocation},
    services::authorization::can_modify_location,
};

/// Quem está fazendo a requisição (identificador do token + cargos).
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    pub id: Option<&'a str>,
    pub roles: &'a [String],
}

#[derive(Clone)]
pub struct LocationService {
    repo: Arc<dyn LocationRepository>,
}

impl LocationService {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_locations(&self) -> Result<Vec<LocationDto>, AppError> {
        let locations = self.repo.list().await?;
        Ok(locations.into_iter().map(LocationDto::from).collect())
    }

    pub async fn get_location(&self, id: i32) -> Result<LocationDto, AppError> {
        self.repo
            .get_by_id(id)
            .await?
            .map(LocationDto::from)
            .ok_or(AppError::NotFound)
    }

    /// A exigência de Admin fica na rota; aqui só a validação.
    pub async fn create_location(&self, dto: LocationDto) -> Result<LocationDto, AppError> {
        dto.validate()?;

        let created = self.repo.add(NewLocation::from(dto)).await?;
        tracing::info!("Location {} created", created.id);

        Ok(created.into())
    }

    // Ordem das checagens: validação, existência, autorização.
    pub async fn update_location(
        &self,
        caller: Caller<'_>,
        id: i32,
        dto: LocationDto,
    ) -> Result<LocationDto, AppError> {
        dto.validate()?;

        let mut location = self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)?;

        if !can_modify_location(caller.id, caller.roles, &location).is_permit() {
            tracing::warn!("Caller {:?} denied update of location {}", caller.id, id);
            return Err(AppError::Forbidden);
        }

        location.apply(NewLocation::from(dto));

        let updated = self
            .repo
            .update(&location)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(updated.into())
    }

    pub async fn delete_location(&self, caller: Caller<'_>, id: i32) -> Result<(), AppError> {
        let location = self.repo.get_by_id(id).await?.ok_or(AppError::NotFound)?;

        if !can_modify_location(caller.id, caller.roles, &location).is_permit() {
            tracing::warn!("Caller {:?} denied delete of location {}", caller.id, id);
            return Err(AppError::Forbidden);
        }

        if !self.repo.remove(id).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!("Location {} deleted", id);
        Ok(())
    }
}
