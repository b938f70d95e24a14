// src/models/location.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---
// Location (O "Local")
// ---
// Restaurante/ponto físico. `manager_id` aponta para o usuário responsável,
// mas não é chave estrangeira: serve apenas para autorização.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub table_count: i32,
    pub manager_id: Option<i32>,
}

/// Dados de um local ainda não persistido (sem id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub table_count: i32,
    pub manager_id: Option<i32>,
}

// O formato público (entrada e saída da API)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    // Ignorado na entrada: o id vem do banco (POST) ou da rota (PUT).
    #[serde(default)]
    pub id: i32,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub address: String,

    // Ausente vale 0 e cai na regra abaixo, em vez de falhar na desserialização.
    #[validate(range(min = 1, message = "Table count must be at least 1."))]
    #[serde(default)]
    pub table_count: i32,

    #[serde(default)]
    pub manager_id: Option<i32>,
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            address: location.address,
            table_count: location.table_count,
            manager_id: location.manager_id,
        }
    }
}

impl From<LocationDto> for NewLocation {
    fn from(dto: LocationDto) -> Self {
        Self {
            name: dto.name,
            address: dto.address,
            table_count: dto.table_count,
            manager_id: dto.manager_id,
        }
    }
}

impl Location {
    /// Sobrescreve todos os campos mutáveis (o id é preservado).
    pub fn apply(&mut self, changes: NewLocation) {
        self.name = changes.name;
        self.address = changes.address;
        self.table_count = changes.table_count;
        self.manager_id = changes.manager_id;
    }
}
