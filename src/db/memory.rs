// src/db/memory.rs
//
// Implementações em memória dos repositórios. Usadas nos testes e para rodar
// a API localmente sem Postgres (DATABASE_URL ausente).

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::{
        location_repo::LocationRepository,
        user_repo::{duplicate_user_name, UserRepository},
    },
    models::{
        auth::{User, ROLE_ADMIN, ROLE_USER},
        location::{Location, NewLocation},
    },
};

#[derive(Default)]
struct LocationTable {
    rows: BTreeMap<i32, Location>,
    last_id: i32,
}

#[derive(Default)]
pub struct InMemoryLocationRepository {
    table: RwLock<LocationTable>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn list(&self) -> Result<Vec<Location>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Location>, AppError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn add(&self, location: NewLocation) -> Result<Location, AppError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let created = Location {
            id: table.last_id,
            name: location.name,
            address: location.address,
            table_count: location.table_count,
            manager_id: location.manager_id,
        };
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, location: &Location) -> Result<Option<Location>, AppError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&location.id) {
            Some(row) => {
                *row = location.clone();
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: i32) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[derive(Default)]
struct IdentityTables {
    users: BTreeMap<i32, User>,
    roles: Vec<String>,
    user_roles: BTreeMap<i32, Vec<String>>,
    last_id: i32,
}

impl IdentityTables {
    fn canonical_role(&self, name: &str) -> Option<&String> {
        self.roles.iter().find(|r| r.eq_ignore_ascii_case(name))
    }
}

pub struct InMemoryUserRepository {
    tables: RwLock<IdentityTables>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Já vem com os cargos padrão, como a migração do Postgres.
    pub fn new() -> Self {
        Self::with_roles([ROLE_ADMIN, ROLE_USER])
    }

    pub fn with_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tables = IdentityTables {
            roles: roles.into_iter().map(Into::into).collect(),
            ..Default::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.user_name.eq_ignore_ascii_case(user_name))
            .cloned())
    }

    async fn get_roles(&self, user_id: i32) -> Result<Vec<String>, AppError> {
        let tables = self.tables.read().await;
        let mut roles = tables.user_roles.get(&user_id).cloned().unwrap_or_default();
        roles.sort();
        Ok(roles)
    }

    async fn role_exists(&self, name: &str) -> Result<bool, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.canonical_role(name).is_some())
    }

    async fn create_user(
        &self,
        user_name: &str,
        password_hash: &str,
        roles: &[String],
    ) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables
            .users
            .values()
            .any(|u| u.user_name.eq_ignore_ascii_case(user_name))
        {
            return Err(duplicate_user_name(user_name));
        }

        let mut assigned: Vec<String> = Vec::new();
        for role in roles {
            if let Some(canonical) = tables.canonical_role(role) {
                if !assigned.contains(canonical) {
                    assigned.push(canonical.clone());
                }
            }
        }

        tables.last_id += 1;
        let user = User {
            id: tables.last_id,
            user_name: user_name.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        tables.user_roles.insert(user.id, assigned);

        Ok(user)
    }
}
