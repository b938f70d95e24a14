//! API de locais (restaurantes) e provisionamento de usuários.
//!
//! Camadas: `handlers` (HTTP) → `services` (regras) → `db` (repositórios).

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::{AppState, Config};
pub use routes::create_router;
