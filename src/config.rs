// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{
        InMemoryLocationRepository, InMemoryUserRepository, LocationRepository,
        PgLocationRepository, PgUserRepository, UserRepository,
    },
    services::{auth::AuthService, location_service::LocationService, user_service::UserService},
};

// Configurações lidas do ambiente (.env é carregado antes)
#[derive(Debug, Clone)]
pub struct Config {
    /// Sem DATABASE_URL a API roda com os repositórios em memória.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub bind_address: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub static_dir: String,
    pub seed_admin: Option<(String, String)>,
}

impl Config {
    // O `.env` já foi carregado em `main`.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let seed_admin = match (
            env::var("SEED_ADMIN_USERNAME").ok(),
            env::var("SEED_ADMIN_PASSWORD").ok(),
        ) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user, password))
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            jwt_secret,
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", 24 * 7)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "wwwroot".into()),
            seed_admin,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub location_service: LocationService,
    pub user_service: UserService,
}

impl AppState {
    /// Conecta ao Postgres (rodando as migrações) ou, sem DATABASE_URL,
    /// monta tudo em memória.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let Some(database_url) = config.database_url.clone() else {
            tracing::warn!("DATABASE_URL not set, using in-memory repositories");
            return Ok(Self::in_memory(config));
        };

        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!("✅ Database connection established");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("failed to run database migrations")?;

        tracing::info!("✅ Database migrations applied");

        Ok(Self::from_repositories(
            config,
            Arc::new(PgLocationRepository::new(db_pool.clone())),
            Arc::new(PgUserRepository::new(db_pool)),
        ))
    }

    pub fn in_memory(config: Config) -> Self {
        Self::from_repositories(
            config,
            Arc::new(InMemoryLocationRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_repositories(
        config: Config,
        location_repo: Arc<dyn LocationRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.token_ttl_hours),
            config.bcrypt_cost,
        );
        let user_service = UserService::new(user_repo, auth_service.clone());
        let location_service = LocationService::new(location_repo);

        Self {
            config: Arc::new(config),
            auth_service,
            location_service,
            user_service,
        }
    }
}
