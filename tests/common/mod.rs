#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use locations_api::{
    create_router,
    db::{InMemoryLocationRepository, InMemoryUserRepository, UserRepository},
    models::auth::User,
    AppState, Config,
};

pub fn test_config() -> Config {
    Config {
        database_url: None,
        db_max_connections: 1,
        jwt_secret: "integration-secret".into(),
        bind_address: "127.0.0.1:0".into(),
        token_ttl_hours: 1,
        bcrypt_cost: 4,
        static_dir: "wwwroot".into(),
        seed_admin: None,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A API inteira em memória, chamada sem abrir socket.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let state = AppState::from_repositories(
            test_config(),
            Arc::new(InMemoryLocationRepository::new()),
            users.clone(),
        );
        let router = create_router(state.clone());
        Self { router, state, users }
    }

    /// Token para um id arbitrário, sem conta no repositório.
    pub fn token_for_id(&self, id: i32, roles: &[&str]) -> String {
        let user = User {
            id,
            user_name: format!("user{id}"),
            password_hash: String::new(),
        };
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        self.state.auth_service.create_token(&user, &roles).unwrap()
    }

    /// Cria a conta de verdade (senha "pw") e devolve (id, token).
    pub async fn register(&self, user_name: &str, roles: &[&str]) -> (i32, String) {
        let hash = self.state.auth_service.hash_password("pw").await.unwrap();
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        let user = self.users.create_user(user_name, &hash, &roles).await.unwrap();
        let token = self.state.auth_service.create_token(&user, &roles).unwrap();
        (user.id, token)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, headers, body }
    }
}
