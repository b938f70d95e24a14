// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{config::AppState, handlers, middleware::auth::auth_middleware};

pub fn create_router(app_state: AppState) -> Router {
    let location_routes = Router::new()
        .route(
            "/api/locations",
            get(handlers::locations::list_locations).post(handlers::locations::create_location),
        )
        .route(
            "/api/locations/{id}",
            get(handlers::locations::get_location)
                .put(handlers::locations::update_location)
                .delete(handlers::locations::delete_location),
        );

    let user_routes = Router::new().route("/api/users", post(handlers::users::create_user));

    let auth_routes = Router::new()
        .route("/api/authentication/login", post(handlers::auth::login))
        .route("/api/authentication/me", get(handlers::auth::get_me))
        .route("/api/authentication/logout", post(handlers::auth::logout));

    // O front-end compilado (SPA): arquivos estáticos com index.html como fallback
    let static_dir = app_state.config.static_dir.clone();
    let spa = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", static_dir)));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(location_routes)
        .merge(user_routes)
        .merge(auth_routes)
        .fallback_service(spa)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
