pub mod auth;
pub mod authorization;
pub mod location_service;
pub mod user_service;
