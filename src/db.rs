pub mod location_repo;
pub use location_repo::{LocationRepository, PgLocationRepository};
pub mod user_repo;
pub use user_repo::{PgUserRepository, UserRepository};
pub mod memory;
pub use memory::{InMemoryLocationRepository, InMemoryUserRepository};
