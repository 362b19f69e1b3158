//! `PostgreSQL` adapters for the registry context.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresRegistryRepository, RegistryPgPool};
