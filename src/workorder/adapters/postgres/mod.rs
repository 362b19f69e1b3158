//! `PostgreSQL` adapters for the work-order context.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresWorkOrderRepository, WorkOrderPgPool};
