//! Diesel row models for work-order persistence.

use super::schema::{maintenance, service_orders};
use chrono::NaiveDate;
use diesel::prelude::*;

/// Row model for service-order records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = service_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceOrderRow {
    /// Order identifier.
    pub id: uuid::Uuid,
    /// Sequence-assigned ticket number.
    pub ticket: i32,
    /// Station the work is executed at.
    pub station_id: uuid::Uuid,
    /// Engineer responsible for the work.
    pub engineer_id: uuid::Uuid,
    /// Author name.
    pub author: String,
    /// Execution date.
    pub execution_date: NaiveDate,
    /// Service description.
    pub service_description: String,
    /// Free-form observation.
    pub observation: Option<String>,
    /// Open flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}

/// Row model for maintenance records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = maintenance)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MaintenanceRow {
    /// Maintenance identifier.
    pub id: uuid::Uuid,
    /// Owning service order.
    pub service_order_id: uuid::Uuid,
    /// Maintenance type code.
    pub type_maintenance: String,
    /// Next due date, if scheduled.
    pub next_maintenance: Option<NaiveDate>,
    /// Soft-delete flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}

/// Row model for a ticket-sequence draw.
#[derive(Debug, QueryableByName)]
pub struct TicketSequenceRow {
    /// Next value of the ticket sequence.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub value: i64,
}
