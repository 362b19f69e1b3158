//! Diesel row models for telemetry persistence.

use super::schema::{data_plans, davis_stations};
use chrono::NaiveDate;
use diesel::prelude::*;

/// Row model for data-plan records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = data_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DataPlanRow {
    /// Plan identifier.
    pub id: uuid::Uuid,
    /// Plan code.
    pub code: String,
    /// Carrier reference.
    pub reference: String,
    /// Start date of the validity window.
    pub start_date: NaiveDate,
    /// Expiry date, if computed.
    pub expire: Option<NaiveDate>,
    /// Soft-delete flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}

/// Row model for station-device link records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = davis_stations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DavisStationRow {
    /// Link identifier.
    pub id: uuid::Uuid,
    /// Station the device is installed at.
    pub station_id: uuid::Uuid,
    /// Data plan the device transmits over.
    pub plan_id: uuid::Uuid,
    /// Device name.
    pub name: String,
    /// Device identifier.
    pub did: String,
    /// Device api key.
    pub key: String,
    /// Additional firmware field.
    pub af: Option<String>,
    /// Installation observation.
    pub observation: String,
    /// User who last modified the record.
    pub modifier_user: uuid::Uuid,
    /// Soft-delete flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}
