//! Diesel row models for registry persistence.

use super::schema::{clients, engineers, projects, station_clients, station_projects, stations};
use chrono::NaiveDate;
use diesel::prelude::*;

/// Row model for project records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// User who last modified the record.
    pub modifier_user: uuid::Uuid,
    /// Soft-delete flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}

/// Row model for client records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientRow {
    /// Client identifier.
    pub id: uuid::Uuid,
    /// Client name.
    pub name: String,
    /// Landline number.
    pub phone: Option<String>,
    /// Mobile number.
    pub cell_phone: Option<String>,
    /// E-mail address.
    pub email: String,
    /// Soft-delete flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}

/// Row model for engineer records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = engineers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EngineerRow {
    /// Engineer identifier.
    pub id: uuid::Uuid,
    /// Identity-provider reference.
    pub identity: uuid::Uuid,
    /// Identification number.
    pub identification: Option<String>,
    /// Contact phone number.
    pub phone: String,
    /// Soft-delete flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}

/// Row model for station records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = stations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StationRow {
    /// Station identifier.
    pub id: uuid::Uuid,
    /// Internal identification code.
    pub id_intern: String,
    /// Station name.
    pub name: String,
    /// Maintenance frequency in months.
    pub maintenance_frequency_months: i32,
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
    /// Pipeline system code.
    pub system: String,
    /// Site owner's phone number.
    pub owner_phone: Option<String>,
    /// User who last modified the record.
    pub modifier_user: uuid::Uuid,
    /// Soft-delete flag.
    pub active: bool,
    /// Date of first persistence.
    pub created_at: NaiveDate,
    /// Date of last modification.
    pub update_at: NaiveDate,
}

/// Row model for station-to-project association rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = station_projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StationProjectRow {
    /// Owning station.
    pub station_id: uuid::Uuid,
    /// Associated project.
    pub project_id: uuid::Uuid,
}

/// Row model for station-to-client association rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = station_clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StationClientRow {
    /// Owning station.
    pub station_id: uuid::Uuid,
    /// Associated client.
    pub client_id: uuid::Uuid,
}
