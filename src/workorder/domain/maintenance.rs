//! Maintenance records derived from service orders.

use super::{MaintenanceId, ParseMaintenanceTypeError, ServiceOrderId};
use crate::record::{RecordState, Timestamps};
use crate::registry::domain::MaintenanceFrequency;
use chrono::{Duration, NaiveDate};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Kind of maintenance performed during a service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    /// Scheduled preventive maintenance.
    Preventive,
    /// Unscheduled corrective maintenance.
    Corrective,
}

impl MaintenanceType {
    /// Returns the canonical storage code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Preventive => "P",
            Self::Corrective => "C",
        }
    }
}

impl Default for MaintenanceType {
    fn default() -> Self {
        Self::Preventive
    }
}

impl TryFrom<&str> for MaintenanceType {
    type Error = ParseMaintenanceTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "P" => Ok(Self::Preventive),
            "C" => Ok(Self::Corrective),
            _ => Err(ParseMaintenanceTypeError(value.to_owned())),
        }
    }
}

/// Computes the next maintenance due date from an execution date and the
/// station's maintenance frequency.
///
/// Each frequency month contributes a flat thirty days; the calculation is
/// calendar-agnostic on purpose so that due dates stay evenly spaced.
#[must_use]
pub fn next_due_date(execution_date: NaiveDate, frequency: MaintenanceFrequency) -> NaiveDate {
    execution_date + Duration::days(i64::from(frequency.months()) * 30)
}

/// Maintenance aggregate root, one-to-one with its service order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenance {
    id: MaintenanceId,
    service_order: ServiceOrderId,
    type_maintenance: MaintenanceType,
    next_maintenance: Option<NaiveDate>,
    state: RecordState,
    stamps: Timestamps,
}

/// Parameter object for reconstructing a persisted maintenance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMaintenanceData {
    /// Persisted maintenance identifier.
    pub id: MaintenanceId,
    /// Persisted service-order reference.
    pub service_order: ServiceOrderId,
    /// Persisted maintenance type.
    pub type_maintenance: MaintenanceType,
    /// Persisted next due date, if scheduled.
    pub next_maintenance: Option<NaiveDate>,
    /// Persisted soft-delete state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

impl Maintenance {
    /// Creates a new maintenance record for a service order.
    ///
    /// The next due date starts unscheduled; the scheduling service fills
    /// it in from the station's maintenance frequency.
    #[must_use]
    pub fn new(
        service_order: ServiceOrderId,
        type_maintenance: MaintenanceType,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: MaintenanceId::new(),
            service_order,
            type_maintenance,
            next_maintenance: None,
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        }
    }

    /// Reconstructs a maintenance record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMaintenanceData) -> Self {
        Self {
            id: data.id,
            service_order: data.service_order,
            type_maintenance: data.type_maintenance,
            next_maintenance: data.next_maintenance,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the maintenance identifier.
    #[must_use]
    pub const fn id(&self) -> MaintenanceId {
        self.id
    }

    /// Returns the service order this record belongs to.
    #[must_use]
    pub const fn service_order(&self) -> ServiceOrderId {
        self.service_order
    }

    /// Returns the maintenance type.
    #[must_use]
    pub const fn type_maintenance(&self) -> MaintenanceType {
        self.type_maintenance
    }

    /// Returns the next due date, if scheduled.
    #[must_use]
    pub const fn next_maintenance(&self) -> Option<NaiveDate> {
        self.next_maintenance
    }

    /// Returns the soft-delete state.
    #[must_use]
    pub const fn state(&self) -> RecordState {
        self.state
    }

    /// Returns the date of first persistence.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDate {
        self.stamps.created_at()
    }

    /// Returns the date of the last modification.
    #[must_use]
    pub const fn update_at(&self) -> NaiveDate {
        self.stamps.update_at()
    }

    /// Returns the timestamp pair.
    #[must_use]
    pub const fn stamps(&self) -> Timestamps {
        self.stamps
    }

    /// Reclassifies the maintenance type.
    pub fn reclassify(&mut self, type_maintenance: MaintenanceType, clock: &impl Clock) {
        self.type_maintenance = type_maintenance;
        self.stamps.touch(clock);
    }

    /// Records the computed next due date.
    pub fn schedule_next(&mut self, next_maintenance: NaiveDate, clock: &impl Clock) {
        self.next_maintenance = Some(next_maintenance);
        self.stamps.touch(clock);
    }

    /// Soft deletes the maintenance record.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Restores a soft-deleted maintenance record.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }
}
