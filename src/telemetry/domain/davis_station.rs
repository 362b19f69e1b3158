//! Davis station-device link: a telemetry device installed at a station.

use super::{DataPlanId, DavisStationId, TelemetryDomainError};
use crate::record::fields::{optional_text, required_text};
use crate::record::{RecordState, Timestamps};
use crate::registry::domain::{IdentityRef, StationId};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 20;
const MAX_DID_LENGTH: usize = 20;
const MAX_KEY_LENGTH: usize = 20;
const MAX_AF_LENGTH: usize = 15;
const MAX_OBSERVATION_LENGTH: usize = 300;

/// Davis station-device link aggregate root.
///
/// Binds a physical telemetry device (identified by its device id and api
/// key) to the monitoring station it is installed at and the data plan it
/// transmits over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DavisStation {
    id: DavisStationId,
    station: StationId,
    plan: DataPlanId,
    name: String,
    did: String,
    key: String,
    af: Option<String>,
    observation: String,
    modifier_user: IdentityRef,
    state: RecordState,
    stamps: Timestamps,
}

/// Validated field bundle for linking a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDavisStation {
    /// Station the device is installed at.
    pub station: StationId,
    /// Data plan the device transmits over.
    pub plan: DataPlanId,
    /// Device name, at most 20 characters.
    pub name: String,
    /// Device identifier, at most 20 characters.
    pub did: String,
    /// Device api key, at most 20 characters.
    pub key: String,
    /// Additional firmware field, if any, at most 15 characters.
    pub af: Option<String>,
    /// Installation observation, at most 300 characters.
    pub observation: String,
    /// User performing the write.
    pub modifier_user: IdentityRef,
}

/// Parameter object for reconstructing a persisted device link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDavisStationData {
    /// Persisted link identifier.
    pub id: DavisStationId,
    /// Persisted station reference.
    pub station: StationId,
    /// Persisted plan reference.
    pub plan: DataPlanId,
    /// Persisted device name.
    pub name: String,
    /// Persisted device identifier.
    pub did: String,
    /// Persisted device api key.
    pub key: String,
    /// Persisted firmware field, if any.
    pub af: Option<String>,
    /// Persisted observation.
    pub observation: String,
    /// Persisted modifier-user reference.
    pub modifier_user: IdentityRef,
    /// Persisted soft-delete state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

impl DavisStation {
    /// Creates a new active device link.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryDomainError::Field`] when a text field fails
    /// validation.
    pub fn new(fields: NewDavisStation, clock: &impl Clock) -> Result<Self, TelemetryDomainError> {
        Ok(Self {
            id: DavisStationId::new(),
            station: fields.station,
            plan: fields.plan,
            name: required_text("device name", MAX_NAME_LENGTH, fields.name)?,
            did: required_text("device identifier", MAX_DID_LENGTH, fields.did)?,
            key: required_text("device api key", MAX_KEY_LENGTH, fields.key)?,
            af: optional_text("device firmware field", MAX_AF_LENGTH, fields.af)?,
            observation: required_text(
                "device observation",
                MAX_OBSERVATION_LENGTH,
                fields.observation,
            )?,
            modifier_user: fields.modifier_user,
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        })
    }

    /// Reconstructs a device link from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDavisStationData) -> Self {
        Self {
            id: data.id,
            station: data.station,
            plan: data.plan,
            name: data.name,
            did: data.did,
            key: data.key,
            af: data.af,
            observation: data.observation,
            modifier_user: data.modifier_user,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the link identifier.
    #[must_use]
    pub const fn id(&self) -> DavisStationId {
        self.id
    }

    /// Returns the station the device is installed at.
    #[must_use]
    pub const fn station(&self) -> StationId {
        self.station
    }

    /// Returns the data plan the device transmits over.
    #[must_use]
    pub const fn plan(&self) -> DataPlanId {
        self.plan
    }

    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn did(&self) -> &str {
        &self.did
    }

    /// Returns the device api key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the firmware field, if any.
    #[must_use]
    pub fn af(&self) -> Option<&str> {
        self.af.as_deref()
    }

    /// Returns the installation observation.
    #[must_use]
    pub fn observation(&self) -> &str {
        &self.observation
    }

    /// Returns the user who last modified the record.
    #[must_use]
    pub const fn modifier_user(&self) -> IdentityRef {
        self.modifier_user
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

    /// Moves the device onto another data plan.
    pub fn switch_plan(&mut self, plan: DataPlanId, modifier_user: IdentityRef, clock: &impl Clock) {
        self.plan = plan;
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
    }

    /// Replaces the device hardware fields: name, device id, api key, and
    /// firmware field.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryDomainError::Field`] when a new value fails
    /// validation.
    pub fn update_hardware(
        &mut self,
        name: impl Into<String>,
        did: impl Into<String>,
        key: impl Into<String>,
        af: Option<String>,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) -> Result<(), TelemetryDomainError> {
        self.name = required_text("device name", MAX_NAME_LENGTH, name)?;
        self.did = required_text("device identifier", MAX_DID_LENGTH, did)?;
        self.key = required_text("device api key", MAX_KEY_LENGTH, key)?;
        self.af = optional_text("device firmware field", MAX_AF_LENGTH, af)?;
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Replaces the installation observation.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryDomainError::Field`] when the new value fails
    /// validation.
    pub fn annotate(
        &mut self,
        observation: impl Into<String>,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) -> Result<(), TelemetryDomainError> {
        self.observation =
            required_text("device observation", MAX_OBSERVATION_LENGTH, observation)?;
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Soft deletes the device link.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Restores a soft-deleted device link.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }
}

impl fmt::Display for DavisStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.did)
    }
}
