//! Station aggregate: a monitoring site subject to periodic maintenance.

use super::{
    ClientId, IdentityRef, ParsePipelineSystemError, ProjectId, RegistryDomainError, StationId,
};
use crate::record::fields::{optional_text, required_text};
use crate::record::{RecordState, Timestamps};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_INTERNAL_ID_LENGTH: usize = 6;
const MAX_NAME_LENGTH: usize = 12;
const MAX_OWNER_PHONE_LENGTH: usize = 14;

/// Pipeline system a station belongs to.
///
/// The set of codes is fixed; callers must validate free-form input through
/// [`PipelineSystem::try_from`]. The source enumeration listed `OAP` twice,
/// which collapses to the single [`PipelineSystem::Oap`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineSystem {
    /// Not assigned to a pipeline system.
    Na,
    /// Oleoducto Araguaney - Porvenir.
    Oap,
    /// Poliducto Andino.
    Pa,
    /// Poliducto de Oriente.
    Po,
    /// Oleoducto Caño Limón - Coveñas.
    Occ,
    /// Poliducto Galan - Chimitá.
    Pgc,
    /// Poliducto Salgar - Mansilla.
    Psm,
    /// Poliducto Salgar - Cartago.
    Psc,
    /// Yumbo - Buenaventura.
    Yb,
    /// Medellín - Cartago.
    Mc,
    /// Sebastopol - Medellín.
    Sm,
    /// OTA - Orito Tumaco.
    Ota,
    /// Salgar - Gualanday - Neiva.
    Sgn,
}

impl PipelineSystem {
    /// Every valid pipeline system, for callers that enumerate the set.
    pub const ALL: [Self; 13] = [
        Self::Na,
        Self::Oap,
        Self::Pa,
        Self::Po,
        Self::Occ,
        Self::Pgc,
        Self::Psm,
        Self::Psc,
        Self::Yb,
        Self::Mc,
        Self::Sm,
        Self::Ota,
        Self::Sgn,
    ];

    /// Returns the canonical storage code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Na => "NA",
            Self::Oap => "OAP",
            Self::Pa => "PA",
            Self::Po => "PO",
            Self::Occ => "OCC",
            Self::Pgc => "PGC",
            Self::Psm => "PSM",
            Self::Psc => "PSC",
            Self::Yb => "YB",
            Self::Mc => "MC",
            Self::Sm => "SM",
            Self::Ota => "OTA",
            Self::Sgn => "SGN",
        }
    }

    /// Returns the descriptive pipeline name.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Na => "N/A",
            Self::Oap => "Oleoducto Araguaney - Porvenir",
            Self::Pa => "Poliducto Andino",
            Self::Po => "Poliducto de Oriente",
            Self::Occ => "Oleoducto Caño Limón - Coveñas",
            Self::Pgc => "Poliducto Galan - Chimitá",
            Self::Psm => "Poliducto Salgar - Mansilla",
            Self::Psc => "Poliducto Salgar - Cartago",
            Self::Yb => "Yumbo - Buenaventura",
            Self::Mc => "Medellín - Cartago",
            Self::Sm => "Sebastopol - Medellín",
            Self::Ota => "OTA - Orito Tumaco",
            Self::Sgn => "Salgar - Gualanday - Neiva",
        }
    }
}

impl Default for PipelineSystem {
    fn default() -> Self {
        Self::Na
    }
}

impl TryFrom<&str> for PipelineSystem {
    type Error = ParsePipelineSystemError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "NA" => Ok(Self::Na),
            "OAP" => Ok(Self::Oap),
            "PA" => Ok(Self::Pa),
            "PO" => Ok(Self::Po),
            "OCC" => Ok(Self::Occ),
            "PGC" => Ok(Self::Pgc),
            "PSM" => Ok(Self::Psm),
            "PSC" => Ok(Self::Psc),
            "YB" => Ok(Self::Yb),
            "MC" => Ok(Self::Mc),
            "SM" => Ok(Self::Sm),
            "OTA" => Ok(Self::Ota),
            "SGN" => Ok(Self::Sgn),
            _ => Err(ParsePipelineSystemError(value.to_owned())),
        }
    }
}

/// Validated maintenance frequency in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaintenanceFrequency(u32);

impl MaintenanceFrequency {
    /// Creates a validated frequency.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::InvalidMaintenanceFrequency`] when the
    /// value is zero.
    pub const fn new(months: u32) -> Result<Self, RegistryDomainError> {
        if months == 0 {
            return Err(RegistryDomainError::InvalidMaintenanceFrequency);
        }
        Ok(Self(months))
    }

    /// Returns the frequency in months.
    #[must_use]
    pub const fn months(self) -> u32 {
        self.0
    }
}

/// Optional geographic position of a station.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees, if surveyed.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, if surveyed.
    pub longitude: Option<f64>,
}

/// Station aggregate root.
///
/// The many-to-many associations to projects and clients are part of the
/// aggregate so that join rows are replaced atomically with the owning
/// station write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    id: StationId,
    id_intern: String,
    name: String,
    maintenance_frequency: MaintenanceFrequency,
    coordinates: Coordinates,
    system: PipelineSystem,
    owner_phone: Option<String>,
    modifier_user: IdentityRef,
    projects: Vec<ProjectId>,
    clients: Vec<ClientId>,
    state: RecordState,
    stamps: Timestamps,
}

/// Parameter object for reconstructing a persisted station.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedStationData {
    /// Persisted station identifier.
    pub id: StationId,
    /// Persisted internal identification code.
    pub id_intern: String,
    /// Persisted station name.
    pub name: String,
    /// Persisted maintenance frequency.
    pub maintenance_frequency: MaintenanceFrequency,
    /// Persisted coordinates.
    pub coordinates: Coordinates,
    /// Persisted pipeline system.
    pub system: PipelineSystem,
    /// Persisted owner phone, if any.
    pub owner_phone: Option<String>,
    /// Persisted modifier-user reference.
    pub modifier_user: IdentityRef,
    /// Persisted project associations.
    pub projects: Vec<ProjectId>,
    /// Persisted client associations.
    pub clients: Vec<ClientId>,
    /// Persisted soft-delete state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

/// Validated field bundle for creating a station.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    /// Internal identification code, at most 6 characters.
    pub id_intern: String,
    /// Station name, at most 12 characters.
    pub name: String,
    /// Maintenance frequency in months.
    pub maintenance_frequency: MaintenanceFrequency,
    /// Geographic position, if surveyed.
    pub coordinates: Coordinates,
    /// Pipeline system the station belongs to.
    pub system: PipelineSystem,
    /// Site owner's phone, if known.
    pub owner_phone: Option<String>,
    /// User performing the write.
    pub modifier_user: IdentityRef,
}

impl Station {
    /// Creates a new active station with no associations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when a text field fails
    /// validation.
    pub fn new(fields: NewStation, clock: &impl Clock) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            id: StationId::new(),
            id_intern: required_text(
                "station internal identification",
                MAX_INTERNAL_ID_LENGTH,
                fields.id_intern,
            )?,
            name: required_text("station name", MAX_NAME_LENGTH, fields.name)?,
            maintenance_frequency: fields.maintenance_frequency,
            coordinates: fields.coordinates,
            system: fields.system,
            owner_phone: optional_text(
                "station owner phone",
                MAX_OWNER_PHONE_LENGTH,
                fields.owner_phone,
            )?,
            modifier_user: fields.modifier_user,
            projects: Vec::new(),
            clients: Vec::new(),
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        })
    }

    /// Reconstructs a station from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStationData) -> Self {
        Self {
            id: data.id,
            id_intern: data.id_intern,
            name: data.name,
            maintenance_frequency: data.maintenance_frequency,
            coordinates: data.coordinates,
            system: data.system,
            owner_phone: data.owner_phone,
            modifier_user: data.modifier_user,
            projects: data.projects,
            clients: data.clients,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the station identifier.
    #[must_use]
    pub const fn id(&self) -> StationId {
        self.id
    }

    /// Returns the internal identification code.
    #[must_use]
    pub fn id_intern(&self) -> &str {
        &self.id_intern
    }

    /// Returns the station name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the maintenance frequency.
    #[must_use]
    pub const fn maintenance_frequency(&self) -> MaintenanceFrequency {
        self.maintenance_frequency
    }

    /// Returns the geographic position.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Returns the pipeline system.
    #[must_use]
    pub const fn system(&self) -> PipelineSystem {
        self.system
    }

    /// Returns the site owner's phone, if known.
    #[must_use]
    pub fn owner_phone(&self) -> Option<&str> {
        self.owner_phone.as_deref()
    }

    /// Returns the user who last modified the record.
    #[must_use]
    pub const fn modifier_user(&self) -> IdentityRef {
        self.modifier_user
    }

    /// Returns the associated project identifiers.
    #[must_use]
    pub fn projects(&self) -> &[ProjectId] {
        &self.projects
    }

    /// Returns the associated client identifiers.
    #[must_use]
    pub fn clients(&self) -> &[ClientId] {
        &self.clients
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

    /// Replaces the full set of project associations.
    ///
    /// Duplicate identifiers are collapsed, preserving first occurrence
    /// order.
    pub fn set_projects(
        &mut self,
        projects: Vec<ProjectId>,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) {
        self.projects = dedupe(projects);
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
    }

    /// Replaces the full set of client associations.
    ///
    /// Duplicate identifiers are collapsed, preserving first occurrence
    /// order.
    pub fn set_clients(
        &mut self,
        clients: Vec<ClientId>,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) {
        self.clients = dedupe(clients);
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
    }

    /// Reassigns the station to another pipeline system.
    pub fn reassign_system(
        &mut self,
        system: PipelineSystem,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) {
        self.system = system;
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
    }

    /// Replaces the maintenance frequency.
    pub fn set_maintenance_frequency(
        &mut self,
        frequency: MaintenanceFrequency,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) {
        self.maintenance_frequency = frequency;
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
    }

    /// Soft deletes the station. Referencing records are unaffected.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Restores a soft-deleted station.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }
}

fn dedupe<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
