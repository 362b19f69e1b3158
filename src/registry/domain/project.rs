//! Project aggregate: a named grouping of field work.

use super::{IdentityRef, ProjectId, RegistryDomainError};
use crate::record::fields::required_text;
use crate::record::{RecordState, Timestamps};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a project name, matching the `VARCHAR(50)` column.
const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for a project description.
const MAX_DESCRIPTION_LENGTH: usize = 300;

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    modifier_user: IdentityRef,
    state: RecordState,
    stamps: Timestamps,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: String,
    /// Persisted project description.
    pub description: String,
    /// Persisted modifier-user reference.
    pub modifier_user: IdentityRef,
    /// Persisted soft-delete state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

impl Project {
    /// Creates a new active project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the name is empty or a
    /// field exceeds its column width.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            id: ProjectId::new(),
            name: required_text("project name", MAX_NAME_LENGTH, name)?,
            description: required_text("project description", MAX_DESCRIPTION_LENGTH, description)?,
            modifier_user,
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            modifier_user: data.modifier_user,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
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

    /// Renames the project.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the new name fails
    /// validation.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) -> Result<(), RegistryDomainError> {
        self.name = required_text("project name", MAX_NAME_LENGTH, name)?;
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Replaces the project description.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the new description fails
    /// validation.
    pub fn update_description(
        &mut self,
        description: impl Into<String>,
        modifier_user: IdentityRef,
        clock: &impl Clock,
    ) -> Result<(), RegistryDomainError> {
        self.description =
            required_text("project description", MAX_DESCRIPTION_LENGTH, description)?;
        self.modifier_user = modifier_user;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Soft deletes the project.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Restores a soft-deleted project.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
