//! Engineer aggregate: a field technician who performs service orders.
//!
//! The engineer is a composition over the external identity provider: the
//! record holds an [`IdentityRef`] plus its own identification number and
//! phone, and the display name is resolved through the identity port.

use super::{EngineerId, IdentityRef, RegistryDomainError};
use crate::record::fields::{optional_text, required_text};
use crate::record::{RecordState, Timestamps};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_IDENTIFICATION_LENGTH: usize = 12;
const MAX_PHONE_LENGTH: usize = 14;

/// Engineer aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engineer {
    id: EngineerId,
    identity: IdentityRef,
    identification: Option<String>,
    phone: String,
    state: RecordState,
    stamps: Timestamps,
}

/// Parameter object for reconstructing a persisted engineer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEngineerData {
    /// Persisted engineer identifier.
    pub id: EngineerId,
    /// Persisted identity-provider reference.
    pub identity: IdentityRef,
    /// Persisted identification number, if any.
    pub identification: Option<String>,
    /// Persisted phone number.
    pub phone: String,
    /// Persisted soft-delete state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

impl Engineer {
    /// Creates a new active engineer bound to an identity.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the phone is empty or a
    /// field exceeds its column width.
    pub fn new(
        identity: IdentityRef,
        identification: Option<String>,
        phone: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            id: EngineerId::new(),
            identity,
            identification: optional_text(
                "engineer identification",
                MAX_IDENTIFICATION_LENGTH,
                identification,
            )?,
            phone: required_text("engineer phone", MAX_PHONE_LENGTH, phone)?,
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        })
    }

    /// Reconstructs an engineer from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEngineerData) -> Self {
        Self {
            id: data.id,
            identity: data.identity,
            identification: data.identification,
            phone: data.phone,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the engineer identifier.
    #[must_use]
    pub const fn id(&self) -> EngineerId {
        self.id
    }

    /// Returns the identity-provider reference.
    #[must_use]
    pub const fn identity(&self) -> IdentityRef {
        self.identity
    }

    /// Returns the identification number, if any.
    #[must_use]
    pub fn identification(&self) -> Option<&str> {
        self.identification.as_deref()
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
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

    /// Replaces the contact phone number.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the new value fails
    /// validation.
    pub fn update_phone(
        &mut self,
        phone: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), RegistryDomainError> {
        self.phone = required_text("engineer phone", MAX_PHONE_LENGTH, phone)?;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Replaces the identification number. Blank input clears it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the new value exceeds
    /// the column width.
    pub fn update_identification(
        &mut self,
        identification: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), RegistryDomainError> {
        self.identification = optional_text(
            "engineer identification",
            MAX_IDENTIFICATION_LENGTH,
            identification,
        )?;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Soft deletes the engineer.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Restores a soft-deleted engineer.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }
}
