//! Client aggregate: a contact on whose behalf stations are serviced.

use super::{ClientId, RegistryDomainError};
use crate::record::fields::{email, optional_text, required_text};
use crate::record::{RecordState, Timestamps};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 50;
const MAX_PHONE_LENGTH: usize = 14;
const MAX_CELL_PHONE_LENGTH: usize = 10;

/// Client aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
    phone: Option<String>,
    cell_phone: Option<String>,
    email: String,
    state: RecordState,
    stamps: Timestamps,
}

/// Parameter object for reconstructing a persisted client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedClientData {
    /// Persisted client identifier.
    pub id: ClientId,
    /// Persisted client name.
    pub name: String,
    /// Persisted landline number, if any.
    pub phone: Option<String>,
    /// Persisted mobile number, if any.
    pub cell_phone: Option<String>,
    /// Persisted e-mail address.
    pub email: String,
    /// Persisted soft-delete state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

impl Client {
    /// Creates a new active client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the name is empty, a
    /// field exceeds its column width, or the e-mail address is malformed.
    pub fn new(
        name: impl Into<String>,
        phone: Option<String>,
        cell_phone: Option<String>,
        email_address: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            id: ClientId::new(),
            name: required_text("client name", MAX_NAME_LENGTH, name)?,
            phone: optional_text("client phone", MAX_PHONE_LENGTH, phone)?,
            cell_phone: optional_text("client cell phone", MAX_CELL_PHONE_LENGTH, cell_phone)?,
            email: email(email_address)?,
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        })
    }

    /// Reconstructs a client from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedClientData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            phone: data.phone,
            cell_phone: data.cell_phone,
            email: data.email,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the client identifier.
    #[must_use]
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the client name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the landline number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the mobile number, if any.
    #[must_use]
    pub fn cell_phone(&self) -> Option<&str> {
        self.cell_phone.as_deref()
    }

    /// Returns the e-mail address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
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

    /// Renames the client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when the new name fails
    /// validation.
    pub fn rename(
        &mut self,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), RegistryDomainError> {
        self.name = required_text("client name", MAX_NAME_LENGTH, name)?;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Replaces the contact details.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::Field`] when a phone number exceeds
    /// its column width or the e-mail address is malformed.
    pub fn update_contact(
        &mut self,
        phone: Option<String>,
        cell_phone: Option<String>,
        email_address: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), RegistryDomainError> {
        self.phone = optional_text("client phone", MAX_PHONE_LENGTH, phone)?;
        self.cell_phone = optional_text("client cell phone", MAX_CELL_PHONE_LENGTH, cell_phone)?;
        self.email = email(email_address)?;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Soft deletes the client. Referencing records are unaffected.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Restores a soft-deleted client.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
