//! Service-order aggregate: a unit of field work executed at a station.

use super::{ServiceOrderId, WorkOrderDomainError};
use crate::record::fields::{optional_text, required_text};
use crate::record::{RecordState, Timestamps};
use crate::registry::domain::{EngineerId, StationId};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_AUTHOR_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 300;

/// Sequential ticket number assigned by the persistence layer.
///
/// Ticket numbers are allocated from a monotone sequence and are distinct
/// from the record identifier; they feed the human-facing `OS` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(u32);

impl TicketNumber {
    /// Wraps a sequence-assigned ticket number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw sequence value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Service-order aggregate root.
///
/// An order in the active record state is open; deactivating it closes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOrder {
    id: ServiceOrderId,
    ticket: TicketNumber,
    station: StationId,
    engineer: EngineerId,
    author: String,
    execution_date: NaiveDate,
    service_description: String,
    observation: Option<String>,
    state: RecordState,
    stamps: Timestamps,
}

/// Validated field bundle for opening a service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceOrder {
    /// Sequence-assigned ticket number.
    pub ticket: TicketNumber,
    /// Station the work is executed at.
    pub station: StationId,
    /// Engineer responsible for the work.
    pub engineer: EngineerId,
    /// Name of the person who authored the order, at most 100 characters.
    pub author: String,
    /// Date the work is executed.
    pub execution_date: NaiveDate,
    /// Description of the service performed, at most 300 characters.
    pub service_description: String,
    /// Free-form observation, if any.
    pub observation: Option<String>,
}

/// Parameter object for reconstructing a persisted service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedServiceOrderData {
    /// Persisted order identifier.
    pub id: ServiceOrderId,
    /// Persisted ticket number.
    pub ticket: TicketNumber,
    /// Persisted station reference.
    pub station: StationId,
    /// Persisted engineer reference.
    pub engineer: EngineerId,
    /// Persisted author name.
    pub author: String,
    /// Persisted execution date.
    pub execution_date: NaiveDate,
    /// Persisted service description.
    pub service_description: String,
    /// Persisted observation, if any.
    pub observation: Option<String>,
    /// Persisted open/closed state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

impl ServiceOrder {
    /// Opens a new service order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderDomainError::Field`] when a text field fails
    /// validation.
    pub fn new(fields: NewServiceOrder, clock: &impl Clock) -> Result<Self, WorkOrderDomainError> {
        Ok(Self {
            id: ServiceOrderId::new(),
            ticket: fields.ticket,
            station: fields.station,
            engineer: fields.engineer,
            author: required_text("order author", MAX_AUTHOR_LENGTH, fields.author)?,
            execution_date: fields.execution_date,
            service_description: required_text(
                "service description",
                MAX_DESCRIPTION_LENGTH,
                fields.service_description,
            )?,
            observation: optional_text(
                "order observation",
                MAX_DESCRIPTION_LENGTH,
                fields.observation,
            )?,
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        })
    }

    /// Reconstructs a service order from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedServiceOrderData) -> Self {
        Self {
            id: data.id,
            ticket: data.ticket,
            station: data.station,
            engineer: data.engineer,
            author: data.author,
            execution_date: data.execution_date,
            service_description: data.service_description,
            observation: data.observation,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> ServiceOrderId {
        self.id
    }

    /// Returns the sequence-assigned ticket number.
    #[must_use]
    pub const fn ticket(&self) -> TicketNumber {
        self.ticket
    }

    /// Returns the station the work is executed at.
    #[must_use]
    pub const fn station(&self) -> StationId {
        self.station
    }

    /// Returns the engineer responsible for the work.
    #[must_use]
    pub const fn engineer(&self) -> EngineerId {
        self.engineer
    }

    /// Returns the author name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the execution date.
    #[must_use]
    pub const fn execution_date(&self) -> NaiveDate {
        self.execution_date
    }

    /// Returns the service description.
    #[must_use]
    pub fn service_description(&self) -> &str {
        &self.service_description
    }

    /// Returns the observation, if any.
    #[must_use]
    pub fn observation(&self) -> Option<&str> {
        self.observation.as_deref()
    }

    /// Returns the open/closed state.
    #[must_use]
    pub const fn state(&self) -> RecordState {
        self.state
    }

    /// Returns `true` while the order is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_active()
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

    /// Closes the order.
    pub fn close(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Reopens a closed order.
    pub fn reopen(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }

    /// Replaces the free-form observation.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderDomainError::Field`] when the new value exceeds
    /// the column width.
    pub fn annotate(
        &mut self,
        observation: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), WorkOrderDomainError> {
        self.observation =
            optional_text("order observation", MAX_DESCRIPTION_LENGTH, observation)?;
        self.stamps.touch(clock);
        Ok(())
    }

    /// Replaces the service description.
    ///
    /// # Errors
    ///
    /// Returns [`WorkOrderDomainError::Field`] when the new value fails
    /// validation.
    pub fn revise_description(
        &mut self,
        service_description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), WorkOrderDomainError> {
        self.service_description = required_text(
            "service description",
            MAX_DESCRIPTION_LENGTH,
            service_description,
        )?;
        self.stamps.touch(clock);
        Ok(())
    }
}
