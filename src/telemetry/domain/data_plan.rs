//! Data-plan aggregate: a cellular data plan used by telemetry devices.

use super::{DataPlanId, TelemetryDomainError};
use crate::record::fields::required_text;
use crate::record::{RecordState, Timestamps};
use chrono::{Duration, NaiveDate};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_CODE_LENGTH: usize = 30;
const MAX_REFERENCE_LENGTH: usize = 10;

/// Fixed validity window of a data plan in days.
pub const PLAN_VALIDITY_DAYS: i64 = 180;

/// Computes the expiry date of a plan started on the given date.
#[must_use]
pub fn expiry_date(start_date: NaiveDate) -> NaiveDate {
    start_date + Duration::days(PLAN_VALIDITY_DAYS)
}

/// Data-plan aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPlanDavis {
    id: DataPlanId,
    code: String,
    reference: String,
    start_date: NaiveDate,
    expire: Option<NaiveDate>,
    state: RecordState,
    stamps: Timestamps,
}

/// Parameter object for reconstructing a persisted data plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDataPlanData {
    /// Persisted plan identifier.
    pub id: DataPlanId,
    /// Persisted plan code.
    pub code: String,
    /// Persisted carrier reference.
    pub reference: String,
    /// Persisted start date.
    pub start_date: NaiveDate,
    /// Persisted expiry date, if computed.
    pub expire: Option<NaiveDate>,
    /// Persisted soft-delete state.
    pub state: RecordState,
    /// Persisted timestamp pair.
    pub stamps: Timestamps,
}

impl DataPlanDavis {
    /// Creates a new active data plan with the expiry not yet computed.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryDomainError::Field`] when a text field fails
    /// validation.
    pub fn new(
        code: impl Into<String>,
        reference: impl Into<String>,
        start_date: NaiveDate,
        clock: &impl Clock,
    ) -> Result<Self, TelemetryDomainError> {
        Ok(Self {
            id: DataPlanId::new(),
            code: required_text("plan code", MAX_CODE_LENGTH, code)?,
            reference: required_text("plan reference", MAX_REFERENCE_LENGTH, reference)?,
            start_date,
            expire: None,
            state: RecordState::Active,
            stamps: Timestamps::now(clock),
        })
    }

    /// Reconstructs a data plan from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDataPlanData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            reference: data.reference,
            start_date: data.start_date,
            expire: data.expire,
            state: data.state,
            stamps: data.stamps,
        }
    }

    /// Returns the plan identifier.
    #[must_use]
    pub const fn id(&self) -> DataPlanId {
        self.id
    }

    /// Returns the plan code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the carrier reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the expiry date, if computed.
    #[must_use]
    pub const fn expire(&self) -> Option<NaiveDate> {
        self.expire
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

    /// Records the computed expiry date.
    pub fn mark_expiry(&mut self, expire: NaiveDate, clock: &impl Clock) {
        self.expire = Some(expire);
        self.stamps.touch(clock);
    }

    /// Restarts the plan from a new start date, clearing the expiry.
    pub fn restart(&mut self, start_date: NaiveDate, clock: &impl Clock) {
        self.start_date = start_date;
        self.expire = None;
        self.stamps.touch(clock);
    }

    /// Soft deletes the plan.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Inactive;
        self.stamps.touch(clock);
    }

    /// Restores a soft-deleted plan.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.state = RecordState::Active;
        self.stamps.touch(clock);
    }
}

impl fmt::Display for DataPlanDavis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expire {
            Some(expire) => write!(f, "{} - {expire}", self.code),
            None => write!(f, "{} - pending", self.code),
        }
    }
}
