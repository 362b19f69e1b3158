//! Cross-cutting record-keeping primitives shared by every entity.
//!
//! Every persisted entity carries a soft-delete [`RecordState`] flag and a
//! [`Timestamps`] pair. Timestamps are produced from an injected
//! [`mockable::Clock`] so that tests remain deterministic; `created_at` is
//! set once at construction and `update_at` is refreshed on every write.

use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};

pub mod fields;
pub(crate) mod ids;

/// Soft-delete state flag carried by every entity.
///
/// Deactivation never removes a row and never cascades; hard deletion only
/// ever happens through referential cascade from a deleted parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Record is active (an order in this state is open).
    Active,
    /// Record has been soft deleted (an order in this state is closed).
    Inactive,
}

impl RecordState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Returns `true` for [`RecordState::Active`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Maps the storage boolean back to a state.
    #[must_use]
    pub const fn from_bool(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }
}

impl Default for RecordState {
    fn default() -> Self {
        Self::Active
    }
}

/// System-managed `created_at`/`update_at` date pair.
///
/// Both values are calendar dates, not instants; the record books track
/// day-level history only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    created_at: NaiveDate,
    update_at: NaiveDate,
}

impl Timestamps {
    /// Stamps a freshly created record with the current clock date.
    #[must_use]
    pub fn now(clock: &impl Clock) -> Self {
        let today = clock.utc().date_naive();
        Self {
            created_at: today,
            update_at: today,
        }
    }

    /// Reconstructs a timestamp pair from persisted storage.
    #[must_use]
    pub const fn from_persisted(created_at: NaiveDate, update_at: NaiveDate) -> Self {
        Self {
            created_at,
            update_at,
        }
    }

    /// Returns the date of first persistence.
    #[must_use]
    pub const fn created_at(self) -> NaiveDate {
        self.created_at
    }

    /// Returns the date of the last modification.
    #[must_use]
    pub const fn update_at(self) -> NaiveDate {
        self.update_at
    }

    /// Refreshes `update_at` to the current clock date.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.update_at = clock.utc().date_naive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;

    #[test]
    fn new_timestamps_share_creation_date() {
        let stamps = Timestamps::now(&DefaultClock);
        assert_eq!(stamps.created_at(), stamps.update_at());
    }

    #[test]
    fn touch_leaves_created_at_untouched() {
        let created = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        let mut stamps = Timestamps::from_persisted(created, created);
        stamps.touch(&DefaultClock);
        assert_eq!(stamps.created_at(), created);
        assert!(stamps.update_at() >= created);
    }

    #[test]
    fn record_state_round_trips_through_bool() {
        assert!(RecordState::Active.is_active());
        assert!(!RecordState::Inactive.is_active());
        assert_eq!(RecordState::from_bool(true), RecordState::Active);
        assert_eq!(RecordState::from_bool(false), RecordState::Inactive);
    }
}
