//! Shared unit-test support.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single calendar date, for deterministic stamps.
pub(crate) struct FixedClock(pub(crate) NaiveDate);

impl FixedClock {
    /// Builds a clock pinned to the given calendar date.
    ///
    /// # Panics
    ///
    /// Panics when the date components are out of range.
    pub(crate) fn at(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day).expect("valid test date"))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(NaiveTime::MIN))
    }
}
