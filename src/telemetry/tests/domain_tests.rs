//! Domain model tests for the telemetry context.

use crate::record::fields::FieldError;
use crate::registry::domain::{IdentityRef, StationId};
use crate::telemetry::domain::{
    DataPlanDavis, DataPlanId, DavisStation, NewDavisStation, PLAN_VALIDITY_DAYS,
    TelemetryDomainError, expiry_date,
};
use crate::testing::FixedClock;
use chrono::{Duration, NaiveDate};
use rstest::rstest;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn device_fields(station: StationId, plan: DataPlanId) -> NewDavisStation {
    NewDavisStation {
        station,
        plan,
        name: "Vantage Pro2".to_owned(),
        did: "001D0A00F7C2".to_owned(),
        key: "a1b2c3d4e5".to_owned(),
        af: None,
        observation: "Installed on the north mast".to_owned(),
        modifier_user: IdentityRef::new(),
    }
}

#[rstest]
#[case(2024, 1, 1, 2024, 6, 29)]
#[case(2024, 7, 1, 2024, 12, 28)]
fn expiry_is_start_plus_validity_window(
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
    #[case] expire_year: i32,
    #[case] expire_month: u32,
    #[case] expire_day: u32,
) {
    let expire = expiry_date(date(year, month, day));
    assert_eq!(expire, date(expire_year, expire_month, expire_day));
    assert_eq!(
        expire - date(year, month, day),
        Duration::days(PLAN_VALIDITY_DAYS)
    );
}

#[rstest]
fn new_plan_starts_without_expiry() {
    let clock = FixedClock::at(2024, 1, 1);
    let plan = DataPlanDavis::new("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1), &clock)
        .expect("valid plan");
    assert_eq!(plan.expire(), None);
    assert!(plan.state().is_active());
}

#[rstest]
fn plan_display_shows_pending_then_expiry() {
    let clock = FixedClock::at(2024, 1, 1);
    let mut plan = DataPlanDavis::new("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1), &clock)
        .expect("valid plan");
    assert_eq!(plan.to_string(), "PLAN-180-NORTH - pending");

    plan.mark_expiry(date(2024, 6, 29), &clock);
    assert_eq!(plan.to_string(), "PLAN-180-NORTH - 2024-06-29");
}

#[rstest]
fn plan_restart_clears_the_expiry() {
    let clock = FixedClock::at(2024, 1, 1);
    let mut plan = DataPlanDavis::new("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1), &clock)
        .expect("valid plan");
    plan.mark_expiry(date(2024, 6, 29), &clock);
    plan.restart(date(2024, 7, 1), &clock);
    assert_eq!(plan.start_date(), date(2024, 7, 1));
    assert_eq!(plan.expire(), None);
}

#[rstest]
fn plan_rejects_overlong_reference() {
    let clock = FixedClock::at(2024, 1, 1);
    let result = DataPlanDavis::new("PLAN-180-NORTH", "CLARO-00001", date(2024, 1, 1), &clock);
    assert!(matches!(
        result,
        Err(TelemetryDomainError::Field(FieldError::TooLong { .. }))
    ));
}

#[rstest]
fn device_display_joins_name_and_did() {
    let clock = FixedClock::at(2024, 1, 1);
    let device = DavisStation::new(device_fields(StationId::new(), DataPlanId::new()), &clock)
        .expect("valid device");
    assert_eq!(device.to_string(), "Vantage Pro2 - 001D0A00F7C2");
}

#[rstest]
fn device_rejects_overlong_name() {
    let clock = FixedClock::at(2024, 1, 1);
    let mut fields = device_fields(StationId::new(), DataPlanId::new());
    fields.name = "x".repeat(21);
    assert!(DavisStation::new(fields, &clock).is_err());
}

#[rstest]
fn device_blank_af_is_absent() {
    let clock = FixedClock::at(2024, 1, 1);
    let mut fields = device_fields(StationId::new(), DataPlanId::new());
    fields.af = Some("  ".to_owned());
    let device = DavisStation::new(fields, &clock).expect("valid device");
    assert_eq!(device.af(), None);
}
