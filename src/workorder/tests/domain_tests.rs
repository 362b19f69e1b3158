//! Domain model tests for the work-order context.

use crate::record::fields::FieldError;
use crate::registry::domain::{EngineerId, MaintenanceFrequency, StationId};
use crate::testing::FixedClock;
use crate::workorder::domain::{
    Maintenance, MaintenanceType, NewServiceOrder, ServiceOrder, ServiceOrderId, TicketNumber,
    WorkOrderDomainError, next_due_date,
};
use crate::workorder::ports::EnglishLocalizer;
use crate::workorder::services::labels::{maintenance_label, service_order_label, ticket_code};
use chrono::NaiveDate;
use rstest::rstest;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn order_fields(execution_date: NaiveDate) -> NewServiceOrder {
    NewServiceOrder {
        ticket: TicketNumber::new(7),
        station: StationId::new(),
        engineer: EngineerId::new(),
        author: "Laura Pineda".to_owned(),
        execution_date,
        service_description: "Battery replacement".to_owned(),
        observation: None,
    }
}

#[rstest]
#[case(2024, 1, 15, 3, 2024, 4, 14)]
#[case(2024, 1, 1, 1, 2024, 1, 31)]
#[case(2024, 1, 1, 12, 2024, 12, 26)]
fn next_due_date_adds_thirty_days_per_month(
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
    #[case] months: u32,
    #[case] due_year: i32,
    #[case] due_month: u32,
    #[case] due_day: u32,
) {
    let frequency = MaintenanceFrequency::new(months).expect("valid frequency");
    let due = next_due_date(date(year, month, day), frequency);
    assert_eq!(due, date(due_year, due_month, due_day));
}

#[rstest]
fn next_due_date_is_deterministic() {
    let frequency = MaintenanceFrequency::new(3).expect("valid frequency");
    let execution = date(2024, 1, 15);
    assert_eq!(
        next_due_date(execution, frequency),
        next_due_date(execution, frequency)
    );
}

#[rstest]
#[case("P", MaintenanceType::Preventive)]
#[case("c", MaintenanceType::Corrective)]
#[case(" p ", MaintenanceType::Preventive)]
fn maintenance_type_parses_known_codes(#[case] code: &str, #[case] expected: MaintenanceType) {
    assert_eq!(MaintenanceType::try_from(code), Ok(expected));
}

#[rstest]
#[case("X")]
#[case("")]
#[case("PC")]
fn maintenance_type_rejects_unknown_codes(#[case] code: &str) {
    assert!(MaintenanceType::try_from(code).is_err());
}

#[rstest]
fn ticket_code_offsets_by_one_hundred() {
    assert_eq!(ticket_code(TicketNumber::new(7)), "OS107");
    assert_eq!(ticket_code(TicketNumber::new(1)), "OS101");
}

#[rstest]
fn new_order_starts_open() {
    let clock = FixedClock::at(2024, 1, 15);
    let order = ServiceOrder::new(order_fields(date(2024, 1, 15)), &clock).expect("valid order");
    assert!(order.is_open());
    assert_eq!(order.created_at(), clock.0);
}

#[rstest]
fn order_rejects_overlong_description() {
    let clock = FixedClock::at(2024, 1, 15);
    let mut fields = order_fields(date(2024, 1, 15));
    fields.service_description = "x".repeat(301);
    assert!(matches!(
        ServiceOrder::new(fields, &clock),
        Err(WorkOrderDomainError::Field(FieldError::TooLong { .. }))
    ));
}

#[rstest]
fn order_label_reflects_open_and_closed_state() {
    let clock = FixedClock::at(2024, 1, 15);
    let mut order =
        ServiceOrder::new(order_fields(date(2024, 1, 15)), &clock).expect("valid order");
    let localizer = EnglishLocalizer;

    assert_eq!(
        service_order_label(&order, "La Lizama - Gasoducto Sur", &localizer),
        "OS107 | La Lizama - Gasoducto Sur | Open"
    );

    order.close(&clock);
    assert_eq!(
        service_order_label(&order, "La Lizama - Gasoducto Sur", &localizer),
        "OS107 | La Lizama - Gasoducto Sur | Close"
    );
}

#[rstest]
fn maintenance_label_appends_type_code() {
    let clock = FixedClock::at(2024, 1, 15);
    let order = ServiceOrder::new(order_fields(date(2024, 1, 15)), &clock).expect("valid order");
    let record = Maintenance::new(order.id(), MaintenanceType::Preventive, &clock);
    assert_eq!(
        maintenance_label(&record, "OS107 | La Lizama | Open"),
        "OS107 | La Lizama | Open - P"
    );
}

#[rstest]
fn maintenance_starts_unscheduled() {
    let clock = FixedClock::at(2024, 1, 15);
    let record = Maintenance::new(ServiceOrderId::new(), MaintenanceType::default(), &clock);
    assert_eq!(record.next_maintenance(), None);
    assert_eq!(record.type_maintenance(), MaintenanceType::Preventive);
}

#[rstest]
fn schedule_next_records_the_due_date() {
    let created = FixedClock::at(2024, 1, 15);
    let later = FixedClock::at(2024, 1, 20);
    let mut record = Maintenance::new(ServiceOrderId::new(), MaintenanceType::Preventive, &created);
    record.schedule_next(date(2024, 4, 14), &later);
    assert_eq!(record.next_maintenance(), Some(date(2024, 4, 14)));
    assert_eq!(record.update_at(), later.0);
}
