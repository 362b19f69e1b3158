//! Domain model tests for the registry context.

use crate::record::RecordState;
use crate::record::fields::FieldError;
use crate::registry::domain::{
    Client, Coordinates, Engineer, IdentityRef, MaintenanceFrequency, NewStation, PipelineSystem,
    Project, ProjectId, RegistryDomainError, Station,
};
use crate::testing::FixedClock;
use rstest::rstest;

fn station_fields(modifier_user: IdentityRef) -> NewStation {
    NewStation {
        id_intern: "LIZ-01".to_owned(),
        name: "La Lizama".to_owned(),
        maintenance_frequency: MaintenanceFrequency::new(3).expect("valid frequency"),
        coordinates: Coordinates::default(),
        system: PipelineSystem::Occ,
        owner_phone: None,
        modifier_user,
    }
}

#[rstest]
#[case("NA", PipelineSystem::Na)]
#[case("oap", PipelineSystem::Oap)]
#[case(" occ ", PipelineSystem::Occ)]
#[case("SGN", PipelineSystem::Sgn)]
fn pipeline_system_parses_known_codes(#[case] code: &str, #[case] expected: PipelineSystem) {
    assert_eq!(PipelineSystem::try_from(code), Ok(expected));
}

#[rstest]
#[case("XX")]
#[case("")]
#[case("OAPX")]
fn pipeline_system_rejects_unknown_codes(#[case] code: &str) {
    assert!(PipelineSystem::try_from(code).is_err());
}

#[rstest]
fn pipeline_system_codes_round_trip() {
    for system in PipelineSystem::ALL {
        assert_eq!(PipelineSystem::try_from(system.code()), Ok(system));
    }
}

#[rstest]
fn maintenance_frequency_rejects_zero() {
    assert!(matches!(
        MaintenanceFrequency::new(0),
        Err(RegistryDomainError::InvalidMaintenanceFrequency)
    ));
}

#[rstest]
fn maintenance_frequency_keeps_months() {
    let frequency = MaintenanceFrequency::new(6).expect("valid frequency");
    assert_eq!(frequency.months(), 6);
}

#[rstest]
fn new_project_trims_and_stamps() {
    let clock = FixedClock::at(2024, 3, 1);
    let project = Project::new("  Gasoducto Sur  ", "Inspection works", IdentityRef::new(), &clock)
        .expect("valid project");
    assert_eq!(project.name(), "Gasoducto Sur");
    assert_eq!(project.created_at(), clock.0);
    assert_eq!(project.update_at(), clock.0);
    assert!(project.state().is_active());
}

#[rstest]
fn project_rename_touches_update_date_only() {
    let created = FixedClock::at(2024, 3, 1);
    let later = FixedClock::at(2024, 4, 2);
    let mut project =
        Project::new("Gasoducto Sur", "Inspection works", IdentityRef::new(), &created)
            .expect("valid project");
    project
        .rename("Gasoducto Norte", IdentityRef::new(), &later)
        .expect("valid rename");
    assert_eq!(project.name(), "Gasoducto Norte");
    assert_eq!(project.created_at(), created.0);
    assert_eq!(project.update_at(), later.0);
}

#[rstest]
fn project_rejects_overlong_name() {
    let clock = FixedClock::at(2024, 3, 1);
    let name = "x".repeat(51);
    let result = Project::new(name, "description", IdentityRef::new(), &clock);
    assert!(matches!(
        result,
        Err(RegistryDomainError::Field(FieldError::TooLong { .. }))
    ));
}

#[rstest]
fn client_rejects_malformed_email() {
    let clock = FixedClock::at(2024, 3, 1);
    let result = Client::new("Cenit", None, None, "not-an-address", &clock);
    assert!(matches!(
        result,
        Err(RegistryDomainError::Field(FieldError::InvalidEmail(_)))
    ));
}

#[rstest]
fn client_rejects_overlong_cell_phone() {
    let clock = FixedClock::at(2024, 3, 1);
    let result = Client::new(
        "Cenit",
        None,
        Some("31200011122".to_owned()),
        "ops@cenit.example.co",
        &clock,
    );
    assert!(matches!(
        result,
        Err(RegistryDomainError::Field(FieldError::TooLong { .. }))
    ));
}

#[rstest]
fn client_display_is_the_name() {
    let clock = FixedClock::at(2024, 3, 1);
    let client = Client::new("Cenit", None, None, "ops@cenit.example.co", &clock)
        .expect("valid client");
    assert_eq!(client.to_string(), "Cenit");
}

#[rstest]
fn engineer_blank_identification_is_absent() {
    let clock = FixedClock::at(2024, 3, 1);
    let engineer = Engineer::new(
        IdentityRef::new(),
        Some("   ".to_owned()),
        "3120001111",
        &clock,
    )
    .expect("valid engineer");
    assert_eq!(engineer.identification(), None);
}

#[rstest]
fn station_rejects_overlong_internal_id() {
    let clock = FixedClock::at(2024, 3, 1);
    let mut fields = station_fields(IdentityRef::new());
    fields.id_intern = "TOOLONG".to_owned();
    assert!(Station::new(fields, &clock).is_err());
}

#[rstest]
fn station_associations_collapse_duplicates_in_order() {
    let clock = FixedClock::at(2024, 3, 1);
    let modifier = IdentityRef::new();
    let mut station = Station::new(station_fields(modifier), &clock).expect("valid station");

    let first = ProjectId::new();
    let second = ProjectId::new();
    station.set_projects(vec![first, second, first], modifier, &clock);
    assert_eq!(station.projects(), &[first, second]);
}

#[rstest]
fn station_set_projects_replaces_previous_set() {
    let clock = FixedClock::at(2024, 3, 1);
    let modifier = IdentityRef::new();
    let mut station = Station::new(station_fields(modifier), &clock).expect("valid station");

    let original = ProjectId::new();
    let replacement = ProjectId::new();
    station.set_projects(vec![original], modifier, &clock);
    station.set_projects(vec![replacement], modifier, &clock);
    assert_eq!(station.projects(), &[replacement]);
}

#[rstest]
fn station_deactivation_keeps_data_and_associations() {
    let created = FixedClock::at(2024, 3, 1);
    let later = FixedClock::at(2024, 5, 9);
    let modifier = IdentityRef::new();
    let mut station = Station::new(station_fields(modifier), &created).expect("valid station");
    let project = ProjectId::new();
    station.set_projects(vec![project], modifier, &created);

    station.deactivate(&later);
    assert_eq!(station.state(), RecordState::Inactive);
    assert_eq!(station.projects(), &[project]);
    assert_eq!(station.name(), "La Lizama");
    assert_eq!(station.update_at(), later.0);
}
