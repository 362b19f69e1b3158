//! Service orchestration tests for the work-order context.

use std::sync::Arc;

use crate::registry::adapters::memory::{
    InMemoryEngineerRepository, InMemoryProjectRepository, InMemoryStationRepository,
};
use crate::registry::domain::{
    Coordinates, Engineer, IdentityRef, MaintenanceFrequency, NewStation, PipelineSystem, Project,
    Station, StationId,
};
use crate::registry::ports::{EngineerRepository, ProjectRepository, StationRepository};
use crate::workorder::adapters::memory::InMemoryWorkOrderStore;
use crate::workorder::domain::MaintenanceType;
use crate::workorder::ports::EnglishLocalizer;
use crate::workorder::services::{
    MaintenanceSchedulingService, OpenServiceOrderRequest, ServiceOrderLedgerService,
    WorkOrderServiceError,
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Ledger = ServiceOrderLedgerService<
    InMemoryWorkOrderStore,
    InMemoryStationRepository,
    InMemoryProjectRepository,
    InMemoryEngineerRepository,
    DefaultClock,
>;
type Scheduler = MaintenanceSchedulingService<
    InMemoryWorkOrderStore,
    InMemoryWorkOrderStore,
    InMemoryStationRepository,
    DefaultClock,
>;

struct Harness {
    ledger: Ledger,
    scheduler: Scheduler,
    stations: Arc<InMemoryStationRepository>,
    projects: Arc<InMemoryProjectRepository>,
    engineers: Arc<InMemoryEngineerRepository>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryWorkOrderStore::new());
    let stations = Arc::new(InMemoryStationRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let engineers = Arc::new(InMemoryEngineerRepository::new());
    let clock = Arc::new(DefaultClock);

    Harness {
        ledger: ServiceOrderLedgerService::new(
            Arc::clone(&store),
            Arc::clone(&stations),
            Arc::clone(&projects),
            Arc::clone(&engineers),
            Arc::new(EnglishLocalizer),
            Arc::clone(&clock),
        ),
        scheduler: MaintenanceSchedulingService::new(
            Arc::clone(&store),
            store,
            Arc::clone(&stations),
            clock,
        ),
        stations,
        projects,
        engineers,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

async fn seed_station(harness: &Harness, frequency_months: u32) -> StationId {
    let modifier = IdentityRef::new();
    let project = Project::new("Gasoducto Sur", "Inspection works", modifier, &DefaultClock)
        .expect("valid project");
    harness
        .projects
        .store(&project)
        .await
        .expect("project store should succeed");

    let mut station = Station::new(
        NewStation {
            id_intern: "LIZ-01".to_owned(),
            name: "La Lizama".to_owned(),
            maintenance_frequency: MaintenanceFrequency::new(frequency_months)
                .expect("valid frequency"),
            coordinates: Coordinates::default(),
            system: PipelineSystem::Occ,
            owner_phone: None,
            modifier_user: modifier,
        },
        &DefaultClock,
    )
    .expect("valid station");
    station.set_projects(vec![project.id()], modifier, &DefaultClock);
    harness
        .stations
        .store(&station)
        .await
        .expect("station store should succeed");
    station.id()
}

async fn seed_engineer(harness: &Harness) -> Engineer {
    let engineer = Engineer::new(IdentityRef::new(), None, "3120001111", &DefaultClock)
        .expect("valid engineer");
    harness
        .engineers
        .store(&engineer)
        .await
        .expect("engineer store should succeed");
    engineer
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_rejects_unknown_station(harness: Harness) {
    let engineer = seed_engineer(&harness).await;
    let request = OpenServiceOrderRequest::new(
        StationId::new(),
        engineer.id(),
        "Laura Pineda",
        date(2024, 1, 15),
        "Battery replacement",
    );
    let result = harness.ledger.open(request).await;
    assert!(matches!(
        result,
        Err(WorkOrderServiceError::MissingReference { entity: "station", .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_assigns_sequential_tickets(harness: Harness) {
    let station = seed_station(&harness, 3).await;
    let engineer = seed_engineer(&harness).await;

    let first = harness
        .ledger
        .open(OpenServiceOrderRequest::new(
            station,
            engineer.id(),
            "Laura Pineda",
            date(2024, 1, 15),
            "Battery replacement",
        ))
        .await
        .expect("first open should succeed");
    let second = harness
        .ledger
        .open(OpenServiceOrderRequest::new(
            station,
            engineer.id(),
            "Laura Pineda",
            date(2024, 2, 15),
            "Antenna alignment",
        ))
        .await
        .expect("second open should succeed");

    assert_eq!(first.ticket().value() + 1, second.ticket().value());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn label_carries_station_and_state(harness: Harness) {
    let station = seed_station(&harness, 3).await;
    let engineer = seed_engineer(&harness).await;

    let order = harness
        .ledger
        .open(OpenServiceOrderRequest::new(
            station,
            engineer.id(),
            "Laura Pineda",
            date(2024, 1, 15),
            "Battery replacement",
        ))
        .await
        .expect("open should succeed");

    let open_label = harness
        .ledger
        .label(order.id())
        .await
        .expect("label should resolve");
    assert_eq!(open_label, "OS101 | La Lizama - Gasoducto Sur | Open");

    harness
        .ledger
        .close(order.id())
        .await
        .expect("close should succeed");
    let closed_label = harness
        .ledger
        .label(order.id())
        .await
        .expect("label should resolve");
    assert_eq!(closed_label, "OS101 | La Lizama - Gasoducto Sur | Close");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn maintenance_is_one_to_one_with_its_order(harness: Harness) {
    let station = seed_station(&harness, 3).await;
    let engineer = seed_engineer(&harness).await;
    let order = harness
        .ledger
        .open(OpenServiceOrderRequest::new(
            station,
            engineer.id(),
            "Laura Pineda",
            date(2024, 1, 15),
            "Battery replacement",
        ))
        .await
        .expect("open should succeed");

    harness
        .scheduler
        .record(order.id(), MaintenanceType::Preventive)
        .await
        .expect("first record should succeed");
    let second = harness
        .scheduler
        .record(order.id(), MaintenanceType::Corrective)
        .await;
    assert!(matches!(
        second,
        Err(WorkOrderServiceError::MaintenanceAlreadyRecorded(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn next_maintenance_follows_station_frequency(harness: Harness) {
    let station = seed_station(&harness, 3).await;
    let engineer = seed_engineer(&harness).await;
    let order = harness
        .ledger
        .open(OpenServiceOrderRequest::new(
            station,
            engineer.id(),
            "Laura Pineda",
            date(2024, 1, 15),
            "Battery replacement",
        ))
        .await
        .expect("open should succeed");
    let record = harness
        .scheduler
        .record(order.id(), MaintenanceType::Preventive)
        .await
        .expect("record should succeed");

    let due = harness
        .scheduler
        .compute_next_maintenance(record.id())
        .await
        .expect("scheduling should succeed");
    assert_eq!(due, date(2024, 4, 14));

    // Recomputation is idempotent.
    let again = harness
        .scheduler
        .compute_next_maintenance(record.id())
        .await
        .expect("rescheduling should succeed");
    assert_eq!(again, due);

    let stored = harness
        .scheduler
        .find_by_id(record.id())
        .await
        .expect("lookup should succeed")
        .expect("record should exist");
    assert_eq!(stored.next_maintenance(), Some(due));
}
