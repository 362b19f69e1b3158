//! End-to-end lifecycle tests over the in-memory adapters.
//!
//! These tests wire the registry, work-order, telemetry, and decommission
//! services together the way a deployment would, and exercise the full
//! record lifecycle: registration, order intake, maintenance scheduling,
//! plan expiry, and cascade deletion.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use stationbook::decommission::DecommissionService;
use stationbook::registry::adapters::memory::{
    InMemoryClientRepository, InMemoryEngineerRepository, InMemoryIdentityProvider,
    InMemoryProjectRepository, InMemoryStationRepository,
};
use stationbook::registry::domain::{Engineer, IdentityRef, Station};
use stationbook::registry::services::{
    ClientRegistryService, EngineerRegistryService, ProjectRegistryService,
    RegisterClientRequest, RegisterStationRequest, StationRegistryService,
};
use stationbook::telemetry::adapters::memory::InMemoryTelemetryStore;
use stationbook::telemetry::services::{DataPlanService, DavisLinkService, LinkDeviceRequest};
use stationbook::workorder::adapters::memory::InMemoryWorkOrderStore;
use stationbook::workorder::domain::MaintenanceType;
use stationbook::workorder::ports::EnglishLocalizer;
use stationbook::workorder::services::{
    MaintenanceSchedulingService, OpenServiceOrderRequest, ServiceOrderLedgerService,
};

type Projects = ProjectRegistryService<InMemoryProjectRepository, DefaultClock>;
type Clients = ClientRegistryService<InMemoryClientRepository, DefaultClock>;
type Engineers =
    EngineerRegistryService<InMemoryEngineerRepository, InMemoryIdentityProvider, DefaultClock>;
type Stations = StationRegistryService<
    InMemoryStationRepository,
    InMemoryProjectRepository,
    InMemoryClientRepository,
    DefaultClock,
>;
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
type Plans = DataPlanService<InMemoryTelemetryStore, DefaultClock>;
type Links = DavisLinkService<
    InMemoryTelemetryStore,
    InMemoryTelemetryStore,
    InMemoryStationRepository,
    DefaultClock,
>;
type Decommissioner = DecommissionService<
    InMemoryStationRepository,
    InMemoryEngineerRepository,
    InMemoryWorkOrderStore,
    InMemoryTelemetryStore,
    InMemoryTelemetryStore,
>;

struct World {
    projects: Projects,
    clients: Clients,
    engineers: Engineers,
    stations: Stations,
    ledger: Ledger,
    scheduler: Scheduler,
    plans: Plans,
    links: Links,
    decommissioner: Decommissioner,
    identities: Arc<InMemoryIdentityProvider>,
}

fn world() -> World {
    let project_repo = Arc::new(InMemoryProjectRepository::new());
    let client_repo = Arc::new(InMemoryClientRepository::new());
    let engineer_repo = Arc::new(InMemoryEngineerRepository::new());
    let station_repo = Arc::new(InMemoryStationRepository::new());
    let identities = Arc::new(InMemoryIdentityProvider::new());
    let orders = Arc::new(InMemoryWorkOrderStore::new());
    let telemetry = Arc::new(InMemoryTelemetryStore::new());
    let clock = Arc::new(DefaultClock);

    World {
        projects: ProjectRegistryService::new(Arc::clone(&project_repo), Arc::clone(&clock)),
        clients: ClientRegistryService::new(Arc::clone(&client_repo), Arc::clone(&clock)),
        engineers: EngineerRegistryService::new(
            Arc::clone(&engineer_repo),
            Arc::clone(&identities),
            Arc::clone(&clock),
        ),
        stations: StationRegistryService::new(
            Arc::clone(&station_repo),
            Arc::clone(&project_repo),
            Arc::clone(&client_repo),
            Arc::clone(&clock),
        ),
        ledger: ServiceOrderLedgerService::new(
            Arc::clone(&orders),
            Arc::clone(&station_repo),
            Arc::clone(&project_repo),
            Arc::clone(&engineer_repo),
            Arc::new(EnglishLocalizer),
            Arc::clone(&clock),
        ),
        scheduler: MaintenanceSchedulingService::new(
            Arc::clone(&orders),
            Arc::clone(&orders),
            Arc::clone(&station_repo),
            Arc::clone(&clock),
        ),
        plans: DataPlanService::new(Arc::clone(&telemetry), Arc::clone(&clock)),
        links: DavisLinkService::new(
            Arc::clone(&telemetry),
            Arc::clone(&telemetry),
            Arc::clone(&station_repo),
            clock,
        ),
        decommissioner: DecommissionService::new(
            station_repo,
            engineer_repo,
            orders,
            Arc::clone(&telemetry),
            telemetry,
        ),
        identities,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Registers a project, a client, and a station associated with both.
async fn register_station(world: &World) -> Station {
    let modifier = IdentityRef::new();
    let project = world
        .projects
        .register("Gasoducto Sur", "Southern pipeline corridor", modifier)
        .await
        .expect("project registration should succeed");
    let client = world
        .clients
        .register(
            RegisterClientRequest::new("Transportadora Andina", "contacto@andina.example")
                .with_cell_phone("300-555-0188"),
        )
        .await
        .expect("client registration should succeed");

    world
        .stations
        .register(
            RegisterStationRequest::new("LIZ-01", "La Lizama", 3, "OCC", modifier)
                .with_coordinates(6.975, -73.847)
                .with_projects([project.id()])
                .with_clients([client.id()]),
        )
        .await
        .expect("station registration should succeed")
}

async fn register_engineer(world: &World) -> Engineer {
    let identity = IdentityRef::new();
    world.identities.insert(identity, "Laura Ortiz");
    world
        .engineers
        .register(identity, Some("CC-1032".to_owned()), "300-555-0101")
        .await
        .expect("engineer registration should succeed")
}

#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_from_registration_to_scheduling() {
    let world = world();
    let station = register_station(&world).await;
    let engineer = register_engineer(&world).await;

    let order = world
        .ledger
        .open(
            OpenServiceOrderRequest::new(
                station.id(),
                engineer.id(),
                "L. Ortiz",
                date(2024, 1, 15),
                "Quarterly sensor inspection",
            )
            .with_observation("Access road flooded, arrived late"),
        )
        .await
        .expect("order intake should succeed");

    let label = world
        .ledger
        .label(order.id())
        .await
        .expect("label resolution should succeed");
    assert_eq!(label, "OS101 | La Lizama - Gasoducto Sur | Open");

    world
        .ledger
        .close(order.id())
        .await
        .expect("closing should succeed");
    let label = world
        .ledger
        .label(order.id())
        .await
        .expect("label resolution should succeed");
    assert_eq!(label, "OS101 | La Lizama - Gasoducto Sur | Close");

    let maintenance = world
        .scheduler
        .record(order.id(), MaintenanceType::Preventive)
        .await
        .expect("maintenance intake should succeed");
    let next = world
        .scheduler
        .compute_next_maintenance(maintenance.id())
        .await
        .expect("due-date computation should succeed");
    // 2024-01-15 plus three 30-day months.
    assert_eq!(next, date(2024, 4, 14));

    let plan = world
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("plan registration should succeed");
    let expire = world
        .plans
        .compute_plan_expiry(plan.id())
        .await
        .expect("expiry computation should succeed");
    assert_eq!(expire, date(2024, 6, 29));

    let device = world
        .links
        .link(LinkDeviceRequest::new(
            station.id(),
            plan.id(),
            "Vantage Pro2",
            "001D0A00F7C2",
            "a1b2c3d4e5",
            "Installed on the north mast",
            IdentityRef::new(),
        ))
        .await
        .expect("device link should succeed");

    let listed = world
        .links
        .list_by_station(station.id())
        .await
        .expect("listing should succeed");
    assert_eq!(listed, vec![device]);
}

#[tokio::test(flavor = "multi_thread")]
async fn station_decommission_cascades_to_orders_maintenance_and_devices() {
    let world = world();
    let station = register_station(&world).await;
    let engineer = register_engineer(&world).await;

    let order = world
        .ledger
        .open(OpenServiceOrderRequest::new(
            station.id(),
            engineer.id(),
            "L. Ortiz",
            date(2024, 1, 15),
            "Quarterly sensor inspection",
        ))
        .await
        .expect("order intake should succeed");
    let maintenance = world
        .scheduler
        .record(order.id(), MaintenanceType::Corrective)
        .await
        .expect("maintenance intake should succeed");
    let plan = world
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("plan registration should succeed");
    let device = world
        .links
        .link(LinkDeviceRequest::new(
            station.id(),
            plan.id(),
            "Vantage Pro2",
            "001D0A00F7C2",
            "a1b2c3d4e5",
            "Installed on the north mast",
            IdentityRef::new(),
        ))
        .await
        .expect("device link should succeed");

    let report = world
        .decommissioner
        .delete_station(station.id())
        .await
        .expect("decommission should succeed");
    assert_eq!(report.orders_removed, 1);
    assert_eq!(report.devices_removed, 1);

    assert!(
        world
            .stations
            .find_by_id(station.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        world
            .ledger
            .find_by_id(order.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        world
            .scheduler
            .find_by_id(maintenance.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        world
            .links
            .find_by_id(device.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    // The plan itself belongs to no station and survives.
    assert!(
        world
            .plans
            .find_by_id(plan.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn engineer_decommission_removes_their_orders() {
    let world = world();
    let station = register_station(&world).await;
    let engineer = register_engineer(&world).await;

    let order = world
        .ledger
        .open(OpenServiceOrderRequest::new(
            station.id(),
            engineer.id(),
            "L. Ortiz",
            date(2024, 1, 15),
            "Quarterly sensor inspection",
        ))
        .await
        .expect("order intake should succeed");

    let removed = world
        .decommissioner
        .delete_engineer(engineer.id())
        .await
        .expect("decommission should succeed");
    assert_eq!(removed, 1);

    assert!(
        world
            .engineers
            .find_by_id(engineer.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        world
            .ledger
            .find_by_id(order.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    // The station the order pointed at is untouched.
    assert!(
        world
            .stations
            .find_by_id(station.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn soft_deletes_never_cascade() {
    let world = world();
    let station = register_station(&world).await;
    let engineer = register_engineer(&world).await;

    let order = world
        .ledger
        .open(OpenServiceOrderRequest::new(
            station.id(),
            engineer.id(),
            "L. Ortiz",
            date(2024, 1, 15),
            "Quarterly sensor inspection",
        ))
        .await
        .expect("order intake should succeed");

    let deactivated = world
        .stations
        .deactivate(station.id())
        .await
        .expect("deactivation should succeed");
    assert!(!deactivated.state().is_active());

    // The order and the station's associations are all still in place.
    let stored = world
        .ledger
        .find_by_id(order.id())
        .await
        .expect("lookup should succeed")
        .expect("order should exist");
    assert_eq!(stored.station(), station.id());
    let stored = world
        .stations
        .find_by_id(station.id())
        .await
        .expect("lookup should succeed")
        .expect("station should exist");
    assert_eq!(stored.projects(), station.projects());
    assert_eq!(stored.clients(), station.clients());
}

#[tokio::test(flavor = "multi_thread")]
async fn plan_decommission_removes_linked_devices() {
    let world = world();
    let station = register_station(&world).await;
    let plan = world
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("plan registration should succeed");
    let device = world
        .links
        .link(LinkDeviceRequest::new(
            station.id(),
            plan.id(),
            "Vantage Pro2",
            "001D0A00F7C2",
            "a1b2c3d4e5",
            "Installed on the north mast",
            IdentityRef::new(),
        ))
        .await
        .expect("device link should succeed");

    world
        .decommissioner
        .delete_data_plan(plan.id())
        .await
        .expect("decommission should succeed");

    assert!(
        world
            .links
            .find_by_id(device.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
    assert!(
        world
            .stations
            .find_by_id(station.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}
