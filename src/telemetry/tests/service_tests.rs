//! Service orchestration tests for the telemetry context.

use std::sync::Arc;

use crate::registry::adapters::memory::InMemoryStationRepository;
use crate::registry::domain::{
    Coordinates, IdentityRef, MaintenanceFrequency, NewStation, PipelineSystem, Station, StationId,
};
use crate::registry::ports::StationRepository;
use crate::telemetry::adapters::memory::InMemoryTelemetryStore;
use crate::telemetry::domain::DataPlanId;
use crate::telemetry::ports::DataPlanRepository;
use crate::telemetry::services::{
    DataPlanService, DavisLinkService, LinkDeviceRequest, TelemetryServiceError,
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Plans = DataPlanService<InMemoryTelemetryStore, DefaultClock>;
type Links = DavisLinkService<
    InMemoryTelemetryStore,
    InMemoryTelemetryStore,
    InMemoryStationRepository,
    DefaultClock,
>;

struct Harness {
    plans: Plans,
    links: Links,
    store: Arc<InMemoryTelemetryStore>,
    stations: Arc<InMemoryStationRepository>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryTelemetryStore::new());
    let stations = Arc::new(InMemoryStationRepository::new());
    let clock = Arc::new(DefaultClock);

    Harness {
        plans: DataPlanService::new(Arc::clone(&store), Arc::clone(&clock)),
        links: DavisLinkService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&stations),
            clock,
        ),
        store,
        stations,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

async fn seed_station(harness: &Harness) -> StationId {
    let station = Station::new(
        NewStation {
            id_intern: "LIZ-01".to_owned(),
            name: "La Lizama".to_owned(),
            maintenance_frequency: MaintenanceFrequency::new(3).expect("valid frequency"),
            coordinates: Coordinates::default(),
            system: PipelineSystem::Occ,
            owner_phone: None,
            modifier_user: IdentityRef::new(),
        },
        &DefaultClock,
    )
    .expect("valid station");
    harness
        .stations
        .store(&station)
        .await
        .expect("station store should succeed");
    station.id()
}

fn link_request(station: StationId, plan: DataPlanId) -> LinkDeviceRequest {
    LinkDeviceRequest::new(
        station,
        plan,
        "Vantage Pro2",
        "001D0A00F7C2",
        "a1b2c3d4e5",
        "Installed on the north mast",
        IdentityRef::new(),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plan_expiry_is_computed_and_stored(harness: Harness) {
    let plan = harness
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("registration should succeed");

    let expire = harness
        .plans
        .compute_plan_expiry(plan.id())
        .await
        .expect("expiry computation should succeed");
    assert_eq!(expire, date(2024, 6, 29));

    // Recomputation is idempotent.
    let again = harness
        .plans
        .compute_plan_expiry(plan.id())
        .await
        .expect("recomputation should succeed");
    assert_eq!(again, expire);

    let stored = harness
        .plans
        .find_by_id(plan.id())
        .await
        .expect("lookup should succeed")
        .expect("plan should exist");
    assert_eq!(stored.expire(), Some(expire));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn link_rejects_unknown_station(harness: Harness) {
    let plan = harness
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("registration should succeed");

    let result = harness
        .links
        .link(link_request(StationId::new(), plan.id()))
        .await;
    assert!(matches!(
        result,
        Err(TelemetryServiceError::MissingReference { entity: "station", .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn link_rejects_unknown_plan(harness: Harness) {
    let station = seed_station(&harness).await;
    let result = harness
        .links
        .link(link_request(station, DataPlanId::new()))
        .await;
    assert!(matches!(
        result,
        Err(TelemetryServiceError::MissingReference { entity: "data plan", .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn linked_device_is_listed_under_its_station(harness: Harness) {
    let station = seed_station(&harness).await;
    let plan = harness
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("registration should succeed");

    let device = harness
        .links
        .link(link_request(station, plan.id()))
        .await
        .expect("link should succeed");

    let listed = harness
        .links
        .list_by_station(station)
        .await
        .expect("listing should succeed");
    assert_eq!(listed, vec![device]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_plan_cascades_to_its_devices(harness: Harness) {
    let station = seed_station(&harness).await;
    let plan = harness
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("registration should succeed");
    let device = harness
        .links
        .link(link_request(station, plan.id()))
        .await
        .expect("link should succeed");

    DataPlanRepository::delete(&*harness.store, plan.id())
        .await
        .expect("plan delete should succeed");

    let remaining = harness
        .links
        .find_by_id(device.id())
        .await
        .expect("lookup should succeed");
    assert!(remaining.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hardware_update_replaces_device_fields(harness: Harness) {
    let station = seed_station(&harness).await;
    let plan = harness
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("registration should succeed");
    let device = harness
        .links
        .link(link_request(station, plan.id()))
        .await
        .expect("link should succeed");

    let updated = harness
        .links
        .update_hardware(
            device.id(),
            "Vantage Vue",
            "001D0A00F7C3",
            "f6e5d4c3b2",
            Some("AF-2".to_owned()),
            IdentityRef::new(),
        )
        .await
        .expect("hardware update should succeed");

    assert_eq!(updated.name(), "Vantage Vue");
    assert_eq!(updated.did(), "001D0A00F7C3");
    assert_eq!(updated.key(), "f6e5d4c3b2");
    assert_eq!(updated.af(), Some("AF-2"));
    // Station and plan bindings are untouched.
    assert_eq!(updated.station(), station);
    assert_eq!(updated.plan(), plan.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_deleting_a_plan_keeps_its_devices(harness: Harness) {
    let station = seed_station(&harness).await;
    let plan = harness
        .plans
        .register("PLAN-180-NORTH", "CLARO-01", date(2024, 1, 1))
        .await
        .expect("registration should succeed");
    let device = harness
        .links
        .link(link_request(station, plan.id()))
        .await
        .expect("link should succeed");

    harness
        .plans
        .deactivate(plan.id())
        .await
        .expect("deactivation should succeed");

    let remaining = harness
        .links
        .find_by_id(device.id())
        .await
        .expect("lookup should succeed");
    assert!(remaining.is_some());
}
