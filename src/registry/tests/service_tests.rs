//! Service orchestration tests for the registry context.

use std::sync::Arc;

use crate::registry::{
    adapters::memory::{
        InMemoryClientRepository, InMemoryEngineerRepository, InMemoryIdentityProvider,
        InMemoryProjectRepository, InMemoryStationRepository,
    },
    domain::{ClientId, IdentityRef, ProjectId},
    services::{
        ClientRegistryService, EngineerRegistryService, ProjectRegistryService,
        RegisterClientRequest, RegisterStationRequest, RegistryServiceError,
        StationRegistryService,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Harness {
    projects: ProjectRegistryService<InMemoryProjectRepository, DefaultClock>,
    clients: ClientRegistryService<InMemoryClientRepository, DefaultClock>,
    engineers: EngineerRegistryService<
        InMemoryEngineerRepository,
        InMemoryIdentityProvider,
        DefaultClock,
    >,
    stations: StationRegistryService<
        InMemoryStationRepository,
        InMemoryProjectRepository,
        InMemoryClientRepository,
        DefaultClock,
    >,
    identities: Arc<InMemoryIdentityProvider>,
}

#[fixture]
fn harness() -> Harness {
    let project_repo = Arc::new(InMemoryProjectRepository::new());
    let client_repo = Arc::new(InMemoryClientRepository::new());
    let engineer_repo = Arc::new(InMemoryEngineerRepository::new());
    let station_repo = Arc::new(InMemoryStationRepository::new());
    let identities = Arc::new(InMemoryIdentityProvider::new());
    let clock = Arc::new(DefaultClock);

    Harness {
        projects: ProjectRegistryService::new(Arc::clone(&project_repo), Arc::clone(&clock)),
        clients: ClientRegistryService::new(Arc::clone(&client_repo), Arc::clone(&clock)),
        engineers: EngineerRegistryService::new(
            engineer_repo,
            Arc::clone(&identities),
            Arc::clone(&clock),
        ),
        stations: StationRegistryService::new(station_repo, project_repo, client_repo, clock),
        identities,
    }
}

fn station_request(modifier: IdentityRef) -> RegisterStationRequest {
    RegisterStationRequest::new("LIZ-01", "La Lizama", 3, "OCC", modifier)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_project_is_retrievable(harness: Harness) {
    let project = harness
        .projects
        .register("Gasoducto Sur", "Inspection works", IdentityRef::new())
        .await
        .expect("registration should succeed");

    let found = harness
        .projects
        .find_by_id(project.id())
        .await
        .expect("lookup should succeed")
        .expect("project should exist");
    assert_eq!(found, project);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn station_registration_rejects_unknown_system_code(harness: Harness) {
    let request = RegisterStationRequest::new("LIZ-01", "La Lizama", 3, "XX", IdentityRef::new());
    let result = harness.stations.register(request).await;
    assert!(matches!(result, Err(RegistryServiceError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn station_registration_rejects_zero_frequency(harness: Harness) {
    let request = RegisterStationRequest::new("LIZ-01", "La Lizama", 0, "OCC", IdentityRef::new());
    let result = harness.stations.register(request).await;
    assert!(matches!(result, Err(RegistryServiceError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn station_registration_rejects_missing_project_reference(harness: Harness) {
    let request = station_request(IdentityRef::new()).with_projects([ProjectId::new()]);
    let result = harness.stations.register(request).await;
    assert!(matches!(
        result,
        Err(RegistryServiceError::MissingReference(_, _))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn station_registration_rejects_missing_client_reference(harness: Harness) {
    let request = station_request(IdentityRef::new()).with_clients([ClientId::new()]);
    let result = harness.stations.register(request).await;
    assert!(matches!(
        result,
        Err(RegistryServiceError::MissingReference(_, _))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn station_registration_links_existing_references(harness: Harness) {
    let modifier = IdentityRef::new();
    let project = harness
        .projects
        .register("Gasoducto Sur", "Inspection works", modifier)
        .await
        .expect("project registration should succeed");
    let client = harness
        .clients
        .register(RegisterClientRequest::new("Cenit", "ops@cenit.example.co"))
        .await
        .expect("client registration should succeed");

    let station = harness
        .stations
        .register(
            station_request(modifier)
                .with_projects([project.id()])
                .with_clients([client.id()]),
        )
        .await
        .expect("station registration should succeed");

    assert_eq!(station.projects(), &[project.id()]);
    assert_eq!(station.clients(), &[client.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn set_projects_replaces_the_association_set(harness: Harness) {
    let modifier = IdentityRef::new();
    let first = harness
        .projects
        .register("Gasoducto Sur", "Inspection works", modifier)
        .await
        .expect("project registration should succeed");
    let second = harness
        .projects
        .register("Gasoducto Norte", "Valve replacement", modifier)
        .await
        .expect("project registration should succeed");

    let station = harness
        .stations
        .register(station_request(modifier).with_projects([first.id()]))
        .await
        .expect("station registration should succeed");

    let updated = harness
        .stations
        .set_projects(station.id(), vec![second.id()], modifier)
        .await
        .expect("association replace should succeed");
    assert_eq!(updated.projects(), &[second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn engineer_registration_requires_known_identity(harness: Harness) {
    let result = harness
        .engineers
        .register(IdentityRef::new(), None, "3120001111")
        .await;
    assert!(matches!(
        result,
        Err(RegistryServiceError::MissingIdentity(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn engineer_label_is_the_identity_display_name(harness: Harness) {
    let identity = IdentityRef::new();
    harness.identities.insert(identity, "Laura Pineda");

    let engineer = harness
        .engineers
        .register(identity, Some("900123".to_owned()), "3120001111")
        .await
        .expect("registration should succeed");

    let label = harness
        .engineers
        .label(engineer.id())
        .await
        .expect("label should resolve");
    assert_eq!(label, "Laura Pineda");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn engineer_identification_can_be_replaced_or_cleared(harness: Harness) {
    let identity = IdentityRef::new();
    harness.identities.insert(identity, "Laura Pineda");
    let engineer = harness
        .engineers
        .register(identity, Some("900123".to_owned()), "3120001111")
        .await
        .expect("registration should succeed");

    let updated = harness
        .engineers
        .update_identification(engineer.id(), Some("900456".to_owned()))
        .await
        .expect("update should succeed");
    assert_eq!(updated.identification(), Some("900456"));

    let cleared = harness
        .engineers
        .update_identification(engineer.id(), Some("  ".to_owned()))
        .await
        .expect("blank input should clear the value");
    assert_eq!(cleared.identification(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn station_label_joins_associated_project_names(harness: Harness) {
    let modifier = IdentityRef::new();
    let first = harness
        .projects
        .register("Gasoducto Sur", "Inspection works", modifier)
        .await
        .expect("project registration should succeed");
    let second = harness
        .projects
        .register("Gasoducto Norte", "Valve replacement", modifier)
        .await
        .expect("project registration should succeed");

    let station = harness
        .stations
        .register(station_request(modifier).with_projects([first.id(), second.id()]))
        .await
        .expect("station registration should succeed");

    let label = harness
        .stations
        .label(station.id())
        .await
        .expect("label should resolve");
    assert_eq!(label, "La Lizama - Gasoducto Sur, Gasoducto Norte");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivating_a_station_keeps_the_record(harness: Harness) {
    let station = harness
        .stations
        .register(station_request(IdentityRef::new()))
        .await
        .expect("station registration should succeed");

    let deactivated = harness
        .stations
        .deactivate(station.id())
        .await
        .expect("deactivation should succeed");
    assert!(!deactivated.state().is_active());

    let found = harness
        .stations
        .find_by_id(station.id())
        .await
        .expect("lookup should succeed")
        .expect("record should remain after soft delete");
    assert!(!found.state().is_active());
}
