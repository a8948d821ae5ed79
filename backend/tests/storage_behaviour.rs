//! Behavioural tests for the storage facade through its public wiring.
//!
//! The relational side is replaced by a connector that always refuses, so
//! every destination call exercises the fallback path without a database.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use backend::domain::{
    Coordinates, DEFAULT_COUNTRY, EARTH_RADIUS_KM, JourneyPlanUpdate, JourneyStatus,
    NewDestination, NewJourneyPlan, NewLocalService, NewSightseeingSpot, ServiceKind,
    StorageFacade, UserId,
};
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    ConnectionManager, Connector, DatabaseSettings, DbPool, PoolError,
};
use backend::outbound::{hybrid_facade, in_memory_facade};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

const MUMBAI: Coordinates = Coordinates::new(19.0760, 72.8777);

#[derive(Clone, Default)]
struct RefusingConnector {
    attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl Connector for RefusingConnector {
    type Handle = DbPool;

    async fn connect(&self, _settings: &DatabaseSettings) -> Result<DbPool, PoolError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PoolError::build("connection refused"))
    }
}

fn sample_memory() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::with_sample_data(Arc::new(DefaultClock)))
}

#[fixture]
fn facade() -> StorageFacade {
    in_memory_facade(sample_memory())
}

fn sorted_names(destinations: Vec<backend::domain::Destination>) -> Vec<String> {
    let mut names: Vec<_> = destinations.into_iter().map(|d| d.name).collect();
    names.sort();
    names
}

fn latitude_north_of_mumbai(km: f64) -> String {
    (MUMBAI.latitude + (km / EARTH_RADIUS_KM).to_degrees()).to_string()
}

#[tokio::test]
async fn relational_failure_does_not_change_destination_results() {
    let memory = sample_memory();
    let connector = RefusingConnector::default();
    let hybrid = hybrid_facade(
        ConnectionManager::new(connector.clone(), DatabaseSettings::default()),
        Arc::clone(&memory),
        Arc::new(DefaultClock),
    );
    let direct = in_memory_facade(memory);

    let hybrid_featured = hybrid.get_featured_destinations().await.expect("featured");
    let direct_featured = direct.get_featured_destinations().await.expect("featured");
    assert_eq!(sorted_names(hybrid_featured), sorted_names(direct_featured));

    let hybrid_search = hybrid.search_destinations("kerala").await.expect("search");
    let direct_search = direct.search_destinations("kerala").await.expect("search");
    assert_eq!(hybrid_search, direct_search);

    assert!(connector.attempts.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn fallback_writes_land_in_memory() {
    let memory = sample_memory();
    let hybrid = hybrid_facade(
        ConnectionManager::new(RefusingConnector::default(), DatabaseSettings::default()),
        Arc::clone(&memory),
        Arc::new(DefaultClock),
    );

    let created = hybrid
        .create_destination(&NewDestination::named("Hampi"))
        .await
        .expect("create via fallback");

    let direct = in_memory_facade(memory);
    assert_eq!(
        direct.get_destination(created.id).await.expect("lookup"),
        Some(created)
    );
}

#[rstest]
#[case("goa")]
#[case("GOA")]
#[case("gOa")]
#[tokio::test]
async fn destination_search_ignores_case(facade: StorageFacade, #[case] query: &str) {
    let found = facade.search_destinations(query).await.expect("search");
    assert_eq!(sorted_names(found), ["Goa"]);
}

#[rstest]
#[tokio::test]
async fn created_destination_defaults_to_india(facade: StorageFacade) {
    let first = facade
        .create_destination(&NewDestination::named("Rishikesh"))
        .await
        .expect("create");
    let second = facade
        .create_destination(&NewDestination::named("Rishikesh"))
        .await
        .expect("create");

    assert_eq!(first.country, DEFAULT_COUNTRY);
    assert_eq!(first.country, "India");
    assert!(!first.featured);
    assert_ne!(first.id, second.id);
}

#[rstest]
#[tokio::test]
async fn nearby_services_respect_the_ten_km_boundary(facade: StorageFacade) {
    let longitude = MUMBAI.longitude.to_string();
    let centre = facade
        .create_local_service(
            &NewLocalService::new("Fort ATM", ServiceKind::Atm, "Mumbai")
                .at(MUMBAI.latitude.to_string(), longitude.clone()),
        )
        .await
        .expect("create service");
    let nine_km = facade
        .create_local_service(
            &NewLocalService::new("Sion ATM", ServiceKind::Atm, "Mumbai")
                .at(latitude_north_of_mumbai(9.99), longitude.clone()),
        )
        .await
        .expect("create service");
    facade
        .create_local_service(
            &NewLocalService::new("Thane ATM", ServiceKind::Atm, "Thane")
                .at(latitude_north_of_mumbai(10.001), longitude.clone()),
        )
        .await
        .expect("create service");
    facade
        .create_local_service(
            &NewLocalService::new("Nashik ATM", ServiceKind::Atm, "Nashik")
                .at(latitude_north_of_mumbai(111.0), longitude),
        )
        .await
        .expect("create service");

    let mut found: Vec<_> = facade
        .get_nearby_services(MUMBAI.latitude, MUMBAI.longitude, Some(ServiceKind::Atm))
        .await
        .expect("nearby")
        .into_iter()
        .map(|service| service.id)
        .collect();
    found.sort();
    let mut expected = vec![centre.id, nine_km.id];
    expected.sort();

    assert_eq!(found, expected);
}

#[rstest]
#[tokio::test]
async fn nearby_sightseeing_excludes_distant_spots(facade: StorageFacade) {
    let longitude = MUMBAI.longitude.to_string();
    let gateway = facade
        .create_sightseeing_spot(
            &NewSightseeingSpot::new("Gateway of India", "Mumbai")
                .at(MUMBAI.latitude.to_string(), longitude.clone()),
        )
        .await
        .expect("create spot");
    facade
        .create_sightseeing_spot(
            &NewSightseeingSpot::new("Pandavleni Caves", "Nashik")
                .at(latitude_north_of_mumbai(111.0), longitude),
        )
        .await
        .expect("create spot");

    let found = facade
        .get_nearby_sightseeing(MUMBAI.latitude, MUMBAI.longitude)
        .await
        .expect("nearby");

    assert_eq!(found, vec![gateway]);
}

#[rstest]
#[tokio::test]
async fn journey_plan_update_never_creates_and_delete_reports_once(facade: StorageFacade) {
    let missing = Uuid::new_v4();
    let update = JourneyPlanUpdate {
        status: Some(JourneyStatus::Completed),
        ..JourneyPlanUpdate::default()
    };
    assert_eq!(
        facade.update_journey_plan(missing, update.clone()).await,
        Ok(None)
    );
    assert_eq!(facade.get_journey_plan(missing).await, Ok(None));

    let owner = UserId::new("mock-user-id").expect("valid id");
    let plan = facade
        .create_journey_plan(&NewJourneyPlan::new(owner.clone(), "Mumbai", "Goa"))
        .await
        .expect("create plan");
    let updated = facade
        .update_journey_plan(plan.id, update)
        .await
        .expect("update")
        .expect("plan exists");
    assert_eq!(updated.status, JourneyStatus::Completed);
    assert_eq!(
        facade.get_journey_plans(&owner).await.expect("list"),
        vec![updated]
    );

    assert_eq!(facade.delete_journey_plan(plan.id).await, Ok(true));
    assert_eq!(facade.delete_journey_plan(plan.id).await, Ok(false));
}
