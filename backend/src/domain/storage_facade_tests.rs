//! Tests for the storage facade's error mapping and delegation.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockDestinationStore, MockJourneyPlanStore, MockLocalServiceStore, MockSightseeingStore,
    MockUserStore,
};
use crate::outbound::memory::InMemoryStore;

fn memory_stores() -> StorageStores {
    let memory = Arc::new(InMemoryStore::new(Arc::new(DefaultClock)));
    StorageStores {
        users: memory.clone(),
        destinations: memory.clone(),
        journey_plans: memory.clone(),
        transport: memory.clone(),
        accommodations: memory.clone(),
        local_services: memory.clone(),
        sightseeing: memory,
    }
}

fn facade_with(configure: impl FnOnce(&mut StorageStores)) -> StorageFacade {
    let mut stores = memory_stores();
    configure(&mut stores);
    StorageFacade::new(stores)
}

#[rstest]
#[case(StoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(StoreError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn destination_errors_map_to_domain_codes(
    #[case] failure: StoreError,
    #[case] expected: ErrorCode,
) {
    let mut destinations = MockDestinationStore::new();
    destinations
        .expect_all_destinations()
        .times(1)
        .return_once(move || Err(failure));
    let facade = facade_with(|stores| stores.destinations = Arc::new(destinations));

    let error = facade.get_destinations().await.expect_err("store failed");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn connection_failures_keep_the_store_message() {
    let mut users = MockUserStore::new();
    users
        .expect_find_user()
        .return_once(|_| Err(StoreError::connection("pool timed out")));
    let facade = facade_with(|stores| stores.users = Arc::new(users));
    let id = UserId::new("mock-user-id").expect("valid id");

    let error = facade.get_user(&id).await.expect_err("store failed");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(error.message().contains("pool timed out"));
}

#[tokio::test]
async fn missing_plan_update_is_none() {
    let mut plans = MockJourneyPlanStore::new();
    plans
        .expect_update_journey_plan()
        .times(1)
        .return_once(|_, _| Ok(None));
    let facade = facade_with(|stores| stores.journey_plans = Arc::new(plans));

    let result = facade
        .update_journey_plan(Uuid::new_v4(), JourneyPlanUpdate::default())
        .await;

    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn delete_failures_map_to_internal_errors() {
    let mut plans = MockJourneyPlanStore::new();
    plans
        .expect_delete_journey_plan()
        .return_once(|_| Err(StoreError::query("journey plans collection lock poisoned")));
    let facade = facade_with(|stores| stores.journey_plans = Arc::new(plans));

    let error = facade
        .delete_journey_plan(Uuid::new_v4())
        .await
        .expect_err("store failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn nearby_services_use_ten_kilometres() {
    let mut services = MockLocalServiceStore::new();
    services
        .expect_services_near()
        .withf(|origin, radius, kind| {
            *origin == Coordinates::new(19.076, 72.8777)
                && *radius == NEARBY_SERVICES_RADIUS_KM
                && *kind == Some(ServiceKind::Atm)
        })
        .times(1)
        .return_once(|_, _, _| Ok(Vec::new()));
    let facade = facade_with(|stores| stores.local_services = Arc::new(services));

    let found = facade
        .get_nearby_services(19.076, 72.8777, Some(ServiceKind::Atm))
        .await;

    assert_eq!(found, Ok(Vec::new()));
}

#[tokio::test]
async fn nearby_sightseeing_uses_twenty_kilometres() {
    let mut spots = MockSightseeingStore::new();
    spots
        .expect_spots_near()
        .withf(|_, radius| *radius == NEARBY_SIGHTSEEING_RADIUS_KM)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));
    let facade = facade_with(|stores| stores.sightseeing = Arc::new(spots));

    assert_eq!(facade.get_nearby_sightseeing(15.5, 73.8).await, Ok(Vec::new()));
}

#[rstest]
#[case(f64::NAN, 72.8)]
#[case(19.0, f64::INFINITY)]
#[case(f64::NEG_INFINITY, f64::NAN)]
#[tokio::test]
async fn non_finite_coordinates_are_rejected(#[case] latitude: f64, #[case] longitude: f64) {
    let mut services = MockLocalServiceStore::new();
    services.expect_services_near().times(0);
    let mut spots = MockSightseeingStore::new();
    spots.expect_spots_near().times(0);
    let facade = facade_with(|stores| {
        stores.local_services = Arc::new(services);
        stores.sightseeing = Arc::new(spots);
    });

    let services = facade
        .get_nearby_services(latitude, longitude, None)
        .await
        .expect_err("invalid origin");
    let spots = facade
        .get_nearby_sightseeing(latitude, longitude)
        .await
        .expect_err("invalid origin");

    assert_eq!(services.code(), ErrorCode::InvalidRequest);
    assert_eq!(spots.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn in_memory_round_trip_through_facade() {
    let facade = facade_with(|_| {});
    let created = facade
        .create_accommodation(&NewAccommodation::new("Backwater Homestay", "Alleppey, Kerala"))
        .await
        .expect("create accommodation");

    assert_eq!(
        facade.get_accommodation(created.id).await,
        Ok(Some(created.clone()))
    );
    assert_eq!(facade.get_accommodations("KERALA").await, Ok(vec![created]));
    assert_eq!(facade.get_accommodation(Uuid::new_v4()).await, Ok(None));
}
