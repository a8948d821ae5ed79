//! Storage facade consumed by the routing layer.
//!
//! The facade owns one port per entity family and exposes the fixed set of
//! storage operations. It never knows which adapter answers: destination
//! reads are usually served by a fallback decorator over the relational and
//! in-memory stores, everything else by the in-memory store alone.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::geo::{NEARBY_SERVICES_RADIUS_KM, NEARBY_SIGHTSEEING_RADIUS_KM};
use crate::domain::ports::{
    AccommodationStore, DestinationStore, JourneyPlanStore, LocalServiceStore, SightseeingStore,
    StoreError, TransportStore, UserStore,
};
use crate::domain::{
    Accommodation, Coordinates, Destination, DomainError, JourneyPlan, JourneyPlanUpdate,
    LocalService, NewAccommodation, NewDestination, NewJourneyPlan, NewLocalService,
    NewSightseeingSpot, NewTransportOption, ServiceKind, SightseeingSpot, TransportOption,
    UpsertUser, User, UserId,
};

fn map_store_error(error: StoreError) -> DomainError {
    match error {
        StoreError::Connection { message } => {
            DomainError::service_unavailable(format!("storage unavailable: {message}"))
        }
        StoreError::Query { message } => DomainError::internal(format!("storage error: {message}")),
    }
}

fn origin(latitude: f64, longitude: f64) -> Result<Coordinates, DomainError> {
    if latitude.is_finite() && longitude.is_finite() {
        Ok(Coordinates::new(latitude, longitude))
    } else {
        Err(DomainError::invalid_request(format!(
            "coordinates must be finite, got ({latitude}, {longitude})"
        )))
    }
}

/// The ports backing a [`StorageFacade`].
#[derive(Clone)]
pub struct StorageStores {
    pub users: Arc<dyn UserStore>,
    pub destinations: Arc<dyn DestinationStore>,
    pub journey_plans: Arc<dyn JourneyPlanStore>,
    pub transport: Arc<dyn TransportStore>,
    pub accommodations: Arc<dyn AccommodationStore>,
    pub local_services: Arc<dyn LocalServiceStore>,
    pub sightseeing: Arc<dyn SightseeingStore>,
}

/// Entry point for every storage operation.
///
/// `None` means "not found"; `Err` carries a [`DomainError`] whose code tells the
/// caller whether the request, the store, or the service is at fault.
#[derive(Clone)]
pub struct StorageFacade {
    stores: StorageStores,
}

impl StorageFacade {
    /// Wrap an explicit set of stores.
    pub fn new(stores: StorageStores) -> Self {
        Self { stores }
    }

    /// Look up a user by id.
    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.stores
            .users
            .find_user(id)
            .await
            .map_err(map_store_error)
    }

    /// Insert or update a user, preserving `createdAt` on update.
    pub async fn upsert_user(&self, user: &UpsertUser) -> Result<User, DomainError> {
        self.stores
            .users
            .upsert_user(user)
            .await
            .map_err(map_store_error)
    }

    /// Every destination, in store order.
    pub async fn get_destinations(&self) -> Result<Vec<Destination>, DomainError> {
        self.stores
            .destinations
            .all_destinations()
            .await
            .map_err(map_store_error)
    }

    /// Destinations flagged as featured.
    pub async fn get_featured_destinations(&self) -> Result<Vec<Destination>, DomainError> {
        self.stores
            .destinations
            .featured_destinations()
            .await
            .map_err(map_store_error)
    }

    /// Look up a destination by id.
    pub async fn get_destination(&self, id: Uuid) -> Result<Option<Destination>, DomainError> {
        self.stores
            .destinations
            .find_destination(id)
            .await
            .map_err(map_store_error)
    }

    /// Case-insensitive substring search over name, description and state.
    pub async fn search_destinations(&self, query: &str) -> Result<Vec<Destination>, DomainError> {
        debug!(query, "searching destinations");
        self.stores
            .destinations
            .search_destinations(query)
            .await
            .map_err(map_store_error)
    }

    /// Create a destination; `country` defaults to India, `featured` to false.
    pub async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> Result<Destination, DomainError> {
        self.stores
            .destinations
            .create_destination(destination)
            .await
            .map_err(map_store_error)
    }

    /// Plans owned by `user_id`; other users' plans are never returned.
    pub async fn get_journey_plans(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JourneyPlan>, DomainError> {
        self.stores
            .journey_plans
            .plans_for_user(user_id)
            .await
            .map_err(map_store_error)
    }

    /// Look up a plan by id, regardless of owner.
    pub async fn get_journey_plan(&self, id: Uuid) -> Result<Option<JourneyPlan>, DomainError> {
        self.stores
            .journey_plans
            .find_journey_plan(id)
            .await
            .map_err(map_store_error)
    }

    /// Create a plan with a fresh id; `status` defaults to planned.
    pub async fn create_journey_plan(
        &self,
        plan: &NewJourneyPlan,
    ) -> Result<JourneyPlan, DomainError> {
        self.stores
            .journey_plans
            .create_journey_plan(plan)
            .await
            .map_err(map_store_error)
    }

    /// Merge `update` into an existing plan. Never creates one.
    pub async fn update_journey_plan(
        &self,
        id: Uuid,
        update: JourneyPlanUpdate,
    ) -> Result<Option<JourneyPlan>, DomainError> {
        self.stores
            .journey_plans
            .update_journey_plan(id, update)
            .await
            .map_err(map_store_error)
    }

    /// Returns `true` when a plan was removed.
    pub async fn delete_journey_plan(&self, id: Uuid) -> Result<bool, DomainError> {
        self.stores
            .journey_plans
            .delete_journey_plan(id)
            .await
            .map_err(map_store_error)
    }

    /// Options whose source and destination both contain the given text,
    /// ignoring case.
    pub async fn get_transport_options(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<TransportOption>, DomainError> {
        self.stores
            .transport
            .transport_between(source, destination)
            .await
            .map_err(map_store_error)
    }

    /// Store a transport option under a fresh id.
    pub async fn create_transport_option(
        &self,
        option: &NewTransportOption,
    ) -> Result<TransportOption, DomainError> {
        self.stores
            .transport
            .create_transport_option(option)
            .await
            .map_err(map_store_error)
    }

    /// Accommodations whose location contains `location`, ignoring case.
    pub async fn get_accommodations(
        &self,
        location: &str,
    ) -> Result<Vec<Accommodation>, DomainError> {
        self.stores
            .accommodations
            .accommodations_in(location)
            .await
            .map_err(map_store_error)
    }

    /// Look up an accommodation by id.
    pub async fn get_accommodation(&self, id: Uuid) -> Result<Option<Accommodation>, DomainError> {
        self.stores
            .accommodations
            .find_accommodation(id)
            .await
            .map_err(map_store_error)
    }

    /// Store an accommodation under a fresh id.
    pub async fn create_accommodation(
        &self,
        accommodation: &NewAccommodation,
    ) -> Result<Accommodation, DomainError> {
        self.stores
            .accommodations
            .create_accommodation(accommodation)
            .await
            .map_err(map_store_error)
    }

    /// Services whose location contains `location`, optionally narrowed to
    /// one kind.
    pub async fn get_local_services(
        &self,
        location: &str,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<LocalService>, DomainError> {
        self.stores
            .local_services
            .services_in(location, kind)
            .await
            .map_err(map_store_error)
    }

    /// Services within 10 km of the given point.
    pub async fn get_nearby_services(
        &self,
        latitude: f64,
        longitude: f64,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<LocalService>, DomainError> {
        let origin = origin(latitude, longitude)?;
        self.stores
            .local_services
            .services_near(origin, NEARBY_SERVICES_RADIUS_KM, kind)
            .await
            .map_err(map_store_error)
    }

    /// Store a local service under a fresh id.
    pub async fn create_local_service(
        &self,
        service: &NewLocalService,
    ) -> Result<LocalService, DomainError> {
        self.stores
            .local_services
            .create_local_service(service)
            .await
            .map_err(map_store_error)
    }

    /// Spots whose location contains `location`, ignoring case.
    pub async fn get_sightseeing_spots(
        &self,
        location: &str,
    ) -> Result<Vec<SightseeingSpot>, DomainError> {
        self.stores
            .sightseeing
            .spots_in(location)
            .await
            .map_err(map_store_error)
    }

    /// Spots within 20 km of the given point.
    pub async fn get_nearby_sightseeing(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<SightseeingSpot>, DomainError> {
        let origin = origin(latitude, longitude)?;
        self.stores
            .sightseeing
            .spots_near(origin, NEARBY_SIGHTSEEING_RADIUS_KM)
            .await
            .map_err(map_store_error)
    }

    /// Store a sightseeing spot under a fresh id.
    pub async fn create_sightseeing_spot(
        &self,
        spot: &NewSightseeingSpot,
    ) -> Result<SightseeingSpot, DomainError> {
        self.stores
            .sightseeing
            .create_sightseeing_spot(spot)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "storage_facade_tests.rs"]
mod tests;
