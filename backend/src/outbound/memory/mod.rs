//! Process-local store implementing every store port.
//!
//! Each collection is a `HashMap` keyed by id behind its own `RwLock`. Lock
//! sections are short and never span an `.await`, so the store is safe to
//! share across a multi-threaded runtime. Callers always receive clones.
//! Nothing survives a restart.

mod seed;

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    AccommodationStore, DestinationStore, JourneyPlanStore, LocalServiceStore, SightseeingStore,
    StoreError, TransportStore, UserStore,
};
use crate::domain::text::fold;
use crate::domain::{
    Accommodation, Coordinates, Destination, JourneyPlan, JourneyPlanUpdate, LocalService,
    NewAccommodation, NewDestination, NewJourneyPlan, NewLocalService, NewSightseeingSpot,
    NewTransportOption, ServiceKind, SightseeingSpot, TransportOption, UpsertUser, User, UserId,
};

pub use seed::sample_destinations;

type Collection<K, V> = RwLock<HashMap<K, V>>;

fn read<'a, K, V>(
    collection: &'a Collection<K, V>,
    name: &str,
) -> Result<RwLockReadGuard<'a, HashMap<K, V>>, StoreError> {
    collection
        .read()
        .map_err(|_| StoreError::query(format!("{name} collection lock poisoned")))
}

fn write<'a, K, V>(
    collection: &'a Collection<K, V>,
    name: &str,
) -> Result<RwLockWriteGuard<'a, HashMap<K, V>>, StoreError> {
    collection
        .write()
        .map_err(|_| StoreError::query(format!("{name} collection lock poisoned")))
}

fn select<K, V: Clone>(
    collection: &Collection<K, V>,
    name: &str,
    keep: impl Fn(&V) -> bool,
) -> Result<Vec<V>, StoreError> {
    Ok(read(collection, name)?
        .values()
        .filter(|value| keep(*value))
        .cloned()
        .collect())
}

fn near(coordinates: Option<Coordinates>, origin: &Coordinates, radius_km: f64) -> bool {
    coordinates.is_some_and(|point| origin.is_within(&point, radius_km))
}

/// In-memory implementation of every store port.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use backend::outbound::memory::InMemoryStore;
/// use mockable::DefaultClock;
///
/// let store = InMemoryStore::with_sample_data(Arc::new(DefaultClock));
/// # let _ = store;
/// ```
pub struct InMemoryStore {
    clock: Arc<dyn Clock>,
    users: Collection<UserId, User>,
    destinations: Collection<Uuid, Destination>,
    journey_plans: Collection<Uuid, JourneyPlan>,
    transport: Collection<Uuid, TransportOption>,
    accommodations: Collection<Uuid, Accommodation>,
    local_services: Collection<Uuid, LocalService>,
    sightseeing: Collection<Uuid, SightseeingSpot>,
}

impl InMemoryStore {
    /// An empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            users: RwLock::default(),
            destinations: RwLock::default(),
            journey_plans: RwLock::default(),
            transport: RwLock::default(),
            accommodations: RwLock::default(),
            local_services: RwLock::default(),
            sightseeing: RwLock::default(),
        }
    }

    /// A store pre-populated with the featured sample destinations.
    pub fn with_sample_data(clock: Arc<dyn Clock>) -> Self {
        let now = clock.utc();
        let destinations = sample_destinations()
            .iter()
            .map(|draft| {
                let destination = Destination::from_new(Uuid::new_v4(), draft, now);
                (destination.id, destination)
            })
            .collect();
        Self {
            destinations: RwLock::new(destinations),
            ..Self::new(clock)
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(read(&self.users, "users")?.get(id).cloned())
    }

    async fn upsert_user(&self, user: &UpsertUser) -> Result<User, StoreError> {
        let now = self.clock.utc();
        let id = user.id.clone().unwrap_or_else(UserId::random);
        let mut users = write(&self.users, "users")?;
        let created_at = users.get(&id).map_or(now, |existing| existing.created_at);
        let stored = User {
            id: id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_image_url: user.profile_image_url.clone(),
            created_at,
            updated_at: now,
        };
        users.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl DestinationStore for InMemoryStore {
    async fn all_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        select(&self.destinations, "destinations", |_| true)
    }

    async fn featured_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        select(&self.destinations, "destinations", |destination| {
            destination.featured
        })
    }

    async fn find_destination(&self, id: Uuid) -> Result<Option<Destination>, StoreError> {
        Ok(read(&self.destinations, "destinations")?.get(&id).cloned())
    }

    async fn search_destinations(&self, query: &str) -> Result<Vec<Destination>, StoreError> {
        let needle = fold(query);
        select(&self.destinations, "destinations", |destination| {
            destination.matches_search(&needle)
        })
    }

    async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> Result<Destination, StoreError> {
        let created = Destination::from_new(Uuid::new_v4(), destination, self.clock.utc());
        write(&self.destinations, "destinations")?.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl JourneyPlanStore for InMemoryStore {
    async fn plans_for_user(&self, user_id: &UserId) -> Result<Vec<JourneyPlan>, StoreError> {
        select(&self.journey_plans, "journey plans", |plan| {
            plan.user_id == *user_id
        })
    }

    async fn find_journey_plan(&self, id: Uuid) -> Result<Option<JourneyPlan>, StoreError> {
        Ok(read(&self.journey_plans, "journey plans")?.get(&id).cloned())
    }

    async fn create_journey_plan(
        &self,
        plan: &NewJourneyPlan,
    ) -> Result<JourneyPlan, StoreError> {
        let created = JourneyPlan::from_new(Uuid::new_v4(), plan, self.clock.utc());
        write(&self.journey_plans, "journey plans")?.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_journey_plan(
        &self,
        id: Uuid,
        update: JourneyPlanUpdate,
    ) -> Result<Option<JourneyPlan>, StoreError> {
        let now = self.clock.utc();
        let mut plans = write(&self.journey_plans, "journey plans")?;
        Ok(plans.get_mut(&id).map(|plan| {
            plan.apply(update, now);
            plan.clone()
        }))
    }

    async fn delete_journey_plan(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(write(&self.journey_plans, "journey plans")?
            .remove(&id)
            .is_some())
    }
}

#[async_trait]
impl TransportStore for InMemoryStore {
    async fn transport_between(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<TransportOption>, StoreError> {
        let (source, destination) = (fold(source), fold(destination));
        select(&self.transport, "transport options", |option| {
            option.connects(&source, &destination)
        })
    }

    async fn create_transport_option(
        &self,
        option: &NewTransportOption,
    ) -> Result<TransportOption, StoreError> {
        let created = TransportOption::from_new(Uuid::new_v4(), option, self.clock.utc());
        write(&self.transport, "transport options")?.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl AccommodationStore for InMemoryStore {
    async fn accommodations_in(&self, location: &str) -> Result<Vec<Accommodation>, StoreError> {
        let location = fold(location);
        select(&self.accommodations, "accommodations", |stay| {
            stay.is_in(&location)
        })
    }

    async fn find_accommodation(&self, id: Uuid) -> Result<Option<Accommodation>, StoreError> {
        Ok(read(&self.accommodations, "accommodations")?
            .get(&id)
            .cloned())
    }

    async fn create_accommodation(
        &self,
        accommodation: &NewAccommodation,
    ) -> Result<Accommodation, StoreError> {
        let created = Accommodation::from_new(Uuid::new_v4(), accommodation, self.clock.utc());
        write(&self.accommodations, "accommodations")?.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl LocalServiceStore for InMemoryStore {
    async fn services_in(
        &self,
        location: &str,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<LocalService>, StoreError> {
        let location = fold(location);
        select(&self.local_services, "local services", |service| {
            service.is_in(&location) && service.is_kind(kind)
        })
    }

    async fn services_near(
        &self,
        origin: Coordinates,
        radius_km: f64,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<LocalService>, StoreError> {
        select(&self.local_services, "local services", |service| {
            service.is_kind(kind) && near(service.coordinates(), &origin, radius_km)
        })
    }

    async fn create_local_service(
        &self,
        service: &NewLocalService,
    ) -> Result<LocalService, StoreError> {
        let created = LocalService::from_new(Uuid::new_v4(), service, self.clock.utc());
        write(&self.local_services, "local services")?.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl SightseeingStore for InMemoryStore {
    async fn spots_in(&self, location: &str) -> Result<Vec<SightseeingSpot>, StoreError> {
        let location = fold(location);
        select(&self.sightseeing, "sightseeing spots", |spot| {
            spot.is_in(&location)
        })
    }

    async fn spots_near(
        &self,
        origin: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<SightseeingSpot>, StoreError> {
        select(&self.sightseeing, "sightseeing spots", |spot| {
            near(spot.coordinates(), &origin, radius_km)
        })
    }

    async fn create_sightseeing_spot(
        &self,
        spot: &NewSightseeingSpot,
    ) -> Result<SightseeingSpot, StoreError> {
        let created = SightseeingSpot::from_new(Uuid::new_v4(), spot, self.clock.utc());
        write(&self.sightseeing, "sightseeing spots")?.insert(created.id, created.clone());
        Ok(created)
    }
}
