//! Domain primitives, entities and the storage facade.
//!
//! Purpose: define strongly typed travel entities shared by the storage
//! adapters and the routing layer, plus the services that operate on them.
//! Serialisation contracts (serde, camelCase) are documented on each type.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failure payload.
//! - User, Destination, JourneyPlan, TransportOption, Accommodation,
//!   LocalService, SightseeingSpot: stored entities and their payloads.
//! - Coordinates: parsed latitude/longitude with haversine distance.
//! - StorageFacade: the single entry point for storage operations.
//! - CurrencyConverter: fixed-rate conversion between supported currencies.

pub mod accommodation;
pub mod currency;
pub mod destination;
pub mod error;
pub mod geo;
pub mod journey_plan;
pub mod local_service;
pub mod ports;
pub mod sightseeing;
pub mod storage_facade;
pub mod text;
pub mod transport;
pub mod user;

pub use self::accommodation::{Accommodation, NewAccommodation};
pub use self::currency::{CurrencyConversion, CurrencyConverter};
pub use self::destination::{DEFAULT_COUNTRY, Destination, NewDestination};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::geo::{
    Coordinates, EARTH_RADIUS_KM, NEARBY_SERVICES_RADIUS_KM, NEARBY_SIGHTSEEING_RADIUS_KM,
    haversine_km,
};
pub use self::journey_plan::{
    DEFAULT_TRAVELERS, JourneyPlan, JourneyPlanUpdate, JourneyStatus, NewJourneyPlan,
};
pub use self::local_service::{LocalService, NewLocalService, ServiceKind};
pub use self::sightseeing::{NewSightseeingSpot, SightseeingSpot};
pub use self::storage_facade::{StorageFacade, StorageStores};
pub use self::transport::{DEFAULT_CURRENCY, NewTransportOption, TransportKind, TransportOption};
pub use self::user::{UpsertUser, User, UserId, UserValidationError};
