//! Store ports for the hexagonal boundary.
//!
//! Each entity family has its own port. Adapters live under
//! `crate::outbound`; the [`crate::domain::StorageFacade`] only ever talks to
//! these traits.

mod accommodation_store;
mod destination_store;
mod journey_plan_store;
mod local_service_store;
mod sightseeing_store;
mod store_error;
mod transport_store;
mod user_store;

pub use accommodation_store::AccommodationStore;
#[cfg(test)]
pub use destination_store::MockDestinationStore;
pub use destination_store::DestinationStore;
#[cfg(test)]
pub use journey_plan_store::MockJourneyPlanStore;
pub use journey_plan_store::JourneyPlanStore;
#[cfg(test)]
pub use local_service_store::MockLocalServiceStore;
pub use local_service_store::LocalServiceStore;
#[cfg(test)]
pub use sightseeing_store::MockSightseeingStore;
pub use sightseeing_store::SightseeingStore;
pub use store_error::StoreError;
pub use transport_store::TransportStore;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::UserStore;
