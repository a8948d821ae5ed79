//! Wiring helpers that assemble a [`StorageFacade`] from concrete adapters.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::DestinationStore;
use crate::domain::{StorageFacade, StorageStores};

use super::fallback::FallbackDestinationStore;
use super::memory::InMemoryStore;
use super::persistence::{ConnectionManager, Connector, DbPool, DieselDestinationStore};

/// Every port served by the in-memory store, with `destinations` overridden.
fn stores_backed_by(
    memory: Arc<InMemoryStore>,
    destinations: Arc<dyn DestinationStore>,
) -> StorageStores {
    StorageStores {
        users: memory.clone(),
        destinations,
        journey_plans: memory.clone(),
        transport: memory.clone(),
        accommodations: memory.clone(),
        local_services: memory.clone(),
        sightseeing: memory,
    }
}

/// A facade served entirely by `memory`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::outbound::in_memory_facade;
/// use backend::outbound::memory::InMemoryStore;
/// use mockable::DefaultClock;
///
/// let facade = in_memory_facade(Arc::new(InMemoryStore::new(Arc::new(DefaultClock))));
/// # let _ = facade;
/// ```
pub fn in_memory_facade(memory: Arc<InMemoryStore>) -> StorageFacade {
    StorageFacade::new(stores_backed_by(memory.clone(), memory))
}

/// A facade whose destination operations try the relational store first and
/// fall back to `memory`; every other operation uses `memory` directly.
///
/// `clock` stamps rows written to the relational store; pass the clock the
/// in-memory store was built with so both paths agree.
pub fn hybrid_facade<C>(
    connections: ConnectionManager<C>,
    memory: Arc<InMemoryStore>,
    clock: Arc<dyn Clock>,
) -> StorageFacade
where
    C: Connector<Handle = DbPool>,
{
    let relational = Arc::new(DieselDestinationStore::new(connections, clock));
    let destinations = Arc::new(FallbackDestinationStore::new(relational, memory.clone()));
    StorageFacade::new(stores_backed_by(memory, destinations))
}
