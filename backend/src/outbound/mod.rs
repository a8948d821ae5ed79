//! Outbound adapters implementing the store ports.
//!
//! - **persistence**: PostgreSQL-backed destination store using Diesel ORM,
//!   plus the lazily connecting [`persistence::ConnectionManager`].
//! - **memory**: process-local store serving every port.
//! - **fallback**: decorator that replays failed relational calls against the
//!   in-memory store.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic beyond filtering.

mod fallback;
pub mod memory;
pub mod persistence;
mod storage_builders;

pub use fallback::FallbackDestinationStore;
pub use storage_builders::{hybrid_facade, in_memory_facade};
