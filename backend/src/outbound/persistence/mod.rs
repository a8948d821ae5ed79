//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the relational implementation of the destination
//! store port, backed by PostgreSQL via `diesel-async` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Lazy connection**: [`ConnectionManager`] opens the pool on first use,
//!   shares an in-flight attempt between callers and retries on the next call
//!   after a failure.
//! - **Thin adapters**: the store only translates between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) are never exposed to the domain layer.
//! - **Strongly typed errors**: database and pool failures map to
//!   [`StoreError`](crate::domain::ports::StoreError).
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{
//!     ConnectionManager, DatabaseSettings, DieselConnector, DieselDestinationStore,
//! };
//! use mockable::{DefaultClock, DefaultEnv};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), backend::outbound::persistence::DatabaseConfigError> {
//! let settings = DatabaseSettings::from_env(&DefaultEnv::new())?;
//! let store = DieselDestinationStore::new(
//!     ConnectionManager::new(DieselConnector, settings),
//!     Arc::new(DefaultClock),
//! );
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod connection;
mod diesel_destination_store;
mod diesel_error_mapping;
mod models;
mod pool;
mod schema;
mod settings;

pub use connection::{ConnectionManager, Connector, DieselConnector};
pub use diesel_destination_store::DieselDestinationStore;
pub use pool::{DbPool, LoggingErrorSink, PoolConfig, PoolError};
pub use settings::{Credentials, DatabaseConfigError, DatabaseSettings, ServerAddress};
