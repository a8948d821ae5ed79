//! Port for the destination catalogue.
//!
//! Two adapters implement this port: the relational store and the in-memory
//! store. The fallback decorator composes them so callers never see which
//! one answered.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Destination, NewDestination};

use super::StoreError;

/// Catalogue reads and inserts for [`Destination`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Every destination, in no particular order.
    async fn all_destinations(&self) -> Result<Vec<Destination>, StoreError>;

    /// Destinations flagged as featured.
    async fn featured_destinations(&self) -> Result<Vec<Destination>, StoreError>;

    /// A single destination by id.
    async fn find_destination(&self, id: Uuid) -> Result<Option<Destination>, StoreError>;

    /// Destinations whose name, description or state contains `query`,
    /// ignoring case.
    async fn search_destinations(&self, query: &str) -> Result<Vec<Destination>, StoreError>;

    /// Insert a destination with a fresh id and creation timestamp.
    async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> Result<Destination, StoreError>;
}
