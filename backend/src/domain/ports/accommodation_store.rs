//! Port for accommodation listings.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Accommodation, NewAccommodation};

use super::StoreError;

#[async_trait]
pub trait AccommodationStore: Send + Sync {
    /// Listings whose location contains `location`, ignoring case.
    async fn accommodations_in(&self, location: &str) -> Result<Vec<Accommodation>, StoreError>;

    /// A single listing by id.
    async fn find_accommodation(&self, id: Uuid) -> Result<Option<Accommodation>, StoreError>;

    /// Insert a listing with a fresh id and creation timestamp.
    async fn create_accommodation(
        &self,
        accommodation: &NewAccommodation,
    ) -> Result<Accommodation, StoreError>;
}
