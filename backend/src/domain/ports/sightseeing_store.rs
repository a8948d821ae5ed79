//! Port for sightseeing spots.

use async_trait::async_trait;

use crate::domain::{Coordinates, NewSightseeingSpot, SightseeingSpot};

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SightseeingStore: Send + Sync {
    /// Spots whose location contains `location`, ignoring case.
    async fn spots_in(&self, location: &str) -> Result<Vec<SightseeingSpot>, StoreError>;

    /// Spots within `radius_km` of `origin`, boundary included.
    async fn spots_near(
        &self,
        origin: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<SightseeingSpot>, StoreError>;

    /// Insert a spot with a fresh id and creation timestamp.
    async fn create_sightseeing_spot(
        &self,
        spot: &NewSightseeingSpot,
    ) -> Result<SightseeingSpot, StoreError>;
}
