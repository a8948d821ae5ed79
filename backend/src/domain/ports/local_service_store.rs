//! Port for local services.

use async_trait::async_trait;

use crate::domain::{Coordinates, LocalService, NewLocalService, ServiceKind};

use super::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalServiceStore: Send + Sync {
    /// Services whose location contains `location`, optionally of one kind.
    async fn services_in(
        &self,
        location: &str,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<LocalService>, StoreError>;

    /// Services within `radius_km` of `origin`, boundary included.
    ///
    /// Services without parseable coordinates are never returned.
    async fn services_near(
        &self,
        origin: Coordinates,
        radius_km: f64,
        kind: Option<ServiceKind>,
    ) -> Result<Vec<LocalService>, StoreError>;

    /// Insert a service with a fresh id and creation timestamp.
    async fn create_local_service(
        &self,
        service: &NewLocalService,
    ) -> Result<LocalService, StoreError>;
}
