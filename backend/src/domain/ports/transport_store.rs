//! Port for transport offers.

use async_trait::async_trait;

use crate::domain::{NewTransportOption, TransportOption};

use super::StoreError;

#[async_trait]
pub trait TransportStore: Send + Sync {
    /// Options whose source contains `source` and whose destination contains
    /// `destination`, ignoring case.
    async fn transport_between(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<Vec<TransportOption>, StoreError>;

    /// Insert an option with a fresh id and creation timestamp.
    async fn create_transport_option(
        &self,
        option: &NewTransportOption,
    ) -> Result<TransportOption, StoreError>;
}
