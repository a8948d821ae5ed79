//! Destination store that falls back to a secondary implementation.
//!
//! The primary's answer is returned whenever it succeeds, including empty
//! lists and `None`. Any primary error is logged at `warn` and the same call
//! is replayed against the secondary, whose result (or error) is returned.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{DestinationStore, StoreError};
use crate::domain::{Destination, NewDestination};

/// Fallback decorator over two [`DestinationStore`] implementations.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use backend::outbound::FallbackDestinationStore;
/// use backend::outbound::memory::InMemoryStore;
/// use mockable::DefaultClock;
///
/// let memory = Arc::new(InMemoryStore::new(Arc::new(DefaultClock)));
/// let store = FallbackDestinationStore::new(Arc::clone(&memory), memory);
/// # let _ = store;
/// ```
pub struct FallbackDestinationStore<P: ?Sized, S: ?Sized> {
    primary: Arc<P>,
    secondary: Arc<S>,
}

impl<P: ?Sized, S: ?Sized> FallbackDestinationStore<P, S> {
    pub fn new(primary: Arc<P>, secondary: Arc<S>) -> Self {
        Self { primary, secondary }
    }
}

impl<P, S> FallbackDestinationStore<P, S>
where
    P: DestinationStore + ?Sized,
    S: DestinationStore + ?Sized,
{
    async fn with_fallback<'a, T, PF, SF>(
        &'a self,
        operation: &'static str,
        primary: impl FnOnce(&'a P) -> PF,
        secondary: impl FnOnce(&'a S) -> SF,
    ) -> Result<T, StoreError>
    where
        PF: Future<Output = Result<T, StoreError>>,
        SF: Future<Output = Result<T, StoreError>>,
    {
        match primary(&*self.primary).await {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!(
                    %operation,
                    unreachable = error.is_connection(),
                    error = %error,
                    "primary destination store failed; using fallback"
                );
                secondary(&*self.secondary).await
            }
        }
    }
}

#[async_trait]
impl<P, S> DestinationStore for FallbackDestinationStore<P, S>
where
    P: DestinationStore + ?Sized,
    S: DestinationStore + ?Sized,
{
    async fn all_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        self.with_fallback(
            "all_destinations",
            |store| store.all_destinations(),
            |store| store.all_destinations(),
        )
        .await
    }

    async fn featured_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        self.with_fallback(
            "featured_destinations",
            |store| store.featured_destinations(),
            |store| store.featured_destinations(),
        )
        .await
    }

    async fn find_destination(&self, id: Uuid) -> Result<Option<Destination>, StoreError> {
        self.with_fallback(
            "find_destination",
            |store| store.find_destination(id),
            |store| store.find_destination(id),
        )
        .await
    }

    async fn search_destinations(&self, query: &str) -> Result<Vec<Destination>, StoreError> {
        self.with_fallback(
            "search_destinations",
            |store| store.search_destinations(query),
            |store| store.search_destinations(query),
        )
        .await
    }

    async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> Result<Destination, StoreError> {
        self.with_fallback(
            "create_destination",
            |store| store.create_destination(destination),
            |store| store.create_destination(destination),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDestinationStore;
    use chrono::Utc;

    fn goa() -> Destination {
        Destination::from_new(Uuid::new_v4(), &NewDestination::named("Goa"), Utc::now())
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let expected = vec![goa()];
        let returned = expected.clone();
        let mut primary = MockDestinationStore::new();
        primary
            .expect_all_destinations()
            .times(1)
            .return_once(move || Ok(returned));
        let mut secondary = MockDestinationStore::new();
        secondary.expect_all_destinations().times(0);

        let store = FallbackDestinationStore::new(Arc::new(primary), Arc::new(secondary));

        assert_eq!(store.all_destinations().await, Ok(expected));
    }

    #[tokio::test]
    async fn primary_not_found_is_authoritative() {
        let mut primary = MockDestinationStore::new();
        primary
            .expect_find_destination()
            .times(1)
            .return_once(|_| Ok(None));
        let mut secondary = MockDestinationStore::new();
        secondary.expect_find_destination().times(0);

        let store = FallbackDestinationStore::new(Arc::new(primary), Arc::new(secondary));

        assert_eq!(store.find_destination(Uuid::new_v4()).await, Ok(None));
    }

    #[tokio::test]
    async fn primary_failure_consults_secondary() {
        let expected = vec![goa()];
        let returned = expected.clone();
        let mut primary = MockDestinationStore::new();
        primary
            .expect_search_destinations()
            .times(1)
            .return_once(|_| Err(StoreError::connection("relational store unavailable")));
        let mut secondary = MockDestinationStore::new();
        secondary
            .expect_search_destinations()
            .withf(|query| query == "goa")
            .times(1)
            .return_once(move |_| Ok(returned));

        let store = FallbackDestinationStore::new(Arc::new(primary), Arc::new(secondary));

        assert_eq!(store.search_destinations("goa").await, Ok(expected));
    }

    #[tokio::test]
    async fn secondary_errors_propagate() {
        let mut primary = MockDestinationStore::new();
        primary
            .expect_create_destination()
            .return_once(|_| Err(StoreError::query("insert failed")));
        let mut secondary = MockDestinationStore::new();
        secondary
            .expect_create_destination()
            .return_once(|_| Err(StoreError::query("lock poisoned")));

        let store = FallbackDestinationStore::new(Arc::new(primary), Arc::new(secondary));
        let result = store.create_destination(&NewDestination::named("Goa")).await;

        assert_eq!(result, Err(StoreError::query("lock poisoned")));
    }
}
