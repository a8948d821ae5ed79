//! Lazily established, shared connection to the relational store.
//!
//! The [`ConnectionManager`] never connects at construction time. The first
//! [`ConnectionManager::acquire`] call starts an attempt; callers arriving
//! while it is in flight await the same attempt. A successful attempt is
//! cached for the lifetime of the manager. A failed attempt is logged, clears
//! the in-flight marker and yields `None`, so the next call tries again.
//! There is no background retry loop.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures_util::FutureExt as _;
use futures_util::future::{BoxFuture, Shared};
use tracing::{info, warn};

use super::pool::{DbPool, PoolConfig, PoolError};
use super::settings::DatabaseSettings;

/// Opens a connection pool for the given settings.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Cheaply clonable handle to an open pool.
    type Handle: Clone + Send + Sync + 'static;

    /// Open a pool and confirm the server answers.
    ///
    /// # Errors
    /// Returns [`PoolError`] when the pool cannot be built or the server does
    /// not accept a connection within the configured timeout.
    async fn connect(&self, settings: &DatabaseSettings) -> Result<Self::Handle, PoolError>;
}

/// Builds a Diesel/bb8 pool and verifies it with one checkout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DieselConnector;

#[async_trait]
impl Connector for DieselConnector {
    type Handle = DbPool;

    async fn connect(&self, settings: &DatabaseSettings) -> Result<DbPool, PoolError> {
        let pool = DbPool::new(PoolConfig::from_settings(settings)?).await?;
        // bb8 builds lazily; a checkout proves the server is reachable.
        drop(pool.get().await?);
        Ok(pool)
    }
}

type Attempt<H> = Shared<BoxFuture<'static, Option<H>>>;

enum ConnectionState<H> {
    Idle,
    Connecting { attempt: u64, future: Attempt<H> },
    Connected(H),
}

struct Inner<C: Connector> {
    connector: C,
    settings: DatabaseSettings,
    state: Mutex<ConnectionState<C::Handle>>,
}

/// Owns the lifecycle of the single shared pool.
///
/// Construct one per process and inject it into the stores that need it.
///
/// # Examples
/// ```no_run
/// use backend::outbound::persistence::{ConnectionManager, DatabaseSettings, DieselConnector};
///
/// # async fn example() {
/// let manager = ConnectionManager::new(DieselConnector, DatabaseSettings::default());
/// if manager.acquire().await.is_none() {
///     // relational store unavailable; callers fall back
/// }
/// # }
/// ```
pub struct ConnectionManager<C: Connector> {
    inner: Arc<Inner<C>>,
}

impl<C: Connector> Clone for ConnectionManager<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Connector> ConnectionManager<C> {
    /// Create an idle manager. Nothing is dialled until the first
    /// [`acquire`](Self::acquire).
    pub fn new(connector: C, settings: DatabaseSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                connector,
                settings,
                state: Mutex::new(ConnectionState::Idle),
            }),
        }
    }

    /// Return the live pool, connecting first if needed.
    ///
    /// `None` means the relational store is unavailable right now.
    pub async fn acquire(&self) -> Option<C::Handle> {
        let (attempt, future) = {
            let mut state = self
                .inner
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match &*state {
                ConnectionState::Connected(handle) => return Some(handle.clone()),
                ConnectionState::Connecting { attempt, future } => (*attempt, future.clone()),
                ConnectionState::Idle => {
                    let attempt = next_attempt();
                    let future = self.start_attempt();
                    *state = ConnectionState::Connecting {
                        attempt,
                        future: future.clone(),
                    };
                    (attempt, future)
                }
            }
        };

        let outcome = future.await;
        self.settle(attempt, outcome.clone());
        outcome
    }

    /// Whether a pool is currently cached.
    pub fn is_connected(&self) -> bool {
        matches!(
            *self
                .inner
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
            ConnectionState::Connected(_)
        )
    }

    fn start_attempt(&self) -> Attempt<C::Handle> {
        let inner = Arc::clone(&self.inner);
        async move {
            let target = inner.settings.display_target();
            // A panicking connector must not leave the shared attempt poisoned.
            let outcome = AssertUnwindSafe(inner.connector.connect(&inner.settings))
                .catch_unwind()
                .await;
            match outcome {
                Ok(Ok(handle)) => {
                    info!(%target, "connected to relational store");
                    Some(handle)
                }
                Ok(Err(error)) => {
                    warn!(
                        %target,
                        error = %error,
                        "relational store connection failed; falling back to in-memory storage"
                    );
                    None
                }
                Err(_) => {
                    warn!(
                        %target,
                        "relational store connector panicked; falling back to in-memory storage"
                    );
                    None
                }
            }
        }
        .boxed()
        .shared()
    }

    // Every waiter settles; only the first one for a given attempt changes
    // state, later ones see a different variant or attempt number.
    fn settle(&self, attempt: u64, outcome: Option<C::Handle>) {
        let mut state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = matches!(
            &*state,
            ConnectionState::Connecting { attempt: active, .. } if *active == attempt
        );
        if current {
            *state = match outcome {
                Some(handle) => ConnectionState::Connected(handle),
                None => ConnectionState::Idle,
            };
        }
    }
}

fn next_attempt() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static ATTEMPTS: AtomicU64 = AtomicU64::new(0);
    ATTEMPTS.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct CountingConnector {
        attempts: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CountingConnector {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Connector for CountingConnector {
        type Handle = Arc<str>;

        async fn connect(&self, settings: &DatabaseSettings) -> Result<Arc<str>, PoolError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail {
                Err(PoolError::build("connection refused"))
            } else {
                Ok(Arc::from(settings.display_target()))
            }
        }
    }

    #[tokio::test]
    async fn concurrent_acquires_share_one_attempt() {
        let connector = CountingConnector::default();
        let manager = ConnectionManager::new(connector.clone(), DatabaseSettings::default());

        let (first, second) = tokio::join!(manager.acquire(), manager.acquire());

        assert_eq!(connector.attempts(), 1);
        assert_eq!(first.as_deref(), Some("localhost/vihari"));
        assert_eq!(first, second);
        assert!(manager.is_connected());
    }

    #[tokio::test]
    async fn success_is_cached() {
        let connector = CountingConnector::default();
        let manager = ConnectionManager::new(connector.clone(), DatabaseSettings::default());

        assert!(manager.acquire().await.is_some());
        assert!(manager.acquire().await.is_some());
        assert_eq!(connector.attempts(), 1);
    }

    #[tokio::test]
    async fn failure_clears_the_attempt_for_a_retry() {
        let connector = CountingConnector::failing();
        let manager = ConnectionManager::new(connector.clone(), DatabaseSettings::default());

        assert!(manager.acquire().await.is_none());
        assert!(manager.acquire().await.is_none());
        assert_eq!(connector.attempts(), 2);
        assert!(!manager.is_connected());
    }

    #[tokio::test]
    async fn concurrent_failures_share_one_attempt() {
        let connector = CountingConnector::failing();
        let manager = ConnectionManager::new(connector.clone(), DatabaseSettings::default());

        let (first, second) = tokio::join!(manager.acquire(), manager.acquire());

        assert!(first.is_none() && second.is_none());
        assert_eq!(connector.attempts(), 1);
    }

    struct PanickingConnector {
        attempts: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Connector for PanickingConnector {
        type Handle = Arc<str>;

        async fn connect(&self, _settings: &DatabaseSettings) -> Result<Arc<str>, PoolError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            panic!("connection_timeout must be non-zero");
        }
    }

    #[tokio::test]
    async fn panicking_connector_reports_unavailable_and_allows_retry() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let manager = ConnectionManager::new(
            PanickingConnector {
                attempts: Arc::clone(&attempts),
            },
            DatabaseSettings::default(),
        );

        assert!(manager.acquire().await.is_none());
        assert!(manager.acquire().await.is_none());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(!manager.is_connected());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let connector = CountingConnector::default();
        let manager = ConnectionManager::new(connector.clone(), DatabaseSettings::default());
        let clone = manager.clone();

        assert!(manager.acquire().await.is_some());
        assert!(clone.is_connected());
        assert!(clone.acquire().await.is_some());
        assert_eq!(connector.attempts(), 1);
    }
}
