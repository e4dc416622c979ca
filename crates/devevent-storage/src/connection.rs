// Process-wide connection cache
//
// All request handlers share one database handle. The cache keeps two
// slots: the connected handle and an in-flight connect attempt. The first
// caller to acquire starts the attempt; everyone arriving before it
// resolves awaits the same shared future and observes the same outcome.
// A failed attempt clears the in-flight slot so the next acquire retries
// with a fresh connection.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::repositories::Database;

/// How long a connect attempt may wait for the server.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
pub const MAX_POOL_SIZE: u32 = 10;
pub const MIN_POOL_SIZE: u32 = 5;

/// Connection failure, cloneable so every waiter on a shared attempt can
/// receive it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("database connection failed: {message}")]
pub struct ConnectError {
    pub message: String,
}

impl ConnectError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Establishes (and releases) the underlying handle. Injected so tests
/// can substitute a counting mock for the real pool.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Handle, ConnectError>;

    /// Release the handle on teardown. Default is a no-op.
    async fn disconnect(&self, _handle: Self::Handle) {}
}

/// Production connector: a sqlx Postgres pool with fixed sizing and
/// acquire timeout.
pub struct PgConnector {
    database_url: String,
}

impl PgConnector {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Handle = Database;

    async fn connect(&self) -> Result<Database, ConnectError> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .max_connections(MAX_POOL_SIZE)
            .min_connections(MIN_POOL_SIZE)
            .connect(&self.database_url)
            .await
            .map_err(|e| ConnectError::new(e.to_string()))?;
        Ok(Database::new(pool))
    }

    async fn disconnect(&self, handle: Database) {
        handle.pool().close().await;
    }
}

type ConnectFuture<H> = Shared<BoxFuture<'static, Result<H, ConnectError>>>;

struct CacheState<H> {
    conn: Option<H>,
    inflight: Option<ConnectFuture<H>>,
}

pub struct ConnectionCache<C: Connector> {
    connector: Arc<C>,
    state: Mutex<CacheState<C::Handle>>,
}

/// The cache most of the crate works with.
pub type PgConnectionCache = ConnectionCache<PgConnector>;

impl<C: Connector> ConnectionCache<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            state: Mutex::new(CacheState {
                conn: None,
                inflight: None,
            }),
        }
    }

    /// Return the shared handle, connecting on first use. Concurrent
    /// callers before the first connection completes all await the same
    /// attempt.
    pub async fn acquire(&self) -> Result<C::Handle, ConnectError> {
        let attempt = {
            let mut state = self.state.lock().await;
            if let Some(conn) = &state.conn {
                return Ok(conn.clone());
            }
            match &state.inflight {
                Some(attempt) => attempt.clone(),
                None => {
                    let connector = Arc::clone(&self.connector);
                    let attempt = async move { connector.connect().await }.boxed().shared();
                    state.inflight = Some(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        // Every waiter runs this settle step. Promotion is gated on the
        // slot still holding this exact attempt: teardown may have taken
        // it while the connect was in flight, and its handle must not be
        // re-cached behind teardown's back.
        let mut state = self.state.lock().await;
        let owns_slot = state
            .inflight
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&attempt));
        if owns_slot {
            match &result {
                Ok(conn) => {
                    state.conn = Some(conn.clone());
                    tracing::info!("database connection established");
                }
                Err(e) => {
                    // Clear the slot so a later acquire can retry.
                    tracing::warn!(error = %e, "database connection attempt failed");
                }
            }
            state.inflight = None;
        }
        result
    }

    /// Drop both slots and release the handle. For controlled shutdown
    /// and test isolation.
    pub async fn teardown(&self) {
        let (conn, inflight) = {
            let mut state = self.state.lock().await;
            (state.conn.take(), state.inflight.take())
        };
        if let Some(handle) = conn {
            self.connector.disconnect(handle).await;
            tracing::info!("database connection released");
        }
        // An attempt still in flight settles after the slots are cleared;
        // its handle has no owner left, so release it here too.
        if let Some(attempt) = inflight {
            if let Ok(handle) = attempt.await {
                self.connector.disconnect(handle).await;
                tracing::info!("in-flight connection released");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts connect and disconnect calls; fails the first `fail_times`
    /// connect attempts.
    struct MockConnector {
        attempts: AtomicUsize,
        disconnects: AtomicUsize,
        fail_times: usize,
        delay: Duration,
    }

    impl MockConnector {
        fn new(fail_times: usize) -> Self {
            Self {
                attempts: AtomicUsize::new(0),
                disconnects: AtomicUsize::new(0),
                fail_times,
                delay: Duration::from_millis(20),
            }
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }

        fn disconnects(&self) -> usize {
            self.disconnects.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Connector for MockConnector {
        type Handle = usize;

        async fn connect(&self) -> Result<usize, ConnectError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.delay).await;
            if attempt <= self.fail_times {
                Err(ConnectError::new(format!("attempt {attempt} refused")))
            } else {
                Ok(attempt)
            }
        }

        async fn disconnect(&self, _handle: usize) {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn concurrent_first_acquires_share_one_attempt() {
        let cache = Arc::new(ConnectionCache::new(MockConnector::new(0)));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            tasks.push(tokio::spawn(async move { cache.acquire().await }));
        }

        let mut handles = Vec::new();
        for task in tasks {
            handles.push(task.await.unwrap().unwrap());
        }

        assert_eq!(cache.connector.attempts(), 1);
        assert!(handles.iter().all(|h| *h == handles[0]));
    }

    #[tokio::test]
    async fn cached_handle_is_returned_without_reconnecting() {
        let cache = ConnectionCache::new(MockConnector::new(0));
        let first = cache.acquire().await.unwrap();
        let second = cache.acquire().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.connector.attempts(), 1);
    }

    #[tokio::test]
    async fn shared_failure_then_fresh_retry_succeeds() {
        let cache = Arc::new(ConnectionCache::new(MockConnector::new(1)));

        let mut tasks = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            tasks.push(tokio::spawn(async move { cache.acquire().await }));
        }
        for task in tasks {
            let result = task.await.unwrap();
            assert!(result.is_err(), "all waiters see the shared failure");
        }
        // One attempt served all four callers.
        assert_eq!(cache.connector.attempts(), 1);

        // The in-flight slot was cleared, so this acquire starts fresh.
        let handle = cache.acquire().await.unwrap();
        assert_eq!(handle, 2);
        assert_eq!(cache.connector.attempts(), 2);
    }

    #[tokio::test]
    async fn teardown_clears_the_cached_handle() {
        let cache = ConnectionCache::new(MockConnector::new(0));
        cache.acquire().await.unwrap();
        cache.teardown().await;
        assert_eq!(cache.connector.disconnects(), 1);
        cache.acquire().await.unwrap();
        assert_eq!(cache.connector.attempts(), 2);
    }

    #[tokio::test]
    async fn teardown_during_inflight_connect_releases_the_handle() {
        let cache = Arc::new(ConnectionCache::new(MockConnector::new(0)));

        // Start a connect and tear down while it is still in flight.
        let waiter = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.acquire().await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.teardown().await;

        // The waiter still observes the attempt's outcome.
        assert!(waiter.await.unwrap().is_ok());

        // The settled handle was released, not re-cached behind teardown.
        {
            let state = cache.state.lock().await;
            assert!(state.conn.is_none());
            assert!(state.inflight.is_none());
        }
        assert_eq!(cache.connector.disconnects(), 1);

        // The next acquire starts over with a fresh attempt.
        let handle = cache.acquire().await.unwrap();
        assert_eq!(handle, 2);
        assert_eq!(cache.connector.attempts(), 2);
    }
}
