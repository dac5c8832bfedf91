//! Data gateway seam between the reducer and the counter store.

use core::future::Future;
use core::pin::Pin;
use core::time::Duration;

use async_trait::async_trait;
use spin::Mutex;
use tracing::debug;

use crate::{CounterStore, OperationFailed};

/// Delay the counter-backed data source applies before each read.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(500);

/// Read/reset/write access to the data behind the screen.
///
/// Implementations may be slow. Callers await them to completion; nothing in
/// this crate cancels an in-flight call.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Retrieve the next value.
    async fn fetch(&self) -> Result<i64, OperationFailed>;

    /// Reset the underlying data, returning the value it was reset to.
    async fn clear(&self) -> Result<i64, OperationFailed>;

    /// Write a value to the underlying data.
    async fn store(&self, data: i64) -> Result<(), OperationFailed>;
}

/// Gateway that forwards every call to an owned [`CounterStore`].
///
/// Each call takes the store's lock for the duration of one counter step, so
/// overlapping fetches never tear the counter but their order is whatever the
/// executor makes it.
#[derive(Debug, Default)]
pub struct CounterGateway {
    store: Mutex<CounterStore>,
}

impl CounterGateway {
    pub fn new() -> Self {
        Self::with_store(CounterStore::new())
    }

    pub fn with_store(store: CounterStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// The most recent value written through [`DataGateway::store`].
    pub fn last_stored(&self) -> Option<i64> {
        self.store.lock().last_stored()
    }
}

#[async_trait]
impl DataGateway for CounterGateway {
    async fn fetch(&self) -> Result<i64, OperationFailed> {
        Ok(self.store.lock().read())
    }

    async fn clear(&self) -> Result<i64, OperationFailed> {
        Ok(self.store.lock().reset())
    }

    async fn store(&self, data: i64) -> Result<(), OperationFailed> {
        self.store.lock().store(data);
        Ok(())
    }
}

/// A timer trait for suspending on an async runtime.
///
/// Like [`Spawner`](crate::Spawner), this keeps the crate free of any specific
/// runtime. Closures returning a boxed future implement it via the blanket
/// implementation, e.g. `|d| Box::pin(tokio::time::sleep(d))`.
pub trait Timer {
    /// Return a future that completes once `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

impl<F> Timer for F
where
    F: Fn(Duration) -> Pin<Box<dyn Future<Output = ()> + Send>>,
{
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        self(duration)
    }
}

/// Decorator that waits before every fetch, simulating a slow data source.
///
/// Only [`fetch`](DataGateway::fetch) is delayed; `clear` and `store` pass
/// straight through.
pub struct SlowGateway<G, T> {
    inner: G,
    timer: T,
    latency: Duration,
}

impl<G, T> SlowGateway<G, T>
where
    G: DataGateway,
    T: Timer + Send + Sync,
{
    /// Wrap `inner`, delaying each fetch by [`SIMULATED_LATENCY`].
    pub fn new(inner: G, timer: T) -> Self {
        Self::with_latency(inner, timer, SIMULATED_LATENCY)
    }

    pub fn with_latency(inner: G, timer: T, latency: Duration) -> Self {
        Self {
            inner,
            timer,
            latency,
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G, T> DataGateway for SlowGateway<G, T>
where
    G: DataGateway,
    T: Timer + Send + Sync,
{
    async fn fetch(&self) -> Result<i64, OperationFailed> {
        debug!(
            latency_ms = self.latency.as_millis() as u64,
            "delaying fetch"
        );
        self.timer.sleep(self.latency).await;
        self.inner.fetch().await
    }

    async fn clear(&self) -> Result<i64, OperationFailed> {
        self.inner.clear().await
    }

    async fn store(&self, data: i64) -> Result<(), OperationFailed> {
        self.inner.store(data).await
    }
}
