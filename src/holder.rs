//! The state holder that drives the reducer and publishes its states.

use core::future::Future;
use core::pin::Pin;

use futures::StreamExt;
use portable_atomic_util::Arc;
use spin::Mutex;
use tracing::{debug, error};

use crate::{Action, DisplayState, OperationFailed, Reducer, StateObserver};

/// A spawner trait for executing futures on an async runtime.
///
/// This abstraction allows you to use whatever concurrency model you want (tokio, async-std, embassy, etc.).
///
/// Function pointers and closures automatically implement this trait via the blanket implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>);
}

/// Implement Spawner for any callable type that matches the signature.
///
/// This includes function pointers, closures, and function items.
impl<F> Spawner for F
where
    F: Fn(Pin<Box<dyn Future<Output = ()> + Send>>),
{
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) {
        self(future)
    }
}

/// The held state and the observers of it, behind separate locks.
///
/// Observers are notified after the state lock is released, so they can read
/// the holder's state from inside a callback.
struct Shared {
    state: Mutex<DisplayState>,
    observers: Mutex<Vec<Box<dyn StateObserver + Send>>>,
}

impl Shared {
    fn current(&self) -> DisplayState {
        self.state.lock().clone()
    }

    fn replace(&self, state: DisplayState) {
        debug!(
            text = %state.text,
            is_busy = state.is_busy,
            error = ?state.error_message,
            "state replaced"
        );
        *self.state.lock() = state.clone();

        let mut observers = self.observers.lock();
        observers.retain(|observer| !observer.is_closed());
        for observer in observers.iter_mut() {
            observer.on_state(&state);
        }
    }
}

/// Holds the latest [`DisplayState`] and drives the [`Reducer`] for each action.
///
/// Each dispatched action becomes one task handed to the [`Spawner`]. The task
/// reads the state held when it starts, reduces the action against it and puts
/// every emitted state in place, in emission order.
///
/// Overlapping dispatches are not serialized. Two reads dispatched before the
/// first completes run side by side and interleave their writes: whichever
/// emission lands last wins, so a late loading state can overwrite an earlier
/// result.
///
/// See the [crate-level documentation](crate) for a complete example.
///
/// # Type Parameters
///
/// * `R` - The reducer implementation type (implements [`Reducer`])
/// * `S` - The spawner implementation type (implements [`Spawner`])
pub struct StateHolder<R, S>
where
    R: Reducer,
    S: Spawner,
{
    reducer: Arc<R>,
    shared: Arc<Shared>,
    spawner: S,
}

impl<R, S> StateHolder<R, S>
where
    R: Reducer + 'static,
    S: Spawner,
{
    /// Create a holder starting from [`DisplayState::default`].
    ///
    /// # Arguments
    ///
    /// * `reducer` - Maps actions to the states that follow them
    /// * `spawner` - Spawner to execute dispatched actions on your chosen runtime
    pub fn new(reducer: R, spawner: S) -> Self {
        Self::with_state(DisplayState::default(), reducer, spawner)
    }

    /// Create a holder starting from `initial`.
    pub fn with_state(initial: DisplayState, reducer: R, spawner: S) -> Self {
        StateHolder {
            reducer: Arc::new(reducer),
            shared: Arc::new(Shared {
                state: Mutex::new(initial),
                observers: Mutex::new(Vec::new()),
            }),
            spawner,
        }
    }

    /// A snapshot of the state currently held.
    pub fn state(&self) -> DisplayState {
        self.shared.current()
    }

    /// Register an observer. It immediately sees the current state.
    pub fn observe(&self, observer: impl StateObserver + Send + 'static) {
        let mut observers = self.shared.observers.lock();
        let mut observer = Box::new(observer);
        observer.on_state(&self.shared.current());
        observers.push(observer);
    }

    /// Subscribe to state replacements over a channel.
    ///
    /// The receiver yields the current state first, then every replacement.
    /// Dropping it unsubscribes.
    pub fn subscribe(&self) -> flume::Receiver<DisplayState> {
        let (sender, receiver) = flume::unbounded();
        self.observe(sender);
        receiver
    }

    /// Process an action on the spawner without waiting for it.
    ///
    /// A failure the reducer does not absorb (a failed reset) has nowhere to
    /// go from here: it is logged and the task ends. Use [`apply`](Self::apply)
    /// to receive it instead.
    pub fn dispatch(&self, action: Action) {
        let task = self.apply(action);
        self.spawner.spawn(Box::pin(async move {
            if let Err(err) = task.await {
                error!(?action, %err, "unhandled failure while processing action");
            }
        }));
    }

    /// Process an action, resolving once its state sequence is exhausted.
    ///
    /// The state is read when the returned future is first polled, not when
    /// this method is called.
    pub fn apply(
        &self,
        action: Action,
    ) -> impl Future<Output = Result<(), OperationFailed>> + Send + 'static {
        let reducer = self.reducer.clone();
        let shared = self.shared.clone();

        async move {
            let current = shared.current();
            debug!(?action, "processing action");

            let mut states = reducer.reduce(&current, action);
            while let Some(next) = states.next().await {
                let next = next?;
                shared.replace(next);
            }
            Ok(())
        }
    }

    /// Tear the holder down at the end of its UI session.
    ///
    /// Dispatches [`Action::RequestReset`] once and drains the resulting
    /// sequence without applying it. Consuming `self` makes a second teardown
    /// impossible.
    pub fn teardown(self) {
        let reducer = self.reducer;
        let shared = self.shared;

        self.spawner.spawn(Box::pin(async move {
            let current = shared.current();
            debug!("tearing down state holder");

            let mut drained = reducer.reduce(&current, Action::RequestReset);
            while let Some(item) = drained.next().await {
                if let Err(err) = item {
                    error!(%err, "reset during teardown failed");
                }
            }
        }));
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test spawner function that executes futures synchronously.
///
/// This blocks on the future immediately rather than spawning it on an async runtime.
pub fn test_spawner_fn(fut: Pin<Box<dyn Future<Output = ()> + Send>>) {
    // Execute the future synchronously for deterministic testing
    futures::executor::block_on(fut);
}

#[cfg(any(test, feature = "testing"))]
/// Creates a test spawner that executes futures synchronously.
///
/// Every dispatch runs to completion before `dispatch` returns. Use
/// [`TestDriver`] instead when a test needs dispatches to overlap.
///
/// Returns a function pointer that can be passed directly to
/// [`StateHolder::new`] without heap allocation.
pub fn create_test_spawner() -> fn(Pin<Box<dyn Future<Output = ()> + Send>>) {
    test_spawner_fn
}

#[cfg(any(test, feature = "testing"))]
/// Test driver for manual control over when dispatched tasks make progress.
///
/// Only available with the `testing` feature or during tests.
///
/// Tasks handed to [`spawner`](Self::spawner) are queued on a single-threaded
/// pool and only polled inside [`run_until_stalled`](Self::run_until_stalled).
///
/// ```rust
/// use greeting_mvvm::{Action, CounterGateway, GreetingReducer, StateHolder, TestDriver};
///
/// let mut driver = TestDriver::new();
/// let holder = StateHolder::new(
///     GreetingReducer::new(CounterGateway::new()),
///     driver.spawner(),
/// );
///
/// holder.dispatch(Action::RequestRead);
/// assert_eq!(holder.state().text, "Hello");
///
/// driver.run_until_stalled();
/// assert_eq!(holder.state().text, "80");
/// ```
pub struct TestDriver {
    pool: futures::executor::LocalPool,
}

#[cfg(any(test, feature = "testing"))]
impl Default for TestDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestDriver {
    pub fn new() -> Self {
        Self {
            pool: futures::executor::LocalPool::new(),
        }
    }

    /// A spawner that queues tasks on this driver.
    ///
    /// Tasks spawned after the driver is dropped are discarded with a warning.
    pub fn spawner(
        &self,
    ) -> impl Fn(Pin<Box<dyn Future<Output = ()> + Send>>) + Clone + 'static {
        use futures::task::LocalSpawnExt;

        let spawner = self.pool.spawner();
        move |future| {
            if let Err(err) = spawner.spawn_local(future) {
                tracing::warn!(%err, "test driver rejected task");
            }
        }
    }

    /// Poll every queued task until none can make further progress.
    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }
}
