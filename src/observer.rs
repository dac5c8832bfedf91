//! Observer abstraction for watching display state replacements.

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

use crate::DisplayState;

/// Receives every state the [`StateHolder`](crate::StateHolder) holds.
///
/// Implement this trait to connect a rendering layer. The observer is called
/// once with the state held when it is registered, then once per replacement,
/// transient loading states included.
///
/// Observers are called after the new state is in place, so reading
/// [`StateHolder::state`](crate::StateHolder::state) from a callback returns the
/// state being observed. They must not dispatch through a spawner that runs
/// tasks inline, as that would notify observers re-entrantly.
///
/// # Example
///
/// ```rust
/// use greeting_mvvm::{DisplayState, StateObserver};
///
/// struct ConsoleObserver;
///
/// impl StateObserver for ConsoleObserver {
///     fn on_state(&mut self, state: &DisplayState) {
///         match &state.error_message {
///             Some(message) => println!("{} ({})", state.text, message),
///             None => println!("{}", state.text),
///         }
///     }
/// }
/// ```
pub trait StateObserver {
    /// Observe the state that was just put in place.
    fn on_state(&mut self, state: &DisplayState);

    /// Whether this observer can be dropped by the holder.
    fn is_closed(&self) -> bool {
        false
    }
}

impl StateObserver for flume::Sender<DisplayState> {
    fn on_state(&mut self, state: &DisplayState) {
        self.send(state.clone()).ok();
    }

    fn is_closed(&self) -> bool {
        self.is_disconnected()
    }
}

#[cfg(any(test, feature = "testing"))]
/// Test observer that captures all observed states for assertions.
///
/// Only available with the `testing` feature.
///
/// # Example
///
/// ```rust
/// use greeting_mvvm::{create_test_spawner, CounterGateway, GreetingReducer, StateHolder, TestObserver};
///
/// let observer = TestObserver::new();
/// let holder = StateHolder::new(
///     GreetingReducer::new(CounterGateway::new()),
///     create_test_spawner(),
/// );
/// holder.observe(observer.clone());
///
/// observer.with_states(|states| {
///     assert_eq!(states[0].text, "Hello");
/// });
/// ```
pub struct TestObserver {
    states: Arc<Mutex<Vec<DisplayState>>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for TestObserver {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl StateObserver for TestObserver {
    fn on_state(&mut self, state: &DisplayState) {
        self.states.lock().push(state.clone());
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for TestObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestObserver {
    pub fn new() -> Self {
        Self {
            states: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of states observed so far.
    pub fn count(&self) -> usize {
        self.states.lock().len()
    }

    /// The most recently observed state, if any.
    pub fn last(&self) -> Option<DisplayState> {
        self.states.lock().last().cloned()
    }

    /// Access the captured states with a closure.
    pub fn with_states<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<DisplayState>) -> R,
    {
        let states = self.states.lock();
        f(&states)
    }
}
