//! A small, runtime-agnostic state holder for a single screen.
//!
//! Actions go in, display states come out. A [`StateHolder`] keeps the latest
//! [`DisplayState`], hands each [`Action`] to a [`Reducer`], and puts every state
//! the reducer emits in place for observers to see.
//!
//! The bundled [`GreetingReducer`] reads values through a [`DataGateway`]. The
//! [`CounterGateway`] is backed by a [`CounterStore`] whose k-th read returns
//! `80 * k`.
//!
//! ## Example
//!
//! ```rust
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! use greeting_mvvm::{Action, CounterGateway, GreetingReducer, StateHolder};
//!
//! // Create a spawner for your async runtime
//! let spawner = |fut: Pin<Box<dyn Future<Output = ()> + Send>>| {
//!     // e.g., tokio::spawn(fut); or async_std::task::spawn(fut);
//!     futures::executor::block_on(fut)
//! };
//!
//! let holder = StateHolder::new(GreetingReducer::new(CounterGateway::new()), spawner);
//! let states = holder.subscribe();
//!
//! holder.dispatch(Action::RequestRead);
//!
//! let seen: Vec<String> = states.try_iter().map(|state| state.text).collect();
//! assert_eq!(seen, ["Hello", "Loading...", "80"]);
//!
//! holder.teardown();
//! ```

// Module declarations
mod counter;
mod error;
mod gateway;
mod holder;
mod observer;
mod reducer;
mod state;

// Public re-exports
pub use counter::{CounterStore, INITIAL_COUNTER, MULTIPLIER};
pub use error::OperationFailed;
pub use gateway::{CounterGateway, DataGateway, SlowGateway, Timer, SIMULATED_LATENCY};
pub use holder::{Spawner, StateHolder};
pub use observer::StateObserver;
pub use reducer::{GreetingReducer, Reducer, StateStream};
pub use state::{Action, DisplayState, DEFAULT_TEXT, LOADING_TEXT, UNKNOWN_ERROR};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use gateway::MockDataGateway;
#[cfg(any(test, feature = "testing"))]
pub use holder::{create_test_spawner, TestDriver};
#[cfg(any(test, feature = "testing"))]
pub use observer::TestObserver;
#[cfg(any(test, feature = "testing"))]
pub use reducer::MockReducer;
