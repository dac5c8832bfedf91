//! Action reducer trait defining how an action turns into display states.

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use portable_atomic_util::Arc;
use tracing::{debug, warn};

use crate::state::UNKNOWN_ERROR;
use crate::{Action, DataGateway, DisplayState, OperationFailed};

/// A finite, single-use sequence of states produced for one action.
///
/// An `Err` item is never a state: it is a failure the reducer chose not to
/// absorb, and it ends the sequence.
pub type StateStream = BoxStream<'static, Result<DisplayState, OperationFailed>>;

/// Maps `(current state, action)` to the states that should follow it.
///
/// The returned stream is lazy: no gateway work starts until it is polled.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Reducer: Send + Sync {
    /// Reduce an action against the current state.
    ///
    /// # Arguments
    ///
    /// * `current` - The state held when the action was picked up
    /// * `action` - The action to process
    fn reduce(&self, current: &DisplayState, action: Action) -> StateStream;
}

/// The screen's reducer, backed by a [`DataGateway`].
///
/// - [`Action::RequestRead`] yields a loading state, then exactly one settled
///   state. A failed fetch is absorbed into that settled state: it keeps the
///   text of the state passed in and reports the failure message.
/// - [`Action::RequestReset`] clears the gateway and yields no state. A failed
///   clear is NOT absorbed; it is yielded as an `Err` item.
pub struct GreetingReducer<G> {
    gateway: Arc<G>,
}

impl<G> Clone for GreetingReducer<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<G: DataGateway + 'static> GreetingReducer<G> {
    pub fn new(gateway: G) -> Self {
        Self::shared(Arc::new(gateway))
    }

    /// Build a reducer around a gateway the caller keeps a handle to.
    pub fn shared(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn read(&self, current: &DisplayState) -> StateStream {
        let gateway = self.gateway.clone();
        let current = current.clone();

        let settled = async move {
            match gateway.fetch().await {
                Ok(value) => Ok(DisplayState::loaded(value)),
                Err(err) => {
                    warn!(%err, "read failed, keeping previous text");
                    Ok(current.failed(err.message().unwrap_or(UNKNOWN_ERROR)))
                }
            }
        };

        stream::once(future::ready(Ok(DisplayState::loading())))
            .chain(stream::once(settled))
            .boxed()
    }

    fn reset(&self) -> StateStream {
        let gateway = self.gateway.clone();

        stream::once(async move { gateway.clear().await })
            .filter_map(|cleared| {
                future::ready(match cleared {
                    Ok(value) => {
                        debug!(value, "gateway cleared");
                        None
                    }
                    Err(err) => Some(Err(err)),
                })
            })
            .boxed()
    }
}

impl<G: DataGateway + 'static> Reducer for GreetingReducer<G> {
    fn reduce(&self, current: &DisplayState, action: Action) -> StateStream {
        match action {
            Action::RequestRead => self.read(current),
            Action::RequestReset => self.reset(),
        }
    }
}
