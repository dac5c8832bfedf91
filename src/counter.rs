//! The counter store: sole owner of the incrementing, multiplying integer.

use tracing::debug;

/// Factor applied to the counter on every read.
pub const MULTIPLIER: i64 = 10 * 4 * 2;

/// Value the counter starts at and returns to on reset.
pub const INITIAL_COUNTER: i64 = 1;

/// Holds one counter. Instances never share state.
///
/// Mutation needs `&mut self`; whoever owns the store decides how access is
/// shared (see [`CounterGateway`](crate::CounterGateway)).
#[derive(Debug)]
pub struct CounterStore {
    counter: i64,
    last_stored: Option<i64>,
}

impl Default for CounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterStore {
    pub fn new() -> Self {
        Self {
            counter: INITIAL_COUNTER,
            last_stored: None,
        }
    }

    /// Return `counter * MULTIPLIER`, then advance the counter by one.
    pub fn read(&mut self) -> i64 {
        let value = self.counter.wrapping_mul(MULTIPLIER);
        self.counter = self.counter.wrapping_add(1);
        debug!(value, next = self.counter, "counter read");
        value
    }

    /// Put the counter back to its initial value and return it.
    pub fn reset(&mut self) -> i64 {
        self.counter = INITIAL_COUNTER;
        debug!("counter reset");
        self.counter
    }

    /// Record a written value. The read sequence is left untouched.
    pub fn store(&mut self, data: i64) {
        debug!(data, "value stored");
        self.last_stored = Some(data);
    }

    /// The most recent value passed to [`store`](Self::store).
    pub fn last_stored(&self) -> Option<i64> {
        self.last_stored
    }

    #[cfg(test)]
    fn starting_at(counter: i64) -> Self {
        Self {
            counter,
            last_stored: None,
        }
    }
}
