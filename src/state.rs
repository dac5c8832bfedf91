//! Display state rendered by the screen and the actions that replace it.

/// Text shown before anything has been retrieved.
pub const DEFAULT_TEXT: &str = "Hello";

/// Text shown while a read is in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// Error text used when a failure carries no message of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// The UI-facing value object.
///
/// A state is never patched in place by the holder: every emission from the
/// reducer replaces the held state wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    pub text: String,
    pub is_busy: bool,
    pub error_message: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            is_busy: false,
            error_message: None,
        }
    }
}

impl DisplayState {
    /// Create a settled state showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// The transient state emitted before a read resolves.
    ///
    /// Any previous error is cleared so a busy state never carries one.
    pub fn loading() -> Self {
        Self {
            text: LOADING_TEXT.to_string(),
            is_busy: true,
            error_message: None,
        }
    }

    /// A settled state carrying a retrieved value.
    pub fn loaded(value: i64) -> Self {
        Self {
            text: value.to_string(),
            is_busy: false,
            error_message: None,
        }
    }

    /// A settled state keeping this state's text and reporting `message`.
    pub fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            text: self.text.clone(),
            is_busy: false,
            error_message: Some(message.into()),
        }
    }
}

/// A user- or lifecycle-triggered request processed by the reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Retrieve the next value from the data gateway.
    RequestRead,
    /// Reset the counter behind the data gateway.
    RequestReset,
}
