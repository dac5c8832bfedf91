//! The single failure kind surfaced by gateway calls.

use thiserror::Error;

/// A gateway operation failed, optionally with a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("operation failed"))]
pub struct OperationFailed {
    message: Option<String>,
}

impl OperationFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// A failure that carries no message.
    pub fn without_message() -> Self {
        Self { message: None }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
