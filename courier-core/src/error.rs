//! Error types for Courier.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`CourierError`] - Top-level error type for all Courier operations
//! - [`DispatchError`] - Failures captured while invoking callbacks
//! - [`PipeError`] - Continuation and pipeline failures

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Courier operations.
#[derive(Error, Debug)]
pub enum CourierError {
    /// A callback failed during dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A pipeline stage misbehaved or could not run.
    #[error("pipe error: {0}")]
    Pipe(#[from] PipeError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Failures captured while invoking callbacks.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The callback panicked during execution.
    #[error("callback panicked: {0}")]
    Panic(String),

    /// The callback returned an error.
    #[error("callback failed")]
    Callback(#[source] BoxError),
}

/// Failures of the continuation-passing pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipeError {
    /// A stage dropped its continuation without advancing it.
    #[error("pipe stage dropped its continuation without advancing")]
    Abandoned,

    /// A continuation was completed more than once.
    #[error("continuation has already been advanced")]
    AlreadyAdvanced,

    /// The client has no engine to perform the connection.
    #[error("no engine installed on the client")]
    NoEngine,

    /// The performer lost its continuation before completion.
    #[error("performance was canceled before completion")]
    Canceled,
}

// Convenience conversions
impl From<BoxError> for CourierError {
    fn from(err: BoxError) -> Self {
        CourierError::Custom(err)
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Callback(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_error_converts_into_courier_error() {
        let err: CourierError = PipeError::NoEngine.into();
        assert_eq!(err.to_string(), "pipe error: no engine installed on the client");
    }

    #[test]
    fn test_dispatch_error_keeps_source() {
        let inner: BoxError = "boom".into();
        let err = DispatchError::from(inner);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));
    }
}
