//! Logging middleware for connection observation.

use crate::client::Client;
use courier_core::{Action, Event, Message, Middleware};
use std::fmt::Debug;

/// Middleware that logs every event of a client through `tracing`.
///
/// Lifecycle events are logged at debug level with the call, exceptions at
/// warn level with the error.
#[derive(Debug, Clone, Copy)]
pub struct LoggingMiddleware {
    name: &'static str,
}

impl LoggingMiddleware {
    /// Create a logging middleware labelled `name`.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The label attached to every log record.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new("courier")
    }
}

impl<T> Middleware<Client<T>> for LoggingMiddleware
where
    T: Message + Debug,
{
    fn inject(&self, client: &Client<T>) {
        let name = self.name;
        client.on(Action::ALL, move |_, event: &Event<'_, T>| {
            if let Some(call) = event.call() {
                tracing::debug!(client = name, kind = %event.kind(), ?call, "connection event");
            }
        });
        client.on(Action::EXCEPTION, move |_, event: &Event<'_, T>| {
            if let Some(error) = event.error() {
                tracing::warn!(client = name, %error, "connection exception");
            }
        });
    }
}
