//! Testing utilities for Courier.
//!
//! This module provides utilities to make testing clients, pipes and
//! middleware easier.
//!
//! # Features
//!
//! - [`RecordingCallback`]: A callback that records every event it receives
//! - [`CountingCallback`]: A callback that counts invocations
//! - [`ScriptedEngine`]: An engine answering from a closure
//! - [`FailingPipe`]: A pipe that always fails
//! - [`SpyPipe`]: A pipe that records parameters and passes them through

use courier_core::{BoxError, Callback, ClientEngine, Event, EventKind, Message, Next, Pipe};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Recording Callback
// ============================================================================

/// One event seen by a [`RecordingCallback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded<T> {
    /// The event kind.
    pub kind: EventKind,
    /// The call of a lifecycle event.
    pub call: Option<T>,
    /// The rendered error of an exception event.
    pub error: Option<String>,
}

/// A callback that records all events it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingCallback::<u32>::new();
/// client.on_callback(Action::ALL, recorder.clone());
///
/// client.connect(1)?;
///
/// assert_eq!(recorder.kinds(), vec![EventKind::Connect, EventKind::Connected, EventKind::Disconnected]);
/// ```
pub struct RecordingCallback<T> {
    events: Arc<Mutex<Vec<Recorded<T>>>>,
}

impl<T: Clone> RecordingCallback<T> {
    /// Create a new recording callback.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Recorded<T>> {
        lock(&self.events).clone()
    }

    /// The kinds of the recorded events, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        lock(&self.events).iter().map(|event| event.kind).collect()
    }

    /// The recorded exception messages, in order.
    pub fn errors(&self) -> Vec<String> {
        lock(&self.events)
            .iter()
            .filter_map(|event| event.error.clone())
            .collect()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}

impl<T: Clone> Default for RecordingCallback<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingCallback<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<C, T> Callback<C, T> for RecordingCallback<T>
where
    T: Message + Clone,
{
    fn call(&self, _caller: &C, event: &Event<'_, T>) -> Result<(), BoxError> {
        lock(&self.events).push(Recorded {
            kind: event.kind(),
            call: event.call().cloned(),
            error: event.error().map(ToString::to_string),
        });
        Ok(())
    }
}

// ============================================================================
// Counting Callback
// ============================================================================

/// A callback that counts invocations.
#[derive(Debug, Clone, Default)]
pub struct CountingCallback {
    count: Arc<AtomicUsize>,
}

impl CountingCallback {
    /// Create a new counting callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<C, T> Callback<C, T> for CountingCallback {
    fn call(&self, _caller: &C, _event: &Event<'_, T>) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Scripted Engine
// ============================================================================

type Script<T> = dyn Fn(T) -> Result<T, BoxError> + Send + Sync;

/// An engine answering every call from a closure, counting the calls.
///
/// # Example
///
/// ```rust,ignore
/// let engine = ScriptedEngine::new(|mut call: Call| {
///     call.set_response(Response::ok());
///     Ok(call)
/// });
/// client.set_engine(engine.clone());
/// ```
pub struct ScriptedEngine<T> {
    script: Arc<Script<T>>,
    calls: Arc<AtomicUsize>,
}

impl<T: Message> ScriptedEngine<T> {
    /// Answer with `script`.
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(T) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Hand every call back unchanged.
    pub fn echo() -> Self {
        Self::new(Ok)
    }

    /// Fail every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(move |_| Err(message.clone().into()))
    }

    /// Get the number of performed calls.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T> Clone for ScriptedEngine<T> {
    fn clone(&self) -> Self {
        Self {
            script: self.script.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: Message> ClientEngine<T> for ScriptedEngine<T> {
    fn connect(&self, call: T, next: Next<T>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        next.complete((self.script)(call))
    }
}

// ============================================================================
// Failing Pipe
// ============================================================================

/// A pipe that fails every call with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingPipe {
    message: String,
}

impl FailingPipe {
    /// Fail with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<T: Message> Pipe<T> for FailingPipe {
    fn pipe(&self, _parameter: T, next: Next<T>) {
        next.fail(self.message.clone())
    }
}

// ============================================================================
// Spy Pipe
// ============================================================================

/// A pipe that records the parameters it sees and passes them through.
pub struct SpyPipe<T> {
    parameters: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> SpyPipe<T> {
    /// Create a new spy pipe.
    pub fn new() -> Self {
        Self {
            parameters: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get recorded parameters.
    pub fn parameters(&self) -> Vec<T> {
        lock(&self.parameters).clone()
    }

    /// Get the number of times the pipe ran.
    pub fn call_count(&self) -> usize {
        lock(&self.parameters).len()
    }
}

impl<T: Clone> Default for SpyPipe<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SpyPipe<T> {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
        }
    }
}

impl<T: Message + Clone> Pipe<T> for SpyPipe<T> {
    fn pipe(&self, parameter: T, next: Next<T>) {
        lock(&self.parameters).push(parameter.clone());
        next.proceed(parameter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use courier_core::Action;

    #[test]
    fn test_recording_callback_sees_lifecycle() {
        let client: Client<u32> = Client::new();
        let recorder = RecordingCallback::new();
        client.on_callback(Action::ALL, recorder.clone());
        client.on_callback(Action::EXCEPTION, recorder.clone());
        client.set_engine(ScriptedEngine::echo());

        client.connect(3).unwrap();

        assert_eq!(
            recorder.kinds(),
            vec![
                EventKind::Connect,
                EventKind::Connected,
                EventKind::Disconnected
            ]
        );
        assert!(recorder.events().iter().all(|event| event.call == Some(3)));
    }

    #[test]
    fn test_failing_engine_is_recorded_as_exception() {
        let client: Client<u32> = Client::new();
        let recorder = RecordingCallback::new();
        let engine = ScriptedEngine::failing("connection refused");
        client.on_callback(Action::EXCEPTION, recorder.clone());
        client.set_engine(engine.clone());

        assert!(client.connect(3).is_err());
        assert_eq!(engine.call_count(), 1);
        assert_eq!(recorder.errors(), vec!["connection refused".to_string()]);
    }

    #[test]
    fn test_spy_and_failing_pipe() {
        let client: Client<u32> = Client::new();
        let spy = SpyPipe::new();
        let engine = ScriptedEngine::echo();
        let counter = CountingCallback::new();
        client
            .before(spy.clone())
            .before(FailingPipe::new("blocked"))
            .set_engine(engine.clone());
        client.on_callback(Action::EXCEPTION, counter.clone());

        let err = client.connect(8).unwrap_err();

        assert_eq!(err.to_string(), "blocked");
        assert_eq!(spy.parameters(), vec![8]);
        assert_eq!(engine.call_count(), 0);
        assert_eq!(counter.count(), 1);
    }
}
