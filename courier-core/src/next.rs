//! # Continuations
//!
//! A [`Next`] is what a pipe stage calls to let the connection advance. It is
//! consumed when invoked, so a stage can advance at most once. A stage that
//! drops its `Next` without invoking it fails the connection with
//! [`PipeError::Abandoned`] instead of hanging it.
//!
//! [`SharedNext`] is the cloneable variant for continuations reachable from
//! several places (for example a callback registered on many events). It
//! tracks its [`Stage`] and rejects a second completion.

use crate::error::{BoxError, PipeError};
use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

type Continuation<T> = Box<dyn FnOnce(Result<T, BoxError>) + Send + 'static>;

/// The continuation handed to a pipe stage.
pub struct Next<T> {
    continuation: Option<Continuation<T>>,
}

impl<T> Next<T> {
    /// Create a continuation from a completion function.
    pub fn new<F>(continuation: F) -> Self
    where
        F: FnOnce(Result<T, BoxError>) + Send + 'static,
    {
        Self {
            continuation: Some(Box::new(continuation)),
        }
    }

    /// Advance with the (possibly replaced) parameter.
    pub fn proceed(self, value: T) {
        self.complete(Ok(value));
    }

    /// Abort the remaining stages with `error`.
    pub fn fail(self, error: impl Into<BoxError>) {
        self.complete(Err(error.into()));
    }

    /// Advance or abort depending on `result`.
    pub fn complete(mut self, result: Result<T, BoxError>) {
        if let Some(continuation) = self.continuation.take() {
            continuation(result);
        }
    }

    /// Convert into a cloneable, guarded continuation.
    pub fn into_shared(self) -> SharedNext<T> {
        SharedNext {
            state: Arc::new(Mutex::new(SharedState {
                stage: Stage::Pending,
                next: Some(self),
            })),
        }
    }
}

impl<T> Drop for Next<T> {
    fn drop(&mut self) {
        if let Some(continuation) = self.continuation.take() {
            continuation(Err(Box::new(PipeError::Abandoned)));
        }
    }
}

impl<T> fmt::Debug for Next<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("pending", &self.continuation.is_some())
            .finish()
    }
}

/// The state of a [`SharedNext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Not completed yet.
    Pending,
    /// Completed with a value.
    Advanced,
    /// Completed with an error.
    Failed,
}

struct SharedState<T> {
    stage: Stage,
    next: Option<Next<T>>,
}

/// A cloneable continuation that can be completed exactly once.
///
/// Every completion after the first returns
/// [`PipeError::AlreadyAdvanced`] and leaves the continuation untouched.
pub struct SharedNext<T> {
    state: Arc<Mutex<SharedState<T>>>,
}

impl<T> SharedNext<T> {
    /// The current stage.
    pub fn stage(&self) -> Stage {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stage
    }

    /// Advance with `value`.
    pub fn proceed(&self, value: T) -> Result<(), PipeError> {
        self.complete(Ok(value))
    }

    /// Abort with `error`.
    pub fn fail(&self, error: impl Into<BoxError>) -> Result<(), PipeError> {
        self.complete(Err(error.into()))
    }

    /// Complete the continuation, or report that it was already completed.
    pub fn complete(&self, result: Result<T, BoxError>) -> Result<(), PipeError> {
        let next = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(next) = state.next.take() else {
                return Err(PipeError::AlreadyAdvanced);
            };
            state.stage = if result.is_ok() {
                Stage::Advanced
            } else {
                Stage::Failed
            };
            next
        };
        // The lock is released before running downstream stages.
        next.complete(result);
        Ok(())
    }
}

impl<T> Clone for SharedNext<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> fmt::Debug for SharedNext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedNext")
            .field("stage", &self.stage())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Next<u32>, Arc<Mutex<Vec<Result<u32, String>>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let next = Next::new(move |result: Result<u32, BoxError>| {
            sink.lock()
                .unwrap()
                .push(result.map_err(|e| e.to_string()));
        });
        (next, log)
    }

    #[test]
    fn test_proceed_delivers_value() {
        let (next, log) = recorder();
        next.proceed(5);
        assert_eq!(*log.lock().unwrap(), vec![Ok(5)]);
    }

    #[test]
    fn test_fail_delivers_error() {
        let (next, log) = recorder();
        next.fail("bad gateway");
        assert_eq!(*log.lock().unwrap(), vec![Err("bad gateway".to_string())]);
    }

    #[test]
    fn test_dropped_next_reports_abandoned() {
        let (next, log) = recorder();
        drop(next);
        assert_eq!(
            *log.lock().unwrap(),
            vec![Err(PipeError::Abandoned.to_string())]
        );
    }

    #[test]
    fn test_shared_next_rejects_second_completion() {
        let (next, log) = recorder();
        let shared = next.into_shared();
        let other = shared.clone();
        assert_eq!(shared.stage(), Stage::Pending);

        assert!(shared.proceed(1).is_ok());
        assert_eq!(other.stage(), Stage::Advanced);
        assert_eq!(other.proceed(2), Err(PipeError::AlreadyAdvanced));
        assert_eq!(other.fail("late"), Err(PipeError::AlreadyAdvanced));

        assert_eq!(*log.lock().unwrap(), vec![Ok(1)]);
    }

    #[test]
    fn test_shared_next_failed_stage() {
        let (next, log) = recorder();
        let shared = next.into_shared();
        assert!(shared.fail("nope").is_ok());
        assert_eq!(shared.stage(), Stage::Failed);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dropping_all_shared_handles_abandons() {
        let (next, log) = recorder();
        let shared = next.into_shared();
        drop(shared.clone());
        drop(shared);
        assert_eq!(
            *log.lock().unwrap(),
            vec![Err(PipeError::Abandoned.to_string())]
        );
    }
}
