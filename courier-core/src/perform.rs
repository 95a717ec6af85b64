//! # Performers
//!
//! A [`Performer`] decides how a unit of [`Work`] runs relative to the
//! caller: inline and blocking, on an [`Executor`], or as a future. The work
//! itself is always the same: it receives a [`Next`] and completes it once.

use crate::next::Next;

/// A unit of work: drives a connection and completes the given continuation.
pub type Work<T> = Box<dyn FnOnce(Next<T>) + Send + 'static>;

/// A task submitted to an [`Executor`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// The execution strategy of a connection.
pub trait Performer<T>: Send + Sync {
    /// What the caller gets back: a result, a future, a handle.
    type Output;

    /// Run `work` according to this strategy.
    fn perform(&self, work: Work<T>) -> Self::Output;
}

/// Task submission to some pool of threads or a runtime.
///
/// Implementations decide where and when the task runs; they must run it at
/// most once. A task that is dropped without running abandons whatever
/// continuation it captured.
pub trait Executor: Send + Sync + 'static {
    /// Submit `task`.
    fn execute(&self, task: Task);
}

impl<X: Executor + ?Sized> Executor for std::sync::Arc<X> {
    fn execute(&self, task: Task) {
        (**self).execute(task)
    }
}
