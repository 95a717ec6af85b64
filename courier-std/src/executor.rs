//! Standard executors.

use courier_core::{Executor, Task};
use std::thread;

/// Runs every task on a freshly spawned thread.
#[derive(Debug, Clone, Default)]
pub struct ThreadExecutor {
    name: Option<String>,
}

impl ThreadExecutor {
    /// Create an executor with unnamed threads.
    pub fn new() -> Self {
        Self { name: None }
    }

    /// Create an executor whose threads carry `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, task: Task) {
        let mut builder = thread::Builder::new();
        if let Some(name) = &self.name {
            builder = builder.name(name.clone());
        }
        // On failure the task is dropped, which abandons its continuation.
        if let Err(error) = builder.spawn(task) {
            tracing::error!(%error, "failed to spawn worker thread");
        }
    }
}

/// Runs every task immediately on the submitting thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, task: Task) {
        task()
    }
}

/// Runs every task on the blocking pool of a tokio runtime.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "tokio")]
impl TokioExecutor {
    /// Use the runtime behind `handle`.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime of the current context.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

#[cfg(feature = "tokio")]
impl Executor for TokioExecutor {
    fn execute(&self, task: Task) {
        // Detached: the task reports through its continuation.
        drop(self.handle.spawn_blocking(task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_named_thread_executor() {
        let (tx, rx) = mpsc::channel();
        ThreadExecutor::named("courier-test").execute(Box::new(move || {
            let _ = tx.send(thread::current().name().map(str::to_string));
        }));
        assert_eq!(rx.recv().unwrap().as_deref(), Some("courier-test"));
    }

    #[test]
    fn test_inline_runs_immediately() {
        let (tx, rx) = mpsc::channel();
        InlineExecutor.execute(Box::new(move || tx.send(1).unwrap()));
        assert_eq!(rx.try_recv().unwrap(), 1);
    }
}
