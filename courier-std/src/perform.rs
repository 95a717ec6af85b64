//! Standard performers.
//!
//! - [`Wait`]: run on the caller's thread and block until completion
//! - [`Suspend`]: run the work and hand back a future of its outcome
//! - [`Spawn`]: submit the work to an [`Executor`]

use crate::completion::Completion;
use courier_core::{BoxError, Executor, Performer, Work};

/// Runs the work on the calling thread and blocks until it completes.
///
/// The work may still hand its continuation to another thread (an engine
/// doing network I/O elsewhere); `Wait` blocks until that thread completes it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wait;

impl<T: Send + 'static> Performer<T> for Wait {
    type Output = Result<T, BoxError>;

    fn perform(&self, work: Work<T>) -> Self::Output {
        let (next, completion) = Completion::channel();
        work(next);
        completion.wait()
    }
}

/// Runs the work and returns a future resolving once it completes.
///
/// This is the variant for async callers: the calling task suspends on the
/// returned [`Completion`] instead of blocking its thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Suspend;

impl<T: Send + 'static> Performer<T> for Suspend {
    type Output = Completion<T>;

    fn perform(&self, work: Work<T>) -> Self::Output {
        let (next, completion) = Completion::channel();
        work(next);
        completion
    }
}

/// Submits the work to an executor.
///
/// The returned [`Completion`] may be awaited, waited on, or dropped.
#[derive(Debug, Clone, Default)]
pub struct Spawn<X> {
    executor: X,
}

impl<X> Spawn<X> {
    /// Perform on `executor`.
    pub fn new(executor: X) -> Self {
        Self { executor }
    }

    /// The executor in use.
    pub fn executor(&self) -> &X {
        &self.executor
    }
}

impl<T, X> Performer<T> for Spawn<X>
where
    T: Send + 'static,
    X: Executor,
{
    type Output = Completion<T>;

    fn perform(&self, work: Work<T>) -> Self::Output {
        let (next, completion) = Completion::channel();
        self.executor.execute(Box::new(move || work(next)));
        completion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{InlineExecutor, ThreadExecutor};
    use courier_core::Next;
    use std::thread;

    fn doubling(value: u32) -> Work<u32> {
        Box::new(move |next: Next<u32>| next.proceed(value * 2))
    }

    #[test]
    fn test_wait_blocks_for_result() {
        assert_eq!(Wait.perform(doubling(4)).unwrap(), 8);
    }

    #[test]
    fn test_wait_follows_offloaded_continuation() {
        let work: Work<u32> = Box::new(|next: Next<u32>| {
            thread::spawn(move || next.proceed(99));
        });
        assert_eq!(Wait.perform(work).unwrap(), 99);
    }

    #[tokio::test]
    async fn test_suspend_resolves() {
        assert_eq!(Suspend.perform(doubling(5)).await.unwrap(), 10);
    }

    #[test]
    fn test_spawn_on_thread() {
        let caller = thread::current().id();
        let work: Work<bool> =
            Box::new(move |next: Next<bool>| next.proceed(thread::current().id() != caller));
        let ran_elsewhere = Spawn::new(ThreadExecutor::new()).perform(work).wait().unwrap();
        assert!(ran_elsewhere);
    }

    #[test]
    fn test_spawn_inline() {
        let mut completion = Spawn::new(InlineExecutor).perform(doubling(1));
        assert_eq!(completion.try_take().unwrap().unwrap(), 2);
    }
}
