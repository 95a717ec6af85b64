//! Completion handle for performed work.

use courier_core::{BoxError, Next, PipeError};
use futures::channel::oneshot;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// The eventual outcome of a performed connection.
///
/// A `Completion` is a future resolving once the work's continuation is
/// completed. It can also be waited on from synchronous code with
/// [`Completion::wait`], polled without blocking with
/// [`Completion::try_take`], or simply dropped when the caller does not care.
#[derive(Debug)]
pub struct Completion<T> {
    receiver: oneshot::Receiver<Result<T, BoxError>>,
    taken: bool,
}

impl<T: Send + 'static> Completion<T> {
    /// Create a linked continuation and completion.
    pub fn channel() -> (Next<T>, Completion<T>) {
        let (sender, receiver) = oneshot::channel();
        let next = Next::new(move |result| {
            // The receiver may be gone; the caller chose not to observe.
            let _ = sender.send(result);
        });
        (
            next,
            Completion {
                receiver,
                taken: false,
            },
        )
    }
}

impl<T> Completion<T> {
    /// Block the current thread until the outcome is available.
    pub fn wait(self) -> Result<T, BoxError> {
        futures::executor::block_on(self)
    }

    /// Take the outcome if it is already available.
    ///
    /// Returns `None` while the work is pending and after the outcome was
    /// taken once.
    pub fn try_take(&mut self) -> Option<Result<T, BoxError>> {
        if self.taken {
            return None;
        }
        let outcome = match self.receiver.try_recv() {
            Ok(outcome) => outcome?,
            Err(oneshot::Canceled) => Err(Box::new(PipeError::Canceled) as BoxError),
        };
        self.taken = true;
        Some(outcome)
    }
}

impl<T> Future for Completion<T> {
    type Output = Result<T, BoxError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|received| match received {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => Err(Box::new(PipeError::Canceled) as BoxError),
        })
    }
}
