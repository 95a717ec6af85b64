//! # Pipes
//!
//! A [`Pipe`] is one stage of the processing applied to a call. It receives
//! the call together with a [`Next`], and advances the connection by handing
//! the call (or an error) to `next`. A stage may do its work asynchronously:
//! the pipeline simply does not move until `next` is invoked.
//!
//! # Composition
//!
//! - [`Pipe::then`] chains two stages
//! - [`combine`] chains any number of boxed stages
//!
//! In both cases an upstream failure short-circuits: the remaining stages are
//! skipped and the failure reaches the terminal continuation.

use crate::{message::Message, next::Next};
use std::sync::Arc;

/// A shared, dynamically dispatched pipe.
pub type BoxPipe<T> = Arc<dyn Pipe<T>>;

/// A processing stage over values of type `T`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Pipe` over `{T}`",
    label = "missing `Pipe` implementation",
    note = "Pipes implement `pipe(&self, parameter: {T}, next: Next<{T}>)`, or are closures `Fn({T}, Next<{T}>)`."
)]
pub trait Pipe<T>: Send + Sync + 'static {
    /// Process `parameter`, then invoke `next`.
    fn pipe(&self, parameter: T, next: Next<T>);

    /// Runs `self`, then `other` with the value `self` advanced with.
    fn then<P>(self, other: P) -> Chain<Self, P>
    where
        Self: Sized,
        P: Pipe<T>,
    {
        Chain {
            first: self,
            second: Arc::new(other),
        }
    }

    /// Boxes the pipe.
    fn boxed(self) -> BoxPipe<T>
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

// Blanket impl for closures
impl<T, F> Pipe<T> for F
where
    F: Fn(T, Next<T>) + Send + Sync + 'static,
{
    fn pipe(&self, parameter: T, next: Next<T>) {
        (self)(parameter, next)
    }
}

/// Two pipes run one after the other.
pub struct Chain<A, B> {
    first: A,
    second: Arc<B>,
}

impl<T, A, B> Pipe<T> for Chain<A, B>
where
    T: Message,
    A: Pipe<T>,
    B: Pipe<T>,
{
    fn pipe(&self, parameter: T, next: Next<T>) {
        let second = self.second.clone();
        self.first.pipe(
            parameter,
            Next::new(move |result| match result {
                Ok(value) => second.pipe(value, next),
                Err(error) => next.fail(error),
            }),
        );
    }
}

/// Any number of pipes run in order.
pub struct Combined<T> {
    stages: Arc<[BoxPipe<T>]>,
}

impl<T> Combined<T> {
    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether there are no stages; an empty pipe advances immediately.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<T> Clone for Combined<T> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
        }
    }
}

/// Chain `pipes` into a single pipe running them in order.
pub fn combine<T, I>(pipes: I) -> Combined<T>
where
    I: IntoIterator<Item = BoxPipe<T>>,
{
    Combined {
        stages: pipes.into_iter().collect(),
    }
}

impl<T: Message> Pipe<T> for Combined<T> {
    fn pipe(&self, parameter: T, next: Next<T>) {
        run(self.stages.clone(), 0, parameter, next);
    }
}

fn run<T: Message>(stages: Arc<[BoxPipe<T>]>, index: usize, parameter: T, next: Next<T>) {
    let Some(stage) = stages.get(index).cloned() else {
        return next.proceed(parameter);
    };
    stage.pipe(
        parameter,
        Next::new(move |result| match result {
            Ok(value) => run(stages, index + 1, value, next),
            Err(error) => next.fail(error),
        }),
    );
}
