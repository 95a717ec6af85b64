//! # Engines
//!
//! The engine is the external collaborator that performs the transport. It
//! receives the call and must complete `next` exactly once, with the updated
//! call or with the failure.

use crate::{error::BoxError, next::Next};

/// Performs the connection for a call.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `ClientEngine` for `{T}`",
    label = "missing `ClientEngine` implementation",
    note = "Engines implement `connect(&self, call: {T}, next: Next<{T}>)`, or are closures `Fn({T}, Next<{T}>)`."
)]
pub trait ClientEngine<T>: Send + Sync + 'static {
    /// Perform `call`, then complete `next`.
    fn connect(&self, call: T, next: Next<T>);
}

impl<T, F> ClientEngine<T> for F
where
    F: Fn(T, Next<T>) + Send + Sync + 'static,
{
    fn connect(&self, call: T, next: Next<T>) {
        (self)(call, next)
    }
}

/// An engine written as an async function.
///
/// [`AsyncEngine`] is the `Send` variant required to run the engine on a
/// multi-threaded runtime; [`LocalAsyncEngine`] drops that requirement.
/// Adapters in `courier-std` turn either into a [`ClientEngine`].
#[trait_variant::make(AsyncEngine: Send)]
pub trait LocalAsyncEngine<T> {
    /// Perform `call` and return it updated with the outcome.
    async fn connect(&self, call: T) -> Result<T, BoxError>;
}
