//! # Callbacks
//!
//! Handlers registered on a client and fired by its emissions.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|client, event| { ... }`
//! 2. **Fallible closure**: `|client, event| -> Result<(), MyError> { ... }`
//! 3. **Struct implementation**: `impl Callback<Client<Call>, Call> for MyCallback`

use crate::{error::BoxError, event::Event};

/// Conversion of a callback's return value into a dispatch result.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<(), E>` → the error is boxed and routed by the client
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a callback",
    label = "expected `()` or `Result<(), E>`",
    note = "Callbacks return `()` or a `Result` whose error converts into `BoxError`."
)]
pub trait IntoCallbackResult {
    /// Convert into the dispatch result.
    fn into_callback_result(self) -> Result<(), BoxError>;
}

impl IntoCallbackResult for () {
    fn into_callback_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoCallbackResult for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_callback_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// A handler invoked with the caller and the firing event.
///
/// `C` is the caller type (usually the client the callback is registered
/// on); `T` is the call payload carried by lifecycle events.
///
/// Errors returned here never reach the emitter. The client forwards them to
/// its exception callbacks or to an explicit error sink.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Callback` for `{C}`",
    label = "missing `Callback` implementation",
    note = "Callbacks must implement `call(&self, caller: &{C}, event: &Event<'_, {T}>)`."
)]
pub trait Callback<C, T>: Send + Sync + 'static {
    /// Handle `event` fired by `caller`.
    fn call(&self, caller: &C, event: &Event<'_, T>) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<C, T, F, R> Callback<C, T> for F
where
    F: Fn(&C, &Event<'_, T>) -> R + Send + Sync + 'static,
    R: IntoCallbackResult,
{
    fn call(&self, caller: &C, event: &Event<'_, T>) -> Result<(), BoxError> {
        (self)(caller, event).into_callback_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fire<K: Callback<(), u8>>(callback: &K, value: u8) -> Result<(), BoxError> {
        callback.call(&(), &Event::Connect(&value))
    }

    fn closure<F, R>(f: F) -> F
    where
        F: Fn(&(), &Event<'_, u8>) -> R,
        R: IntoCallbackResult,
    {
        f
    }

    #[test]
    fn test_unit_closure_succeeds() {
        let seen = std::sync::Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let callback = closure(move |_, event| {
            counter.fetch_add(usize::from(*event.call().unwrap_or(&0)), Ordering::SeqCst);
        });
        assert!(fire(&callback, 3).is_ok());
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_result_closure_propagates_error() {
        let callback = closure(|_, _| -> Result<(), std::io::Error> {
            Err(std::io::Error::other("callback failed"))
        });
        let err = fire(&callback, 1).unwrap_err();
        assert_eq!(err.to_string(), "callback failed");
    }

    struct Rejecting;

    impl Callback<(), u8> for Rejecting {
        fn call(&self, _caller: &(), event: &Event<'_, u8>) -> Result<(), BoxError> {
            Err(format!("rejected {}", event.kind()).into())
        }
    }

    #[test]
    fn test_struct_callback() {
        let err = fire(&Rejecting, 1).unwrap_err();
        assert_eq!(err.to_string(), "rejected connect");
    }
}
