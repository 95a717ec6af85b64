//! # Middleware
//!
//! A middleware installs behavior on a client: callbacks, pipes, an engine,
//! extras. It is injected once per client. The client does not track which
//! middleware it received, so injecting the same one twice installs its
//! behavior twice.

/// Installs behavior on a caller of type `C`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Middleware` for `{C}`",
    label = "missing `Middleware` implementation",
    note = "Middleware implements `inject(&self, client: &{C})`, or is a closure `Fn(&{C})`."
)]
pub trait Middleware<C>: Send + Sync {
    /// Register this middleware's behavior on `client`.
    fn inject(&self, client: &C);
}

impl<C, F> Middleware<C> for F
where
    F: Fn(&C) + Send + Sync,
{
    fn inject(&self, client: &C) {
        (self)(client)
    }
}
