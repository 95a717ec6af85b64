//! Message trait for call payloads.

/// A marker trait for values that travel through a client.
///
/// Calls are handed between threads by executors and observed by callbacks
/// from any thread, so they must be `Send + Sync + 'static`. Every such type
/// is a `Message`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Values carried by a Courier client must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Message for T {}
