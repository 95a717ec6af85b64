//! # courier-core
//!
//! Core traits for the Courier HTTP pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! engines and middleware that don't need the full `courier-std` client.
//!
//! # Building Blocks
//!
//! ## Events ([`Event`], [`Emission`], [`Action`])
//!
//! A client announces what happens to a connection through a closed set of
//! event kinds. Each [`Event`] carries a typed payload: the call for lifecycle
//! events, the error for exceptions. An [`Action`] selects which events a
//! callback wants to see.
//!
//! ## Callbacks ([`Callback`])
//!
//! Handlers registered on a client. A callback fires at most once per
//! emission, and its errors are routed back to the client rather than to the
//! emitter.
//!
//! ## Continuations ([`Next`], [`Pipe`])
//!
//! A [`Pipe`] is one processing stage. It receives the call and a [`Next`],
//! and must hand the call (or a failure) to `next` to let the connection
//! advance. Stages compose with [`Pipe::then`] and [`combine`].
//!
//! ## Execution ([`ClientEngine`], [`Performer`], [`Executor`])
//!
//! The [`ClientEngine`] performs the actual transport. A [`Performer`] decides
//! *how* the whole unit of work runs: inline, on an [`Executor`], or as a
//! future.
//!
//! # Error Types
//!
//! - [`CourierError`] - Top-level error type
//! - [`DispatchError`] - Callback failures captured during dispatch
//! - [`PipeError`] - Continuation misuse and missing collaborators

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod callback;
mod engine;
mod error;
mod event;
mod message;
mod middleware;
mod next;
mod perform;
mod pipe;

// Re-exports
pub use action::Action;
pub use callback::{Callback, IntoCallbackResult};
pub use engine::{AsyncEngine, ClientEngine, LocalAsyncEngine};
pub use error::{BoxError, CourierError, DispatchError, PipeError};
pub use event::{Emission, Event, EventKind};
pub use message::Message;
pub use middleware::Middleware;
pub use next::{Next, SharedNext, Stage};
pub use perform::{Executor, Performer, Task, Work};
pub use pipe::{BoxPipe, Chain, Combined, Pipe, combine};
