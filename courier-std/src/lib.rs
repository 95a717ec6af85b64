//! # courier-std
//!
//! Standard implementations for the Courier HTTP pipeline.
//!
//! This crate provides:
//! - **Client**: [`Client`] with its callback registry, extras and pipeline, and [`ClientBuilder`]
//! - **Performers**: [`Wait`], [`Suspend`], [`Spawn`] and the [`Completion`] future
//! - **Executors**: [`ThreadExecutor`], [`InlineExecutor`], `TokioExecutor`
//! - **Engine adapters**: [`BlockingEngine`], `TokioEngine`
//! - **Standard pipes**: Conditional, Branch, Transform
//! - **Standard middleware**: Logging
//! - **Testing**: recording callbacks, scripted engines and spy pipes

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

// Modules
pub mod client;
pub mod completion;
pub mod engines;
pub mod executor;
pub mod middleware;
pub mod perform;
pub mod pipes;
pub mod testing;

pub use client::{CallbackHandle, Client, ClientBuilder, Extras, Registration};
pub use completion::Completion;
#[cfg(feature = "tokio")]
pub use engines::TokioEngine;
pub use engines::BlockingEngine;
#[cfg(feature = "tokio")]
pub use executor::TokioExecutor;
pub use executor::{InlineExecutor, ThreadExecutor};
pub use middleware::LoggingMiddleware;
pub use perform::{Spawn, Suspend, Wait};
pub use pipes::{Branch, Conditional, Transform};
