//! # courier - HTTP Message Modeling with a Callback-Driven Pipeline
//!
//! `courier` models HTTP messages as validated values and moves them through a
//! client pipeline: `before` pipes, an externally supplied engine, `after`
//! pipes, with lifecycle events announced to registered callbacks along the
//! way. The transport itself is never part of this crate.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! let client = HttpClient::builder()
//!     .middleware(ContentHeaders)
//!     .engine(|mut call: Call, next: Next<Call>| {
//!         call.set_response(Response::ok());
//!         next.proceed(call);
//!     })
//!     .on(Action::CONNECTED, |_, event: &Event<'_, Call>| {
//!         println!("answered: {:?}", event.call().and_then(Call::response));
//!     })
//!     .build();
//!
//! let call = client.connect(Call::new(Request::get("http://example.com/")?))?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod middleware;

pub use courier_core::{
    // Events
    Action,
    // Errors
    BoxError,
    // Callbacks
    Callback,
    // Engines
    AsyncEngine,
    BoxPipe,
    Chain,
    ClientEngine,
    Combined,
    CourierError,
    DispatchError,
    Emission,
    Event,
    EventKind,
    // Execution
    Executor,
    IntoCallbackResult,
    LocalAsyncEngine,
    Message,
    Middleware,
    // Continuations
    Next,
    Performer,
    Pipe,
    PipeError,
    SharedNext,
    Stage,
    Task,
    Work,
    combine,
};

pub use courier_std::{
    BlockingEngine, Branch, CallbackHandle, Client, ClientBuilder, Completion, Conditional,
    Extras, InlineExecutor, LoggingMiddleware, Registration, Spawn, Suspend, ThreadExecutor,
    Transform, Wait,
};

#[cfg(feature = "tokio")]
pub use courier_std::{TokioEngine, TokioExecutor};

pub use courier_http::{
    Body, Call, HeaderName, HeaderValue, Headers, HttpError, HttpVersion, Method, Query,
    ReasonPhrase, Request, RequestLine, Response, StatusCode, StatusLine, Uri,
};

pub use middleware::{ContentHeaders, DefaultHeaders, MissingResponse, RequireResponse};

/// A client carrying HTTP calls.
pub type HttpClient = Client<Call>;

/// HTTP value objects.
pub mod http {
    #![allow(clippy::wildcard_imports)]
    pub use courier_http::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Events and callbacks
        Action,
        // Errors
        BoxError,
        // Bodies
        Body,
        // HTTP values
        Call,
        Client,
        ClientEngine,
        // Middleware
        ContentHeaders,
        DefaultHeaders,
        Emission,
        Event,
        Headers,
        HttpClient,
        HttpError,
        Method,
        Middleware,
        // Pipeline
        Next,
        Pipe,
        Request,
        RequireResponse,
        Response,
        StatusCode,
        Uri,
    };
    pub use courier_http::body::{JsonBody, MultipartBody, TextBody};
}
