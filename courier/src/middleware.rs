//! HTTP-aware middleware for [`HttpClient`](crate::HttpClient).
//!
//! Each type here is both a [`Pipe`] over [`Call`] and a [`Middleware`] that
//! installs that pipe on the right side of the engine.

use courier_core::{Middleware, Next, Pipe};
use courier_http::{Call, HeaderName, HeaderValue, Headers, HttpError, Method, Uri, names};
use courier_std::Client;
use thiserror::Error;

/// Fills `Content-Type` and `Content-Length` from the request body.
///
/// Headers already set on the request are left alone, and a body that does
/// not know its length gets no `Content-Length`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHeaders;

impl ContentHeaders {
    fn fill(call: &mut Call) -> Result<(), HttpError> {
        let request = call.request_mut();
        let Some(body) = request.body().cloned() else {
            return Ok(());
        };
        let headers = request.headers_mut();
        if !headers.contains(names::CONTENT_TYPE) {
            if let Some(content_type) = body.content_type() {
                headers.insert(names::CONTENT_TYPE, content_type)?;
            }
        }
        if !headers.contains(names::CONTENT_LENGTH) {
            if let Some(length) = body.content_length() {
                headers.insert(names::CONTENT_LENGTH, length)?;
            }
        }
        Ok(())
    }
}

impl Pipe<Call> for ContentHeaders {
    fn pipe(&self, mut call: Call, next: Next<Call>) {
        match Self::fill(&mut call) {
            Ok(()) => next.proceed(call),
            Err(error) => next.fail(error),
        }
    }
}

impl Middleware<Client<Call>> for ContentHeaders {
    fn inject(&self, client: &Client<Call>) {
        client.before(*self);
    }
}

/// Adds configured headers to requests that lack them.
///
/// # Example
///
/// ```rust,ignore
/// let defaults = DefaultHeaders::new()
///     .with("User-Agent", "courier/0.1")?
///     .with("Accept", "*/*")?;
/// client.use_middleware(&defaults);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: Headers,
}

impl DefaultHeaders {
    /// No defaults yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default header.
    pub fn with<N, V>(mut self, name: N, value: V) -> Result<Self, HttpError>
    where
        N: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        HttpError: From<N::Error> + From<V::Error>,
    {
        self.headers.append(name, value)?;
        Ok(self)
    }

    /// The configured defaults.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

impl From<Headers> for DefaultHeaders {
    fn from(headers: Headers) -> Self {
        Self { headers }
    }
}

impl Pipe<Call> for DefaultHeaders {
    fn pipe(&self, mut call: Call, next: Next<Call>) {
        let headers = call.request_mut().headers_mut();
        for (name, value) in self.headers.iter() {
            if headers.contains(name.as_str()) {
                continue;
            }
            if let Err(error) = headers.append(name.clone(), value.clone()) {
                return next.fail(error);
            }
        }
        next.proceed(call)
    }
}

impl Middleware<Client<Call>> for DefaultHeaders {
    fn inject(&self, client: &Client<Call>) {
        client.before(self.clone());
    }
}

/// Fails calls that come back from the engine without a response.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireResponse;

/// The engine completed a call without answering it.
#[derive(Debug, Error)]
#[error("no response for {method} {target}")]
pub struct MissingResponse {
    /// Method of the unanswered request.
    pub method: Method,
    /// Target of the unanswered request.
    pub target: Uri,
}

impl Pipe<Call> for RequireResponse {
    fn pipe(&self, call: Call, next: Next<Call>) {
        if call.is_answered() {
            return next.proceed(call);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(request = %call.request().line(), "call left unanswered");
        let request = call.request();
        next.fail(MissingResponse {
            method: request.method().clone(),
            target: request.uri().clone(),
        })
    }
}

impl Middleware<Client<Call>> for RequireResponse {
    fn inject(&self, client: &Client<Call>) {
        client.after(*self);
    }
}
