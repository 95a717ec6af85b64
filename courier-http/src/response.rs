//! Responses.

use crate::{
    body::{Body, SharedBody},
    error::{Component, HttpError, Result},
    headers::{HeaderName, HeaderValue, Headers},
    line::StatusLine,
    request::{split_message, write_body},
    status::{ReasonPhrase, StatusCode},
    version::HttpVersion,
};
use std::{fmt, sync::Arc};

/// A response: status line, headers and an optional body.
#[derive(Debug, Clone)]
pub struct Response {
    line: StatusLine,
    headers: Headers,
    body: Option<SharedBody>,
}

impl Response {
    /// An `HTTP/1.1` response with the canonical reason of `code`.
    pub fn new(code: StatusCode) -> Self {
        Self {
            line: StatusLine::canonical(code),
            headers: Headers::new(),
            body: None,
        }
    }

    /// `200 OK`
    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Start building a response.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// Parse the text form: status line, header lines, a blank line and the
    /// body.
    pub fn parse(text: &str) -> Result<Self> {
        let parts = split_message(text, Component::StatusLine)?;
        let headers = Headers::parse(parts.headers)?;
        let body = parts.body_from(&headers);
        Ok(Self {
            line: parts.start.parse()?,
            headers,
            body,
        })
    }

    /// The status line.
    pub fn line(&self) -> &StatusLine {
        &self.line
    }

    /// The status line, mutably.
    pub fn line_mut(&mut self) -> &mut StatusLine {
        &mut self.line
    }

    /// The status code.
    pub fn status(&self) -> StatusCode {
        self.line.code()
    }

    /// The reason phrase.
    pub fn reason(&self) -> &ReasonPhrase {
        self.line.reason()
    }

    /// The protocol version.
    pub fn version(&self) -> HttpVersion {
        self.line.version()
    }

    /// The headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The headers, mutably.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// The body.
    pub fn body(&self) -> Option<&SharedBody> {
        self.body.as_ref()
    }

    /// Replace the body.
    pub fn set_body(&mut self, body: impl Body + 'static) {
        self.body = Some(Arc::new(body));
    }

    /// Builder form of [`Response::set_body`].
    pub fn with_body(mut self, body: impl Body + 'static) -> Self {
        self.set_body(body);
        self
    }

    /// Remove the body.
    pub fn take_body(&mut self) -> Option<SharedBody> {
        self.body.take()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

/// The text form. A body that cannot be read is left out.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\r\n{}\r\n", self.line, self.headers)?;
        write_body(f, self.body.as_ref())
    }
}

/// Builder for constructing a [`Response`].
#[derive(Debug)]
pub struct ResponseBuilder {
    code: StatusCode,
    reason: Option<ReasonPhrase>,
    version: HttpVersion,
    headers: Headers,
    body: Option<SharedBody>,
    error: Option<HttpError>,
}

impl ResponseBuilder {
    /// Create a new builder for `HTTP/1.1 200 OK`.
    pub fn new() -> Self {
        Self {
            code: StatusCode::OK,
            reason: None,
            version: HttpVersion::HTTP_1_1,
            headers: Headers::new(),
            body: None,
            error: None,
        }
    }

    /// Set the status code.
    pub fn status(mut self, code: StatusCode) -> Self {
        self.code = code;
        self
    }

    /// Set a non-canonical reason phrase.
    pub fn reason(mut self, reason: &str) -> Self {
        match ReasonPhrase::new(reason) {
            Ok(reason) => self.reason = Some(reason),
            Err(error) => {
                self.error.get_or_insert(error);
            }
        }
        self
    }

    /// Set the protocol version.
    pub fn version(mut self, version: HttpVersion) -> Self {
        self.version = version;
        self
    }

    /// Append a header.
    pub fn header<N, V>(mut self, name: N, value: V) -> Self
    where
        N: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        HttpError: From<N::Error> + From<V::Error>,
    {
        if let Err(error) = self.headers.append(name, value) {
            self.error.get_or_insert(error);
        }
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Body + 'static) -> Self {
        self.body = Some(Arc::new(body));
        self
    }

    /// Build the response.
    pub fn build(self) -> Result<Response> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let reason = self
            .reason
            .unwrap_or_else(|| ReasonPhrase::canonical(self.code));
        Ok(Response {
            line: StatusLine::new(self.version, self.code, reason),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
