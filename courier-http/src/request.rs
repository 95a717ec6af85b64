//! Requests.

use crate::{
    body::{Body, BytesBody, SharedBody},
    error::{Component, HttpError, Result},
    headers::{HeaderName, HeaderValue, Headers, names},
    line::RequestLine,
    method::Method,
    uri::Uri,
    version::HttpVersion,
};
use bytes::Bytes;
use std::{fmt, sync::Arc};

/// A request: request line, headers and an optional body.
#[derive(Debug, Clone)]
pub struct Request {
    line: RequestLine,
    headers: Headers,
    body: Option<SharedBody>,
}

impl Request {
    /// An `HTTP/1.1` request without headers or body.
    pub fn new(method: Method, target: Uri) -> Self {
        Self {
            line: RequestLine::new(method, target, HttpVersion::HTTP_1_1),
            headers: Headers::new(),
            body: None,
        }
    }

    /// A `GET` request for `target`.
    pub fn get(target: &str) -> Result<Self> {
        Ok(Self::new(Method::Get, target.parse()?))
    }

    /// A `POST` request for `target` carrying `body`.
    pub fn post(target: &str, body: impl Body + 'static) -> Result<Self> {
        let mut request = Self::new(Method::Post, target.parse()?);
        request.set_body(body);
        Ok(request)
    }

    /// Start building a request.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Parse the text form: request line, header lines, a blank line and the
    /// body.
    pub fn parse(text: &str) -> Result<Self> {
        let parts = split_message(text, Component::RequestLine)?;
        let headers = Headers::parse(parts.headers)?;
        let body = parts.body_from(&headers);
        Ok(Self {
            line: parts.start.parse()?,
            headers,
            body,
        })
    }

    /// The request line.
    pub fn line(&self) -> &RequestLine {
        &self.line
    }

    /// The request line, mutably.
    pub fn line_mut(&mut self) -> &mut RequestLine {
        &mut self.line
    }

    /// The method.
    pub fn method(&self) -> &Method {
        self.line.method()
    }

    /// The request target.
    pub fn uri(&self) -> &Uri {
        self.line.target()
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

    /// Replace the body with a shared one.
    pub fn set_shared_body(&mut self, body: Option<SharedBody>) {
        self.body = body;
    }

    /// Remove the body.
    pub fn take_body(&mut self) -> Option<SharedBody> {
        self.body.take()
    }
}

/// The text form. A body that cannot be read is left out.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\r\n{}\r\n", self.line, self.headers)?;
        write_body(f, self.body.as_ref())
    }
}

/// Builder for constructing a [`Request`].
///
/// Invalid parts are reported by [`RequestBuilder::build`].
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Method,
    target: Option<Uri>,
    version: Option<HttpVersion>,
    headers: Headers,
    body: Option<SharedBody>,
    error: Option<HttpError>,
}

impl RequestBuilder {
    /// Create a new builder for `GET /`.
    pub fn new() -> Self {
        Self::default()
    }

    fn record<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.error.get_or_insert(error);
                None
            }
        }
    }

    /// Set the method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the request target from text.
    pub fn uri(mut self, target: &str) -> Self {
        let target = Uri::parse(target);
        self.target = self.record(target);
        self
    }

    /// Set the request target.
    pub fn target(mut self, target: Uri) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the protocol version.
    pub fn version(mut self, version: HttpVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Append a header.
    pub fn header<N, V>(mut self, name: N, value: V) -> Self
    where
        N: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        HttpError: From<N::Error> + From<V::Error>,
    {
        let appended = self.headers.append(name, value).map(|_| ());
        self.record(appended);
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Body + 'static) -> Self {
        self.body = Some(Arc::new(body));
        self
    }

    /// Build the request.
    pub fn build(self) -> Result<Request> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let target = match self.target {
            Some(target) => target,
            None => Uri::parse("/")?,
        };
        Ok(Request {
            line: RequestLine::new(
                self.method,
                target,
                self.version.unwrap_or(HttpVersion::HTTP_1_1),
            ),
            headers: self.headers,
            body: self.body,
        })
    }
}

/// A message in text form, split at its first blank line.
pub(crate) struct MessageText<'a> {
    pub(crate) start: &'a str,
    pub(crate) headers: &'a str,
    pub(crate) body: &'a str,
}

impl MessageText<'_> {
    /// The body as bytes typed after the `Content-Type` header.
    pub(crate) fn body_from(&self, headers: &Headers) -> Option<SharedBody> {
        if self.body.is_empty() {
            return None;
        }
        let bytes = Bytes::copy_from_slice(self.body.as_bytes());
        let body = match headers.get(names::CONTENT_TYPE) {
            Some(content_type) => BytesBody::with_type(bytes, content_type.as_str()),
            None => BytesBody::new(bytes),
        };
        Some(Arc::new(body))
    }
}

pub(crate) fn split_message(text: &str, start: Component) -> Result<MessageText<'_>> {
    let (head, body) = match (text.find("\r\n\r\n"), text.find("\n\n")) {
        (Some(crlf), Some(lf)) if lf < crlf => (&text[..lf], &text[lf + 2..]),
        (Some(crlf), _) => (&text[..crlf], &text[crlf + 4..]),
        (None, Some(lf)) => (&text[..lf], &text[lf + 2..]),
        (None, None) => (text, ""),
    };
    let (first, headers) = head.split_once('\n').unwrap_or((head, ""));
    let first = first.strip_suffix('\r').unwrap_or(first);
    if first.is_empty() {
        return Err(HttpError::syntax(start, first));
    }
    Ok(MessageText {
        start: first,
        headers,
        body,
    })
}

pub(crate) fn write_body(f: &mut fmt::Formatter<'_>, body: Option<&SharedBody>) -> fmt::Result {
    match body.map(|body| body.to_bytes()) {
        Some(Ok(bytes)) => f.write_str(&String::from_utf8_lossy(&bytes)),
        _ => Ok(()),
    }
}
