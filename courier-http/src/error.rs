//! Error types for HTTP value objects.

use std::{convert::Infallible, fmt};
use thiserror::Error;

/// A specialized `Result` for HTTP value objects.
pub type Result<T, E = HttpError> = std::result::Result<T, E>;

/// The grammar production a value failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// URI scheme.
    Scheme,
    /// URI user information.
    UserInfo,
    /// URI host.
    Host,
    /// URI port.
    Port,
    /// URI path.
    Path,
    /// URI query.
    Query,
    /// URI fragment.
    Fragment,
    /// A complete URI reference.
    Uri,
    /// Header field name.
    HeaderName,
    /// Header field value.
    HeaderValue,
    /// A header line.
    HeaderLine,
    /// Request method.
    Method,
    /// Protocol version.
    Version,
    /// Status code.
    StatusCode,
    /// Reason phrase.
    ReasonPhrase,
    /// Request line.
    RequestLine,
    /// Status line.
    StatusLine,
    /// Multipart boundary.
    Boundary,
    /// A message in text form.
    Message,
}

impl Component {
    /// The human readable name of the production.
    pub const fn name(self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::UserInfo => "user information",
            Component::Host => "host",
            Component::Port => "port",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
            Component::Uri => "uri",
            Component::HeaderName => "header name",
            Component::HeaderValue => "header value",
            Component::HeaderLine => "header line",
            Component::Method => "method",
            Component::Version => "version",
            Component::StatusCode => "status code",
            Component::ReasonPhrase => "reason phrase",
            Component::RequestLine => "request line",
            Component::StatusLine => "status line",
            Component::Boundary => "multipart boundary",
            Component::Message => "message",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised by HTTP value objects.
#[derive(Error, Debug)]
pub enum HttpError {
    /// A value does not match the grammar of its component.
    #[error("invalid {component}: {value:?}")]
    Syntax {
        /// The production that failed.
        component: Component,
        /// The rejected input.
        value: String,
    },

    /// Reading a body failed.
    #[error("body i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding JSON failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A body is not valid text.
    #[error("body is not valid utf-8")]
    NotText(#[from] std::string::FromUtf8Error),
}

impl HttpError {
    /// A syntax error for `value` as `component`.
    pub fn syntax(component: Component, value: impl Into<String>) -> Self {
        HttpError::Syntax {
            component,
            value: value.into(),
        }
    }

    /// The component of a syntax error.
    pub fn component(&self) -> Option<Component> {
        match self {
            HttpError::Syntax { component, .. } => Some(*component),
            _ => None,
        }
    }
}

impl From<Infallible> for HttpError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message() {
        let err = HttpError::syntax(Component::Port, "80a");
        assert_eq!(err.to_string(), "invalid port: \"80a\"");
        assert_eq!(err.component(), Some(Component::Port));
    }

    #[test]
    fn test_io_error_converts() {
        let err: HttpError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, HttpError::Io(_)));
        assert_eq!(err.component(), None);
    }
}
