//! Status codes and reason phrases.

use crate::{
    error::{Component, HttpError, Result},
    syntax,
};
use std::{fmt, str::FromStr};

/// A three digit status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

macro_rules! status_codes {
    ($(($name:ident, $code:literal, $reason:literal),)+) => {
        impl StatusCode {
            $(
                #[doc = concat!("`", $code, " ", $reason, "`")]
                pub const $name: Self = Self($code);
            )+

            /// The reason phrase registered for this code.
            pub fn canonical_reason(self) -> Option<&'static str> {
                match self.0 {
                    $($code => Some($reason),)+
                    _ => None,
                }
            }
        }
    };
}

status_codes! {
    (CONTINUE, 100, "Continue"),
    (SWITCHING_PROTOCOLS, 101, "Switching Protocols"),
    (OK, 200, "OK"),
    (CREATED, 201, "Created"),
    (ACCEPTED, 202, "Accepted"),
    (NO_CONTENT, 204, "No Content"),
    (PARTIAL_CONTENT, 206, "Partial Content"),
    (MOVED_PERMANENTLY, 301, "Moved Permanently"),
    (FOUND, 302, "Found"),
    (SEE_OTHER, 303, "See Other"),
    (NOT_MODIFIED, 304, "Not Modified"),
    (TEMPORARY_REDIRECT, 307, "Temporary Redirect"),
    (PERMANENT_REDIRECT, 308, "Permanent Redirect"),
    (BAD_REQUEST, 400, "Bad Request"),
    (UNAUTHORIZED, 401, "Unauthorized"),
    (FORBIDDEN, 403, "Forbidden"),
    (NOT_FOUND, 404, "Not Found"),
    (METHOD_NOT_ALLOWED, 405, "Method Not Allowed"),
    (CONFLICT, 409, "Conflict"),
    (GONE, 410, "Gone"),
    (PAYLOAD_TOO_LARGE, 413, "Payload Too Large"),
    (UNSUPPORTED_MEDIA_TYPE, 415, "Unsupported Media Type"),
    (TOO_MANY_REQUESTS, 429, "Too Many Requests"),
    (INTERNAL_SERVER_ERROR, 500, "Internal Server Error"),
    (NOT_IMPLEMENTED, 501, "Not Implemented"),
    (BAD_GATEWAY, 502, "Bad Gateway"),
    (SERVICE_UNAVAILABLE, 503, "Service Unavailable"),
    (GATEWAY_TIMEOUT, 504, "Gateway Timeout"),
}

impl StatusCode {
    /// A code in `100..=999`.
    pub fn new(code: u16) -> Result<Self> {
        if (100..=999).contains(&code) {
            Ok(Self(code))
        } else {
            Err(HttpError::syntax(Component::StatusCode, code.to_string()))
        }
    }

    /// Parse three digits.
    pub fn parse(s: &str) -> Result<Self> {
        syntax::check(Component::StatusCode, s, syntax::is_status_code)?;
        s.parse()
            .map_err(|_| HttpError::syntax(Component::StatusCode, s))
            .and_then(Self::new)
    }

    /// The numeric code.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// `1xx`
    pub fn is_informational(self) -> bool {
        (100..200).contains(&self.0)
    }

    /// `2xx`
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }

    /// `3xx`
    pub fn is_redirection(self) -> bool {
        (300..400).contains(&self.0)
    }

    /// `4xx`
    pub fn is_client_error(self) -> bool {
        (400..500).contains(&self.0)
    }

    /// `5xx`
    pub fn is_server_error(self) -> bool {
        (500..600).contains(&self.0)
    }
}

impl FromStr for StatusCode {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = HttpError;

    fn try_from(code: u16) -> Result<Self> {
        Self::new(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// The free text following a status code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReasonPhrase(String);

impl ReasonPhrase {
    /// Validate `reason`.
    pub fn new(reason: impl Into<String>) -> Result<Self> {
        let reason = reason.into();
        syntax::check(Component::ReasonPhrase, &reason, syntax::is_reason_phrase)?;
        Ok(Self(reason))
    }

    /// The canonical phrase of `code`, or an empty phrase.
    pub fn canonical(code: StatusCode) -> Self {
        Self(code.canonical_reason().unwrap_or_default().to_string())
    }

    /// The phrase.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ReasonPhrase {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for ReasonPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
