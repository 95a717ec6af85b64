//! Start lines (RFC 7230 section 3.1).

use crate::{
    error::{Component, HttpError, Result},
    method::Method,
    status::{ReasonPhrase, StatusCode},
    uri::Uri,
    version::HttpVersion,
};
use std::{fmt, str::FromStr};

/// `method SP request-target SP HTTP-version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    target: Uri,
    version: HttpVersion,
}

impl RequestLine {
    /// Assemble a request line.
    pub fn new(method: Method, target: Uri, version: HttpVersion) -> Self {
        Self {
            method,
            target,
            version,
        }
    }

    /// Parse `GET /index.html HTTP/1.1`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || HttpError::syntax(Component::RequestLine, s);
        let mut parts = s.split(' ');
        let (Some(method), Some(target), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if target.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            method: method.parse()?,
            target: target.parse()?,
            version: version.parse()?,
        })
    }

    /// The method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request target.
    pub fn target(&self) -> &Uri {
        &self.target
    }

    /// The protocol version.
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// Replace the method.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// The request target, mutably.
    pub fn target_mut(&mut self) -> &mut Uri {
        &mut self.target
    }

    /// Replace the request target.
    pub fn set_target(&mut self, target: Uri) {
        self.target = target;
    }

    /// Replace the protocol version.
    pub fn set_version(&mut self, version: HttpVersion) {
        self.version = version;
    }
}

impl FromStr for RequestLine {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RequestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.target, self.version)
    }
}

/// `HTTP-version SP status-code SP reason-phrase`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    version: HttpVersion,
    code: StatusCode,
    reason: ReasonPhrase,
}

impl StatusLine {
    /// Assemble a status line.
    pub fn new(version: HttpVersion, code: StatusCode, reason: ReasonPhrase) -> Self {
        Self {
            version,
            code,
            reason,
        }
    }

    /// An `HTTP/1.1` status line with the canonical reason of `code`.
    pub fn canonical(code: StatusCode) -> Self {
        Self::new(HttpVersion::HTTP_1_1, code, ReasonPhrase::canonical(code))
    }

    /// Parse `HTTP/1.1 404 Not Found`. A missing reason is read as empty.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ' ');
        let (Some(version), Some(code)) = (parts.next(), parts.next()) else {
            return Err(HttpError::syntax(Component::StatusLine, s));
        };
        Ok(Self {
            version: version.parse()?,
            code: code.parse()?,
            reason: parts.next().unwrap_or_default().parse()?,
        })
    }

    /// The protocol version.
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// The status code.
    pub fn code(&self) -> StatusCode {
        self.code
    }

    /// The reason phrase.
    pub fn reason(&self) -> &ReasonPhrase {
        &self.reason
    }

    /// Replace the protocol version.
    pub fn set_version(&mut self, version: HttpVersion) {
        self.version = version;
    }

    /// Replace the status code, keeping the reason.
    pub fn set_code(&mut self, code: StatusCode) {
        self.code = code;
    }

    /// Replace the reason phrase.
    pub fn set_reason(&mut self, reason: ReasonPhrase) {
        self.reason = reason;
    }
}

impl FromStr for StatusLine {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.version, self.code, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line() {
        let line = RequestLine::parse("POST /upload?x=1 HTTP/1.1").unwrap();
        assert_eq!(line.method(), &Method::Post);
        assert_eq!(line.target().path().as_str(), "/upload");
        assert_eq!(line.version(), HttpVersion::HTTP_1_1);
        assert_eq!(line.to_string(), "POST /upload?x=1 HTTP/1.1");
    }

    #[test]
    fn test_request_line_rejects_malformed() {
        for text in ["GET /", "GET  / HTTP/1.1", "GET / HTTP/1.1 extra", "G@T / HTTP/1.1"] {
            assert!(RequestLine::parse(text).is_err(), "{text}");
        }
        let err = RequestLine::parse("GET / HTTP/1.1 extra").unwrap_err();
        assert_eq!(err.component(), Some(Component::RequestLine));
    }

    #[test]
    fn test_status_line() {
        let line = StatusLine::parse("HTTP/1.0 404 Not Found").unwrap();
        assert_eq!(line.code(), StatusCode::NOT_FOUND);
        assert_eq!(line.reason().as_str(), "Not Found");

        let bare = StatusLine::parse("HTTP/1.1 204").unwrap();
        assert_eq!(bare.reason().as_str(), "");
        assert_eq!(StatusLine::parse(&bare.to_string()).unwrap(), bare);

        assert_eq!(StatusLine::canonical(StatusCode::OK).to_string(), "HTTP/1.1 200 OK");
        assert!(StatusLine::parse("HTTP/1.1").is_err());
    }
}
