//! Request methods.

use crate::{
    error::{Component, HttpError, Result},
    syntax,
};
use std::{fmt, str::FromStr};

/// A request method: one of the standard methods or an extension token.
///
/// Methods are case-sensitive, so `get` is an extension method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    #[default]
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `CONNECT`
    Connect,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `PATCH`
    Patch,
    /// Any other token.
    Extension(String),
}

impl Method {
    /// Parse a method token.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "CONNECT" => Method::Connect,
            "OPTIONS" => Method::Options,
            "TRACE" => Method::Trace,
            "PATCH" => Method::Patch,
            _ => {
                syntax::check(Component::Method, s, syntax::is_token)?;
                Method::Extension(s.to_string())
            }
        })
    }

    /// The method token.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
            Method::Extension(token) => token,
        }
    }

    /// Whether requests with this method conventionally carry a body.
    pub fn allows_body(&self) -> bool {
        !matches!(
            self,
            Method::Get | Method::Head | Method::Delete | Method::Options | Method::Trace
        )
    }
}

impl FromStr for Method {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Method {
    type Error = HttpError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_and_extension() {
        assert_eq!(Method::parse("POST").unwrap(), Method::Post);
        assert_eq!(
            Method::parse("PROPFIND").unwrap(),
            Method::Extension("PROPFIND".to_string())
        );
        assert_eq!(
            Method::parse("get").unwrap(),
            Method::Extension("get".to_string())
        );
        assert!(Method::parse("BAD METHOD").is_err());
        assert!(Method::parse("").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["GET", "PATCH", "MKCOL"] {
            assert_eq!(Method::parse(text).unwrap().to_string(), text);
        }
    }
}
