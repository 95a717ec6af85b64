//! Protocol versions.

use crate::{
    error::{Component, HttpError, Result},
    syntax,
};
use std::{fmt, str::FromStr};

/// `HTTP/<major>.<minor>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HttpVersion {
    major: u8,
    minor: u8,
}

impl HttpVersion {
    /// `HTTP/1.0`
    pub const HTTP_1_0: Self = Self { major: 1, minor: 0 };
    /// `HTTP/1.1`
    pub const HTTP_1_1: Self = Self { major: 1, minor: 1 };
    /// `HTTP/2.0`
    pub const HTTP_2_0: Self = Self { major: 2, minor: 0 };

    /// A version from its digits; each must be below 10.
    pub fn new(major: u8, minor: u8) -> Result<Self> {
        if major > 9 || minor > 9 {
            return Err(HttpError::syntax(
                Component::Version,
                format!("HTTP/{major}.{minor}"),
            ));
        }
        Ok(Self { major, minor })
    }

    /// Parse `HTTP/1.1`.
    pub fn parse(s: &str) -> Result<Self> {
        syntax::check(Component::Version, s, syntax::is_http_version)?;
        let bytes = s.as_bytes();
        Ok(Self {
            major: bytes[5] - b'0',
            minor: bytes[7] - b'0',
        })
    }

    /// The major digit.
    pub fn major(self) -> u8 {
        self.major
    }

    /// The minor digit.
    pub fn minor(self) -> u8 {
        self.minor
    }
}

impl Default for HttpVersion {
    fn default() -> Self {
        Self::HTTP_1_1
    }
}

impl FromStr for HttpVersion {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!(HttpVersion::parse("HTTP/1.0").unwrap(), HttpVersion::HTTP_1_0);
        assert_eq!(HttpVersion::HTTP_1_1.to_string(), "HTTP/1.1");
        assert!(HttpVersion::parse("HTTP/1").is_err());
        assert!(HttpVersion::new(10, 0).is_err());
        assert!(HttpVersion::HTTP_1_0 < HttpVersion::HTTP_2_0);
    }
}
