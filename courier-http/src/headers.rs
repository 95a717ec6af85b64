//! Header fields (RFC 7230 section 3.2).

use crate::{
    error::{Component, HttpError, Result},
    syntax,
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Well-known header names.
pub mod names {
    /// `Accept`
    pub const ACCEPT: &str = "Accept";
    /// `Authorization`
    pub const AUTHORIZATION: &str = "Authorization";
    /// `Content-Disposition`
    pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
    /// `Content-Length`
    pub const CONTENT_LENGTH: &str = "Content-Length";
    /// `Content-Type`
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// `Host`
    pub const HOST: &str = "Host";
    /// `Location`
    pub const LOCATION: &str = "Location";
    /// `User-Agent`
    pub const USER_AGENT: &str = "User-Agent";
}

/// A header field name: a token compared case-insensitively.
///
/// The original spelling is kept for display.
#[derive(Debug, Clone, Eq)]
pub struct HeaderName(String);

impl HeaderName {
    /// Validate `name` as a token.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        syntax::check(Component::HeaderName, &name, syntax::is_token)?;
        Ok(Self(name))
    }

    /// The name as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name matches `other`, ignoring case.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Hash for HeaderName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl FromStr for HeaderName {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for HeaderName {
    type Error = HttpError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for HeaderName {
    type Error = HttpError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A header field value without surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderValue(String);

impl HeaderValue {
    /// Validate `value` as field content.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        syntax::check(Component::HeaderValue, &value, syntax::is_field_value)?;
        Ok(Self(value))
    }

    /// The value as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HeaderValue {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for HeaderValue {
    type Error = HttpError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for HeaderValue {
    type Error = HttpError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<u64> for HeaderValue {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for HeaderValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered list of header fields.
///
/// Names repeat freely; [`Headers::insert`] replaces every field of a name,
/// [`Headers::append`] adds one more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(HeaderName, HeaderValue)>,
}

impl Headers {
    /// No fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CRLF (or LF) separated `name: value` lines. Blank lines are
    /// skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut headers = Self::new();
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| HttpError::syntax(Component::HeaderLine, line))?;
            headers.append(name, value.trim_matches([' ', '\t']))?;
        }
        Ok(headers)
    }

    /// The first value of `name`.
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.get_all(name).next()
    }

    /// Every value of `name`, in order.
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a HeaderValue> {
        self.fields
            .iter()
            .filter(move |(key, _)| key.matches(name))
            .map(|(_, value)| value)
    }

    /// Replace every field of `name` with a single one.
    ///
    /// The new field takes the position of the first replaced one.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Result<&mut Self>
    where
        N: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        HttpError: From<N::Error> + From<V::Error>,
    {
        let name = name.try_into()?;
        let value = value.try_into()?;
        match self.fields.iter().position(|(key, _)| *key == name) {
            Some(first) => {
                self.fields[first] = (name.clone(), value);
                let mut index = 0;
                self.fields.retain(|(key, _)| {
                    let keep = index <= first || *key != name;
                    index += 1;
                    keep
                });
            }
            None => self.fields.push((name, value)),
        }
        Ok(self)
    }

    /// Add a field, keeping existing ones.
    pub fn append<N, V>(&mut self, name: N, value: V) -> Result<&mut Self>
    where
        N: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        HttpError: From<N::Error> + From<V::Error>,
    {
        self.fields.push((name.try_into()?, value.try_into()?));
        Ok(self)
    }

    /// Remove every field of `name`, returning how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.fields.len();
        self.fields.retain(|(key, _)| !key.matches(name));
        before - self.fields.len()
    }

    /// Whether a field of `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate the fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.fields.iter().map(|(name, value)| (name, value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromStr for Headers {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// One `name: value\r\n` line per field.
impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.fields {
            write!(f, "{name}: {value}\r\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_ignore_case() {
        let mut headers = Headers::new();
        headers.append("Content-Type", "text/plain").unwrap();
        assert_eq!(headers.get("content-type").unwrap(), "text/plain");
        assert!(headers.contains("CONTENT-TYPE"));
        assert_eq!(
            HeaderName::new("accept").unwrap(),
            HeaderName::new("Accept").unwrap()
        );
    }

    #[test]
    fn test_insert_replaces_all_in_place() {
        let mut headers = Headers::new();
        headers
            .append("A", "1")
            .unwrap()
            .append("Set-Cookie", "x=1")
            .unwrap()
            .append("B", "2")
            .unwrap()
            .append("set-cookie", "y=2")
            .unwrap();
        headers.insert("Set-Cookie", "z=3").unwrap();

        let order: Vec<_> = headers.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
        assert_eq!(order, vec![("A", "1"), ("Set-Cookie", "z=3"), ("B", "2")]);
    }

    #[test]
    fn test_get_all_and_remove() {
        let mut headers = Headers::parse("Via: a\r\nVia: b\r\nHost: h\r\n").unwrap();
        assert_eq!(
            headers.get_all("via").map(HeaderValue::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
        assert_eq!(headers.remove("VIA"), 2);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let mut headers = Headers::new();
        assert_eq!(
            headers.append("Bad Name", "v").unwrap_err().component(),
            Some(Component::HeaderName)
        );
        assert_eq!(
            headers.append("X", "a\r\nInjected: 1").unwrap_err().component(),
            Some(Component::HeaderValue)
        );
        assert!(Headers::parse("no colon here").is_err());
    }

    #[test]
    fn test_round_trip_is_semantically_idempotent() {
        let text = "Host:example.com\nAccept:  */*  \r\n\r\nX-Empty:\r\n";
        let headers = Headers::parse(text).unwrap();
        assert_eq!(headers.to_string(), "Host: example.com\r\nAccept: */*\r\nX-Empty: \r\n");
        assert_eq!(Headers::parse(&headers.to_string()).unwrap(), headers);
    }

    #[test]
    fn test_typed_values() {
        let mut headers = Headers::new();
        let name = HeaderName::new("Content-Length").unwrap();
        headers.insert(name, HeaderValue::from(42u64)).unwrap();
        assert_eq!(headers.get(names::CONTENT_LENGTH).unwrap(), "42");
    }
}
