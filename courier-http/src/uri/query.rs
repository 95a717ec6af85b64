//! Query strings as ordered name/value maps.

use crate::{
    error::{Component, HttpError, Result},
    syntax,
};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::{fmt, str::FromStr};

/// Characters escaped in query names and values: everything outside
/// `unreserved`, so `&`, `=` and `+` never leak into the structure.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// An ordered map of query parameters.
///
/// Parsing splits on `&` and the first `=`, percent-decoding names and
/// values; a repeated name keeps its first position and its last value.
/// Display encodes everything outside the unreserved set. The textual form is
/// therefore not preserved, but parsing the displayed form always yields an
/// equal query.
///
/// ```
/// use courier_http::Query;
///
/// let query: Query = "a=1&b=2".parse().unwrap();
/// assert_eq!(query.get("a"), Some("1"));
/// assert_eq!(query.with("c", "3").to_string(), "a=1&b=2&c=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=2`.
    pub fn parse(s: &str) -> Result<Self> {
        syntax::check(Component::Query, s, syntax::is_query)?;
        let mut query = Self::new();
        for pair in s.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            query.insert(decode(name, s)?, decode(value, s)?);
        }
        Ok(query)
    }

    /// The value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.pairs.push((name, value));
                None
            }
        }
    }

    /// Builder form of [`Query::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(key, _)| key == name)?;
        Some(self.pairs.remove(index).1)
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode(part: &str, whole: &str) -> Result<String> {
    percent_decode_str(part)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| HttpError::syntax(Component::Query, whole))
}

impl FromStr for Query {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (name, value) in iter {
            query.insert(name, value);
        }
        query
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                utf8_percent_encode(name, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_with() {
        let query = Query::parse("a=1&b=2").unwrap();
        assert_eq!(query.get("a"), Some("1"));
        assert_eq!(query.get("missing"), None);

        let text = query.with("c", "3").to_string();
        let mut pairs: Vec<&str> = text.split('&').collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec!["a=1", "b=2", "c=3"]);
    }

    #[test]
    fn test_decodes_and_encodes() {
        let query = Query::parse("q=hello%20world&sym=%26%3D").unwrap();
        assert_eq!(query.get("q"), Some("hello world"));
        assert_eq!(query.get("sym"), Some("&="));
        assert_eq!(query.to_string(), "q=hello%20world&sym=%26%3D");
    }

    #[test]
    fn test_text_form_is_not_preserved_but_reparses_equal() {
        for text in ["a&b=&&c=%7e", "x=1&x=2&y", "k=a+b", "path=/a/b?c"] {
            let query = Query::parse(text).unwrap();
            let again = Query::parse(&query.to_string()).unwrap();
            assert_eq!(again, query, "{text}");
        }
        assert_ne!(Query::parse("a").unwrap().to_string(), "a");
    }

    #[test]
    fn test_repeated_name_keeps_position() {
        let query = Query::parse("x=1&y=2&x=3").unwrap();
        assert_eq!(query.iter().collect::<Vec<_>>(), vec![("x", "3"), ("y", "2")]);
    }

    #[test]
    fn test_remove_and_invalid() {
        let mut query: Query = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(query.remove("a").as_deref(), Some("1"));
        assert_eq!(query.len(), 1);
        assert!(Query::parse("a=1 2").is_err());
        assert!(Query::parse("bad=%zz").is_err());
    }
}
