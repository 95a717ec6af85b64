//! URI references (RFC 3986).
//!
//! A [`Uri`] is split with the generic syntax of RFC 3986 appendix B into
//! scheme, authority, path, query and fragment, and each part is validated
//! against its production. Both absolute URIs and relative references are
//! accepted.

mod components;
mod query;

pub use components::{Fragment, Host, Path, Port, Scheme, UserInfo};
pub use query::Query;

use crate::error::{Component, HttpError, Result};
use std::{fmt, str::FromStr};

/// `[ userinfo "@" ] host [ ":" port ]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    userinfo: Option<UserInfo>,
    host: Host,
    port: Option<Port>,
}

impl Authority {
    /// An authority with only a host.
    pub fn new(host: Host) -> Self {
        Self {
            userinfo: None,
            host,
            port: None,
        }
    }

    /// Parse `user@host:port`.
    pub fn parse(s: &str) -> Result<Self> {
        let (userinfo, hostport) = match s.rsplit_once('@') {
            Some((userinfo, hostport)) => (Some(UserInfo::new(userinfo)?), hostport),
            None => (None, s),
        };
        let (host, port) = split_port(hostport)?;
        Ok(Self {
            userinfo,
            host: Host::new(host)?,
            port,
        })
    }

    /// The user information.
    pub fn userinfo(&self) -> Option<&UserInfo> {
        self.userinfo.as_ref()
    }

    /// The host.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The explicit port.
    pub fn port(&self) -> Option<Port> {
        self.port
    }

    /// Replace the user information.
    pub fn set_userinfo(&mut self, userinfo: Option<UserInfo>) {
        self.userinfo = userinfo;
    }

    /// Replace the host.
    pub fn set_host(&mut self, host: Host) {
        self.host = host;
    }

    /// Replace the port.
    pub fn set_port(&mut self, port: Option<Port>) {
        self.port = port;
    }

    /// Builder form of [`Authority::set_userinfo`].
    pub fn with_userinfo(mut self, userinfo: UserInfo) -> Self {
        self.userinfo = Some(userinfo);
        self
    }

    /// Builder form of [`Authority::set_port`].
    pub fn with_port(mut self, port: impl Into<Port>) -> Self {
        self.port = Some(port.into());
        self
    }
}

/// Split `host[:port]`, minding bracketed IP literals. An empty port is
/// dropped.
fn split_port(hostport: &str) -> Result<(&str, Option<Port>)> {
    let port_start = if hostport.starts_with('[') {
        match hostport.find(']') {
            Some(end) => match &hostport[end + 1..] {
                "" => None,
                rest if rest.starts_with(':') => Some(end + 1),
                _ => return Err(HttpError::syntax(Component::Host, hostport)),
            },
            None => return Err(HttpError::syntax(Component::Host, hostport)),
        }
    } else {
        hostport.rfind(':')
    };
    match port_start {
        Some(colon) => {
            let port = &hostport[colon + 1..];
            let port = if port.is_empty() {
                None
            } else {
                Some(port.parse()?)
            };
            Ok((&hostport[..colon], port))
        }
        None => Ok((hostport, None)),
    }
}

impl FromStr for Authority {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// A URI or relative reference.
///
/// ```
/// use courier_http::Uri;
///
/// let uri: Uri = "https://user@example.com:8443/a/b?x=1#top".parse().unwrap();
/// assert_eq!(uri.scheme().map(|s| s.as_str()), Some("https"));
/// assert_eq!(uri.host().map(|h| h.as_str()), Some("example.com"));
/// assert_eq!(uri.port().map(|p| p.get()), Some(8443));
/// assert_eq!(uri.path().as_str(), "/a/b");
/// assert_eq!(uri.query().and_then(|q| q.get("x")), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: Option<Scheme>,
    authority: Option<Authority>,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl Uri {
    /// A relative reference with only `path`.
    pub fn from_path(path: Path) -> Result<Self> {
        let uri = Self {
            path,
            ..Self::default()
        };
        uri.check_shape()?;
        Ok(uri)
    }

    /// Split and validate `s`.
    pub fn parse(s: &str) -> Result<Self> {
        let (rest, fragment) = match s.split_once('#') {
            Some((rest, fragment)) => (rest, Some(Fragment::new(fragment)?)),
            None => (s, None),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(Query::parse(query)?)),
            None => (rest, None),
        };
        let (scheme, rest) = match rest.find([':', '/']) {
            Some(colon) if rest.as_bytes()[colon] == b':' && colon > 0 => {
                (Some(Scheme::new(&rest[..colon])?), &rest[colon + 1..])
            }
            _ => (None, rest),
        };
        let (authority, path) = match rest.strip_prefix("//") {
            Some(rest) => {
                let end = rest.find('/').unwrap_or(rest.len());
                (Some(Authority::parse(&rest[..end])?), &rest[end..])
            }
            None => (None, rest),
        };
        let uri = Self {
            scheme,
            authority,
            path: Path::new(path)?,
            query,
            fragment,
        };
        uri.check_shape().map_err(|_| HttpError::syntax(Component::Uri, s))?;
        Ok(uri)
    }

    /// Path constraints of RFC 3986 section 3.3.
    fn check_shape(&self) -> Result<()> {
        let path = self.path.as_str();
        let valid = if self.authority.is_some() {
            path.is_empty() || path.starts_with('/')
        } else if path.starts_with("//") {
            false
        } else if self.scheme.is_none() {
            !path.split('/').next().is_some_and(|first| first.contains(':'))
        } else {
            true
        };
        if valid {
            Ok(())
        } else {
            Err(HttpError::syntax(Component::Path, path))
        }
    }

    /// The scheme.
    pub fn scheme(&self) -> Option<&Scheme> {
        self.scheme.as_ref()
    }

    /// The authority.
    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    /// The host of the authority.
    pub fn host(&self) -> Option<&Host> {
        self.authority.as_ref().map(Authority::host)
    }

    /// The explicit port of the authority.
    pub fn port(&self) -> Option<Port> {
        self.authority.as_ref().and_then(Authority::port)
    }

    /// The explicit port, or the default port of the scheme.
    pub fn effective_port(&self) -> Option<Port> {
        self.port()
            .or_else(|| self.scheme.as_ref().and_then(Scheme::default_port))
    }

    /// The path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The query.
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// The query, created empty if absent.
    pub fn query_mut(&mut self) -> &mut Query {
        self.query.get_or_insert_with(Query::new)
    }

    /// The fragment.
    pub fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Whether this is an absolute URI rather than a relative reference.
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Replace the scheme.
    pub fn set_scheme(&mut self, scheme: Option<Scheme>) -> Result<()> {
        self.update(|uri| uri.scheme = scheme)
    }

    /// Replace the authority.
    pub fn set_authority(&mut self, authority: Option<Authority>) -> Result<()> {
        self.update(|uri| uri.authority = authority)
    }

    /// Replace the path.
    pub fn set_path(&mut self, path: Path) -> Result<()> {
        self.update(|uri| uri.path = path)
    }

    /// Replace the query.
    pub fn set_query(&mut self, query: Option<Query>) {
        self.query = query;
    }

    /// Replace the fragment.
    pub fn set_fragment(&mut self, fragment: Option<Fragment>) {
        self.fragment = fragment;
    }

    /// Apply `change` only if the result keeps a valid shape.
    fn update(&mut self, change: impl FnOnce(&mut Self)) -> Result<()> {
        let mut changed = self.clone();
        change(&mut changed);
        changed.check_shape()?;
        *self = changed;
        Ok(())
    }

    /// The origin-form request target: path and query, `/` for an empty path.
    pub fn origin_form(&self) -> String {
        let mut target = if self.path.is_empty() {
            "/".to_string()
        } else {
            self.path.to_string()
        };
        if let Some(query) = &self.query {
            target.push('?');
            target.push_str(&query.to_string());
        }
        target
    }
}

impl FromStr for Uri {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = HttpError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{authority}")?;
        }
        write!(f, "{}", self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_split() {
        let uri = Uri::parse("http://u:p@[::1]:8080/x/y?a=b#frag").unwrap();
        let authority = uri.authority().unwrap();
        assert_eq!(authority.userinfo().unwrap().as_str(), "u:p");
        assert_eq!(authority.host().as_str(), "[::1]");
        assert_eq!(authority.port(), Some(Port::new(8080)));
        assert_eq!(uri.path().as_str(), "/x/y");
        assert_eq!(uri.fragment().unwrap().as_str(), "frag");
    }

    #[test]
    fn test_relative_references() {
        let uri = Uri::parse("/search?q=rust").unwrap();
        assert!(!uri.is_absolute());
        assert!(uri.authority().is_none());
        assert_eq!(uri.origin_form(), "/search?q=rust");

        let uri = Uri::parse("mailto:someone@example.com").unwrap();
        assert_eq!(uri.scheme().unwrap().as_str(), "mailto");
        assert_eq!(uri.path().as_str(), "someone@example.com");

        assert_eq!(Uri::parse("*").unwrap().path().as_str(), "*");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(Uri::parse("http://exa mple.com/").is_err());
        assert!(Uri::parse("1http://example.com/").is_err());
        assert!(Uri::parse("http://example.com:port/").is_err());
        assert!(Uri::parse("http://example.com/a b").is_err());
    }

    #[test]
    fn test_round_trip_is_semantically_idempotent() {
        for text in [
            "https://example.com",
            "https://example.com:/p?x",
            "http://h/p?b=%41&a=1#f",
            "file:///etc/hosts",
            "//cdn.example.com/lib.js",
            "relative/path?k=v%20w",
            "",
        ] {
            let uri = Uri::parse(text).unwrap();
            let again = Uri::parse(&uri.to_string()).unwrap();
            assert_eq!(again, uri, "{text}");
        }
    }

    #[test]
    fn test_setters_keep_shape() {
        let mut uri = Uri::parse("https://example.com/a").unwrap();
        assert!(uri.set_path(Path::new("relative").unwrap()).is_err());
        assert_eq!(uri.path().as_str(), "/a");

        uri.query_mut().insert("page", "2");
        uri.set_fragment(Some(Fragment::new("end").unwrap()));
        assert_eq!(uri.to_string(), "https://example.com/a?page=2#end");

        uri.set_authority(Some(Authority::new(Host::new("other.org").unwrap()).with_port(81u16)))
            .unwrap();
        assert_eq!(uri.effective_port(), Some(Port::new(81)));
        assert_eq!(uri.to_string(), "https://other.org:81/a?page=2#end");
    }
}
