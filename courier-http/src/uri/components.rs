//! Validated URI components.

use crate::{
    error::{Component, HttpError, Result},
    syntax,
};
use std::{fmt, str::FromStr};

macro_rules! component {
    ($(#[$meta:meta])* $name:ident, $component:ident, $predicate:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Validate `value`.
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                syntax::check(Component::$component, &value, $predicate)?;
                Ok(Self(value))
            }

            /// The component as written.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Unwrap into the underlying string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = HttpError;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = HttpError;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = HttpError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

component!(
    /// A URI scheme such as `http`.
    Scheme,
    Scheme,
    syntax::is_scheme
);

component!(
    /// The user information of an authority, percent escapes preserved.
    UserInfo,
    UserInfo,
    syntax::is_userinfo
);

component!(
    /// A registered name, IPv4 address or bracketed IP literal.
    Host,
    Host,
    syntax::is_host
);

component!(
    /// A URI path, percent escapes preserved.
    Path,
    Path,
    syntax::is_path
);

component!(
    /// A URI fragment, without the leading `#`.
    Fragment,
    Fragment,
    syntax::is_fragment
);

impl Scheme {
    /// `http`
    pub fn http() -> Self {
        Self("http".to_string())
    }

    /// `https`
    pub fn https() -> Self {
        Self("https".to_string())
    }

    /// The well-known port of this scheme, if any.
    pub fn default_port(&self) -> Option<Port> {
        match self.0.to_ascii_lowercase().as_str() {
            "http" | "ws" => Some(Port(80)),
            "https" | "wss" => Some(Port(443)),
            _ => None,
        }
    }
}

impl Path {
    /// The empty path.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// The root path `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the path starts with `/`.
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// The `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.strip_prefix('/').unwrap_or(&self.0).split('/')
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::empty()
    }
}

/// A TCP port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port(u16);

impl Port {
    /// Wrap `port`.
    pub const fn new(port: u16) -> Self {
        Self(port)
    }

    /// The port number.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self(port)
    }
}

impl FromStr for Port {
    type Err = HttpError;

    fn from_str(s: &str) -> Result<Self> {
        if !syntax::is_port(s) {
            return Err(HttpError::syntax(Component::Port, s));
        }
        s.parse()
            .map(Self)
            .map_err(|_| HttpError::syntax(Component::Port, s))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
