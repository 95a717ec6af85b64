//! # courier-http
//!
//! HTTP message value objects for the Courier pipeline.
//!
//! Every type here validates its grammar on construction, so a value that
//! exists is well formed. Nothing in this crate touches the network: values
//! are parsed from and displayed as their text form, and moved through a
//! client as a [`Call`].
//!
//! # Building Blocks
//!
//! - [`Uri`] and its components, with the ordered [`Query`] map
//! - [`Headers`] with case-insensitive [`HeaderName`]s
//! - [`Method`], [`HttpVersion`], [`StatusCode`], [`ReasonPhrase`] and the
//!   [`RequestLine`] / [`StatusLine`] built from them
//! - bodies implementing [`Body`], including [`MultipartBody`]
//! - [`Request`], [`Response`] and [`Call`]
//!
//! ```
//! use courier_http::{Request, body::TextBody};
//!
//! let request = Request::builder()
//!     .uri("http://example.com/notes?draft=1")
//!     .header("Accept", "text/plain")
//!     .body(TextBody::new("hello"))
//!     .build()?;
//! assert_eq!(request.uri().query().and_then(|q| q.get("draft")), Some("1"));
//! # Ok::<(), courier_http::HttpError>(())
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod body;
mod call;
mod error;
mod headers;
mod line;
mod method;
mod request;
mod response;
mod status;
pub mod syntax;
pub mod uri;
mod version;

// Re-exports
pub use body::{
    Body, BodyPart, BytesBody, FileBody, JsonBody, MultipartBody, ParametersBody, SharedBody,
    TextBody,
};
pub use call::Call;
pub use error::{Component, HttpError, Result};
pub use headers::{HeaderName, HeaderValue, Headers, names};
pub use line::{RequestLine, StatusLine};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBuilder};
pub use status::{ReasonPhrase, StatusCode};
pub use uri::{Authority, Fragment, Host, Path, Port, Query, Scheme, Uri, UserInfo};
pub use version::HttpVersion;
