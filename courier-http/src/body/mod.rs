//! Message bodies.
//!
//! A [`Body`] knows its media type, possibly its length, and how to open a
//! reader over its content. Everything else ([`Body::to_bytes`],
//! [`Body::to_text`]) is derived from the reader.
//!
//! - [`BytesBody`]: raw bytes
//! - [`TextBody`]: UTF-8 text
//! - [`JsonBody`]: a JSON document
//! - [`ParametersBody`]: `application/x-www-form-urlencoded` parameters
//! - [`FileBody`]: a file read on demand
//! - [`MultipartBody`]: parts framed by a boundary

mod multipart;

pub use multipart::{BodyPart, MultipartBody};

use crate::{error::Result, uri::Query};
use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fmt,
    fs::{self, File},
    io::{BufReader, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

/// A shared, dynamically dispatched body.
pub type SharedBody = Arc<dyn Body>;

/// Content of a request, a response or a multipart part.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a message `Body`",
    label = "missing `Body` implementation",
    note = "Bodies implement `content_type`, `content_length` and `open`."
)]
pub trait Body: fmt::Debug + Send + Sync {
    /// The media type, for the `Content-Type` header.
    fn content_type(&self) -> Option<String>;

    /// The length in bytes, when known without reading.
    fn content_length(&self) -> Option<u64>;

    /// Open a reader over the content.
    fn open(&self) -> Result<Box<dyn Read + Send + '_>>;

    /// Read the whole content.
    fn to_bytes(&self) -> Result<Bytes> {
        let mut buffer = Vec::new();
        self.open()?.read_to_end(&mut buffer)?;
        Ok(Bytes::from(buffer))
    }

    /// Read the whole content as UTF-8 text.
    fn to_text(&self) -> Result<String> {
        Ok(String::from_utf8(self.to_bytes()?.to_vec())?)
    }
}

impl<B: Body + ?Sized> Body for Arc<B> {
    fn content_type(&self) -> Option<String> {
        (**self).content_type()
    }

    fn content_length(&self) -> Option<u64> {
        (**self).content_length()
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        (**self).open()
    }
}

const OCTET_STREAM: &str = "application/octet-stream";

/// Raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesBody {
    bytes: Bytes,
    content_type: String,
}

impl BytesBody {
    /// `application/octet-stream` bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self::with_type(bytes, OCTET_STREAM)
    }

    /// Bytes of media type `content_type`.
    pub fn with_type(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }

    /// The bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

impl Body for BytesBody {
    fn content_type(&self) -> Option<String> {
        Some(self.content_type.clone())
    }

    fn content_length(&self) -> Option<u64> {
        Some(self.bytes.len() as u64)
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(&self.bytes[..]))
    }

    fn to_bytes(&self) -> Result<Bytes> {
        Ok(self.bytes.clone())
    }
}

/// UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBody {
    text: String,
    content_type: String,
}

impl TextBody {
    /// `text/plain; charset=utf-8` text.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_type(text, "text/plain; charset=utf-8")
    }

    /// Text of media type `content_type`.
    pub fn with_type(text: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            content_type: content_type.into(),
        }
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Body for TextBody {
    fn content_type(&self) -> Option<String> {
        Some(self.content_type.clone())
    }

    fn content_length(&self) -> Option<u64> {
        Some(self.text.len() as u64)
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(self.text.as_bytes()))
    }

    fn to_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// A JSON document, serialized once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody {
    value: serde_json::Value,
    rendered: Bytes,
}

impl JsonBody {
    /// Wrap a JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        let rendered = Bytes::from(value.to_string());
        Self { value, rendered }
    }

    /// Serialize `value`.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::new(serde_json::to_value(value)?))
    }

    /// Parse JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    /// The JSON value.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    /// Deserialize the document into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.value)?)
    }
}

impl Body for JsonBody {
    fn content_type(&self) -> Option<String> {
        Some("application/json".to_string())
    }

    fn content_length(&self) -> Option<u64> {
        Some(self.rendered.len() as u64)
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(&self.rendered[..]))
    }
}

/// Form parameters, encoded like a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParametersBody {
    parameters: Query,
}

impl ParametersBody {
    /// Wrap `parameters`.
    pub fn new(parameters: Query) -> Self {
        Self { parameters }
    }

    /// Decode an urlencoded body.
    pub fn parse(text: &str) -> Result<Self> {
        Query::parse(text).map(Self::new)
    }

    /// The parameters.
    pub fn parameters(&self) -> &Query {
        &self.parameters
    }

    /// The parameters, mutably.
    pub fn parameters_mut(&mut self) -> &mut Query {
        &mut self.parameters
    }
}

impl Body for ParametersBody {
    fn content_type(&self) -> Option<String> {
        Some("application/x-www-form-urlencoded".to_string())
    }

    fn content_length(&self) -> Option<u64> {
        Some(self.parameters.to_string().len() as u64)
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(std::io::Cursor::new(self.parameters.to_string())))
    }
}

/// A file, read when the body is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBody {
    path: PathBuf,
    content_type: String,
}

impl FileBody {
    /// `application/octet-stream` content of the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_type(path, OCTET_STREAM)
    }

    /// Content of media type `content_type`.
    pub fn with_type(path: impl Into<PathBuf>, content_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content_type: content_type.into(),
        }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The final path component, used as the file name of form parts.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

impl Body for FileBody {
    fn content_type(&self) -> Option<String> {
        Some(self.content_type.clone())
    }

    fn content_length(&self) -> Option<u64> {
        fs::metadata(&self.path).ok().map(|metadata| metadata.len())
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}
