//! Multipart bodies (RFC 2046, RFC 7578).

use super::{Body, SharedBody, TextBody};
use crate::{
    error::{Component, Result},
    headers::{Headers, names},
    syntax,
};
use rand::{Rng, distributions::Alphanumeric};
use std::{
    io::{self, Cursor, Read},
    sync::Arc,
};

/// One part of a multipart body: its own headers and content.
#[derive(Debug, Clone)]
pub struct BodyPart {
    headers: Headers,
    body: SharedBody,
}

impl BodyPart {
    /// A part with explicit headers.
    pub fn new(headers: Headers, body: impl Body + 'static) -> Self {
        Self {
            headers,
            body: Arc::new(body),
        }
    }

    /// A form field: `Content-Disposition: form-data; name="<name>"` with a
    /// text value.
    pub fn form_data(name: &str, value: impl Into<String>) -> Result<Self> {
        let mut headers = Headers::new();
        headers.insert(
            names::CONTENT_DISPOSITION,
            format!("form-data; name=\"{}\"", escape(name)),
        )?;
        Ok(Self::new(headers, TextBody::new(value)))
    }

    /// A file field carrying `filename`, typed after `body`.
    pub fn form_file(name: &str, filename: &str, body: impl Body + 'static) -> Result<Self> {
        let mut headers = Headers::new();
        headers.insert(
            names::CONTENT_DISPOSITION,
            format!(
                "form-data; name=\"{}\"; filename=\"{}\"",
                escape(name),
                escape(filename)
            ),
        )?;
        if let Some(content_type) = body.content_type() {
            headers.insert(names::CONTENT_TYPE, content_type)?;
        }
        Ok(Self::new(headers, body))
    }

    /// The part headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// The part headers, mutably.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// The part content.
    pub fn body(&self) -> &SharedBody {
        &self.body
    }

    fn head(&self, boundary: &str) -> String {
        format!("--{boundary}\r\n{}\r\n", self.headers)
    }
}

/// Quotes in form names are percent-encoded, as browsers do.
fn escape(value: &str) -> String {
    value.replace('"', "%22")
}

/// Parts framed by a boundary.
///
/// Each part is written as `--boundary CRLF headers CRLF content CRLF`, and
/// the body ends with `--boundary-- CRLF`.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    subtype: String,
    boundary: String,
    parts: Vec<BodyPart>,
}

impl MultipartBody {
    /// An empty `multipart/form-data` body with a random boundary.
    pub fn new() -> Self {
        Self {
            subtype: "form-data".to_string(),
            boundary: random_boundary(),
            parts: Vec::new(),
        }
    }

    /// An empty `multipart/mixed` body with a random boundary.
    pub fn mixed() -> Self {
        Self {
            subtype: "mixed".to_string(),
            ..Self::new()
        }
    }

    /// Use `boundary` instead of the random one.
    pub fn with_boundary(mut self, boundary: impl Into<String>) -> Result<Self> {
        let boundary = boundary.into();
        syntax::check(Component::Boundary, &boundary, syntax::is_boundary)?;
        self.boundary = boundary;
        Ok(self)
    }

    /// Append a part.
    pub fn push(&mut self, part: BodyPart) {
        self.parts.push(part);
    }

    /// Builder form of [`MultipartBody::push`].
    pub fn with_part(mut self, part: BodyPart) -> Self {
        self.push(part);
        self
    }

    /// The boundary.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The parts.
    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    fn trailer(&self) -> String {
        format!("--{}--\r\n", self.boundary)
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

fn random_boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("courier-{suffix}")
}

impl Body for MultipartBody {
    fn content_type(&self) -> Option<String> {
        let boundary = if syntax::is_token(&self.boundary) {
            self.boundary.clone()
        } else {
            format!("\"{}\"", self.boundary)
        };
        Some(format!("multipart/{}; boundary={boundary}", self.subtype))
    }

    /// Known only when every part knows its length.
    fn content_length(&self) -> Option<u64> {
        self.parts.iter().try_fold(self.trailer().len() as u64, |total, part| {
            let content = part.body.content_length()?;
            Some(total + part.head(&self.boundary).len() as u64 + content + 2)
        })
    }

    fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        let mut reader: Box<dyn Read + Send + '_> = Box::new(io::empty());
        for part in &self.parts {
            let content = part.body.open()?;
            reader = Box::new(
                reader
                    .chain(Cursor::new(part.head(&self.boundary)))
                    .chain(content)
                    .chain(&b"\r\n"[..]),
            );
        }
        Ok(Box::new(reader.chain(Cursor::new(self.trailer()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BytesBody;

    #[test]
    fn test_two_part_framing() {
        let body = MultipartBody::new()
            .with_boundary("XyZ")
            .unwrap()
            .with_part(BodyPart::form_data("title", "hello").unwrap())
            .with_part(
                BodyPart::form_file("upload", "a.bin", BytesBody::new(&b"\x01\x02"[..])).unwrap(),
            );

        let bytes = body.to_bytes().unwrap();
        let expected = concat!(
            "--XyZ\r\n",
            "Content-Disposition: form-data; name=\"title\"\r\n",
            "\r\n",
            "hello\r\n",
            "--XyZ\r\n",
            "Content-Disposition: form-data; name=\"upload\"; filename=\"a.bin\"\r\n",
            "Content-Type: application/octet-stream\r\n",
            "\r\n",
            "\u{1}\u{2}\r\n",
            "--XyZ--\r\n",
        );
        assert_eq!(bytes.as_ref(), expected.as_bytes());
        assert_eq!(body.content_length(), Some(expected.len() as u64));
        assert_eq!(
            body.content_type().as_deref(),
            Some("multipart/form-data; boundary=XyZ")
        );
    }

    #[test]
    fn test_random_boundary_delimits_each_part() {
        let body = MultipartBody::new()
            .with_part(BodyPart::form_data("a", "1").unwrap())
            .with_part(BodyPart::form_data("b", "2").unwrap());
        let text = body.to_text().unwrap();
        let boundary = body.boundary();

        assert!(syntax::is_boundary(boundary));
        assert_eq!(text.matches(&format!("--{boundary}\r\n")).count(), 2);
        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
        assert_ne!(MultipartBody::new().boundary(), boundary);
    }

    #[test]
    fn test_quoted_boundary_and_escaping() {
        let body = MultipartBody::mixed().with_boundary("a b").unwrap();
        assert_eq!(
            body.content_type().as_deref(),
            Some("multipart/mixed; boundary=\"a b\"")
        );
        assert!(MultipartBody::new().with_boundary("").is_err());

        let part = BodyPart::form_data("say \"hi\"", "x").unwrap();
        let disposition = part.headers().get(names::CONTENT_DISPOSITION).unwrap();
        assert_eq!(disposition.as_str(), "form-data; name=\"say %22hi%22\"");
        assert!(BodyPart::form_data("line\r\nbreak", "x").is_err());
    }

    #[test]
    fn test_empty_body_is_only_the_trailer() {
        let body = MultipartBody::new().with_boundary("end").unwrap();
        assert_eq!(body.to_text().unwrap(), "--end--\r\n");
        assert_eq!(body.content_length(), Some(9));
    }
}
