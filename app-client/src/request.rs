//! Request descriptors
//!
//! A [`RequestDescriptor`] is the complete description of one HTTP call:
//! path, method, query string, body, headers and how the response body is
//! to be read. Accessors in [`crate::api`] only build descriptors; sending
//! them is the job of an [`HttpClient`](crate::client::HttpClient).

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{ClientError, ClientResult};

/// Header carrying the body's media type
pub const CONTENT_TYPE: &str = "Content-Type";

/// Media type announced for file uploads
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// How the response body should be handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// Parse as JSON
    #[default]
    Json,
    /// Keep the raw bytes
    Blob,
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
    Multipart(MultipartForm),
}

/// One file inside a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Wrap in-memory content, guessing the media type from the file name
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Validation(format!("not a file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Multipart body: named file fields, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, FilePart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, field: impl Into<String>, part: FilePart) -> Self {
        self.fields.push((field.into(), part));
        self
    }

    pub fn get(&self, field: &str) -> Option<&FilePart> {
        self.fields.iter().find(|(name, _)| name == field).map(|(_, part)| part)
    }
}

/// Structured description of an HTTP request
///
/// `method` and `url` are always set; everything else is optional. `url` is
/// the path below the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: Method,
    /// Query string pairs, in serialization order
    pub params: Vec<(String, String)>,
    pub data: Option<RequestBody>,
    pub headers: BTreeMap<String, String>,
    pub response_type: ResponseType,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            params: Vec::new(),
            data: None,
            headers: BTreeMap::new(),
            response_type: ResponseType::Json,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Set the query string from any serializable object
    pub fn params<Q: Serialize + ?Sized>(mut self, query: &Q) -> ClientResult<Self> {
        self.params = to_pairs(query)?;
        Ok(self)
    }

    /// Append one query pair
    pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Set a JSON body
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> ClientResult<Self> {
        Ok(self.json_value(serde_json::to_value(body)?))
    }

    /// Set an already built JSON body
    pub fn json_value(mut self, body: Value) -> Self {
        self.data = Some(RequestBody::Json(body));
        self
    }

    /// Set a form-encoded body
    pub fn form<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.data = Some(RequestBody::Form(to_pairs(body)?));
        Ok(self)
    }

    /// Set a multipart body and announce it in `Content-Type`
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.data = Some(RequestBody::Multipart(form));
        self.header(CONTENT_TYPE, MULTIPART_FORM_DATA)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Ask for the raw response bytes instead of JSON
    pub fn blob(mut self) -> Self {
        self.response_type = ResponseType::Blob;
        self
    }

    /// Case-insensitive header lookup
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> Option<&Value> {
        match &self.data {
            Some(RequestBody::Json(value)) => Some(value),
            _ => None,
        }
    }

    pub fn multipart_body(&self) -> Option<&MultipartForm> {
        match &self.data {
            Some(RequestBody::Multipart(form)) => Some(form),
            _ => None,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Join ids into the comma-separated path segment batch deletes expect
pub fn join_ids<I: Display>(ids: &[I]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Flatten a serializable object into key/value pairs.
///
/// `null` fields are dropped and arrays repeat their key. Anything that is
/// not an object of scalars is rejected.
fn to_pairs<Q: Serialize + ?Sized>(query: &Q) -> ClientResult<Vec<(String, String)>> {
    let map = match serde_json::to_value(query)? {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => return Err(shape_error(format!("expected an object, got {}", other))),
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(s) = scalar(&key, item)? {
                        pairs.push((key.clone(), s));
                    }
                }
            }
            other => {
                if let Some(s) = scalar(&key, other)? {
                    pairs.push((key, s));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar(key: &str, value: Value) -> ClientResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => {
            Err(shape_error(format!("nested value under `{}`", key)))
        }
    }
}

fn shape_error(msg: String) -> ClientError {
    ClientError::Serialization(<serde_json::Error as serde::ser::Error>::custom(msg))
}
