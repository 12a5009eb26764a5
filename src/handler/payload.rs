//! Payload extraction.
//!
//! GET requests carry their input in the query string, POST requests in a
//! JSON body. An extraction that yields no keys is reported as `None`, never
//! as an empty map.

use crate::error::ApiError;
use crate::routing::Payload;
use hyper::body::Bytes;
use hyper::Uri;
use serde_json::{Map, Value};

/// Parse URL query parameters into a payload.
///
/// Values are percent-decoded; repeated keys keep the last value.
pub fn from_query(uri: &Uri) -> Option<Payload> {
    let query = uri.query()?;
    let mut payload = Map::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        payload.insert(key.into_owned(), Value::String(value.into_owned()));
    }
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

/// Parse a JSON request body into a payload.
///
/// An empty body and an empty object (`{}`) both yield `None`. A body that
/// is valid JSON but not an object is rejected: a payload is a key-value
/// mapping by contract.
pub fn from_body(bytes: &Bytes) -> Result<Option<Payload>, ApiError> {
    if bytes.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(bytes)?;
    match value {
        Value::Object(map) => {
            if map.is_empty() {
                Ok(None)
            } else {
                Ok(Some(map))
            }
        }
        _ => Err(ApiError::NonObjectBody),
    }
}
