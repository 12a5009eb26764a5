//! JSON response building.
//!
//! Every response in the system goes through these builders, which attach
//! the fixed header set from [`super::headers`].

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderMap;
use hyper::{Response, StatusCode};
use serde_json::Value;

/// Build a JSON response with the given status and the fixed header set.
pub fn json_response(
    status: StatusCode,
    body: &Value,
    headers: &HeaderMap,
) -> Response<Full<Bytes>> {
    let payload = serde_json::to_string(body).unwrap_or_else(|_| String::from("{}"));
    let mut response = Response::new(Full::new(Bytes::from(payload)));
    *response.status_mut() = status;
    *response.headers_mut() = headers.clone();
    response
}

/// Build a structured error response: `{"error": "<message>"}`.
pub fn error_response(
    status: StatusCode,
    message: &str,
    headers: &HeaderMap,
) -> Response<Full<Bytes>> {
    json_response(status, &serde_json::json!({ "error": message }), headers)
}
