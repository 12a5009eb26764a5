// Endpoint handler functions

use crate::error::ApiError;
use crate::routing::{Payload, Reply};
use hyper::header::HeaderMap;
use serde_json::{Map, Value};

/// `GET /echo` — reflect the query parameters and request headers.
pub async fn echo_params(
    params: Option<Payload>,
    headers: HeaderMap,
) -> Result<Reply, ApiError> {
    let mut body = Map::new();
    body.insert("params".to_string(), params.map_or(Value::Null, Value::Object));
    body.insert("headers".to_string(), headers_to_json(&headers));
    Ok(Reply::new(body))
}

/// `POST /echo` — reflect the parsed JSON body and request headers.
pub async fn echo_body(payload: Option<Payload>, headers: HeaderMap) -> Result<Reply, ApiError> {
    let mut body = Map::new();
    body.insert("body".to_string(), payload.map_or(Value::Null, Value::Object));
    body.insert("headers".to_string(), headers_to_json(&headers));
    Ok(Reply::new(body))
}

/// `GET /health` — liveness probe.
pub async fn health(_payload: Option<Payload>, _headers: HeaderMap) -> Result<Reply, ApiError> {
    let mut body = Map::new();
    body.insert("status".to_string(), Value::String("ok".to_string()));
    Ok(Reply::new(body))
}

/// Render request headers as a JSON object. Non-UTF-8 header values are
/// replaced lossily rather than dropped.
fn headers_to_json(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for (name, value) in headers {
        map.insert(
            name.as_str().to_string(),
            Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        );
    }
    Value::Object(map)
}
