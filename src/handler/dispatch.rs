//! Request dispatch module
//!
//! Entry point for HTTP request processing: route lookup, payload
//! extraction, handler invocation and response serialization. Every
//! outcome, including every error, leaves through the JSON response
//! builders and carries the fixed header set.

use crate::config::AppState;
use crate::handler::payload;
use crate::http::{error_response, json_response};
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::header::HeaderMap;
use hyper::{Method, Request, Response, StatusCode};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// Generic over the body type so tests can drive the full dispatch path
/// with in-memory requests; the server feeds it `hyper::body::Incoming`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let (parts, body) = req.into_parts();
    let method = parts.method;
    let uri = parts.uri;
    let headers = parts.headers;

    if state.config.logging.access_log {
        state.logger.info(&format!("Incoming request: {method} {uri}"));
    }
    if state.config.logging.show_headers {
        state.logger.info(&format!("Headers: {} entries", headers.len()));
    }

    // 1. Strip the configured base path. Requests outside the base path are
    // rejected rather than matched against an unexpected slice of the path.
    let Some(path) = strip_base_path(uri.path(), &state.config.server.base_path) else {
        state
            .logger
            .info(&format!("Path outside base path: {method} {}", uri.path()));
        return Ok(not_found(&state));
    };

    // 2. Path lookup
    let Some(entry) = state.routes.resolve(path) else {
        state
            .logger
            .info(&format!("Endpoint not found for {method} {path}"));
        return Ok(not_found(&state));
    };

    // 3. Method lookup within the resolved entry
    let Some(handler) = entry.get(&method) else {
        state
            .logger
            .info(&format!("Method not allowed for {method} {path}"));
        return Ok(error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
            &state.default_headers,
        ));
    };
    let handler = Arc::clone(handler);

    // 4. Payload extraction recognizes exactly GET and POST; any other
    // method is rejected here even when the route declares a handler for it.
    let payload = match method {
        Method::GET => payload::from_query(&uri),
        Method::POST => {
            if let Some(response) = check_body_size(&headers, &state) {
                return Ok(response);
            }
            let bytes = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    state.logger.error(&format!("Failed to read request body: {e}"));
                    return Ok(error_response(
                        StatusCode::BAD_REQUEST,
                        "Failed to read request body",
                        &state.default_headers,
                    ));
                }
            };
            match payload::from_body(&bytes) {
                Ok(payload) => payload,
                Err(e) => {
                    state
                        .logger
                        .error(&format!("Rejecting body for {method} {path}: {e}"));
                    return Ok(error_response(
                        StatusCode::BAD_REQUEST,
                        "Malformed JSON body",
                        &state.default_headers,
                    ));
                }
            }
        }
        _ => {
            state
                .logger
                .info(&format!("Method not supported for {method} {path}"));
            return Ok(error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not supported by API",
                &state.default_headers,
            ));
        }
    };

    state.logger.info(&format!("Handling request: {method} {path}"));

    // 5. Invoke the handler; a failure becomes a structured 500 instead of
    // an unformatted runtime error.
    let reply = match handler(payload, headers).await {
        Ok(reply) => reply,
        Err(e) => {
            state
                .logger
                .error(&format!("Handler failed for {method} {path}: {e}"));
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                &state.default_headers,
            ));
        }
    };

    // 6. Serialize with the handler's status override, default 200
    let status = reply.status.unwrap_or(StatusCode::OK);
    if state.config.logging.access_log {
        state.logger.info(&format!(
            "Responding to request: {method} {path} with status {status}"
        ));
    }
    Ok(json_response(
        status,
        &Value::Object(reply.body),
        &state.default_headers,
    ))
}

fn not_found(state: &AppState) -> Response<Full<Bytes>> {
    error_response(
        StatusCode::NOT_FOUND,
        "Endpoint not found",
        &state.default_headers,
    )
}

/// Strip the configured base path from the request path.
///
/// Returns `None` when a non-empty base path is configured and the request
/// path does not start with it.
fn strip_base_path<'a>(path: &'a str, base_path: &str) -> Option<&'a str> {
    if base_path.is_empty() {
        return Some(path);
    }
    path.strip_prefix(base_path)
}

/// Validate Content-Length against the configured limit and return 413 if
/// exceeded.
fn check_body_size(headers: &HeaderMap, state: &AppState) -> Option<Response<Full<Bytes>>> {
    let max_body_size = state.config.http.max_body_size;
    let content_length = headers.get(hyper::header::CONTENT_LENGTH)?;
    let Ok(size_str) = content_length.to_str() else {
        state
            .logger
            .error("Content-Length header contains non-ASCII characters");
        return None;
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            state.logger.error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large",
                &state.default_headers,
            ))
        }
        Err(_) => {
            state.logger.error(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::{echo_body, echo_params};
    use crate::config::Config;
    use crate::error::ApiError;
    use crate::logger::Logger;
    use crate::routing::{Payload, Reply, RouteTable};
    use serde_json::{json, Map};

    async fn failing(_payload: Option<Payload>, _headers: HeaderMap) -> Result<Reply, ApiError> {
        Err(ApiError::handler("boom"))
    }

    async fn created(_payload: Option<Payload>, _headers: HeaderMap) -> Result<Reply, ApiError> {
        let mut body = Map::new();
        body.insert("id".to_string(), json!(1));
        Ok(Reply::new(body).with_status(StatusCode::CREATED))
    }

    fn test_state(base_path: &str) -> Arc<AppState> {
        let mut config = Config::load_from("no-such-config-file").expect("defaults load");
        config.server.base_path = base_path.to_string();
        let routes = RouteTable::new()
            .route("/echo", Method::GET, echo_params)
            .route("/echo", Method::POST, echo_body)
            // Declared handler outside {GET, POST}: payload extraction
            // still rejects the method.
            .route("/echo", Method::DELETE, echo_params)
            .route("/fail", Method::GET, failing)
            .route("/created", Method::GET, created);
        Arc::new(AppState::new(config, routes, Logger::plain("test")))
    }

    fn request(method: Method, uri: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn dispatch(
        state: &Arc<AppState>,
        req: Request<Full<Bytes>>,
    ) -> (StatusCode, HeaderMap, Value) {
        let response = handle_request(req, Arc::clone(state)).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_get_echo_with_query() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::GET, "/echo?foo=bar", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["params"], json!({"foo": "bar"}));
    }

    #[tokio::test]
    async fn test_get_echo_without_query_has_null_params() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::GET, "/echo", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["params"], Value::Null);
    }

    #[tokio::test]
    async fn test_echo_reflects_request_headers() {
        let state = test_state("");
        let req = Request::builder()
            .method(Method::GET)
            .uri("/echo")
            .header("x-request-id", "abc123")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (_, _, body) = dispatch(&state, req).await;
        assert_eq!(body["headers"]["x-request-id"], json!("abc123"));
    }

    #[tokio::test]
    async fn test_post_echo_body() {
        let state = test_state("");
        let (status, _, body) =
            dispatch(&state, request(Method::POST, "/echo", r#"{"a":1}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_post_empty_object_has_null_body() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::POST, "/echo", "{}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::GET, "/missing", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Endpoint not found"}));
    }

    #[tokio::test]
    async fn test_unregistered_method_is_405() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::PUT, "/echo", "")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn test_declared_method_outside_get_post_is_405() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::DELETE, "/echo", "")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Method not supported by API"}));
    }

    #[tokio::test]
    async fn test_malformed_json_body_is_400() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::POST, "/echo", "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Malformed JSON body"}));
    }

    #[tokio::test]
    async fn test_non_object_json_body_is_400() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::POST, "/echo", "[1,2]")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Malformed JSON body"}));
    }

    #[tokio::test]
    async fn test_handler_failure_is_structured_500() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::GET, "/fail", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_status_override_not_in_body() {
        let state = test_state("");
        let (status, _, body) = dispatch(&state, request(Method::GET, "/created", "")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 1}));
        assert!(body.get("status").is_none());
    }

    #[tokio::test]
    async fn test_fixed_headers_present_on_errors_too() {
        let state = test_state("");
        let (_, headers, _) = dispatch(&state, request(Method::GET, "/missing", "")).await;
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
        assert_eq!(
            headers.get("strict-transport-security").unwrap(),
            "max-age=31536000; includeSubDomains; preload"
        );
    }

    #[tokio::test]
    async fn test_base_path_stripping() {
        let state = test_state("/api/v1");
        let (status, _, body) =
            dispatch(&state, request(Method::GET, "/api/v1/echo?foo=bar", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["params"], json!({"foo": "bar"}));
    }

    #[tokio::test]
    async fn test_path_outside_base_path_is_rejected() {
        let state = test_state("/api/v1");
        let (status, _, body) = dispatch(&state, request(Method::GET, "/echo", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Endpoint not found"}));
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let state = test_state("");
        let req = Request::builder()
            .method(Method::POST)
            .uri("/echo")
            .header("content-length", "10000000")
            .body(Full::new(Bytes::from_static(b"{}")))
            .unwrap();
        let (status, _, body) = dispatch(&state, req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({"error": "Request body too large"}));
    }
}
