//! Fixed response header set.
//!
//! Built once at startup from the configured server name and applied
//! verbatim to every response, success or error. There is no per-route
//! override mechanism.

use hyper::header::{self, HeaderMap, HeaderValue};

/// Fallback `Server` value when the configured name is not a valid header
/// value.
const FALLBACK_SERVER_NAME: &str = "rust-json-api";

/// Build the header set sent with every response.
pub fn default_headers(server_name: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::SERVER,
        HeaderValue::from_str(server_name)
            .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_SERVER_NAME)),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains; preload"),
    );
    headers
}
