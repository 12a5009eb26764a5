//! Static routing table: path -> method -> handler.

use crate::error::ApiError;
use hyper::{HeaderMap, Method, StatusCode};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Input extracted for a handler: query parameters (GET) or the parsed JSON
/// body (POST). Always a non-empty map; an empty extraction is passed to the
/// handler as `None` instead.
pub type Payload = Map<String, Value>;

/// Future returned by a handler invocation.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Reply, ApiError>> + Send>>;

/// A registered endpoint handler.
///
/// Receives the extracted payload (if any) and the request headers, and
/// produces a [`Reply`] asynchronously.
pub type Handler = Arc<dyn Fn(Option<Payload>, HeaderMap) -> HandlerFuture + Send + Sync>;

/// Handler result: a JSON object body plus an optional status override.
///
/// The status lives next to the body rather than as a reserved key inside
/// it, so handler bodies may contain a `status` field of their own.
#[derive(Debug, Default)]
pub struct Reply {
    pub body: Map<String, Value>,
    pub status: Option<StatusCode>,
}

impl Reply {
    /// Reply with the given body and the default status (200 OK).
    pub const fn new(body: Map<String, Value>) -> Self {
        Self { body, status: None }
    }

    /// Override the response status code.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }
}

/// Immutable routing table built once at startup.
///
/// Path matching is exact string equality; method matching is by
/// `hyper::Method` equality. There is no pattern matching, no trailing-slash
/// normalization, and no runtime registration.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<String, HashMap<Method, Handler>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a (path, method) pair. Chainable.
    #[must_use]
    pub fn route<F, Fut>(mut self, path: &str, method: Method, handler: F) -> Self
    where
        F: Fn(Option<Payload>, HeaderMap) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Reply, ApiError>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |payload, headers| Box::pin(handler(payload, headers)));
        self.routes
            .entry(path.to_string())
            .or_default()
            .insert(method, handler);
        self
    }

    /// Look up the method map registered for a path.
    pub fn resolve(&self, path: &str) -> Option<&HashMap<Method, Handler>> {
        self.routes.get(path)
    }

    /// Look up the handler registered for a (path, method) pair.
    pub fn resolve_method(&self, path: &str, method: &Method) -> Option<&Handler> {
        self.routes.get(path).and_then(|entry| entry.get(method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn ok_handler(_payload: Option<Payload>, _headers: HeaderMap) -> Result<Reply, ApiError> {
        let mut body = Map::new();
        body.insert("ok".to_string(), json!(true));
        Ok(Reply::new(body))
    }

    fn table() -> RouteTable {
        RouteTable::new()
            .route("/echo", Method::GET, ok_handler)
            .route("/echo", Method::POST, ok_handler)
            .route("/health", Method::GET, ok_handler)
    }

    #[test]
    fn test_resolve_known_path() {
        let table = table();
        let entry = table.resolve("/echo").expect("path registered");
        assert_eq!(entry.len(), 2);
        assert!(entry.contains_key(&Method::GET));
        assert!(entry.contains_key(&Method::POST));
    }

    #[test]
    fn test_resolve_unknown_path() {
        assert!(table().resolve("/missing").is_none());
        // Exact match only: no trailing-slash normalization
        assert!(table().resolve("/echo/").is_none());
    }

    #[test]
    fn test_resolve_method() {
        let table = table();
        assert!(table.resolve_method("/echo", &Method::GET).is_some());
        assert!(table.resolve_method("/echo", &Method::DELETE).is_none());
        assert!(table.resolve_method("/health", &Method::POST).is_none());
    }

    #[tokio::test]
    async fn test_registered_handler_is_invocable() {
        let table = table();
        let handler = table
            .resolve_method("/echo", &Method::GET)
            .expect("handler registered")
            .clone();
        let reply = handler(None, HeaderMap::new()).await.expect("handler ok");
        assert_eq!(reply.body.get("ok"), Some(&json!(true)));
        assert!(reply.status.is_none());
    }

    #[test]
    fn test_reply_status_override() {
        let reply = Reply::new(Map::new()).with_status(StatusCode::CREATED);
        assert_eq!(reply.status, Some(StatusCode::CREATED));
    }
}
