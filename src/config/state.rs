// Application state module
// Immutable per-process state shared across all in-flight requests

use super::types::Config;
use crate::http::default_headers;
use crate::logger::Logger;
use crate::routing::RouteTable;
use hyper::header::HeaderMap;

/// Application state
///
/// Built once at startup and shared behind an `Arc`. Everything here is
/// read-only for the process lifetime, so concurrent requests need no
/// locking.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    /// Fixed header set attached to every response
    pub default_headers: HeaderMap,
    pub logger: Logger,
}

impl AppState {
    pub fn new(config: Config, routes: RouteTable, logger: Logger) -> Self {
        let default_headers = default_headers(&config.server.name);
        Self {
            config,
            routes,
            default_headers,
            logger,
        }
    }
}
