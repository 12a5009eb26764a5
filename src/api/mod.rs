// API module entry
// Declares the endpoints this server exposes. Adding capability means
// registering another (path, method, handler) entry here.

pub mod handlers;

use crate::routing::RouteTable;
use hyper::Method;

/// Build the routing table consumed by the dispatcher at startup.
pub fn endpoints() -> RouteTable {
    RouteTable::new()
        .route("/echo", Method::GET, handlers::echo_params)
        .route("/echo", Method::POST, handlers::echo_body)
        .route("/health", Method::GET, handlers::health)
}
