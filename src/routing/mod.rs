//! Routing module
//!
//! Provides the static routing table mapping request paths to per-method
//! handlers, along with the handler and reply types endpoints are built
//! from. New capability means adding a path key with specific method
//! handlers; there is no dynamic registration at runtime.

mod table;

pub use table::{Handler, HandlerFuture, Payload, Reply, RouteTable};
