//! HTTP protocol layer module
//!
//! Status codes and the fixed response-header policy, decoupled from the
//! dispatch logic. Symbolic status names come from `hyper::StatusCode`;
//! this module contributes the header registry and the response builders.

pub mod headers;
pub mod response;

// Re-export commonly used builders
pub use headers::default_headers;
pub use response::{error_response, json_response};
