//! Accept loop
//!
//! Accepts connections until Ctrl-C and serves each one on its own task.
//! Requests interleave at await points; the shared `AppState` is read-only,
//! so no coordination is needed across connections.

use crate::config::AppState;
use crate::handler;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Run the server until a shutdown signal arrives.
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        if state.config.logging.access_log {
                            state.logger.info(&format!("Accepted connection from {peer_addr}"));
                        }
                        serve_connection(stream, Arc::clone(&state));
                    }
                    Err(e) => {
                        state.logger.error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                state.logger.info("Shutdown signal received, stopping server");
                return Ok(());
            }
        }
    }
}

/// Serve a single connection on a spawned task.
fn serve_connection(stream: TcpStream, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let service_state = Arc::clone(&state);
        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&service_state);
                async move { handler::handle_request(req, state).await }
            }),
        );

        if let Err(err) = conn.await {
            state
                .logger
                .error(&format!("Failed to serve connection: {err:?}"));
        }
    });
}
