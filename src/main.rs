use std::sync::Arc;

mod api;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    let log = logger::Logger::new(&cfg.server.name);

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        log.info(&format!("Using {workers} worker threads"));
    }
    let runtime = runtime_builder.build()?;

    if let Err(e) = runtime.block_on(async_main(cfg, log.clone())) {
        log.error(&format!("Error occurred during runtime: {e}"));
        return Err(e);
    }
    Ok(())
}

async fn async_main(
    cfg: config::Config,
    log: logger::Logger,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let listener = match server::create_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            log.error(&format!("Failed to bind {addr}: {e}"));
            return Err(e.into());
        }
    };

    log.info(&format!("Listening on: http://{addr}"));
    if !cfg.server.base_path.is_empty() {
        log.info(&format!("Base path: {}", cfg.server.base_path));
    }
    log.info("Press Ctrl+C to exit");

    let state = Arc::new(config::AppState::new(cfg, api::endpoints(), log));
    server::run(listener, state).await
}
