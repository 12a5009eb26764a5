// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from the default `config.toml` (optional) plus
    /// `API_*` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config.toml")
    }

    /// Load configuration from the specified file path.
    ///
    /// Precedence: environment variables over file values over coded
    /// defaults. Nested keys use a double-underscore separator, so
    /// `API_SERVER__PORT=9090` overrides `server.port`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("API")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.name", "rust-json-api")?
            .set_default("server.base_path", "")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the dispatcher cannot work with.
    fn validate(&self) -> Result<(), config::ConfigError> {
        if !self.server.base_path.is_empty() && !self.server.base_path.starts_with('/') {
            return Err(config::ConfigError::Message(format!(
                "server.base_path must start with '/', got '{}'",
                self.server.base_path
            )));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
