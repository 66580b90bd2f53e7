//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file plus `BADGEHUB__`-prefixed environment variables.
//! Every field has a default so the server starts with no file at all.

pub mod app;
pub mod database;
pub mod logging;
pub mod remote;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::remote::RemoteFetchConfig;

use crate::error::AppError;

/// Default configuration file, looked up relative to the working directory.
const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Badge database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Remote fetch proxy settings.
    #[serde(default)]
    pub remote: RemoteFetchConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// When `path` is given the file must exist; otherwise
    /// `config/default.toml` is used if present. Environment variables
    /// such as `BADGEHUB__SERVER__PORT=8080` are applied last.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let file_source = match path {
            Some(p) => config::File::from(Path::new(p)).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = config::Config::builder()
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("BADGEHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;

        tracing::debug!(
            host = %loaded.server.host,
            port = loaded.server.port,
            "Configuration loaded"
        );
        Ok(loaded)
    }
}
