//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//!
//! The geocoding provider section reuses `BrasilApiConfig` from the
//! integration crate; the inter-service client section lives with its
//! adapter in `http::distance_client`.

mod database;
mod server;

use integration_brasilapi::BrasilApiConfig;
use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use server::ServerConfig;

use crate::http::DistanceApiConfig;

/// Main application configuration, shared by both binaries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite database configuration (viagens-api only)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// BrasilAPI CEP provider configuration
    #[serde(default)]
    pub geocode: BrasilApiConfig,

    /// Distance service client configuration (viagens-api only)
    #[serde(default)]
    pub distance_api: DistanceApiConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config.toml`, and
    /// `CEPROTAS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` if a source fails to parse.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_with_port(ServerConfig::DEFAULT_PORT)
    }

    /// Load with a service-specific default port; file and environment
    /// still override it.
    pub fn load_with_port(default_port: u16) -> Result<Self, ::config::ConfigError> {
        Self::load_from(default_port, env_source())
    }

    fn load_from(
        default_port: u16,
        env: ::config::Environment,
    ) -> Result<Self, ::config::ConfigError> {
        let builder = ::config::Config::builder()
            .set_default("server.port", i64::from(default_port))?
            // Load from file if exists
            .add_source(::config::File::with_name("config").required(false))
            .add_source(env);

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// Environment overrides, e.g. `CEPROTAS_SERVER__PORT` or
/// `CEPROTAS_GEOCODE__BASE_URL`.
///
/// Sections and fields are joined with `__`: field names themselves
/// contain underscores (`base_url`, `distance_api`), so a single `_`
/// cannot double as the nesting separator.
fn env_source() -> ::config::Environment {
    ::config::Environment::with_prefix("CEPROTAS")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
