use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::{ApiConfig, PollConfig};

/// CLI application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientAppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

impl ClientAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CODEHIRE_CONFIG").unwrap_or_else(|_| "config/client".to_string());

        defaults()?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., CODEHIRE__API__TOKEN)
            .add_source(Environment::with_prefix("CODEHIRE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", "http://localhost:5000/api/v1")?
        .set_default("api.timeout_secs", 15_i64)?
        .set_default("poll.interval_ms", 2000_i64)?
        .set_default("poll.max_retries", 0_i64)?
        .set_default("poll.retry_base_delay_ms", 500_i64)?
        .set_default("poll.retry_max_delay_ms", 10_000_i64)
}
