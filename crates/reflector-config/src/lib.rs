//! State reflector configuration.
//!
//! TOML-based configuration with validation. Every section uses serde
//! defaults so partial configs work out of the box.
//!
//! ```rust,no_run
//! use reflector_config::{load_config, logging};
//!
//! let config = load_config().expect("failed to load config");
//! logging::init(&config.logging);
//! ```

pub mod logging;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BridgeConfig, LogLevel, LoggingConfig, ReflectorConfig, CONFIG_SCHEMA_VERSION,
};
pub use toml_loader::{from_toml_str, load_from_path};

use reflector_common::ConfigError;

/// Load config from the platform default path and validate it strictly.
pub fn load_config() -> Result<ReflectorConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ReflectorConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
