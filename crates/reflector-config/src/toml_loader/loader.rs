//! Core TOML config loading: read from a string, a path, or the platform default.

use crate::schema::ReflectorConfig;
use crate::validation;
use reflector_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Parse a config from TOML text. Missing fields take their defaults.
pub fn from_toml_str(content: &str) -> Result<ReflectorConfig, ConfigError> {
    toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Load config from a specific TOML file path.
///
/// If validation fails, a warning is logged and the parsed config is
/// returned as-is; callers that need a strict check run
/// [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<ReflectorConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let config = from_toml_str(&content)?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/state-reflector/config.toml`
///
/// If the file does not exist, writes a commented default file and
/// returns defaults.
pub fn load_default() -> Result<ReflectorConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(ReflectorConfig::default())
        }
        Err(e) => Err(e),
    }
}
