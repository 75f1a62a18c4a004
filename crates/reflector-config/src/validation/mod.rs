//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod bridge;
mod helpers;
mod logging;


use crate::schema::ReflectorConfig;
use reflector_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ReflectorConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    bridge::validate_bridge(&mut errors, config);
    logging::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
