//! Bridge section validation.

use super::helpers::{is_js_identifier, validate_range};
use crate::schema::ReflectorConfig;

pub(super) fn validate_bridge(errors: &mut Vec<String>, config: &ReflectorConfig) {
    let bridge = &config.bridge;

    if !is_js_identifier(&bridge.interface_name) {
        errors.push(format!(
            "bridge.interface_name = {:?} is not a valid JavaScript identifier",
            bridge.interface_name
        ));
    }

    if bridge.target_origin.trim().is_empty() {
        errors.push("bridge.target_origin must not be empty".into());
    }

    validate_range(errors, "bridge.event_capacity", bridge.event_capacity, 1, 4096);
}
