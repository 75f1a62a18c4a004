//! Bridge configuration: how the host exposes itself to embedded content.

use serde::{Deserialize, Serialize};

/// Settings for one host/content bridge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name of the JavaScript global the content calls into
    /// (`window.<interface_name>.postMessage(...)`).
    pub interface_name: String,
    /// Target origin passed to `window.postMessage` for outbound messages.
    pub target_origin: String,
    /// Whether the content-side script pings the host as soon as it installs.
    pub ping_on_attach: bool,
    /// Capacity of the bridge event broadcast channel (valid range: 1-4096).
    pub event_capacity: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            interface_name: "StateReflectorBridge".into(),
            target_origin: "*".into(),
            ping_on_attach: true,
            event_capacity: 64,
        }
    }
}
