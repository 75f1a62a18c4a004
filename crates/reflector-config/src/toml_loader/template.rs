//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# State Reflector Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[bridge]
# interface_name = "StateReflectorBridge"  # JS global the content calls into
# target_origin = "*"                      # postMessage target origin
# ping_on_attach = true                    # content pings the host on install
# event_capacity = 64                      # 1-4096

[logging]
# level = "info"                           # trace, debug, info, warn, error
# directives = []                          # e.g. ["reflector_bridge=trace"]
# ansi = true
"##
}
