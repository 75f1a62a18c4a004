//! JavaScript generated by the host.
//!
//! Two kinds of script: the initialization script injected once into every
//! page, and the one-line `window.postMessage(...)` scripts used for each
//! outbound message.

use reflector_config::BridgeConfig;
use serde_json::Value;

/// IPC body the initialization script sends for a handshake when the
/// platform only offers a single string channel.
pub const HANDSHAKE_BODY: &str = "__state_reflector_ping__";

/// Encode `s` as a JavaScript string literal.
pub fn js_string_literal(s: &str) -> String {
    Value::String(s.to_owned()).to_string()
}

/// Script that posts `payload` as a string message to the content window.
pub fn post_message_script(payload: &str, target_origin: &str) -> String {
    format!(
        "window.postMessage({}, {});",
        js_string_literal(payload),
        js_string_literal(target_origin)
    )
}

const INIT_SCRIPT_TEMPLATE: &str = r#"
(function() {
    if (window.__stateReflectorInstalled) return;
    window.__stateReflectorInstalled = true;

    var NAME = __NAME__;
    var HANDSHAKE = __HANDSHAKE__;

    // Host interface: native-provided if present, else shimmed over window.ipc.
    var host = window[NAME] || {};
    if (typeof host.postMessage !== 'function') {
        host.postMessage = function(json) {
            if (window.ipc) window.ipc.postMessage(json);
        };
    }
    if (typeof host.ping !== 'function') {
        host.ping = function() {
            if (window.ipc) window.ipc.postMessage(HANDSHAKE);
        };
    }
    window[NAME] = host;

    var values = {};
    var subscribers = {};

    function notify(key, value) {
        var set = subscribers[key];
        if (!set) return;
        set.slice().forEach(function(fn) {
            try { fn(value); } catch (e) { console.error('[StateReflector] subscriber failed', e); }
        });
    }

    window.stateReflector = {
        get: function(key) {
            return values[key];
        },
        setState: function(key, value) {
            values[key] = value;
            notify(key, value);
            host.postMessage(JSON.stringify({
                type: 'SHARED_STATE_UPDATE',
                key: key,
                value: value === undefined ? null : value
            }));
        },
        subscribe: function(key, fn) {
            (subscribers[key] = subscribers[key] || []).push(fn);
            return function() {
                var set = subscribers[key] || [];
                var i = set.indexOf(fn);
                if (i >= 0) set.splice(i, 1);
                if (set.length === 0) delete subscribers[key];
            };
        },
        sendEvent: function(name, data) {
            host.postMessage(JSON.stringify({
                type: 'EVENT',
                eventName: name,
                data: data === undefined ? null : data
            }));
        }
    };

    window.addEventListener('message', function(evt) {
        if (evt.data === 'PING') {
            host.ping();
            return;
        }
        if (typeof evt.data !== 'string') return;
        try {
            var msg = JSON.parse(evt.data);
            if (msg && msg.type === 'SHARED_STATE_UPDATE_FROM_NATIVE') {
                values[msg.key] = msg.value;
                notify(msg.key, msg.value);
            }
        } catch (e) {
            console.error('[StateReflector] bad message from host', e);
        }
    });

    if (__PING_ON_ATTACH__) host.ping();
})();
"#;

/// Build the initialization script for a bridge configuration.
///
/// The script exposes `window.stateReflector` (`get`, `setState`,
/// `subscribe`, `sendEvent`) to page code and answers `PING` with a
/// handshake. Installing it twice in the same page is a no-op.
pub fn init_script(config: &BridgeConfig) -> String {
    INIT_SCRIPT_TEMPLATE
        .replace("__NAME__", &js_string_literal(&config.interface_name))
        .replace("__HANDSHAKE__", &js_string_literal(HANDSHAKE_BODY))
        .replace(
            "__PING_ON_ATTACH__",
            if config.ping_on_attach { "true" } else { "false" },
        )
}
