//! `wry` integration: inject the bridge into a web view.
//!
//! `wry` exposes a single string IPC channel (`window.ipc.postMessage`), so
//! the handshake travels as [`HANDSHAKE_BODY`](crate::script::HANDSHAKE_BODY)
//! and [`StateBridge::route_ipc_body`] splits it from regular messages.

use std::sync::Arc;

use reflector_common::BridgeError;
use tracing::debug;
use wry::WebViewBuilder;

use crate::bridge::StateBridge;
use crate::dispatch::ScriptSink;

impl ScriptSink for wry::WebView {
    fn evaluate_script(&self, script: &str) -> Result<(), BridgeError> {
        wry::WebView::evaluate_script(self, script)
            .map_err(|e| BridgeError::Delivery(e.to_string()))
    }
}

/// Add the bridge's initialization script and IPC handler to a builder.
///
/// Outbound scripts still go through the bridge's dispatcher; the UI loop
/// must pump them into the built `WebView`.
pub fn attach<'a>(builder: WebViewBuilder<'a>, bridge: Arc<StateBridge>) -> WebViewBuilder<'a> {
    let init_script = bridge.init_script();
    debug!(
        session = %bridge.session_id().short(),
        interface = %bridge.config().interface_name,
        "attaching bridge to webview"
    );
    builder
        .with_initialization_script(&init_script)
        .with_ipc_handler(move |request| {
            bridge.route_ipc_body(request.body());
        })
}
