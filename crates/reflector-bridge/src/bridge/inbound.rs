//! Content -> host: decoding, caching, and listener dispatch.

use std::sync::atomic::Ordering;

use tracing::{debug, info, warn};

use crate::envelope::{decode_inbound, InboundMessage, StateValue};
use crate::events::BridgeEvent;
use crate::script::HANDSHAKE_BODY;

use super::StateBridge;

impl StateBridge {
    /// Handle a raw message string from the content.
    ///
    /// Never fails: malformed messages and messages missing a required
    /// field are logged and dropped without touching the cache.
    /// Unrecognized message types are ignored.
    pub fn receive_raw(&self, raw: &str) {
        match decode_inbound(raw) {
            Ok(InboundMessage::StateUpdate { key, value }) => self.apply_state_update(key, value),
            Ok(InboundMessage::Event { name, data }) => self.dispatch_event(name, data),
            Ok(InboundMessage::Ignored { kind }) => {
                debug!(
                    session = %self.session.short(),
                    kind = kind.as_deref().unwrap_or("<none>"),
                    "inbound message ignored: unrecognized type"
                );
            }
            Err(e) => {
                warn!(
                    session = %self.session.short(),
                    body_len = raw.len(),
                    error = %e,
                    "inbound message dropped"
                );
            }
        }
    }

    /// Handle the content's handshake call. Idempotent.
    pub fn receive_handshake(&self) {
        let first = !self.initialized.swap(true, Ordering::SeqCst);
        if first {
            info!(
                session = %self.session.short(),
                interface = %self.config.interface_name,
                "content interface connected (ping received)"
            );
        } else {
            debug!(session = %self.session.short(), "repeat handshake");
        }
        self.events.publish(BridgeEvent::Handshake { first });
    }

    /// Route a body received on a single-channel IPC transport: the
    /// handshake sentinel goes to [`StateBridge::receive_handshake`],
    /// everything else to [`StateBridge::receive_raw`].
    pub fn route_ipc_body(&self, body: &str) {
        if body == HANDSHAKE_BODY {
            self.receive_handshake();
        } else {
            self.receive_raw(body);
        }
    }

    fn apply_state_update(&self, key: String, value: StateValue) {
        let listener = {
            let mut inner = self.lock();
            inner.state.insert(key.clone(), value.clone());
            inner.listeners.state_update.clone()
        };

        debug!(session = %self.session.short(), key = %key, "shared state updated");

        if let Some(listener) = listener {
            listener(&key, &value);
        }
        self.events.publish(BridgeEvent::StateUpdated { key, value });
    }

    fn dispatch_event(&self, name: String, data: StateValue) {
        let listener = self.lock().listeners.event.clone();

        debug!(session = %self.session.short(), event = %name, "event from content");

        if let Some(listener) = listener {
            listener(&name, &data);
        }
        self.events.publish(BridgeEvent::Event { name, data });
    }
}
