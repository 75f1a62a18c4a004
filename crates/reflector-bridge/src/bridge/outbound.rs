//! Host -> content: encoding and scheduling onto the UI thread.

use reflector_common::BridgeError;
use serde::Serialize;
use tracing::{debug, warn};

use crate::dispatch::{Delivery, ScheduledScript};
use crate::envelope::{OutboundEnvelope, PING_SENTINEL};
use crate::script::post_message_script;

use super::StateBridge;

impl StateBridge {
    /// Push a shared state value to the content.
    ///
    /// The script is scheduled on the UI dispatcher and this returns
    /// immediately. The local cache is not updated. Serialization or
    /// scheduling failures are logged and the push is dropped.
    pub fn send_state_to_js<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.schedule_state(key, value) {
            warn!(
                session = %self.session.short(),
                key = %key,
                error = %e,
                "outbound state push dropped"
            );
        }
    }

    /// Ask the content to answer with a handshake.
    pub fn request_ping(&self) {
        let job = ScheduledScript {
            delivery: Delivery::Ping,
            script: post_message_script(PING_SENTINEL, &self.config.target_origin),
        };
        match self.dispatcher.dispatch(job) {
            Ok(()) => debug!(session = %self.session.short(), "ping scheduled"),
            Err(e) => warn!(session = %self.session.short(), error = %e, "ping dropped"),
        }
    }

    fn schedule_state<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), BridgeError> {
        let payload = OutboundEnvelope::state_update(key, value)?.encode()?;
        let script = post_message_script(&payload, &self.config.target_origin);
        self.dispatcher.dispatch(ScheduledScript {
            delivery: Delivery::StatePush {
                key: key.to_string(),
                payload,
            },
            script,
        })?;
        debug!(session = %self.session.short(), key = %key, "state push scheduled");
        Ok(())
    }
}
