//! The host side of one host/content bridge session.
//!
//! `StateBridge` decodes inbound messages, keeps the shared-state cache,
//! fans out to listeners, and schedules outbound scripts on the UI thread.
//! Create one per embedded-content session and drop it with the session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reflector_common::SessionId;
use reflector_config::BridgeConfig;
use tokio::sync::broadcast;
use tracing::debug;

use crate::dispatch::UiDispatcher;
use crate::envelope::StateValue;
use crate::events::{BridgeEvent, EventBus};
use crate::listener::{EventListener, ListenerSlots, StateUpdateListener};
use crate::script;
use crate::state::SharedState;

mod inbound;
mod outbound;

#[derive(Debug, Default)]
struct Inner {
    state: SharedState,
    listeners: ListenerSlots,
}

/// Two-way message bridge between the host and one embedded page.
///
/// All methods take `&self`; inbound calls from any thread are serialized
/// on an internal lock. Listeners run after the lock is released, so they
/// may call back into the bridge.
pub struct StateBridge {
    session: SessionId,
    config: BridgeConfig,
    inner: Mutex<Inner>,
    initialized: AtomicBool,
    events: EventBus,
    dispatcher: Arc<dyn UiDispatcher>,
}

impl StateBridge {
    /// Create a bridge that schedules outbound scripts through `dispatcher`.
    pub fn new(config: BridgeConfig, dispatcher: impl UiDispatcher + 'static) -> Self {
        Self::with_dispatcher(config, Arc::new(dispatcher))
    }

    /// Like [`StateBridge::new`] but with a shared dispatcher.
    pub fn with_dispatcher(config: BridgeConfig, dispatcher: Arc<dyn UiDispatcher>) -> Self {
        let session = SessionId::new();
        let events = EventBus::new(config.event_capacity as usize);
        debug!(
            session = %session.short(),
            interface = %config.interface_name,
            "bridge created"
        );
        Self {
            session,
            config,
            inner: Mutex::new(Inner::default()),
            initialized: AtomicBool::new(false),
            events,
            dispatcher,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Whether the content has completed at least one handshake.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Last value the content reported for `key`, if any.
    ///
    /// Values pushed with [`StateBridge::send_state_to_js`] are not cached.
    pub fn get_shared_state(&self, key: &str) -> Option<StateValue> {
        self.lock().state.get(key).cloned()
    }

    /// Copy of the whole shared-state cache.
    pub fn snapshot(&self) -> HashMap<String, StateValue> {
        self.lock().state.to_map()
    }

    pub fn shared_state_len(&self) -> usize {
        self.lock().state.len()
    }

    // -- Listener slots --

    /// Register the state-update listener, replacing any previous one.
    pub fn set_state_update_listener<F>(&self, listener: F)
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let listener: StateUpdateListener = Arc::new(listener);
        self.replace_state_update_listener(Some(listener));
    }

    /// Register the event listener, replacing any previous one.
    pub fn set_event_listener<F>(&self, listener: F)
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let listener: EventListener = Arc::new(listener);
        self.replace_event_listener(Some(listener));
    }

    pub fn clear_state_update_listener(&self) {
        self.replace_state_update_listener(None);
    }

    pub fn clear_event_listener(&self) {
        self.replace_event_listener(None);
    }

    /// Swap the state-update slot, returning what was there. `None` unregisters.
    pub fn replace_state_update_listener(
        &self,
        listener: Option<StateUpdateListener>,
    ) -> Option<StateUpdateListener> {
        std::mem::replace(&mut self.lock().listeners.state_update, listener)
    }

    /// Swap the event slot, returning what was there. `None` unregisters.
    pub fn replace_event_listener(&self, listener: Option<EventListener>) -> Option<EventListener> {
        std::mem::replace(&mut self.lock().listeners.event, listener)
    }

    /// Subscribe to every inbound update, event, and handshake.
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    /// Initialization script to inject into the page this bridge serves.
    pub fn init_script(&self) -> String {
        script::init_script(&self.config)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StateBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateBridge")
            .field("session", &self.session)
            .field("interface", &self.config.interface_name)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

impl Drop for StateBridge {
    fn drop(&mut self) {
        debug!(session = %self.session.short(), "bridge closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::QueueDispatcher;
    use serde_json::json;

    fn bridge() -> StateBridge {
        StateBridge::new(BridgeConfig::default(), QueueDispatcher::new())
    }

    #[test]
    fn new_bridge_is_empty_and_uninitialized() {
        let bridge = bridge();
        assert!(!bridge.is_initialized());
        assert_eq!(bridge.shared_state_len(), 0);
        assert_eq!(bridge.get_shared_state("anything"), None);
        assert!(bridge.snapshot().is_empty());
    }

    #[test]
    fn sessions_are_distinct() {
        assert_ne!(bridge().session_id(), bridge().session_id());
    }

    #[test]
    fn replace_returns_previous_listener() {
        let bridge = bridge();
        assert!(bridge.replace_state_update_listener(None).is_none());

        bridge.set_state_update_listener(|_, _| {});
        assert!(bridge.replace_state_update_listener(None).is_some());
        assert!(bridge.replace_state_update_listener(None).is_none());
    }

    #[test]
    fn clear_event_listener_empties_slot() {
        let bridge = bridge();
        bridge.set_event_listener(|_, _| {});
        bridge.clear_event_listener();
        assert!(bridge.replace_event_listener(None).is_none());
    }

    #[test]
    fn snapshot_is_a_copy() {
        let bridge = bridge();
        bridge.receive_raw(r#"{"type":"SHARED_STATE_UPDATE","key":"a","value":1}"#);
        let mut snap = bridge.snapshot();
        snap.insert("b".into(), json!(2));
        assert_eq!(bridge.shared_state_len(), 1);
        assert_eq!(bridge.get_shared_state("b"), None);
    }

    #[test]
    fn init_script_follows_config() {
        let bridge = StateBridge::new(
            BridgeConfig {
                interface_name: "Custom".into(),
                ..Default::default()
            },
            QueueDispatcher::new(),
        );
        assert!(bridge.init_script().contains(r#"var NAME = "Custom";"#));
    }

    #[test]
    fn bridge_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StateBridge>();
    }
}
