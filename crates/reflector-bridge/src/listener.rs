//! Single-slot listener registration.
//!
//! The bridge holds at most one state-update listener and one event
//! listener. Registering a new one replaces the old one.

use std::fmt;
use std::sync::Arc;

use crate::envelope::StateValue;

/// Called with `(key, value)` after an inbound state update is cached.
pub type StateUpdateListener = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Called with `(event_name, data)` for each inbound event.
pub type EventListener = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

#[derive(Default, Clone)]
pub(crate) struct ListenerSlots {
    pub(crate) state_update: Option<StateUpdateListener>,
    pub(crate) event: Option<EventListener>,
}

impl fmt::Debug for ListenerSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSlots")
            .field("state_update", &self.state_update.is_some())
            .field("event", &self.event.is_some())
            .finish()
    }
}
