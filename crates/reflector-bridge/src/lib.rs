//! Two-way state bridge between a native host and embedded web content.
//!
//! Provides:
//! - Inbound decoding of `SHARED_STATE_UPDATE` / `EVENT` envelopes
//! - A last-known-value cache of shared state keys
//! - Single-slot listeners plus a broadcast of bridge events
//! - Outbound state pushes and `PING` requests scheduled on the UI thread
//! - The content-side initialization script
//! - Optional `wry` integration (feature `wry`)

pub mod bridge;
pub mod dispatch;
pub mod envelope;
pub mod events;
pub mod listener;
pub mod script;
pub mod state;

#[cfg(feature = "wry")]
pub mod webview;

pub use bridge::StateBridge;
pub use dispatch::{
    ChannelDispatcher, Delivery, QueueDispatcher, ScheduledScript, ScriptSink, UiDispatcher,
};
pub use envelope::{InboundMessage, OutboundEnvelope, StateValue};
pub use events::BridgeEvent;
pub use listener::{EventListener, StateUpdateListener};
pub use state::SharedState;
