//! Message envelopes exchanged between the host and embedded content.
//!
//! Messages flow in both directions:
//! - **Content -> host**: the page calls `window.<Bridge>.postMessage(json)`
//!   with a `SHARED_STATE_UPDATE` or `EVENT` envelope, or `ping()` for the
//!   handshake.
//! - **Host -> content**: the host evaluates a script that performs
//!   `window.postMessage(...)` with a `SHARED_STATE_UPDATE_FROM_NATIVE`
//!   envelope or the bare `PING` sentinel.

use reflector_common::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A shared state value: null, bool, number, string, array, or object.
pub type StateValue = Value;

/// Inbound: content changed a shared state key.
pub const SHARED_STATE_UPDATE: &str = "SHARED_STATE_UPDATE";
/// Inbound: content raised a named event.
pub const EVENT: &str = "EVENT";
/// Outbound: host pushes a shared state key to the content.
pub const SHARED_STATE_UPDATE_FROM_NATIVE: &str = "SHARED_STATE_UPDATE_FROM_NATIVE";
/// Outbound sentinel asking the content to answer with a handshake.
pub const PING_SENTINEL: &str = "PING";

// =============================================================================
// INBOUND
// =============================================================================

/// A decoded content -> host message.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    StateUpdate { key: String, value: StateValue },
    Event { name: String, data: StateValue },
    /// Well-formed object whose `type` is absent or not one we handle.
    Ignored { kind: Option<String> },
}

/// Decode a raw string received from the content.
///
/// Anything that is not a JSON object is [`BridgeError::Malformed`]. A
/// recognized `type` with a missing or ill-typed field is
/// [`BridgeError::MissingField`]. JSON `null` counts as a present value.
pub fn decode_inbound(raw: &str) -> Result<InboundMessage, BridgeError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|e| BridgeError::Malformed(e.to_string()))?;

    let mut fields = match document {
        Value::Object(fields) => fields,
        other => {
            return Err(BridgeError::Malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    let kind = match fields.get("type") {
        Some(Value::String(kind)) => kind.clone(),
        _ => return Ok(InboundMessage::Ignored { kind: None }),
    };

    match kind.as_str() {
        SHARED_STATE_UPDATE => Ok(InboundMessage::StateUpdate {
            key: take_string(&mut fields, SHARED_STATE_UPDATE, "key")?,
            value: take_present(&mut fields, SHARED_STATE_UPDATE, "value")?,
        }),
        EVENT => Ok(InboundMessage::Event {
            name: take_string(&mut fields, EVENT, "eventName")?,
            data: take_present(&mut fields, EVENT, "data")?,
        }),
        _ => Ok(InboundMessage::Ignored { kind: Some(kind) }),
    }
}

fn take_string(
    fields: &mut Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<String, BridgeError> {
    match fields.remove(field) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(BridgeError::MissingField { kind, field }),
    }
}

fn take_present(
    fields: &mut Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<Value, BridgeError> {
    fields
        .remove(field)
        .ok_or(BridgeError::MissingField { kind, field })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// OUTBOUND
// =============================================================================

/// A host -> content envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundEnvelope {
    #[serde(rename = "SHARED_STATE_UPDATE_FROM_NATIVE")]
    StateUpdateFromNative { key: String, value: StateValue },
}

impl OutboundEnvelope {
    /// Build a state push, converting `value` into a [`StateValue`].
    pub fn state_update<T: Serialize + ?Sized>(
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, BridgeError> {
        let value = serde_json::to_value(value).map_err(BridgeError::Serialize)?;
        Ok(Self::StateUpdateFromNative {
            key: key.into(),
            value,
        })
    }

    /// Serialize to the JSON string carried inside the injected script.
    pub fn encode(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(BridgeError::Serialize)
    }

    pub fn key(&self) -> &str {
        match self {
            Self::StateUpdateFromNative { key, .. } => key,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
