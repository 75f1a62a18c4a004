//! End-to-end behavior of the bridge through its public API.

use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use reflector_bridge::script::{post_message_script, HANDSHAKE_BODY};
use reflector_bridge::{BridgeEvent, QueueDispatcher, ScriptSink, StateBridge};
use reflector_common::BridgeError;
use reflector_config::{from_toml_str, BridgeConfig};
use serde_json::{json, Value};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("reflector_bridge=debug")
        .with_test_writer()
        .try_init();
}

/// Stands in for the web view: records every evaluated script.
#[derive(Default)]
struct FakeWebView {
    scripts: RefCell<Vec<String>>,
}

impl ScriptSink for FakeWebView {
    fn evaluate_script(&self, script: &str) -> Result<(), BridgeError> {
        self.scripts.borrow_mut().push(script.to_string());
        Ok(())
    }
}

fn setup() -> (StateBridge, QueueDispatcher) {
    init_logging();
    let queue = QueueDispatcher::new();
    (StateBridge::new(BridgeConfig::default(), queue.clone()), queue)
}

fn update(key: &str, value: &Value) -> String {
    json!({"type": "SHARED_STATE_UPDATE", "key": key, "value": value}).to_string()
}

#[test]
fn inbound_update_is_readable_for_any_value_shape() {
    let (bridge, _) = setup();
    let values = [
        json!(null),
        json!(true),
        json!(-3),
        json!(2.75),
        json!("text"),
        json!([1, "two", [3]]),
        json!({"nested": {"deep": [null, false]}}),
    ];

    for (i, value) in values.iter().enumerate() {
        let key = format!("k{i}");
        bridge.receive_raw(&update(&key, value));
        assert_eq!(bridge.get_shared_state(&key).as_ref(), Some(value));
    }
}

#[test]
fn unseen_key_is_absent() {
    let (bridge, _) = setup();
    assert_eq!(bridge.get_shared_state("never-sent"), None);
}

#[test]
fn malformed_json_leaves_everything_unchanged() {
    let (bridge, _) = setup();
    bridge.receive_raw(&update("kept", &json!(1)));

    bridge.receive_raw(r#"{"type":"SHARED_STATE_UPDATE","key":"x","value":"#);
    bridge.receive_raw("not json at all");

    assert_eq!(bridge.snapshot().len(), 1);
    assert_eq!(bridge.get_shared_state("kept"), Some(json!(1)));
    assert!(!bridge.is_initialized());
}

#[test]
fn unknown_type_fires_nothing() {
    let (bridge, _) = setup();
    let fired = Arc::new(Mutex::new(0));
    let a = Arc::clone(&fired);
    let b = Arc::clone(&fired);
    bridge.set_state_update_listener(move |_, _| *a.lock().unwrap() += 1);
    bridge.set_event_listener(move |_, _| *b.lock().unwrap() += 1);

    bridge.receive_raw(r#"{"type":"HELLO","key":"k","value":1,"eventName":"e","data":2}"#);

    assert_eq!(*fired.lock().unwrap(), 0);
    assert!(bridge.snapshot().is_empty());
}

#[test]
fn listener_invoked_exactly_once_with_envelope_contents() {
    let (bridge, _) = setup();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    bridge.set_state_update_listener(move |key, value| {
        sink.lock().unwrap().push((key.to_string(), value.clone()));
    });

    bridge.receive_raw(&update("volume", &json!(0.8)));

    assert_eq!(
        *calls.lock().unwrap(),
        vec![("volume".to_string(), json!(0.8))]
    );
}

#[test]
fn handshake_flag_lifecycle() {
    let (bridge, _) = setup();
    assert!(!bridge.is_initialized());
    bridge.receive_handshake();
    assert!(bridge.is_initialized());
    bridge.receive_handshake();
    assert!(bridge.is_initialized());
}

#[test]
fn send_state_produces_one_decodable_delivery() {
    let (bridge, queue) = setup();
    bridge.send_state_to_js("x", &42);

    let jobs = queue.drain();
    assert_eq!(jobs.len(), 1);
    let payload: Value = serde_json::from_str(jobs[0].payload()).unwrap();
    assert_eq!(
        payload,
        json!({"type": "SHARED_STATE_UPDATE_FROM_NATIVE", "key": "x", "value": 42})
    );
}

#[test]
fn newest_listener_wins() {
    let (bridge, _) = setup();
    let old = Arc::new(Mutex::new(0));
    let new = Arc::new(Mutex::new(0));

    let counter = Arc::clone(&old);
    bridge.set_state_update_listener(move |_, _| *counter.lock().unwrap() += 1);
    let counter = Arc::clone(&new);
    bridge.set_state_update_listener(move |_, _| *counter.lock().unwrap() += 1);

    bridge.receive_raw(&update("a", &json!(1)));
    bridge.receive_raw(&update("b", &json!(2)));

    assert_eq!(*old.lock().unwrap(), 0);
    assert_eq!(*new.lock().unwrap(), 2);
}

#[test]
fn ui_loop_pumps_scripts_into_webview() {
    let (bridge, queue) = setup();
    let webview = FakeWebView::default();

    bridge.request_ping();
    bridge.send_state_to_js("theme", &"dark");
    assert!(webview.scripts.borrow().is_empty());

    assert_eq!(queue.pump(&webview), 2);

    let scripts = webview.scripts.borrow();
    assert_eq!(scripts[0], post_message_script("PING", "*"));
    let expected_payload =
        json!({"type": "SHARED_STATE_UPDATE_FROM_NATIVE", "key": "theme", "value": "dark"})
            .to_string();
    assert_eq!(scripts[1], post_message_script(&expected_payload, "*"));
}

#[test]
fn ping_round_trip_over_single_channel() {
    let (bridge, queue) = setup();
    let mut events = bridge.subscribe();

    bridge.request_ping();
    assert_eq!(queue.drain()[0].payload(), "PING");

    // The page answers through window.ipc with the handshake body.
    bridge.route_ipc_body(HANDSHAKE_BODY);

    assert!(bridge.is_initialized());
    assert_eq!(events.try_recv().unwrap(), BridgeEvent::Handshake { first: true });
}

#[test]
fn outbound_push_is_not_cached() {
    let (bridge, _) = setup();
    bridge.send_state_to_js("host-owned", &json!({"v": 1}));
    assert_eq!(bridge.get_shared_state("host-owned"), None);

    bridge.receive_raw(&update("host-owned", &json!({"v": 2})));
    assert_eq!(bridge.get_shared_state("host-owned"), Some(json!({"v": 2})));
}

#[test]
fn bridge_built_from_toml_config() {
    init_logging();
    let config = from_toml_str(
        r#"
[bridge]
interface_name = "ShopBridge"
target_origin = "https://shop.example"
ping_on_attach = false
"#,
    )
    .unwrap();

    let queue = QueueDispatcher::new();
    let bridge = StateBridge::new(config.bridge, queue.clone());

    let script = bridge.init_script();
    assert!(script.contains(r#"var NAME = "ShopBridge";"#));
    assert!(script.contains("if (false) host.ping();"));

    bridge.request_ping();
    assert_eq!(
        queue.drain()[0].script,
        r#"window.postMessage("PING", "https://shop.example");"#
    );
}

#[test]
fn sessions_are_independent() {
    let (first, _) = setup();
    let (second, _) = setup();

    first.receive_raw(&update("k", &json!("first")));
    first.receive_handshake();

    assert_eq!(second.get_shared_state("k"), None);
    assert!(!second.is_initialized());
}
