//! Last-known-value cache of shared state keys.

use std::collections::HashMap;

use crate::envelope::StateValue;

/// Map of shared state key to the last value the content reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedState {
    values: HashMap<String, StateValue>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: StateValue) -> Option<StateValue> {
        self.values.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn to_map(&self) -> HashMap<String, StateValue> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_cache_has_nothing() {
        let state = SharedState::new();
        assert!(state.is_empty());
        assert_eq!(state.get("missing"), None);
        assert!(!state.contains("missing"));
    }

    #[test]
    fn insert_then_get() {
        let mut state = SharedState::new();
        assert_eq!(state.insert("theme", json!("dark")), None);
        assert_eq!(state.get("theme"), Some(&json!("dark")));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn insert_overwrites_and_returns_previous() {
        let mut state = SharedState::new();
        state.insert("count", json!(1));
        let previous = state.insert("count", json!(2));
        assert_eq!(previous, Some(json!(1)));
        assert_eq!(state.get("count"), Some(&json!(2)));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn null_is_stored_as_a_value() {
        let mut state = SharedState::new();
        state.insert("cleared", json!(null));
        assert!(state.contains("cleared"));
        assert_eq!(state.get("cleared"), Some(&json!(null)));
    }

    #[test]
    fn keys_lists_every_key() {
        let mut state = SharedState::new();
        state.insert("a", json!(1));
        state.insert("b", json!(2));
        let mut keys: Vec<&str> = state.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
