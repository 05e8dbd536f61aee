//! Capability flags gating optional dashboard features.
//!
//! # Invariants
//! - Ids are compared after trimming and ASCII lowercasing.
//! - An explicit flag wins over the `*` wildcard; with neither, a capability
//!   is enabled.

use serde_json::Value;
use std::collections::BTreeMap;

/// Wildcard id applying to every capability without an explicit flag.
pub const CAPABILITY_WILDCARD: &str = "*";

/// In-memory capability flag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    flags: BTreeMap<String, bool>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: &str, enabled: bool) {
        self.flags.insert(normalize_id(id), enabled);
    }

    pub fn enable(&mut self, id: &str) {
        self.set(id, true);
    }

    pub fn disable(&mut self, id: &str) {
        self.set(id, false);
    }

    /// Enables every listed capability.
    pub fn configure_from_list<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.enable(id.as_ref());
        }
    }

    /// Applies flags from loosely typed JSON values (bool, number or string).
    pub fn configure_from_map<'a, I>(&mut self, flags: I)
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        for (id, value) in flags {
            self.set(id, coerce_flag(value));
        }
    }

    /// Returns whether `id` is enabled.
    pub fn has(&self, id: &str) -> bool {
        if let Some(enabled) = self.flags.get(&normalize_id(id)) {
            return *enabled;
        }
        if let Some(enabled) = self.flags.get(CAPABILITY_WILDCARD) {
            return *enabled;
        }
        true
    }

    /// Returns whether every id in `ids` is enabled.
    pub fn has_all<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        ids.iter().all(|id| self.has(id.as_ref()))
    }

    /// Returns explicit flags in sorted id order.
    pub fn list(&self) -> Vec<(String, bool)> {
        self.flags
            .iter()
            .map(|(id, enabled)| (id.clone(), *enabled))
            .collect()
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

/// Coerces a loosely typed flag value.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(enabled) => *enabled,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "false" | "0" | "off" | "no" => false,
            "true" | "1" | "on" | "yes" => true,
            _ => !raw.is_empty(),
        },
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}
