//! Generic keyed registry.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static CANONICAL_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_.\-]*$").expect("valid registry key regex"));

/// Returns whether `key` follows the lowercase catalog key convention.
///
/// Only lint consults this; registries accept any string key.
pub fn is_canonical_registry_key(key: &str) -> bool {
    CANONICAL_KEY_RE.is_match(key)
}

/// Registry population errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateKey(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey(value) => write!(f, "registry key already registered: `{value}`"),
        }
    }
}

impl Error for RegistryError {}

/// String-keyed mapping owned by the caller.
///
/// Serializes as a plain JSON object. Any string is a valid key.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, T>) -> Self {
        Self { entries }
    }

    /// Registers one value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Result<(), RegistryError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(RegistryError::DuplicateKey(key));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// Builder-style insert for fixtures; panics on a duplicate key.
    #[cfg(test)]
    pub(crate) fn with(mut self, key: &str, value: T) -> Self {
        self.insert(key, value).expect("fixture key must be unique");
        self
    }

    /// Returns the stored value, or `None` when absent.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Direct keyed lookup shared by every registry kind.
///
/// Never fails: a miss is reported as `None`.
pub fn lookup_or_none<'a, T>(registry: &'a Registry<T>, key: &str) -> Option<&'a T> {
    registry.get(key)
}

impl<T: Serialize> Serialize for Registry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Registry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, T>::deserialize(deserializer).map(Self::from_entries)
    }
}
