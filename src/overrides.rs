//! In-memory overrides layered on top of the file-derived properties.
//!
//! `set_string`, `set_boolean` and `remove` on a store never touch disk. They
//! are recorded here and re-applied after every merge pass, so a reload
//! rebuilds the file layer without losing them. Only
//! [`ConfigStore::clear_overrides`](crate::ConfigStore::clear_overrides)
//! drops them.

use std::collections::BTreeMap;

use crate::resolve::Properties;

/// A pending change to a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    Set(String),
    Remove,
}

/// Per-key overrides. If a key is changed several times, the last change wins.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: BTreeMap<String, Override>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), Override::Set(value.to_string()));
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.insert(key.to_string(), Override::Remove);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Apply every override to `props` in place.
    pub fn apply(&self, props: &mut Properties) {
        for (key, change) in &self.entries {
            match change {
                Override::Set(value) => {
                    props.insert(key.clone(), value.clone());
                }
                Override::Remove => {
                    props.remove(key);
                }
            }
        }
    }
}
