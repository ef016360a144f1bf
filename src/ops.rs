//! Config operations: key lookup, listing, file inventory, and result types.
//!
//! Provides the logic behind `config get`, `config list`, `config files`, and
//! the `ConfigResult` enum that callers use to display results as text or
//! JSON.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::store::ConfigStore;
use crate::types::{ConfigAction, OutputFormat};

/// One discovered config file and the namespace derived from its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub namespace: String,
}

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigResult {
    /// A key's resolved value. `None` if the key is absent or empty.
    KeyValue { key: String, value: Option<String> },
    /// Stored key-value pairs, sorted by key.
    Listing { entries: Vec<(String, String)> },
    /// Discovered files in merge order.
    Files { entries: Vec<FileInfo> },
}

impl ConfigResult {
    /// Render for output: `Display` text, or pretty-printed JSON.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.to_string(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
            }
        }
    }
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value } => match value {
                Some(v) => write!(f, "{key} = {v}"),
                None => write!(f, "{key} = <not set>"),
            },
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
            ConfigResult::Files { entries } => {
                for (i, info) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    let ns = if info.namespace.is_empty() {
                        "<root>"
                    } else {
                        &info.namespace
                    };
                    write!(f, "{} [{ns}]", info.path.display())?;
                }
                Ok(())
            }
        }
    }
}

/// Resolve one key through prefix fallback.
pub fn get_value(store: &ConfigStore, key: &str) -> ConfigResult {
    ConfigResult::KeyValue {
        key: key.to_string(),
        value: store.get_string(key),
    }
}

/// List stored entries, optionally restricted to a namespace and renamed.
pub fn list_values(
    store: &ConfigStore,
    namespace: Option<&str>,
    rename_to: Option<&str>,
) -> ConfigResult {
    let entries = match namespace {
        Some(ns) => store.get_namespace_properties(ns, rename_to).into_iter().collect(),
        None => store
            .snapshot()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    };
    ConfigResult::Listing { entries }
}

/// The ordered file inventory.
pub fn list_files(store: &ConfigStore) -> ConfigResult {
    let entries = store
        .files()
        .into_iter()
        .map(|(path, namespace)| FileInfo { path, namespace })
        .collect();
    ConfigResult::Files { entries }
}

pub fn handle(store: &ConfigStore, action: &ConfigAction) -> ConfigResult {
    match action {
        ConfigAction::Get { key } => get_value(store, key),
        ConfigAction::List {
            namespace,
            rename_to,
        } => list_values(store, namespace.as_deref(), rename_to.as_deref()),
        ConfigAction::Files => list_files(store),
    }
}
