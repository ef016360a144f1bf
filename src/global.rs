//! The process-wide store over the canonical config locations.
//!
//! [`global()`] builds the store on first use from the packaged defaults
//! directory followed by the operator directory, and hands out the same
//! `Arc` until [`reset_global()`] tears it down. Creation happens under a
//! mutex, so concurrent first callers still see exactly one construction.
//! Tests and embedders that want their own paths can install a store with
//! [`set_global()`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::env;
use crate::error::PropconfError;
use crate::store::ConfigStore;
use crate::types::SearchPath;

/// Packaged defaults, read first.
pub const DEFAULT_DEFAULTS_DIR: &str = "/usr/share/rhn/config-defaults";

/// Name of the operator's main config file inside the operator directory.
pub const DEFAULT_CONF_FILE: &str = "rhn.conf";

static GLOBAL: Mutex<Option<Arc<ConfigStore>>> = Mutex::new(None);

/// The canonical search paths, lowest priority first: the defaults
/// directory, then the operator directory (`$RHN_CONFIG_DIR` or `/etc/rhn`).
pub fn default_search_paths() -> Vec<SearchPath> {
    vec![
        SearchPath::from(DEFAULT_DEFAULTS_DIR),
        SearchPath::Path(env::conf_dir()),
    ]
}

/// `<operator dir>/rhn.conf`.
pub fn default_config_file_path() -> PathBuf {
    env::conf_dir().join(DEFAULT_CONF_FILE)
}

/// The process-wide store, created and loaded from
/// [`default_search_paths()`] on first call.
///
/// Missing directories are not an error: the store is simply empty. Any
/// failure while building it comes back as [`PropconfError::Construction`].
pub fn global() -> Result<Arc<ConfigStore>, PropconfError> {
    let mut slot = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(store) = slot.as_ref() {
        return Ok(Arc::clone(store));
    }

    let store = ConfigStore::builder()
        .search_paths(default_search_paths())
        .load()
        .map_err(|e| PropconfError::Construction {
            source: Box::new(e),
        })?;
    info!("Initialized process-wide configuration");

    let store = Arc::new(store);
    *slot = Some(Arc::clone(&store));
    Ok(store)
}

/// Install `store` as the process-wide store. Returns the one it replaced.
pub fn set_global(store: ConfigStore) -> Option<Arc<ConfigStore>> {
    let mut slot = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    slot.replace(Arc::new(store))
}

/// Drop the process-wide store. The next [`global()`] call builds a fresh
/// one; handles already given out keep working on the old store.
pub fn reset_global() {
    let mut slot = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}
