use tracing::debug;

use crate::error::PropconfError;
use crate::file::{self, DEFAULT_FILE_PATTERN};
use crate::lookup::DEFAULT_PREFIX_ORDER;
use crate::store::{ConfigStore, StoreSettings};
use crate::types::SearchPath;

/// Default reserved file name token.
pub const DEFAULT_BASE_NAME: &str = "rhn";

/// Builder for a [`ConfigStore`].
///
/// Controls three axes:
///
/// - **Discovery**: [`search_paths()`](Self::search_paths) and
///   [`file_pattern()`](Self::file_pattern) say where to look and which
///   directory entries count as config files.
/// - **Namespacing**: [`base_name()`](Self::base_name) is the file name token
///   that marks the root namespace (`rhn.conf`) and is stripped from
///   namespaced files (`rhn_web.conf` → `web`).
/// - **Lookup**: [`prefix_order()`](Self::prefix_order) lists the namespaces
///   tried for a key given without one.
#[derive(Debug, Default)]
pub struct ConfigStoreBuilder {
    base_name: Option<String>,
    file_pattern: Option<String>,
    search_paths: Option<Vec<SearchPath>>,
    prefix_order: Option<Vec<String>>,
}

impl ConfigStoreBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the reserved file name token (default: `"rhn"`).
    pub fn base_name(mut self, name: &str) -> Self {
        self.base_name = Some(name.to_string());
        self
    }

    /// Set the glob for files inside scanned directories (default: `"*.conf"`).
    pub fn file_pattern(mut self, pattern: &str) -> Self {
        self.file_pattern = Some(pattern.to_string());
        self
    }

    /// Replace the search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority. See [`SearchPath`] for the available variants.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path after any already set.
    pub fn add_search_path(mut self, path: impl Into<SearchPath>) -> Self {
        self.search_paths
            .get_or_insert_with(Vec::new)
            .push(path.into());
        self
    }

    /// Set the prefixes tried for a key without a namespace
    /// (default: `["web", "server"]`).
    pub fn prefix_order<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_order = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    fn effective_base_name(&self) -> Result<&str, PropconfError> {
        let name = self.base_name.as_deref().unwrap_or(DEFAULT_BASE_NAME);
        if name.is_empty() || name.contains(['/', '\\', '.']) {
            return Err(PropconfError::InvalidBaseName(name.to_string()));
        }
        Ok(name)
    }

    fn effective_file_pattern(&self) -> &str {
        self.file_pattern.as_deref().unwrap_or(DEFAULT_FILE_PATTERN)
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        self.search_paths.clone().unwrap_or_default()
    }

    fn effective_prefix_order(&self) -> Vec<String> {
        match &self.prefix_order {
            Some(prefixes) => prefixes.clone(),
            None => DEFAULT_PREFIX_ORDER.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Validate the settings and return a store with the search paths
    /// registered and their files collected, but nothing parsed yet.
    pub fn build(self) -> Result<ConfigStore, PropconfError> {
        let settings = StoreSettings {
            base_name: self.effective_base_name()?.to_string(),
            pattern: file::compile_pattern(self.effective_file_pattern())?,
            prefix_order: self.effective_prefix_order(),
        };
        debug!(
            "Building config store: base name '{}', pattern '{}'",
            settings.base_name,
            self.effective_file_pattern()
        );

        let store = ConfigStore::new(settings);
        for path in self.effective_search_paths() {
            store.add_path(path);
        }
        Ok(store)
    }

    /// [`build`](Self::build), then run the merge pass.
    pub fn load(self) -> Result<ConfigStore, PropconfError> {
        let store = self.build()?;
        store.parse_files();
        Ok(store)
    }
}
