//! The merged configuration store and its typed accessors.
//!
//! Readers never block: the merged map is an immutable snapshot behind an
//! [`ArcSwap`]. Every writer (`load`, `add_path`, `parse_files`, `reload`,
//! `set_string`, `set_boolean`, `remove`, `clear_overrides`) takes the one
//! loader mutex, computes a complete new map and swaps it in, so a reader
//! sees either the old snapshot or the new one, never a half-built map.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;
use globset::GlobMatcher;
use tracing::{debug, info, warn};

use crate::builder::ConfigStoreBuilder;
use crate::error::PropconfError;
use crate::file;
use crate::lookup::{self, is_true_value, split_list};
use crate::merge::FileSet;
use crate::namespace::namespace_of_path;
use crate::ops::{self, ConfigResult};
use crate::overrides::Overrides;
use crate::resolve::{self, Properties};
use crate::types::{ConfigAction, OutputFormat, SearchPath};

/// Fixed settings of a store, produced by [`ConfigStoreBuilder`].
pub(crate) struct StoreSettings {
    pub base_name: String,
    pub pattern: GlobMatcher,
    pub prefix_order: Vec<String>,
}

/// Everything a writer touches, guarded by one mutex.
#[derive(Default)]
struct LoaderState {
    search_paths: Vec<SearchPath>,
    files: FileSet,
    file_layer: Properties,
    overrides: Overrides,
}

/// Layered, namespace-aware key/value configuration.
///
/// Build one with [`ConfigStore::builder`] or [`ConfigStore::from_paths`] and
/// share it (it is `Send + Sync`). See the [crate docs](crate) for the load
/// pipeline and lookup rules.
pub struct ConfigStore {
    current: ArcSwap<Properties>,
    state: Mutex<LoaderState>,
    settings: StoreSettings,
}

impl ConfigStore {
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Load a store from `paths` with default settings. Later paths win.
    pub fn from_paths<I, P>(paths: I) -> Result<Self, PropconfError>
    where
        I: IntoIterator<Item = P>,
        P: Into<SearchPath>,
    {
        Self::builder()
            .search_paths(paths.into_iter().map(Into::into).collect())
            .load()
    }

    pub(crate) fn new(settings: StoreSettings) -> Self {
        Self {
            current: ArcSwap::from_pointee(Properties::new()),
            state: Mutex::new(LoaderState::default()),
            settings,
        }
    }

    /// The reserved file name token used for namespace derivation.
    pub fn base_name(&self) -> &str {
        &self.settings.base_name
    }

    /// The prefixes tried for a key given without a namespace.
    pub fn prefix_order(&self) -> &[String] {
        &self.settings.prefix_order
    }

    // --- loading ---

    /// Register a search path and collect its files into the ordered file
    /// set. Nothing is parsed until [`parse_files`](Self::parse_files) or a
    /// load.
    pub fn add_path(&self, path: impl Into<SearchPath>) {
        let mut state = self.lock_state();
        let sp = path.into();
        let layer = register(&mut state.search_paths, sp.clone());
        self.collect_into(&mut state.files, layer, &sp);
    }

    /// Re-run the merge pass over the current file set.
    pub fn parse_files(&self) {
        let mut state = self.lock_state();
        self.merge_and_publish(&mut state);
    }

    /// Register `paths` after any already registered, rebuild the ordered file
    /// set from every search path, and run the merge pass.
    pub fn load<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<SearchPath>,
    {
        let mut state = self.lock_state();
        for path in paths {
            register(&mut state.search_paths, path.into());
        }
        self.rebuild_files(&mut state);
        self.merge_and_publish(&mut state);
    }

    /// Re-collect every registered search path from scratch and re-merge.
    /// Files added or deleted since the last pass are picked up.
    pub fn reload(&self) {
        let mut state = self.lock_state();
        self.rebuild_files(&mut state);
        self.merge_and_publish(&mut state);
    }

    /// Drop all in-memory overrides and republish the file-derived values.
    pub fn clear_overrides(&self) {
        let mut state = self.lock_state();
        if state.overrides.is_empty() {
            return;
        }
        state.overrides.clear();
        self.publish(&state);
    }

    fn lock_state(&self) -> MutexGuard<'_, LoaderState> {
        // Writers publish only complete maps, so a poisoned lock still guards
        // consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn collect_into(&self, files: &mut FileSet, layer: usize, sp: &SearchPath) {
        let Some(path) = file::resolve_search_path(sp, &self.settings.base_name) else {
            warn!("Ignoring search path {sp:?} since it cannot be resolved");
            return;
        };
        for found in file::collect_files(&path, &self.settings.pattern) {
            if files.contains(&found) {
                debug!("Already collected {}, keeping its first position", found.display());
                continue;
            }
            files.insert(layer, found);
        }
    }

    fn rebuild_files(&self, state: &mut LoaderState) {
        let mut files = FileSet::new();
        for (layer, sp) in state.search_paths.iter().enumerate() {
            self.collect_into(&mut files, layer, sp);
        }
        state.files = files;
    }

    fn merge_and_publish(&self, state: &mut LoaderState) {
        if state.files.is_empty() {
            debug!("No config files found in {} search paths", state.search_paths.len());
        }
        for entry in state.files.iter() {
            debug!("Merging {} (layer {})", entry.as_str(), entry.layer);
        }
        state.file_layer = resolve::merge_files(&state.files, &self.settings.base_name);
        info!(
            "Loaded {} keys from {} config files",
            state.file_layer.len(),
            state.files.len()
        );
        self.publish(state);
    }

    fn publish(&self, state: &LoaderState) {
        let mut props = state.file_layer.clone();
        state.overrides.apply(&mut props);
        self.current.store(Arc::new(props));
    }

    // --- string access ---

    /// Resolve `key` through prefix fallback. Values are trimmed; an empty
    /// value reads as absent.
    pub fn get_string(&self, key: &str) -> Option<String> {
        let snapshot = self.current.load();
        lookup::resolve_key(&snapshot, key, &self.settings.prefix_order).map(str::to_string)
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| {
            debug!("'{key}' not set, using default");
            default.to_string()
        })
    }

    /// The resolved value split on commas, or `None` if the key is absent.
    pub fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        self.get_string(key).map(|v| split_list(&v))
    }

    /// The resolved value split on commas. An absent key gives an empty list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        self.get_string_array(key).unwrap_or_default()
    }

    // --- numeric access ---

    fn get_parsed<T: FromStr>(
        &self,
        key: &str,
        to_err: impl FnOnce(String, T::Err) -> PropconfError,
    ) -> Result<Option<T>, PropconfError> {
        match self.get_string(key) {
            None => Ok(None),
            Some(value) => value.parse::<T>().map(Some).map_err(|e| to_err(value, e)),
        }
    }

    fn get_integer<T: FromStr<Err = std::num::ParseIntError>>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PropconfError> {
        self.get_parsed(key, |value, source| PropconfError::InvalidInteger {
            key: key.to_string(),
            value,
            source,
        })
    }

    fn get_floating<T: FromStr<Err = std::num::ParseFloatError>>(
        &self,
        key: &str,
    ) -> Result<Option<T>, PropconfError> {
        self.get_parsed(key, |value, source| PropconfError::InvalidFloat {
            key: key.to_string(),
            value,
            source,
        })
    }

    /// The resolved value as `i32`. Absent is `Ok(None)`; a present value
    /// that does not parse is an error.
    pub fn get_int(&self, key: &str) -> Result<Option<i32>, PropconfError> {
        self.get_integer(key)
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32, PropconfError> {
        Ok(self.get_int(key)?.unwrap_or(default))
    }

    pub fn get_long(&self, key: &str) -> Result<Option<i64>, PropconfError> {
        self.get_integer(key)
    }

    pub fn get_long_or(&self, key: &str, default: i64) -> Result<i64, PropconfError> {
        Ok(self.get_long(key)?.unwrap_or(default))
    }

    /// The resolved value as `f32`, parsed with Rust's float syntax.
    ///
    /// Type suffixes such as `1.5f` or `2d` are rejected. `inf`, `infinity`
    /// and `NaN` are accepted in any letter case.
    pub fn get_float(&self, key: &str) -> Result<Option<f32>, PropconfError> {
        self.get_floating(key)
    }

    pub fn get_float_or(&self, key: &str, default: f32) -> Result<f32, PropconfError> {
        Ok(self.get_float(key)?.unwrap_or(default))
    }

    /// The resolved value as `f64`. Same syntax as [`get_float`](Self::get_float).
    pub fn get_double(&self, key: &str) -> Result<Option<f64>, PropconfError> {
        self.get_floating(key)
    }

    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64, PropconfError> {
        Ok(self.get_double(key)?.unwrap_or(default))
    }

    // --- boolean access ---

    /// `true` iff the resolved value is one of `1 y true yes on` (any case).
    /// Absent reads as `false`.
    pub fn get_boolean(&self, key: &str) -> bool {
        self.get_boolean_or(key, false)
    }

    pub fn get_boolean_or(&self, key: &str, default: bool) -> bool {
        let value = self.get_string(key);
        debug!("get_boolean: '{key}' is {value:?}");
        value.map_or(default, |v| is_true_value(&v))
    }

    // --- mutation ---

    /// Set `key` in memory, bypassing files. Returns the previous stored value.
    pub fn set_string(&self, key: &str, value: &str) -> Option<String> {
        let mut state = self.lock_state();
        let previous = self.current.load().get(key).cloned();
        state.overrides.set(key, value);
        self.publish(&state);
        previous
    }

    /// Store `"1"` if `raw` is a true value, `"0"` otherwise.
    pub fn set_boolean(&self, key: &str, raw: &str) {
        let canonical = if is_true_value(raw) { "1" } else { "0" };
        self.set_string(key, canonical);
    }

    /// Remove `key` in memory, bypassing files. Returns the removed value.
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut state = self.lock_state();
        let previous = self.current.load().get(key).cloned();
        state.overrides.remove(key);
        self.publish(&state);
        previous
    }

    // --- inspection ---

    /// Exact key presence. No prefix fallback is applied.
    pub fn contains_key(&self, key: &str) -> bool {
        self.current.load().contains_key(key)
    }

    /// Every stored entry whose key starts with `namespace`, with that prefix
    /// replaced by `rename_to` when given.
    ///
    /// This scans every key. Call it at startup or other discrete points,
    /// not on a hot path.
    pub fn get_namespace_properties(&self, namespace: &str, rename_to: Option<&str>) -> Properties {
        let snapshot = self.current.load();
        snapshot
            .iter()
            .filter(|(key, _)| key.starts_with(namespace))
            .map(|(key, value)| {
                let key = match rename_to {
                    Some(new_ns) if new_ns != namespace => key.replacen(namespace, new_ns, 1),
                    _ => key.clone(),
                };
                (key, value.clone())
            })
            .collect()
    }

    /// The current merged snapshot.
    pub fn snapshot(&self) -> Arc<Properties> {
        self.current.load_full()
    }

    pub fn keys(&self) -> Vec<String> {
        self.current.load().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// Registered search paths in priority-ascending order.
    pub fn search_paths(&self) -> Vec<SearchPath> {
        self.lock_state().search_paths.clone()
    }

    /// Discovered files in merge order, each with its derived namespace.
    pub fn files(&self) -> Vec<(PathBuf, String)> {
        let state = self.lock_state();
        state
            .files
            .iter()
            .map(|e| {
                let ns = namespace_of_path(&e.path, &self.settings.base_name);
                (e.path.clone(), ns)
            })
            .collect()
    }

    // --- actions ---

    /// Handle a [`ConfigAction`] (get / list / files).
    pub fn handle(&self, action: &ConfigAction) -> ConfigResult {
        ops::handle(self, action)
    }

    /// Handle a [`ConfigAction`] and print the result to stdout.
    pub fn handle_and_print(&self, action: &ConfigAction, format: OutputFormat) {
        println!("{}", self.handle(action).render(format));
    }
}

/// Append `sp` unless already registered. Returns its layer index.
fn register(search_paths: &mut Vec<SearchPath>, sp: SearchPath) -> usize {
    if let Some(layer) = search_paths.iter().position(|known| *known == sp) {
        return layer;
    }
    search_paths.push(sp);
    search_paths.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{ConfTree, write_files};
    use std::fs;
    use tempfile::TempDir;

    fn store_for(tree: &ConfTree) -> ConfigStore {
        ConfigStore::from_paths([tree.defaults(), tree.overrides()]).unwrap()
    }

    // --- load and precedence ---

    #[test]
    fn later_search_path_wins() {
        let tree = ConfTree::new(
            &[("rhn.conf", "db.name=defaults\nonly.defaults=1\n")],
            &[("rhn.conf", "db.name=override\n")],
        );
        let store = store_for(&tree);
        assert_eq!(store.get_string("db.name").as_deref(), Some("override"));
        assert_eq!(store.get_string("only.defaults").as_deref(), Some("1"));
    }

    #[test]
    fn later_path_wins_even_when_longer() {
        let short = TempDir::new().unwrap();
        let long = TempDir::new().unwrap();
        let long_dir = long.path().join("a-much-longer-directory-name");
        fs::create_dir(&long_dir).unwrap();
        write_files(short.path(), &[("rhn.conf", "k=short\n")]);
        write_files(&long_dir, &[("rhn.conf", "k=long\n")]);

        let store = ConfigStore::from_paths([short.path(), long_dir.as_path()]).unwrap();
        assert_eq!(store.get_string("k").as_deref(), Some("long"));
    }

    #[test]
    fn unqualified_override_beats_qualified_default() {
        let tree = ConfTree::new(
            &[("rhn.conf", "server.port=80\n")],
            &[("rhn.conf", "port=8080\n")],
        );
        let store = store_for(&tree);
        assert_eq!(store.get_int("server.port").unwrap(), Some(8080));
    }

    #[test]
    fn namespaced_file_keys_are_qualified() {
        let tree = ConfTree::new(
            &[("rhn_taskomatic_daemon.conf", "threads=4\n")],
            &[],
        );
        let store = store_for(&tree);
        assert!(store.contains_key("taskomatic.daemon.threads"));
        assert!(!store.contains_key("threads"));
        assert_eq!(store.get_int("taskomatic.daemon.threads").unwrap(), Some(4));
    }

    #[test]
    fn root_file_wins_within_a_directory() {
        let tree = ConfTree::new(
            &[
                ("rhn_web.conf", "timeout=10\n"),
                ("rhn.conf", "web.timeout=20\n"),
            ],
            &[],
        );
        let store = store_for(&tree);
        assert_eq!(store.get_string("web.timeout").as_deref(), Some("20"));
    }

    #[test]
    fn backslash_paths_round_trip() {
        let tree = ConfTree::new(&[("rhn.conf", "export.dir=C:\\path\\to\\file\n")], &[]);
        let store = store_for(&tree);
        assert_eq!(
            store.get_string("export.dir").as_deref(),
            Some("C:\\path\\to\\file")
        );
    }

    #[test]
    fn missing_search_paths_are_tolerated() {
        let dir = TempDir::new().unwrap();
        let store =
            ConfigStore::from_paths([dir.path().join("nope"), dir.path().join("also-nope")])
                .unwrap();
        assert!(store.is_empty());
        assert!(store.files().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_names_are_all_merged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"rhn_\xff.conf")), "a=1\n").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"rhn_\xfe.conf")), "b=2\n").unwrap();

        let store = ConfigStore::from_paths([dir.path()]).unwrap();
        assert_eq!(store.files().len(), 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_string("\u{FFFD}.a").as_deref(), Some("1"));
        assert_eq!(store.get_string("\u{FFFD}.b").as_deref(), Some("2"));
    }

    #[test]
    fn single_file_search_path() {
        let dir = TempDir::new().unwrap();
        write_files(dir.path(), &[("custom.txt", "a=1\n")]);
        let store = ConfigStore::from_paths([dir.path().join("custom.txt")]).unwrap();
        // "custom.txt" derives namespace "custom"
        assert_eq!(store.get_string("custom.a").as_deref(), Some("1"));
    }

    #[test]
    fn files_listed_in_merge_order() {
        let tree = ConfTree::new(
            &[("rhn.conf", ""), ("rhn_taskomatic_daemon.conf", "")],
            &[("rhn.conf", "")],
        );
        let store = store_for(&tree);
        let files = store.files();
        let namespaces: Vec<&str> = files.iter().map(|(_, ns)| ns.as_str()).collect();
        assert_eq!(namespaces, vec!["taskomatic.daemon", "", ""]);
        assert!(files[2].0.starts_with(tree.overrides()));
    }

    // --- add_path / parse_files / reload ---

    #[test]
    fn add_path_does_not_parse_until_asked() {
        let dir = TempDir::new().unwrap();
        write_files(dir.path(), &[("rhn.conf", "a=1\n")]);

        let store = ConfigStore::builder().build().unwrap();
        store.add_path(dir.path());
        assert!(store.get_string("a").is_none());
        assert_eq!(store.files().len(), 1);

        store.parse_files();
        assert_eq!(store.get_string("a").as_deref(), Some("1"));
    }

    #[test]
    fn load_appends_paths() {
        let tree = ConfTree::new(&[("rhn.conf", "a=1\nb=1\n")], &[("rhn.conf", "b=2\n")]);
        let store = ConfigStore::from_paths([tree.defaults()]).unwrap();
        assert_eq!(store.get_string("b").as_deref(), Some("1"));

        store.load([tree.overrides()]);
        assert_eq!(store.get_string("a").as_deref(), Some("1"));
        assert_eq!(store.get_string("b").as_deref(), Some("2"));
        assert_eq!(store.search_paths().len(), 2);
    }

    #[test]
    fn re_adding_a_path_keeps_its_layer() {
        let tree = ConfTree::new(&[("rhn.conf", "k=defaults\n")], &[("rhn.conf", "k=override\n")]);
        let store = store_for(&tree);
        store.load([tree.defaults()]);
        assert_eq!(store.search_paths().len(), 2);
        assert_eq!(store.get_string("k").as_deref(), Some("override"));
    }

    #[test]
    fn reload_picks_up_new_and_deleted_files() {
        let tree = ConfTree::new(&[("rhn.conf", "a=1\n")], &[]);
        let store = store_for(&tree);
        assert_eq!(store.get_string("a").as_deref(), Some("1"));

        fs::remove_file(tree.defaults().join("rhn.conf")).unwrap();
        write_files(tree.overrides(), &[("rhn_web.conf", "b=2\n")]);
        store.reload();

        assert!(store.get_string("a").is_none());
        assert_eq!(store.get_string("web.b").as_deref(), Some("2"));
    }

    // --- typed accessors ---

    #[test]
    fn numeric_accessors() {
        let tree = ConfTree::new(
            &[(
                "rhn.conf",
                "i=42\nl=9000000000\nf=1.5\nd=-2.25\nspaced =  7  \n",
            )],
            &[],
        );
        let store = store_for(&tree);
        assert_eq!(store.get_int("i").unwrap(), Some(42));
        assert_eq!(store.get_long("l").unwrap(), Some(9_000_000_000));
        assert_eq!(store.get_float("f").unwrap(), Some(1.5));
        assert_eq!(store.get_double("d").unwrap(), Some(-2.25));
        assert_eq!(store.get_int("spaced").unwrap(), Some(7));
    }

    #[test]
    fn float_syntax_is_rust_syntax() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("suffixed", "1.5f");
        store.set_string("double", "2d");
        store.set_string("inf", "INF");
        store.set_string("infinity", "Infinity");
        assert!(store.get_float("suffixed").is_err());
        assert!(store.get_double("double").is_err());
        assert_eq!(store.get_float("inf").unwrap(), Some(f32::INFINITY));
        assert_eq!(store.get_double("infinity").unwrap(), Some(f64::INFINITY));
    }

    #[test]
    fn numeric_absent_uses_default() {
        let store = ConfigStore::builder().build().unwrap();
        assert_eq!(store.get_int("missing").unwrap(), None);
        assert_eq!(store.get_int_or("missing", 5).unwrap(), 5);
        assert_eq!(store.get_long_or("missing", 6).unwrap(), 6);
        assert_eq!(store.get_float_or("missing", 0.5).unwrap(), 0.5);
        assert_eq!(store.get_double_or("missing", 0.25).unwrap(), 0.25);
    }

    #[test]
    fn malformed_number_is_an_error_not_default() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("port", "eighty");
        assert!(matches!(
            store.get_int_or("port", 80),
            Err(PropconfError::InvalidInteger { .. })
        ));
        assert!(matches!(
            store.get_double("port"),
            Err(PropconfError::InvalidFloat { .. })
        ));
    }

    #[test]
    fn int_overflow_is_an_error() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("big", "9000000000");
        assert!(store.get_int("big").is_err());
        assert_eq!(store.get_long("big").unwrap(), Some(9_000_000_000));
    }

    #[test]
    fn boolean_truth_table() {
        let store = ConfigStore::builder().build().unwrap();
        for (i, v) in ["1", "y", "TRUE", "Yes", "On"].iter().enumerate() {
            let key = format!("t{i}");
            store.set_string(&key, v);
            assert!(store.get_boolean(&key), "{v}");
        }
        for (i, v) in ["0", "false", "maybe", "no"].iter().enumerate() {
            let key = format!("f{i}");
            store.set_string(&key, v);
            assert!(!store.get_boolean_or(&key, true), "{v}");
        }
        store.set_string("empty", "");
        assert!(!store.get_boolean("empty"));
        assert!(store.get_boolean_or("empty", true));
        assert!(!store.get_boolean("absent"));
        assert!(store.get_boolean_or("absent", true));
    }

    #[test]
    fn set_boolean_normalizes() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_boolean("a", "YES");
        store.set_boolean("b", "nope");
        assert_eq!(store.snapshot()["a"], "1");
        assert_eq!(store.snapshot()["b"], "0");
        assert!(store.get_boolean("a"));
        assert!(!store.get_boolean("b"));
    }

    #[test]
    fn list_accessors() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("a", "x,y,z");
        assert_eq!(store.get_list("a"), vec!["x", "y", "z"]);
        assert!(store.get_list("missing").is_empty());
        assert_eq!(store.get_string_array("missing"), None);
        assert_eq!(
            store.get_string_array("a"),
            Some(vec!["x".to_string(), "y".to_string(), "z".to_string()])
        );
    }

    #[test]
    fn empty_value_reads_as_absent() {
        let tree = ConfTree::new(&[("rhn.conf", "blank=\n")], &[]);
        let store = store_for(&tree);
        assert!(store.contains_key("blank"));
        assert_eq!(store.get_string("blank"), None);
        assert_eq!(store.get_string_or("blank", "dflt"), "dflt");
        assert!(store.get_list("blank").is_empty());
    }

    #[test]
    fn prefix_fallback_through_store() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("server.name", "Y");
        assert_eq!(store.get_string("name").as_deref(), Some("Y"));
        store.set_string("web.name", "X");
        assert_eq!(store.get_string("name").as_deref(), Some("X"));
    }

    #[test]
    fn custom_prefix_order_from_builder() {
        let store = ConfigStore::builder()
            .prefix_order(["java"])
            .build()
            .unwrap();
        store.set_string("web.name", "X");
        store.set_string("java.name", "J");
        assert_eq!(store.get_string("name").as_deref(), Some("J"));
    }

    // --- mutation ---

    #[test]
    fn set_then_get_round_trip() {
        let store = ConfigStore::builder().build().unwrap();
        assert_eq!(store.set_string("k", "v"), None);
        assert_eq!(store.get_string("k").as_deref(), Some("v"));
        assert_eq!(store.set_string("k", "w"), Some("v".to_string()));
    }

    #[test]
    fn remove_then_get_is_absent() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("k", "v");
        assert_eq!(store.remove("k"), Some("v".to_string()));
        assert_eq!(store.get_string("k"), None);
        assert_eq!(store.get_string_or("k", "d"), "d");
        assert_eq!(store.remove("k"), None);
    }

    #[test]
    fn overrides_survive_reload() {
        let tree = ConfTree::new(&[("rhn.conf", "a=file\nb=file\n")], &[]);
        let store = store_for(&tree);
        store.set_string("a", "memory");
        store.remove("b");

        store.reload();
        assert_eq!(store.get_string("a").as_deref(), Some("memory"));
        assert_eq!(store.get_string("b"), None);

        store.load([tree.overrides()]);
        assert_eq!(store.get_string("a").as_deref(), Some("memory"));
    }

    #[test]
    fn clear_overrides_restores_file_values() {
        let tree = ConfTree::new(&[("rhn.conf", "a=file\nb=file\n")], &[]);
        let store = store_for(&tree);
        store.set_string("a", "memory");
        store.remove("b");
        store.set_string("c", "new");

        store.clear_overrides();
        assert_eq!(store.get_string("a").as_deref(), Some("file"));
        assert_eq!(store.get_string("b").as_deref(), Some("file"));
        assert!(!store.contains_key("c"));
    }

    #[test]
    fn mutations_never_touch_disk() {
        let tree = ConfTree::new(&[("rhn.conf", "a=file\n")], &[]);
        let store = store_for(&tree);
        store.set_string("a", "memory");
        let on_disk = fs::read_to_string(tree.defaults().join("rhn.conf")).unwrap();
        assert_eq!(on_disk, "a=file\n");
    }

    // --- inspection ---

    #[test]
    fn contains_key_is_exact() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("web.name", "X");
        assert!(store.contains_key("web.name"));
        assert!(!store.contains_key("name"));
    }

    #[test]
    fn namespace_properties_filter_and_rename() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("taskomatic.a", "1");
        store.set_string("taskomatic.b", "2");
        store.set_string("web.c", "3");

        let plain = store.get_namespace_properties("taskomatic", None);
        assert_eq!(plain.len(), 2);
        assert_eq!(plain["taskomatic.a"], "1");

        let renamed = store.get_namespace_properties("taskomatic", Some("tasko"));
        assert_eq!(renamed.len(), 2);
        assert_eq!(renamed["tasko.a"], "1");
        assert_eq!(renamed["tasko.b"], "2");
    }

    #[test]
    fn namespace_rename_replaces_first_occurrence_only() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("ns.inner.ns.key", "v");
        let renamed = store.get_namespace_properties("ns", Some("x"));
        assert_eq!(renamed["x.inner.ns.key"], "v");
    }

    #[test]
    fn snapshot_is_stable_across_writes() {
        let store = ConfigStore::builder().build().unwrap();
        store.set_string("a", "1");
        let before = store.snapshot();
        store.set_string("a", "2");
        assert_eq!(before["a"], "1");
        assert_eq!(store.snapshot()["a"], "2");
        assert_eq!(store.keys(), vec!["a".to_string()]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn concurrent_readers_and_writer() {
        let store = Arc::new(ConfigStore::builder().build().unwrap());
        store.set_string("n", "0");

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 1..=200 {
                    store.set_string("n", &i.to_string());
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let n = store.get_int("n").unwrap().unwrap();
                        assert!((0..=200).contains(&n));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(store.get_int("n").unwrap(), Some(200));
    }
}
