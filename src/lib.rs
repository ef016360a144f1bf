//! Layered, namespace-aware configuration from flat `key=value` property
//! files.
//!
//! Propconf discovers property files in an ordered list of search paths,
//! qualifies every key with a namespace derived from its file name, merges
//! everything into one flat map, and serves typed lookups with a
//! namespace-prefix fallback.
//!
//! ```ignore
//! let store = ConfigStore::builder()
//!     .search_paths(vec!["/usr/share/rhn/config-defaults".into(), "/etc/rhn".into()])
//!     .load()?;
//!
//! let port = store.get_int_or("server.port", 80)?;
//! let debug = store.get_boolean("debug");
//! ```
//!
//! Or use the process-wide store over the canonical locations:
//!
//! ```ignore
//! let port = propconf::global()?.get_int_or("server.port", 80)?;
//! ```
//!
//! # Discovery
//!
//! [`search_paths()`](ConfigStoreBuilder::search_paths) takes [`SearchPath`]
//! variants in **priority-ascending** order (last = highest). Each one is
//! either a directory or a single file:
//!
//! - A **directory** contributes its direct children whose names match the
//!   file pattern (`*.conf` by default, case-sensitive). Subdirectories are
//!   never entered.
//! - A **file** contributes itself, whatever its extension.
//!
//! Missing and unreadable paths are logged at `warn` and skipped. The
//! operator directory often does not exist, and that is a normal
//! configuration.
//!
//! # Namespaces
//!
//! A file's namespace comes from its name. With the default base name `rhn`:
//!
//! | File                         | Key in file | Stored key                    |
//! |------------------------------|-------------|-------------------------------|
//! | `rhn.conf`                   | `port`      | `port`                        |
//! | `rhn_web.conf`               | `timeout`   | `web.timeout`                 |
//! | `rhn_taskomatic_daemon.conf` | `threads`   | `taskomatic.daemon.threads`   |
//! | `rhn_web.conf`               | `web.x`     | `web.x` (already qualified)   |
//!
//! # Merge order
//!
//! Every discovered file is read exactly once per merge pass, and later
//! files overwrite earlier ones key by key:
//!
//! ```text
//! search path 0 files   deepest namespace first, rhn.conf last
//!        ↑ overridden by
//! search path 1 files   same order within the path
//!        ↑ overridden by
//! in-memory overrides   set_string / set_boolean / remove
//! ```
//!
//! Within one search path, longer file paths are read first, so the root
//! file is read last and wins over a namespaced file that sets the same
//! qualified key.
//!
//! Backslashes in values are preserved verbatim: `dir=C:\path\to\file` reads
//! back as `C:\path\to\file`.
//!
//! # Lookup
//!
//! [`get_string()`](ConfigStore::get_string) splits the key on its last dot
//! into `(ns, base)` and takes the first present entry among:
//!
//! 1. `base`, unqualified
//! 2. `ns.base`, if the key had a namespace
//! 3. otherwise `web.base`, then `server.base` (see
//!    [`prefix_order()`](ConfigStoreBuilder::prefix_order))
//!
//! Values are trimmed, and an empty value reads as absent. Typed accessors
//! build on this: numeric getters return an error for a present value that
//! does not parse, booleans accept `1 y true yes on` in any case, and lists
//! split on commas.
//!
//! # In-memory changes
//!
//! [`set_string()`](ConfigStore::set_string),
//! [`set_boolean()`](ConfigStore::set_boolean) and
//! [`remove()`](ConfigStore::remove) never touch disk. They survive
//! [`reload()`](ConfigStore::reload) until
//! [`clear_overrides()`](ConfigStore::clear_overrides) is called.
//!
//! # Concurrency
//!
//! A [`ConfigStore`] is `Send + Sync`. Readers work on an immutable snapshot
//! and never block; writers serialize on one lock and publish a complete new
//! map atomically.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature, on by default) offers
//! [`ConfigArgs`], a clap derive struct that gives your app
//! `config get|list|files` with a `--json` flag. Call
//! [`into_action()`](ConfigArgs::into_action) and hand the result to
//! [`ConfigStore::handle()`].
//!
//! # Logging
//!
//! Propconf emits [`tracing`](https://docs.rs/tracing) events and never
//! installs a subscriber. Inaccessible paths log at `warn`, unreadable or
//! unparsable files at `error`, and per-file namespaces, keys and lookups at
//! `debug`.
//!
//! # Error handling
//!
//! Fallible operations return [`PropconfError`]. Loading never fails on bad
//! files; errors come from builder misuse, numeric coercion, and construction
//! of the process-wide store. See the [`error`] module for the full set.

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod env;
mod file;
mod global;
mod lookup;
mod merge;
mod namespace;
mod ops;
mod overrides;
mod properties;
mod resolve;
mod store;

#[cfg(test)]
mod fixtures;

pub use builder::{ConfigStoreBuilder, DEFAULT_BASE_NAME};
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use env::{CONF_DIR_ENV, DEFAULT_CONF_DIR};
pub use error::PropconfError;
pub use file::DEFAULT_FILE_PATTERN;
pub use global::{
    DEFAULT_CONF_FILE, DEFAULT_DEFAULTS_DIR, default_config_file_path, default_search_paths,
    global, reset_global, set_global,
};
pub use lookup::{DEFAULT_PREFIX_ORDER, TRUE_VALUES};
pub use namespace::namespace_of;
pub use ops::{ConfigResult, FileInfo};
pub use properties::{SyntaxError, parse_properties};
pub use resolve::Properties;
pub use store::ConfigStore;
pub use types::{ConfigAction, OutputFormat, SearchPath};
