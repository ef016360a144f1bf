//! Namespace derivation from config file names.
//!
//! The namespace of a file is decided by its name alone. With base name
//! `rhn`:
//!
//! | File name                    | Namespace           |
//! |------------------------------|---------------------|
//! | `rhn.conf`, `rhn.anything`   | `""`                |
//! | `rhn_taskomatic.conf`        | `taskomatic`        |
//! | `rhn_taskomatic_daemon.conf` | `taskomatic.daemon` |
//! | `web_extra.conf`             | `web.extra`         |

use std::path::Path;

/// Derive the dotted namespace for a file name.
///
/// A name starting with `{base}.` is the root file and maps to `""`.
/// Otherwise a leading `{base}_` is stripped, then the final extension, and
/// every remaining underscore becomes a dot.
pub fn namespace_of(file_name: &str, base: &str) -> String {
    if file_name
        .strip_prefix(base)
        .is_some_and(|rest| rest.starts_with('.'))
    {
        return String::new();
    }

    let mut ns = file_name;
    if let Some(rest) = ns.strip_prefix(base).and_then(|r| r.strip_prefix('_')) {
        ns = rest;
    }
    if let Some((stem, _ext)) = ns.rsplit_once('.') {
        ns = stem;
    }
    ns.replace('_', ".")
}

/// [`namespace_of`] applied to the final component of `path`.
pub fn namespace_of_path(path: &Path, base: &str) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    namespace_of(&name, base)
}

/// Qualify a raw key with its file's namespace.
///
/// Keys that already start with the namespace are left alone, as is every key
/// from a file with the empty namespace. The check is a plain string prefix
/// test, not a dotted-segment match.
pub fn qualify_key(namespace: &str, key: &str) -> String {
    if key.starts_with(namespace) {
        key.to_string()
    } else {
        format!("{namespace}.{key}")
    }
}
