//! The merge pass: parse every file in merge order and fold the qualified
//! keys into one flat map.
//!
//! [`resolve`] operates on pre-loaded data (`ResolveInput`) with no I/O,
//! making the pipeline testable with synthetic inputs. Steps per file:
//!
//! 1. Double every backslash so values such as `C:\path\to\file` survive
//!    the properties grammar verbatim
//! 2. Parse the text as flat `key=value` properties
//! 3. Qualify each key with the namespace derived from the file name
//! 4. Insert into the map, later files overwriting earlier ones
//!
//! A file that cannot be read or parsed is logged and contributes nothing.
//! It never aborts the pass.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::PropconfError;
use crate::file;
use crate::merge::FileSet;
use crate::namespace::{namespace_of_path, qualify_key};
use crate::properties::{escape_backslashes, parse_properties};

/// The flat, merged key → value mapping.
pub type Properties = BTreeMap<String, String>;

/// All pre-loaded data needed for a merge pass. No I/O happens here.
pub struct ResolveInput {
    /// File contents in merge order: first = lowest priority, last = highest.
    pub files: Vec<(PathBuf, String)>,
    /// Reserved file name token used for namespace derivation.
    pub base_name: String,
}

/// Parse one file's text into namespace-qualified `(key, value)` pairs.
pub fn parse_file(
    path: &Path,
    content: &str,
    base_name: &str,
) -> Result<Vec<(String, String)>, PropconfError> {
    let raw = parse_properties(&escape_backslashes(content)).map_err(|source| {
        PropconfError::ParseError {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let ns = namespace_of_path(path, base_name);
    debug!("Adding namespace: '{ns}' for file: {}", path.display());

    Ok(raw
        .into_iter()
        .map(|(key, value)| (qualify_key(&ns, &key), value))
        .collect())
}

/// Merge pre-loaded files into one map. Later files win on key collision.
pub fn resolve(input: ResolveInput) -> Properties {
    let mut merged = Properties::new();
    for (path, content) in &input.files {
        match parse_file(path, content, &input.base_name) {
            Ok(pairs) => {
                for (key, value) in pairs {
                    debug!("Adding: {key}: {value}");
                    merged.insert(key, value);
                }
            }
            Err(e) => error!("Could not parse file {}: {e}", path.display()),
        }
    }
    merged
}

/// Read every file of `files` in merge order. Unreadable files are logged
/// and skipped.
pub fn read_all(files: &FileSet) -> Vec<(PathBuf, String)> {
    files
        .iter()
        .filter_map(|entry| match file::read_file(&entry.path) {
            Ok(content) => Some((entry.path.clone(), content)),
            Err(e) => {
                error!("{e}");
                None
            }
        })
        .collect()
}

/// Read and merge `files`: the I/O wrapper around [`resolve`].
pub fn merge_files(files: &FileSet, base_name: &str) -> Properties {
    resolve(ResolveInput {
        files: read_all(files),
        base_name: base_name.to_string(),
    })
}
