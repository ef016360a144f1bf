//! File discovery for config search paths.
//!
//! Each [`SearchPath`] resolves to one concrete path, which is then expanded
//! into files:
//!
//! - A **directory** must be readable. Its direct children are kept if they
//!   are regular, readable files whose name matches the file pattern
//!   (`*.conf` by default, case-sensitive). Subdirectories are never entered.
//! - A **regular readable file** yields itself, whatever its extension.
//! - Anything else (missing, unreadable, a socket) yields nothing.
//!
//! None of this is fatal. An inaccessible search path is a normal
//! configuration (the operator directory often does not exist), so it is
//! logged at `warn` and contributes zero files. That includes a directory
//! that cannot be opened. A listing that fails partway through is logged at
//! `error` and also contributes nothing.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use tracing::{debug, error, warn};

use crate::error::PropconfError;
use crate::types::SearchPath;

/// Default pattern for config files inside a scanned directory.
pub const DEFAULT_FILE_PATTERN: &str = "*.conf";

/// Resolve a [`SearchPath`] to a concrete path.
///
/// `base_name` is used by `SearchPath::Platform` to build the platform config
/// directory (e.g. `~/.config/{base_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (e.g. no home directory).
pub fn resolve_search_path(sp: &SearchPath, base_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", base_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Compile a file-name glob for directory scans.
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher, PropconfError> {
    Glob::new(pattern)
        .map(|g| g.compile_matcher())
        .map_err(|source| PropconfError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Expand one path into the config files it names, as absolute paths.
///
/// Directory children come back sorted by name; callers that care about
/// precedence put them into a [`FileSet`](crate::merge::FileSet).
pub fn collect_files(path: &Path, pattern: &GlobMatcher) -> Vec<PathBuf> {
    let path = match std::path::absolute(path) {
        Ok(p) => p,
        Err(e) => {
            warn!("Ignoring path {} since it cannot be made absolute: {e}", path.display());
            return vec![];
        }
    };

    if path.is_dir() {
        return collect_dir(&path, pattern);
    }

    if path.is_file() && is_readable_file(&path) {
        return vec![path];
    }

    warn!("Ignoring path {} since it's not accessible", path.display());
    vec![]
}

/// A directory that cannot be opened is as tolerable as a missing one. A
/// listing that fails partway through is an error.
fn collect_dir(dir: &Path, pattern: &GlobMatcher) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Ignoring path {} since it's not accessible: {e}", dir.display());
            return vec![];
        }
    };
    match list_entries(dir, entries, pattern) {
        Ok(files) => files,
        Err(e) => {
            error!("{e}");
            vec![]
        }
    }
}

fn list_entries(
    dir: &Path,
    entries: fs::ReadDir,
    pattern: &GlobMatcher,
) -> Result<Vec<PathBuf>, PropconfError> {
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PropconfError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_path = entry.path();
        if !pattern.is_match(entry.file_name()) {
            continue;
        }
        if file_path.is_file() && is_readable_file(&file_path) {
            files.push(file_path);
        } else {
            debug!("Skipping {}: not a readable regular file", file_path.display());
        }
    }
    files.sort();
    Ok(files)
}

fn is_readable_file(path: &Path) -> bool {
    fs::File::open(path).is_ok()
}

/// Read a config file as UTF-8.
pub fn read_file(path: &Path) -> Result<String, PropconfError> {
    fs::read_to_string(path).map_err(|source| PropconfError::IoError {
        path: path.to_path_buf(),
        source,
    })
}
