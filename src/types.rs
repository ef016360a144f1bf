use std::path::PathBuf;

/// Where to look for config files.
///
/// Each variant resolves to one filesystem path, which may be a directory
/// (scanned for matching files, non-recursively) or a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPath {
    /// Platform config directory for the store's base name (XDG on Linux,
    /// ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".rhn")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit file or directory.
    Path(PathBuf),
}

impl From<PathBuf> for SearchPath {
    fn from(path: PathBuf) -> Self {
        SearchPath::Path(path)
    }
}

impl From<&std::path::Path> for SearchPath {
    fn from(path: &std::path::Path) -> Self {
        SearchPath::Path(path.to_path_buf())
    }
}

impl From<&str> for SearchPath {
    fn from(path: &str) -> Self {
        SearchPath::Path(PathBuf::from(path))
    }
}

impl From<String> for SearchPath {
    fn from(path: String) -> Self {
        SearchPath::Path(PathBuf::from(path))
    }
}

/// A read-only config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Resolve one key through prefix fallback.
    Get { key: String },
    /// List stored entries, optionally only those under `namespace`, with the
    /// matched prefix rewritten to `rename_to`.
    List {
        namespace: Option<String>,
        rename_to: Option<String>,
    },
    /// Show the discovered files in merge order with their namespaces.
    Files,
}

/// How a [`ConfigResult`](crate::ConfigResult) is rendered for output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_convert_to_explicit_paths() {
        assert_eq!(
            SearchPath::from("/etc/rhn"),
            SearchPath::Path(PathBuf::from("/etc/rhn"))
        );
        assert_eq!(
            SearchPath::from(String::from("rhn.conf")),
            SearchPath::Path(PathBuf::from("rhn.conf"))
        );
    }

    #[test]
    fn output_format_defaults_to_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
