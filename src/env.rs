use std::path::PathBuf;

/// Environment variable that relocates the operator config directory.
pub const CONF_DIR_ENV: &str = "RHN_CONFIG_DIR";

/// Operator config directory used when [`CONF_DIR_ENV`] is unset or blank.
pub const DEFAULT_CONF_DIR: &str = "/etc/rhn";

/// Pick the operator config directory from environment variables.
///
/// `RHN_CONFIG_DIR` wins when set to something other than whitespace;
/// otherwise `/etc/rhn`. The value is used as given, not trimmed.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn conf_dir_from(vars: impl IntoIterator<Item = (String, String)>) -> PathBuf {
    vars.into_iter()
        .find(|(key, _)| key == CONF_DIR_ENV)
        .map(|(_, value)| value)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONF_DIR))
}

/// [`conf_dir_from`] over the process environment.
pub fn conf_dir() -> PathBuf {
    conf_dir_from(std::env::vars_os().filter_map(|(k, v)| {
        Some((k.into_string().ok()?, v.into_string().ok()?))
    }))
}
