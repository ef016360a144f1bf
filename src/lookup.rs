//! Key lookup with namespace-prefix fallback, and the value coercions the
//! typed accessors share.

use tracing::debug;

use crate::resolve::Properties;

/// Prefixes tried, in order, for a key given without a namespace.
pub const DEFAULT_PREFIX_ORDER: [&str; 2] = ["web", "server"];

/// Values that read as `true`, compared case-insensitively.
pub const TRUE_VALUES: [&str; 5] = ["1", "y", "true", "yes", "on"];

/// Resolve `key` against `props`.
///
/// The key is split on its last `.` into `(ns, base)` (a leading dot does not
/// count as a separator). The first present entry among these wins:
///
/// 1. `base`, unqualified
/// 2. `ns.base`, if `ns` is non-empty
/// 3. otherwise `prefix.base` for each prefix in `prefix_order`
///
/// A winning entry that is empty after trimming reads as absent. It still
/// stops the search: an empty unqualified `base` hides `web.base`.
pub fn resolve_key<'a, S: AsRef<str>>(
    props: &'a Properties,
    key: &str,
    prefix_order: &[S],
) -> Option<&'a str> {
    let (ns, base) = match key.rfind('.') {
        Some(dot) if dot > 0 => (&key[..dot], &key[dot + 1..]),
        _ => ("", key),
    };

    let found = props.get(base).or_else(|| {
        if !ns.is_empty() {
            props.get(&format!("{ns}.{base}"))
        } else {
            prefix_order
                .iter()
                .find_map(|prefix| props.get(&format!("{}.{base}", prefix.as_ref())))
        }
    });
    debug!("Resolved '{key}' -> {found:?}");

    found.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Whether `value` is one of [`TRUE_VALUES`], ignoring case.
pub fn is_true_value(value: &str) -> bool {
    TRUE_VALUES.iter().any(|t| t.eq_ignore_ascii_case(value))
}

/// Split a list value on literal commas. Items are not trimmed; trailing
/// empty items are dropped.
pub fn split_list(value: &str) -> Vec<String> {
    let mut items: Vec<String> = value.split(',').map(str::to_string).collect();
    while items.last().is_some_and(|s| s.is_empty()) {
        items.pop();
    }
    items
}
