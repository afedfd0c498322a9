//! Language alias normalization.
//!
//! Editors report language ids that do not always match a grammar's canonical
//! id. Built-in aliases are tried after the exact id and before any aliases
//! supplied through configuration.

/// Normalize common language aliases to canonical grammar ids.
///
/// # Examples
/// - `py` -> `python`
/// - `c++` -> `cpp`
///
/// Non-alias identifiers return `None` to indicate no normalization needed.
pub fn normalize_alias(identifier: &str) -> Option<&'static str> {
    match identifier {
        "py" => Some("python"),
        "c++" => Some("cpp"),
        _ => None,
    }
}
