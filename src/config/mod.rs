pub mod defaults;
pub mod settings;
pub mod user;

pub use defaults::default_settings;
pub use settings::JumpSettings;
pub use user::user_config_path;

use crate::error::{JumpError, JumpResult};
use std::collections::HashMap;
use std::path::Path;

/// Merge two JumpSettings, preferring values from `primary` over `fallback`
pub fn merge_settings(
    fallback: Option<JumpSettings>,
    primary: Option<JumpSettings>,
) -> Option<JumpSettings> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) => Some(settings),
        (None, Some(settings)) => Some(settings),
        (Some(fallback), Some(primary)) => Some(JumpSettings {
            position_encoding: primary.position_encoding.or(fallback.position_encoding),
            // Merge aliases: start with fallback, override with primary
            language_aliases: merge_aliases(fallback.language_aliases, primary.language_aliases),
        }),
    }
}

fn merge_aliases(
    mut fallback: HashMap<String, String>,
    primary: HashMap<String, String>,
) -> HashMap<String, String> {
    for (alias, target) in primary {
        fallback.insert(alias, target);
    }
    fallback
}

/// Parse settings from TOML text.
pub fn parse_settings(text: &str) -> JumpResult<JumpSettings> {
    toml::from_str(text).map_err(|e| JumpError::config(e.to_string()))
}

/// Read and parse one settings file.
pub fn read_settings_file(path: &Path) -> JumpResult<JumpSettings> {
    let text = std::fs::read_to_string(path)?;
    parse_settings(&text).map_err(|e| JumpError::config(format!("{}: {}", path.display(), e)))
}

/// Build the effective settings: defaults, then the user file, then `explicit`.
///
/// A missing or malformed user file is skipped with a warning. A problem with
/// the explicit file is an error.
pub fn load_settings(explicit: Option<&Path>) -> JumpResult<JumpSettings> {
    let user = user_config_path().and_then(|path| load_user_settings(&path));
    let explicit = explicit.map(read_settings_file).transpose()?;

    let merged = merge_settings(Some(default_settings()), user);
    Ok(merge_settings(merged, explicit).unwrap_or_else(default_settings))
}

fn load_user_settings(path: &Path) -> Option<JumpSettings> {
    if !path.exists() {
        log::debug!(
            target: "jumpblock::config",
            "No user config at {}",
            path.display()
        );
        return None;
    }
    match read_settings_file(path) {
        Ok(settings) => Some(settings),
        Err(e) => {
            log::warn!(
                target: "jumpblock::config",
                "Ignoring user config: {}",
                e
            );
            None
        }
    }
}
