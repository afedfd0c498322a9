//! User configuration loading for jumpblock.
//!
//! User config location: $XDG_CONFIG_HOME/jumpblock/jumpblock.toml
//! Fallback: the platform config directory (~/.config/jumpblock/jumpblock.toml on Linux)

use std::path::PathBuf;

const CONFIG_DIR: &str = "jumpblock";
const CONFIG_FILE: &str = "jumpblock.toml";

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/jumpblock/jumpblock.toml
/// 2. Otherwise: `dirs::config_dir()`/jumpblock/jumpblock.toml
///
/// Returns None if neither location can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    Some(base.join(CONFIG_DIR).join(CONFIG_FILE))
}
