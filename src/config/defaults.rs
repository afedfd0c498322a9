//! Default configuration values for jumpblock.

use super::settings::JumpSettings;
use crate::text::PositionEncoding;
use std::collections::HashMap;

/// Returns the built-in settings every other layer is merged over.
///
/// Byte columns match what tree-sitter reports, so the default needs no
/// conversion.
pub fn default_settings() -> JumpSettings {
    JumpSettings {
        position_encoding: Some(PositionEncoding::Utf8),
        language_aliases: HashMap::new(),
    }
}
