use crate::text::PositionEncoding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User-facing settings, as read from a TOML file.
///
/// Every field is optional so partial files can be layered with
/// [`merge_settings`](super::merge_settings).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct JumpSettings {
    /// Column encoding used by the editor on the other side of the boundary.
    pub position_encoding: Option<PositionEncoding>,
    /// Extra language ids mapped onto registered grammar ids.
    pub language_aliases: HashMap<String, String>,
}

impl JumpSettings {
    pub fn position_encoding(&self) -> PositionEncoding {
        self.position_encoding.unwrap_or_default()
    }
}
