use crate::domain::Point;
use line_index::{LineCol, LineIndex, WideEncoding, WideLineCol};
use serde::{Deserialize, Serialize};

/// How editor columns are counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionEncoding {
    /// Byte offsets within the line, as tree-sitter reports them.
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-16 code units within the line.
    #[serde(rename = "utf-16")]
    Utf16,
}

/// Converts points between the editor's column encoding and byte columns.
pub struct PositionMapper {
    index: Option<LineIndex>,
}

impl PositionMapper {
    pub fn new(text: &str, encoding: PositionEncoding) -> Self {
        let index = match encoding {
            PositionEncoding::Utf8 => None,
            PositionEncoding::Utf16 => Some(LineIndex::new(text)),
        };
        Self { index }
    }

    /// Editor point to byte-column point.
    ///
    /// Points that cannot be mapped are returned unchanged.
    pub fn to_byte_point(&self, point: Point) -> Point {
        let Some(index) = &self.index else {
            return point;
        };
        let wide = WideLineCol {
            line: point.row,
            col: point.column,
        };
        index
            .to_utf8(WideEncoding::Utf16, wide)
            .map(|line_col| Point::new(line_col.line, line_col.col))
            .unwrap_or(point)
    }

    /// Byte-column point to editor point.
    pub fn to_editor_point(&self, point: Point) -> Point {
        let Some(index) = &self.index else {
            return point;
        };
        let line_col = LineCol {
            line: point.row,
            col: point.column,
        };
        index
            .to_wide(WideEncoding::Utf16, line_col)
            .map(|wide| Point::new(wide.line, wide.col))
            .unwrap_or(point)
    }
}
