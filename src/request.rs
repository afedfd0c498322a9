//! Request orchestration: validate, parse, locate, navigate, project.
//!
//! Each request builds its own tree and drops it before returning, so a
//! [`JumpService`] can be shared freely between threads.

use crate::analysis::{NavigationOp, locate, project};
use crate::config::JumpSettings;
use crate::domain::{Point, Selection, SelectionRange};
use crate::error::{JumpError, JumpResult};
use crate::language::{GrammarProvider, GrammarRegistry};
use crate::text::{PositionEncoding, PositionMapper};
use serde_json::Value;

/// Number of positional arguments every jump entry point takes.
pub const JUMP_ARITY: usize = 6;

/// One navigation request: the document and the editor's current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpRequest {
    pub language_id: String,
    pub source: String,
    pub selection: Selection,
}

impl JumpRequest {
    pub fn new(
        language_id: impl Into<String>,
        source: impl Into<String>,
        selection: Selection,
    ) -> Self {
        Self {
            language_id: language_id.into(),
            source: source.into(),
            selection,
        }
    }

    /// Validate the positional boundary arguments
    /// `[languageId, source, activeRow, activeCol, anchorRow, anchorCol]`.
    pub fn from_args(args: &[Value]) -> JumpResult<Self> {
        let [language_id, source, active_row, active_col, anchor_row, anchor_col] = args else {
            return Err(JumpError::argument("Wrong number of arguments"));
        };

        let (Some(language_id), Some(source)) = (language_id.as_str(), source.as_str()) else {
            return Err(JumpError::argument("Wrong arguments type"));
        };
        let active = Point::new(coordinate(active_row)?, coordinate(active_col)?);
        let anchor = Point::new(coordinate(anchor_row)?, coordinate(anchor_col)?);

        Ok(Self::new(language_id, source, Selection::new(active, anchor)))
    }
}

fn coordinate(value: &Value) -> JumpResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| JumpError::argument("Wrong arguments type"))
}

/// Runs jump requests against the grammar registry.
#[derive(Clone, Debug, Default)]
pub struct JumpService {
    registry: GrammarRegistry,
    encoding: PositionEncoding,
}

impl JumpService {
    pub fn new(registry: GrammarRegistry, encoding: PositionEncoding) -> Self {
        Self { registry, encoding }
    }

    /// Build a service from effective settings.
    pub fn from_settings(settings: &JumpSettings) -> JumpResult<Self> {
        let registry = GrammarRegistry::with_aliases(&settings.language_aliases)?;
        Ok(Self::new(registry, settings.position_encoding()))
    }

    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    /// Compute the selection after moving `op` from the request's selection.
    ///
    /// A blocked movement is not an error: it yields the located node's own
    /// span.
    pub fn jump(&self, op: NavigationOp, request: &JumpRequest) -> JumpResult<SelectionRange> {
        let grammar = self.registry.resolve(&request.language_id)?;
        log::debug!(
            target: "jumpblock::request",
            "{} in {} ({} bytes) from {} / {}",
            op,
            grammar.id(),
            request.source.len(),
            request.selection.active,
            request.selection.anchor
        );

        let mapper = PositionMapper::new(&request.source, self.encoding);
        let selection = Selection::new(
            mapper.to_byte_point(request.selection.active),
            mapper.to_byte_point(request.selection.anchor),
        );

        let tree = grammar.parse(&request.source)?;
        let node = locate(tree.root(), &selection)?;
        let projected = project(op.apply(node));

        Ok(SelectionRange::new(
            mapper.to_editor_point(projected.start),
            mapper.to_editor_point(projected.end),
        ))
    }

    pub fn jump_up(&self, request: &JumpRequest) -> JumpResult<SelectionRange> {
        self.jump(NavigationOp::Up, request)
    }

    pub fn jump_down(&self, request: &JumpRequest) -> JumpResult<SelectionRange> {
        self.jump(NavigationOp::Down, request)
    }

    pub fn jump_out(&self, request: &JumpRequest) -> JumpResult<SelectionRange> {
        self.jump(NavigationOp::Out, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(
        language: &str,
        source: &str,
        active: (u32, u32),
        anchor: (u32, u32),
    ) -> JumpRequest {
        JumpRequest::new(
            language,
            source,
            Selection::new(Point::new(active.0, active.1), Point::new(anchor.0, anchor.1)),
        )
    }

    #[test]
    fn test_from_args_accepts_six_arguments() {
        let args = [json!("cpp"), json!("int x;"), json!(0), json!(4), json!(0), json!(5)];
        let request = JumpRequest::from_args(&args).unwrap();
        assert_eq!(request.language_id, "cpp");
        assert_eq!(request.source, "int x;");
        assert_eq!(request.selection.active, Point::new(0, 4));
        assert_eq!(request.selection.anchor, Point::new(0, 5));
    }

    #[test]
    fn test_from_args_rejects_wrong_arity() {
        let args = [json!("cpp"), json!("int x;"), json!(0), json!(4), json!(0)];
        let err = JumpRequest::from_args(&args).unwrap_err();
        assert_eq!(err.to_string(), "Wrong number of arguments");
        assert_eq!(err.code(), "ArgumentError");
    }

    #[test]
    fn test_from_args_rejects_wrong_types() {
        let cases = [
            [json!(1), json!("int x;"), json!(0), json!(4), json!(0), json!(5)],
            [json!("cpp"), json!(null), json!(0), json!(4), json!(0), json!(5)],
            [json!("cpp"), json!("int x;"), json!("0"), json!(4), json!(0), json!(5)],
            [json!("cpp"), json!("int x;"), json!(0), json!(-4), json!(0), json!(5)],
            [json!("cpp"), json!("int x;"), json!(0), json!(4), json!(0.5), json!(5)],
            [json!("cpp"), json!("int x;"), json!(0), json!(4), json!(0), json!(1u64 << 40)],
        ];
        for args in cases {
            let err = JumpRequest::from_args(&args).unwrap_err();
            assert_eq!(err.to_string(), "Wrong arguments type", "args: {:?}", args);
        }
    }

    #[test]
    fn test_jump_out_from_identifier_selects_statement() {
        let service = JumpService::default();
        let result = service
            .jump_out(&request("cpp", "int x;\nint y;", (0, 4), (0, 5)))
            .unwrap();
        assert_eq!(result, SelectionRange::new(Point::new(0, 0), Point::new(0, 6)));
    }

    #[test]
    fn test_unsupported_language_fails_before_parsing() {
        let service = JumpService::default();
        let err = service
            .jump_up(&request("unknown-lang", "int x;", (0, 0), (0, 0)))
            .unwrap_err();
        assert_eq!(err.code(), "UnsupportedLanguageError");
    }

    #[test]
    fn test_out_of_range_selection_is_locate_error() {
        let service = JumpService::default();
        let err = service
            .jump_down(&request("cpp", "int x;\nint y;", (9, 0), (9, 2)))
            .unwrap_err();
        assert_eq!(err.code(), "LocateError");
    }

    #[test]
    fn test_utf16_service_maps_columns_both_ways() {
        // "é" occupies 2 bytes but 1 UTF-16 unit.
        let source = "s = \"é\"\nt = 2\n";
        let service = JumpService::new(GrammarRegistry::new(), PositionEncoding::Utf16);

        // Select the string literal (UTF-16 columns 4..7) and move out to
        // the assignment, whose end is reported back in UTF-16 units.
        let from_string = service
            .jump_out(&request("python", source, (0, 4), (0, 7)))
            .unwrap();
        assert_eq!(from_string, SelectionRange::new(Point::new(0, 0), Point::new(0, 7)));
    }

    #[test]
    fn test_configured_alias_reaches_grammar() {
        let settings = JumpSettings {
            position_encoding: None,
            language_aliases: [("c".to_string(), "cpp".to_string())].into(),
        };
        let service = JumpService::from_settings(&settings).unwrap();
        let result = service
            .jump_out(&request("c", "int x;", (0, 4), (0, 5)))
            .unwrap();
        assert_eq!(result, SelectionRange::new(Point::new(0, 0), Point::new(0, 6)));
    }

    #[test]
    fn test_caret_before_first_token_jumps_out_to_root() {
        let service = JumpService::default();
        let result = service
            .jump_out(&request("python", "\n\nx = 1\n", (0, 0), (0, 0)))
            .unwrap();
        assert_eq!(result.start, Point::new(2, 0));
    }

    #[test]
    fn test_utf16_row_past_end_is_locate_error() {
        let service = JumpService::new(GrammarRegistry::new(), PositionEncoding::Utf16);
        let err = service
            .jump_out(&request("python", "s = \"é\"\n", (9, 0), (9, 1)))
            .unwrap_err();
        assert_eq!(err.code(), "LocateError");
    }
}
