//! JSON-lines call boundary.
//!
//! Each input line is one request object:
//!
//! ```text
//! {"id": 1, "method": "jumpOut", "params": ["cpp", "int x;", 0, 4, 0, 5]}
//! ```
//!
//! and produces exactly one output line carrying the same `id` with either a
//! `result` or an `error`. Requests run in isolation on the blocking pool and
//! may complete out of order; a single writer task owns the output stream.

use crate::analysis::NavigationOp;
use crate::domain::SelectionRange;
use crate::error::{JumpError, JumpResult};
use crate::request::{JumpRequest, JumpService};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Lists registered grammar ids; takes no params.
pub const LANGUAGES_METHOD: &str = "languages";

/// Bound on responses waiting for the writer.
const OUTPUT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Deserialize)]
struct RawRequest {
    #[serde(default)]
    id: Value,
    method: String,
    #[serde(default)]
    params: Vec<Value>,
}

/// Wire form of a computed selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub selection_start_row: u32,
    pub selection_start_col: u32,
    pub selection_end_row: u32,
    pub selection_end_col: u32,
}

impl From<SelectionRange> for SelectionResult {
    fn from(range: SelectionRange) -> Self {
        Self {
            selection_start_row: range.start.row,
            selection_start_col: range.start.column,
            selection_end_row: range.end.row,
            selection_end_col: range.end.column,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<&JumpError> for ErrorBody {
    fn from(error: &JumpError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// One output line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    fn from_result(id: Value, result: JumpResult<Value>) -> Self {
        match result {
            Ok(value) => Self {
                id,
                result: Some(value),
                error: None,
            },
            Err(error) => {
                log::debug!(
                    target: "jumpblock::server",
                    "Request {} failed: {}",
                    id,
                    error
                );
                Self {
                    id,
                    result: None,
                    error: Some(ErrorBody::from(&error)),
                }
            }
        }
    }
}

/// Handle a single request line.
pub fn handle_line(service: &JumpService, line: &str) -> Response {
    match serde_json::from_str::<RawRequest>(line) {
        Ok(request) => {
            let result = dispatch(service, &request.method, &request.params);
            Response::from_result(request.id, result)
        }
        Err(e) => {
            let error = JumpError::invalid_request(e.to_string());
            Response::from_result(Value::Null, Err(error))
        }
    }
}

fn dispatch(service: &JumpService, method: &str, params: &[Value]) -> JumpResult<Value> {
    if method == LANGUAGES_METHOD {
        if !params.is_empty() {
            return Err(JumpError::argument("Wrong number of arguments"));
        }
        return Ok(Value::from(service.registry().language_ids()));
    }

    let op = NavigationOp::from_method_name(method)
        .ok_or_else(|| JumpError::unknown_method(method))?;
    let request = JumpRequest::from_args(params)?;
    let selection = service.jump(op, &request)?;
    serde_json::to_value(SelectionResult::from(selection))
        .map_err(|e| JumpError::invalid_request(e.to_string()))
}

/// Handle one raw input line; bytes that are not UTF-8 are answered with an
/// `InvalidRequestError` carrying a null id.
fn handle_bytes(service: &JumpService, bytes: &[u8]) -> Response {
    match std::str::from_utf8(bytes) {
        Ok(line) => handle_line(service, line),
        Err(e) => {
            let error = JumpError::invalid_request(e.to_string());
            Response::from_result(Value::Null, Err(error))
        }
    }
}

/// Serve requests from `input` until EOF, writing responses to `output`.
///
/// In-flight requests are drained and the writer is flushed before
/// returning, also when reading the input fails.
pub async fn serve<R, W>(service: Arc<JumpService>, input: R, output: W) -> JumpResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<String>(OUTPUT_QUEUE_CAPACITY);
    let writer = tokio::spawn(write_responses(rx, output));

    let mut reader = BufReader::new(input);
    let mut in_flight = JoinSet::new();
    let mut buf = Vec::new();

    let read_result = loop {
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(e) => {
                log::error!(target: "jumpblock::server", "Failed to read input: {}", e);
                break Err(JumpError::Io(e));
            }
        }
        let line = std::mem::take(&mut buf);
        if line.trim_ascii().is_empty() {
            continue;
        }
        let service = Arc::clone(&service);
        let tx = tx.clone();
        in_flight.spawn_blocking(move || {
            let response = handle_bytes(&service, line.trim_ascii_end());
            match serde_json::to_string(&response) {
                Ok(encoded) => {
                    if tx.blocking_send(encoded).is_err() {
                        log::error!(
                            target: "jumpblock::server",
                            "Writer stopped; dropping response {}",
                            response.id
                        );
                    }
                }
                Err(e) => log::error!(
                    target: "jumpblock::server",
                    "Failed to encode response {}: {}",
                    response.id,
                    e
                ),
            }
        });
    };

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            log::error!(target: "jumpblock::server", "Request task failed: {}", e);
        }
    }
    drop(tx);

    let written = writer
        .await
        .map_err(|e| JumpError::Io(std::io::Error::other(e)))?;
    read_result?;
    written?;
    log::debug!(target: "jumpblock::server", "Input closed, server exiting");
    Ok(())
}

async fn write_responses<W>(mut rx: mpsc::Receiver<String>, mut output: W) -> JumpResult<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::AsyncReadExt;

    fn result_of(response: &Response) -> SelectionResult {
        serde_json::from_value(response.result.clone().expect("result")).expect("selection")
    }

    #[test]
    fn test_handle_line_jump_out() {
        let service = JumpService::default();
        let line = json!({
            "id": 7,
            "method": "jumpOut",
            "params": ["cpp", "int x;\nint y;", 0, 4, 0, 5],
        })
        .to_string();

        let response = handle_line(&service, &line);
        assert_eq!(response.id, json!(7));
        assert!(response.error.is_none());
        assert_eq!(
            result_of(&response),
            SelectionResult {
                selection_start_row: 0,
                selection_start_col: 0,
                selection_end_row: 0,
                selection_end_col: 6,
            }
        );
    }

    #[test]
    fn test_handle_line_reports_error_code() {
        let service = JumpService::default();
        let line = json!({
            "id": "a",
            "method": "jumpUp",
            "params": ["unknown-lang", "x", 0, 0, 0, 0],
        })
        .to_string();

        let response = handle_line(&service, &line);
        assert_eq!(response.id, json!("a"));
        assert!(response.result.is_none());
        let error = response.error.expect("error");
        assert_eq!(error.code, "UnsupportedLanguageError");
        assert_eq!(error.message, "Unsupported language: unknown-lang");
    }

    #[test]
    fn test_handle_line_wrong_arity() {
        let service = JumpService::default();
        let line = r#"{"id": 1, "method": "jumpDown", "params": ["cpp", "int x;"]}"#;
        let error = handle_line(&service, line).error.expect("error");
        assert_eq!(error.code, "ArgumentError");
        assert_eq!(error.message, "Wrong number of arguments");
    }

    #[test]
    fn test_handle_line_unknown_method() {
        let service = JumpService::default();
        let line = r#"{"id": 1, "method": "jumpSideways", "params": []}"#;
        let error = handle_line(&service, line).error.expect("error");
        assert_eq!(error.code, "UnknownMethodError");
    }

    #[test]
    fn test_handle_line_malformed_json() {
        let service = JumpService::default();
        let response = handle_line(&service, "{not json");
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.expect("error").code, "InvalidRequestError");
    }

    #[test]
    fn test_handle_line_languages() {
        let service = JumpService::default();
        let response = handle_line(&service, r#"{"id": 3, "method": "languages"}"#);
        assert_eq!(response.result, Some(json!(["cpp", "python"])));
    }

    #[test]
    fn test_error_response_omits_result_field() {
        let service = JumpService::default();
        let response = handle_line(&service, r#"{"id": 1, "method": "nope"}"#);
        let encoded = serde_json::to_value(&response).unwrap();
        assert!(encoded.get("result").is_none());
        assert!(encoded.get("error").is_some());
    }

    #[tokio::test]
    async fn test_serve_answers_every_line_until_eof() {
        let input = [
            json!({"id": 1, "method": "jumpOut", "params": ["cpp", "int x;\nint y;", 0, 4, 0, 5]}),
            json!({"id": 2, "method": "jumpDown", "params": ["cpp", "int x;\nint y;", 0, 0, 0, 6]}),
            json!({"id": 3, "method": "jumpUp", "params": ["unknown-lang", "", 0, 0, 0, 0]}),
        ]
        .iter()
        .map(|request| request.to_string())
        .collect::<Vec<_>>()
        .join("\n\n");

        let (writer, mut reader) = tokio::io::duplex(64 * 1024);
        serve(Arc::new(JumpService::default()), input.as_bytes(), writer)
            .await
            .unwrap();

        let mut output = String::new();
        reader.read_to_string(&mut output).await.unwrap();

        let mut responses: Vec<Response> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        responses.sort_by_key(|response| response.id.as_u64());
        assert_eq!(responses.len(), 3);

        let down = result_of(&responses[1]);
        assert_eq!((down.selection_start_row, down.selection_start_col), (1, 0));
        assert_eq!((down.selection_end_row, down.selection_end_col), (1, 6));
        assert_eq!(
            responses[2].error.as_ref().map(|e| e.code.as_str()),
            Some("UnsupportedLanguageError")
        );
    }

    #[tokio::test]
    async fn test_serve_keeps_going_after_non_utf8_line() {
        let input: &[u8] =
            b"{\"id\":1,\"method\":\"languages\"}\n\xff\xfe\n{\"id\":2,\"method\":\"languages\"}\n";

        let (writer, mut reader) = tokio::io::duplex(64 * 1024);
        serve(Arc::new(JumpService::default()), input, writer)
            .await
            .unwrap();

        let mut output = String::new();
        reader.read_to_string(&mut output).await.unwrap();

        let responses: Vec<Response> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);

        let invalid: Vec<&Response> = responses.iter().filter(|r| r.id.is_null()).collect();
        assert_eq!(invalid.len(), 1);
        assert_eq!(
            invalid[0].error.as_ref().map(|e| e.code.as_str()),
            Some("InvalidRequestError")
        );

        let mut answered: Vec<u64> = responses.iter().filter_map(|r| r.id.as_u64()).collect();
        answered.sort_unstable();
        assert_eq!(answered, vec![1, 2]);
        for response in responses.iter().filter(|r| !r.id.is_null()) {
            assert_eq!(response.result, Some(json!(["cpp", "python"])));
        }
    }

    #[test]
    fn test_handle_bytes_rejects_invalid_utf8() {
        let service = JumpService::default();
        let response = handle_bytes(&service, b"{\"id\": 1, \xff}");
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.expect("error").code, "InvalidRequestError");
    }
}
