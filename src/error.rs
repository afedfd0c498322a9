//! Error handling types for jumpblock
//!
//! Every failure a navigation request can report. Navigation dead ends are not
//! errors: they produce an unchanged selection.

use thiserror::Error;

/// Comprehensive error type for jump requests
#[derive(Debug, Error)]
pub enum JumpError {
    /// Wrong number or wrong types of call arguments
    #[error("{message}")]
    Argument { message: String },

    /// Language id is not in the grammar registry
    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    /// The grammar produced no syntax tree
    #[error("Parse failed for language: {language}")]
    Parse { language: String },

    /// No node covers the requested selection
    #[error("Can't find node for this selection: {message}")]
    Locate { message: String },

    /// The boundary received a method it does not serve
    #[error("Unknown method: {method}")]
    UnknownMethod { method: String },

    /// A request line that is not a well-formed request object
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for jump operations
pub type JumpResult<T> = Result<T, JumpError>;

/// Helper functions for common error patterns
impl JumpError {
    /// Create an argument error
    pub fn argument(message: impl Into<String>) -> Self {
        JumpError::Argument {
            message: message.into(),
        }
    }

    /// Create an unsupported language error
    pub fn unsupported_language(language: impl Into<String>) -> Self {
        JumpError::UnsupportedLanguage {
            language: language.into(),
        }
    }

    /// Create a parse error
    pub fn parse(language: impl Into<String>) -> Self {
        JumpError::Parse {
            language: language.into(),
        }
    }

    /// Create a locate error
    pub fn locate(message: impl Into<String>) -> Self {
        JumpError::Locate {
            message: message.into(),
        }
    }

    pub fn unknown_method(method: impl Into<String>) -> Self {
        JumpError::UnknownMethod {
            method: method.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        JumpError::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        JumpError::Config {
            message: message.into(),
        }
    }

    /// Stable machine-readable code reported by the call boundary.
    pub fn code(&self) -> &'static str {
        match self {
            JumpError::Argument { .. } => "ArgumentError",
            JumpError::UnsupportedLanguage { .. } => "UnsupportedLanguageError",
            JumpError::Parse { .. } => "ParseError",
            JumpError::Locate { .. } => "LocateError",
            JumpError::UnknownMethod { .. } => "UnknownMethodError",
            JumpError::InvalidRequest { .. } => "InvalidRequestError",
            JumpError::Config { .. } => "ConfigError",
            JumpError::Io(_) => "IoError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_error_displays_message_verbatim() {
        let err = JumpError::argument("Wrong number of arguments");
        assert_eq!(err.to_string(), "Wrong number of arguments");
        assert_eq!(err.code(), "ArgumentError");
    }

    #[test]
    fn test_unsupported_language_names_the_id() {
        let err = JumpError::unsupported_language("unknown-lang");
        assert_eq!(err.to_string(), "Unsupported language: unknown-lang");
        assert_eq!(err.code(), "UnsupportedLanguageError");
    }

    #[test]
    fn test_io_error_converts_with_question_mark() {
        fn fails() -> JumpResult<()> {
            Err(std::io::Error::other("boom"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert_eq!(err.code(), "IoError");
    }
}
