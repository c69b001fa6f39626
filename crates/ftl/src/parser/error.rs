//! Parse error types.

use thiserror::Error;

/// An error that occurred while parsing a resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax { line: usize, column: usize, message: String },
}
