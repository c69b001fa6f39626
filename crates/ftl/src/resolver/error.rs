//! Error types for message resolution.
//!
//! All resolver errors are non-fatal: they are appended to the caller's
//! error list while resolution substitutes a best-effort fallback value.

use thiserror::Error;

use crate::parser::ParseError;

/// An error recorded while installing or formatting messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// An unknown message, external argument, attribute, variant, or
    /// function was referenced.
    #[error("reference error: {0}")]
    Reference(String),

    /// A value-less message was used for its value, a cyclic reference
    /// was entered, or a placeable exceeded the expansion cap.
    #[error("range error: {0}")]
    Range(String),

    /// An external argument or callable slot had an unsupported type.
    #[error("type error: {0}")]
    Type(String),

    /// The parser rejected an entry during `add_messages`.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax { line: usize, column: usize, message: String },
}

impl FormatError {
    /// The coarse kind tag, for callers that filter structurally.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormatError::Reference(_) => ErrorKind::Reference,
            FormatError::Range(_) => ErrorKind::Range,
            FormatError::Type(_) => ErrorKind::Type,
            FormatError::Syntax { .. } => ErrorKind::Syntax,
        }
    }
}

/// The kind tag of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Reference,
    Range,
    Type,
    Syntax,
}

impl From<ParseError> for FormatError {
    fn from(error: ParseError) -> Self {
        let ParseError::Syntax { line, column, message } = error;
        FormatError::Syntax { line, column, message }
    }
}
