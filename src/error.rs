//! Error types for filter compilation

use thiserror::Error;

/// Unrecognised or malformed input at a character position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unexpected character '{character}' at position {position}: {message}")]
pub struct LexError {
    /// 0-based character index
    pub position: usize,
    pub character: char,
    pub message: String,
}

impl LexError {
    pub fn new(position: usize, character: char, message: impl Into<String>) -> Self {
        LexError {
            position,
            character,
            message: message.into(),
        }
    }
}

/// Grammar violation: unexpected token, missing operand, unbalanced
/// parentheses or trailing input.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Parse error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    /// Character index of the offending token
    pub position: usize,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

/// Any failure while turning a filter string into a predicate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Field path outside the searchable prefixes
    #[error("Invalid key '{key}': searchable keys must start with one of {allowed:?}")]
    InvalidKey { key: String, allowed: Vec<String> },

    /// Options could not be loaded
    #[error("Invalid filter options: {0}")]
    Config(String),
}

/// Result type for filter compilation
pub type Result<T> = std::result::Result<T, FilterError>;
