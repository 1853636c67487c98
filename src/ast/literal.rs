use std::fmt;

use serde::Serialize;

use crate::value::Scalar;

/// Literal constant appearing on the right-hand side of a comparison or
/// inside a list literal.
///
/// `Display` writes the literal in a form the lexer reads back to the same
/// value, except for non-finite floats and strings holding both quote
/// styles, which the lexer never produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Integer(i64),

    /// Literal floating point number
    ///
    /// # Example
    /// ```text
    /// 0.001
    /// ```
    Float(f64),

    /// String literal, single or double quoted
    ///
    /// # Example
    /// ```text
    /// 'resnet50'
    /// ```
    String(String),

    /// Boolean literal (case-insensitive in source)
    Boolean(bool),
}

impl Literal {
    /// Borrowed scalar view used by the evaluator.
    pub fn as_scalar(&self) -> Scalar<'_> {
        match self {
            Literal::Integer(n) => Scalar::Integer(*n),
            Literal::Float(n) => Scalar::Float(*n),
            Literal::String(s) => Scalar::String(s),
            Literal::Boolean(b) => Scalar::Boolean(*b),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Float(n) => {
                // Display never uses exponent notation; keep a '.' so the
                // text lexes back as a float.
                let text = n.to_string();
                if text.contains('.') {
                    write!(f, "{text}")
                } else {
                    write!(f, "{text}.0")
                }
            }
            Literal::String(s) => {
                if s.contains('\'') && !s.contains('"') {
                    write!(f, "\"{s}\"")
                } else {
                    write!(f, "'{s}'")
                }
            }
            Literal::Boolean(b) => write!(f, "{b}"),
        }
    }
}
