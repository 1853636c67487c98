use std::fmt;

use crate::ast::Literal;

/// Lexical token of the filter language.
///
/// Literal tokens are decoded at lex time, so the parser never looks at raw
/// literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Scalar literal: integer, float, quoted string or boolean
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -0.5
    /// 'adam'
    /// "adam"
    /// TRUE
    /// ```
    Scalar(Literal),

    /// Bracketed list literal, decoded element by element
    ///
    /// # Examples
    /// ```text
    /// [1, 2, 3]
    /// ['sgd', 'adam',]
    /// []
    /// ```
    List(Vec<Literal>),

    // Identifiers
    /// Dotted field path, kept as raw text
    ///
    /// Segments are runs of letters, digits and underscores joined by single dots.
    ///
    /// # Examples
    /// ```text
    /// seed
    /// config.model.num_layers
    /// info.logger.log_id
    /// ```
    Identifier(String),

    /// Membership keyword (`in`, case-sensitive)
    In,

    // Comparison
    /// Equality operator
    EqEq,

    /// Inequality operator
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Logical
    /// Logical AND (`&`)
    Ampersand,

    /// Logical OR (`|`)
    Pipe,

    /// Logical NOT (`~`)
    Tilde,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Scalar(lit) => write!(f, "{lit}"),
            Token::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Token::Identifier(name) => write!(f, "{name}"),
            Token::In => write!(f, "in"),
            Token::EqEq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::LtEq => write!(f, "<="),
            Token::GtEq => write!(f, ">="),
            Token::Ampersand => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Tilde => write!(f, "~"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

impl Spanned {
    pub fn new(token: Token, position: usize) -> Self {
        Spanned { token, position }
    }
}
