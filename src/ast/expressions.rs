use std::fmt;

use serde::Serialize;

use crate::ast::{CompareOp, Literal};

/// Dot-separated location of a value inside a record.
///
/// # Examples
/// ```text
/// seed                   // ["seed"]
/// config.model.depth     // ["config", "model", "depth"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Splits dotted text into segments.
    ///
    /// Returns `None` when a segment is empty or contains anything other
    /// than ASCII letters, digits and underscores, or when the whole path
    /// would read back as a literal or `in` (`12`, `1.5`, `true`).
    pub fn parse(text: &str) -> Option<Self> {
        if crate::lexer::is_reserved_word(text) {
            return None;
        }
        let segments: Vec<String> = text.split('.').map(str::to_string).collect();
        let valid = segments.iter().all(|s| {
            !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
        valid.then_some(FieldPath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path joined back with dots.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.dotted()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// Abstract Syntax Tree node of a filter expression.
///
/// The tree is owned top-down: every combinator owns its children, there is
/// no sharing between nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node")]
pub enum Expr {
    /// Field compared against a scalar literal
    ///
    /// # Example
    /// ```text
    /// config.lr <= 0.01
    /// ```
    Comparison {
        field: FieldPath,
        op: CompareOp,
        value: Literal,
    },

    /// Field tested against a list of literals
    ///
    /// # Example
    /// ```text
    /// config.dataset in ['mnist', 'cifar10']
    /// ```
    Membership {
        field: FieldPath,
        values: Vec<Literal>,
    },

    /// Logical conjunction (`&`)
    And { left: Box<Expr>, right: Box<Expr> },

    /// Logical disjunction (`|`)
    Or { left: Box<Expr>, right: Box<Expr> },

    /// Logical negation (`~`)
    Not { operand: Box<Expr> },
}

impl Expr {
    pub fn comparison(field: FieldPath, op: CompareOp, value: Literal) -> Self {
        Expr::Comparison { field, op, value }
    }

    pub fn membership(field: FieldPath, values: Vec<Literal>) -> Self {
        Expr::Membership { field, values }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not {
            operand: Box::new(operand),
        }
    }

    /// Height of the tree; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Comparison { .. } | Expr::Membership { .. } => 1,
            Expr::And { left, right } | Expr::Or { left, right } => {
                1 + left.depth().max(right.depth())
            }
            Expr::Not { operand } => 1 + operand.depth(),
        }
    }

    /// Every field path referenced by the expression, left to right.
    pub fn field_paths(&self) -> Vec<&FieldPath> {
        let mut paths = Vec::new();
        self.collect_paths(&mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a FieldPath>) {
        match self {
            Expr::Comparison { field, .. } | Expr::Membership { field, .. } => out.push(field),
            Expr::And { left, right } | Expr::Or { left, right } => {
                left.collect_paths(out);
                right.collect_paths(out);
            }
            Expr::Not { operand } => operand.collect_paths(out),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::print_expr(self))
    }
}
