//! Canonical text form of filter expressions.
//!
//! The printer emits the fewest parentheses that keep the tree shape, so
//! printing and re-parsing an expression yields an equal tree.
//!
//! # Limits
//!
//! Every tree the parser produces round-trips. Hand-built trees can hold
//! literals the lexer never produces, and those print but do not read back:
//!
//! - non-finite floats (`NaN`, infinities)
//! - a string containing both quote styles
//! - a string containing `]` inside a list literal, since a list ends at its
//!   first `]`
//!
//! # Features
//!
//! - **Spaced output** via [`print_expr()`] - one space around binary operators
//! - **Compact output** via [`print_expr_compact()`] - no optional whitespace
//!
//! # Examples
//!
//! ```
//! use sift_lang::parse_str;
//! use sift_lang::printer::{print_expr, print_expr_compact};
//!
//! let expr = parse_str("(a==1|b==2)&~c in [1,2]").unwrap();
//!
//! assert_eq!(print_expr(&expr), "(a == 1 | b == 2) & ~c in [1, 2]");
//! assert_eq!(print_expr_compact(&expr), "(a==1|b==2)&~c in [1,2]");
//! ```

use crate::ast::{Expr, Literal};

/// Binding strength, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Or,
    And,
    Not,
    Leaf,
}

fn precedence(expr: &Expr) -> Precedence {
    match expr {
        Expr::Or { .. } => Precedence::Or,
        Expr::And { .. } => Precedence::And,
        Expr::Not { .. } => Precedence::Not,
        Expr::Comparison { .. } | Expr::Membership { .. } => Precedence::Leaf,
    }
}

pub struct ExprPrinter {
    spaced: bool,
}

impl ExprPrinter {
    pub fn new(spaced: bool) -> Self {
        ExprPrinter { spaced }
    }

    pub fn print(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.write_expr(expr, &mut out);
        out
    }

    fn write_expr(&self, expr: &Expr, out: &mut String) {
        match expr {
            Expr::Comparison { field, op, value } => {
                out.push_str(&field.dotted());
                self.write_operator(op.symbol(), out);
                out.push_str(&value.to_string());
            }
            Expr::Membership { field, values } => {
                out.push_str(&field.dotted());
                out.push_str(" in ");
                self.write_list(values, out);
            }
            Expr::And { left, right } => self.write_binary(expr, left, "&", right, out),
            Expr::Or { left, right } => self.write_binary(expr, left, "|", right, out),
            Expr::Not { operand } => {
                out.push('~');
                // Unary chains (`~~a==1`) need no parentheses.
                self.write_operand(operand, precedence(operand) < Precedence::Not, out);
            }
        }
    }

    /// Both operators are left-associative: a right operand of the same
    /// precedence must be parenthesized to survive a re-parse.
    fn write_binary(&self, parent: &Expr, left: &Expr, symbol: &str, right: &Expr, out: &mut String) {
        let own = precedence(parent);
        self.write_operand(left, precedence(left) < own, out);
        self.write_operator(symbol, out);
        self.write_operand(right, precedence(right) <= own, out);
    }

    fn write_operand(&self, expr: &Expr, parenthesize: bool, out: &mut String) {
        if parenthesize {
            out.push('(');
            self.write_expr(expr, out);
            out.push(')');
        } else {
            self.write_expr(expr, out);
        }
    }

    fn write_operator(&self, symbol: &str, out: &mut String) {
        if self.spaced {
            out.push(' ');
            out.push_str(symbol);
            out.push(' ');
        } else {
            out.push_str(symbol);
        }
    }

    fn write_list(&self, values: &[Literal], out: &mut String) {
        let separator = if self.spaced { ", " } else { "," };
        let items: Vec<String> = values.iter().map(Literal::to_string).collect();
        out.push('[');
        out.push_str(&items.join(separator));
        out.push(']');
    }
}

/// Canonical spaced form, also used by `Display for Expr`.
pub fn print_expr(expr: &Expr) -> String {
    ExprPrinter::new(true).print(expr)
}

pub fn print_expr_compact(expr: &Expr) -> String {
    ExprPrinter::new(false).print(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    fn canonical(input: &str) -> String {
        print_expr(&parse_str(input).unwrap())
    }

    #[test]
    fn test_minimal_parentheses() {
        assert_eq!(canonical("((a==1))"), "a == 1");
        assert_eq!(canonical("(a==1 & b==2) | c==3"), "a == 1 & b == 2 | c == 3");
        assert_eq!(canonical("a==1 & (b==2 | c==3)"), "a == 1 & (b == 2 | c == 3)");
    }

    #[test]
    fn test_right_nested_same_operator_keeps_group() {
        assert_eq!(canonical("a==1 & (b==2 & c==3)"), "a == 1 & (b == 2 & c == 3)");
        assert_eq!(canonical("(a==1 | b==2) | c==3"), "a == 1 | b == 2 | c == 3");
    }

    #[test]
    fn test_not_forms() {
        assert_eq!(canonical("~(a==1)"), "~a == 1");
        assert_eq!(canonical("~~a==1"), "~~a == 1");
        assert_eq!(canonical("~(a==1 & b==2)"), "~(a == 1 & b == 2)");
    }
}
