//! # Sift Filter Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the Sift filter
//! language, a single-line boolean expression language for selecting
//! experiment-run records (nested key/value documents).
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[literal]** - Literal constants (integers, floats, strings, booleans)
//! - **[operators]** - Comparison operators
//! - **[expressions]** - Field paths and the expression tree itself
//!
//! ## Quick Start
//!
//! ```text
//! config.optimizer.lr <= 0.01 & info.status == 'COMPLETE'
//! ```
//!
//! This filter keeps runs with a small learning rate that finished.
//!
//! ## Core Concepts
//!
//! ### Leaves
//!
//! Every leaf of the tree is anchored on a dotted field path on the left and
//! a literal on the right:
//!
//! - **Comparison** `path op literal` with `op` one of `== != < > <= >=`
//! - **Membership** `path in [literal, ...]`
//!
//! ### Combinators
//!
//! From tightest to loosest binding:
//!
//! - **Not** `~expr`
//! - **And** `expr & expr` (left-associative)
//! - **Or** `expr | expr` (left-associative)
//!
//! Parentheses reset precedence.
//!
//! ## Examples
//!
//! ### Membership
//!
//! ```text
//! config.dataset in ['mnist', 'cifar10']
//! ```
//!
//! ### Negation
//!
//! ```text
//! ~(config.seed in [0, 1]) | info.status != 'FAILED'
//! ```
pub mod expressions;
pub mod literal;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, FieldPath};
pub use literal::Literal;
pub use operators::CompareOp;
pub use tokens::{Spanned, Token};
