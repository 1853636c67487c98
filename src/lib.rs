pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod value;

use tracing::debug;

pub use ast::{CompareOp, Expr, FieldPath, Literal, Spanned, Token};
pub use config::FilterOptions;
pub use error::{FilterError, LexError, ParseError};
pub use evaluator::{AsDocument, Predicate, compile};
pub use lexer::{Lexer, tokenize};
pub use parser::{Parser, parse, parse_str};
pub use value::{Document, Scalar, Value};

/// Compiles a filter expression with default options.
///
/// Sequences tokenize, parse and compile; the first error aborts.
pub fn compile_filter(expression: &str) -> Result<Predicate, FilterError> {
    compile_filter_with(expression, &FilterOptions::default())
}

/// Compiles a filter expression, enforcing `options`.
pub fn compile_filter_with(
    expression: &str,
    options: &FilterOptions,
) -> Result<Predicate, FilterError> {
    let result = build(expression, options);
    if let Err(e) = &result {
        debug!(expression, error = %e, "rejected filter expression");
    }
    result
}

fn build(expression: &str, options: &FilterOptions) -> Result<Predicate, FilterError> {
    let tokens = tokenize(expression)?;
    let token_count = tokens.len();
    let expr = Parser::new(tokens)
        .with_max_depth(options.max_depth)
        .parse()?;
    options.check_keys(&expr)?;
    debug!(expression, token_count, depth = expr.depth(), "compiled filter expression");
    Ok(compile(expr))
}

/// Like [`compile_filter_with`], but a blank query selects every record.
pub fn compile_selection(
    expression: &str,
    options: &FilterOptions,
) -> Result<Predicate, FilterError> {
    if expression.trim().is_empty() {
        return Ok(Predicate::always());
    }
    compile_filter_with(expression, options)
}
