//! Run filter expressions against JSON input

use serde_json::Value as Json;
use tracing::{debug, info};

use super::CliError;
use crate::{FilterError, FilterOptions, Parser, Predicate, compile_filter_with, tokenize};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter expression to run
    pub query: String,
    /// JSON input: an array of records, one record, or JSON Lines
    pub input: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    /// Print the syntax tree instead of executing
    pub ast: bool,
    /// Compilation options (searchable prefixes, depth limit)
    pub filter: FilterOptions,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax is valid; carries the canonical form of the expression
    SyntaxValid(String),
    /// The syntax tree as JSON
    Ast(Json),
    /// Records of an input array that matched
    Matches(Vec<Json>),
    /// Verdict for a single input record
    Verdict(bool),
    /// Matching lines of JSON Lines input, verbatim
    Lines(Vec<String>),
}

/// Execute a sift check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.ast {
        let tokens = tokenize(&options.query).map_err(FilterError::from)?;
        let expr = Parser::new(tokens)
            .with_max_depth(options.filter.max_depth)
            .parse()
            .map_err(FilterError::from)?;
        options.filter.check_keys(&expr)?;
        return Ok(CheckResult::Ast(serde_json::to_value(&expr)?));
    }

    let predicate = compile_filter_with(&options.query, &options.filter)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid(predicate.to_string()));
    }

    let input = options.input.as_deref().ok_or(CliError::NoInput)?;

    match serde_json::from_str::<Json>(input) {
        Ok(Json::Array(records)) => {
            let total = records.len();
            let matched: Vec<Json> = predicate.select(records).collect();
            info!(total, matched = matched.len(), "filtered records");
            Ok(CheckResult::Matches(matched))
        }
        Ok(record) => Ok(CheckResult::Verdict(predicate.matches(&record))),
        Err(e) if input.lines().filter(|l| !l.trim().is_empty()).count() > 1 => {
            debug!(error = %e, "input is not a single JSON value, reading JSON Lines");
            filter_lines(&predicate, input).map(CheckResult::Lines)
        }
        Err(e) => Err(CliError::Json(e)),
    }
}

fn filter_lines(predicate: &Predicate, input: &str) -> Result<Vec<String>, CliError> {
    let mut matched = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: Json = serde_json::from_str(line).map_err(|source| CliError::JsonLine {
            line: index + 1,
            source,
        })?;
        if predicate.matches(&record) {
            matched.push(line.to_string());
        }
    }
    Ok(matched)
}
