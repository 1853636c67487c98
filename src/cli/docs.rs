//! Documentation content for sift CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Literals,
    Semantics,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" | "precedence" => Some(Self::Operators),
            "literals" | "literal" | "values" => Some(Self::Literals),
            "semantics" | "evaluation" | "missing" => Some(Self::Semantics),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SIFT DOCUMENTATION

Sift is a filter language for selecting records (nested JSON documents such as
experiment-run metadata). A filter is a single line combining comparisons on
dotted field paths with &, | and ~.

  sift check "config.lr <= 0.01 & info.status == 'COMPLETE'" --input runs.json

CATEGORIES
  syntax      Field paths, comparisons, membership, grouping
  operators   Operators and their precedence
  literals    Numbers, strings, booleans and lists
  semantics   Missing fields, type mismatches, equality rules

Run 'sift doc <category>' for details.
"#
}

/// Get documentation content for a category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX),
        Some(DocCategory::Operators) => Ok(OPERATORS),
        Some(DocCategory::Literals) => Ok(LITERALS),
        Some(DocCategory::Semantics) => Ok(SEMANTICS),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX: &str = r#"SYNTAX

Field paths
  Letters, digits and underscores, segments joined by single dots:
    seed    config.model.num_layers    info.logger.log_id

Comparison (field on the left, literal on the right)
  config.seed == 3
  config.lr < 0.1

Membership
  config.dataset in ['mnist', 'cifar10']

Combinators
  a == 1 & b == 2      both
  a == 1 | b == 2      either
  ~a == 1              not
  (a == 1 | b == 2) & c == 3
"#;

const OPERATORS: &str = r#"OPERATORS

Comparison   ==  !=  <  >  <=  >=
Membership   in
Logical      &   (and)
             |   (or)
             ~   (not)

Precedence, tightest first
  1. comparison / membership
  2. ~
  3. &   (left-associative)
  4. |   (left-associative)

  ~a==1 & b==2         is   (~(a==1)) & (b==2)
  a==1 | b==2 & c==3   is   a==1 | (b==2 & c==3)

Parentheses reset precedence.
"#;

const LITERALS: &str = r#"LITERALS

Integers   3   -7   +12
Floats     0.5   -1.25        (digits on both sides of the dot)
Strings    'adam'   "adam"   (no escape sequences)
Booleans   true   FALSE   True   (case-insensitive)
Lists      [1, 2, 3]   ['sgd', 'adam',]   []
           (list elements are literals; no nested lists)
"#;

const SEMANTICS: &str = r#"SEMANTICS

Missing fields
  A comparison or membership test on a missing field is false.
  {}  against  x == 1     -> false
  {}  against  ~(x == 1)  -> true

Type mismatches are never errors
  {"n": "abc"}  against  n < 5   -> false
  Values of different kinds are unequal: "1" != 1, true != 1.

Numbers
  Integers and floats compare as numbers: 1 == 1.0.

Ordering
  <, >, <=, >= compare numbers with numbers and strings with strings.
  Anything else (booleans, nulls, lists, objects) is false.

Membership
  tag in ['a', 'b']  is true when tag equals one of the elements
  (same equality as ==, no coercion: "1" is not in [1, 2]).
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_resolves() {
        for name in ["syntax", "ops", "literals", "semantics"] {
            assert!(get_doc_category(name).is_ok(), "missing docs for {name}");
        }
        assert!(matches!(
            get_doc_category("nope"),
            Err(CliError::UnknownCategory(_))
        ));
    }
}
