//! Options controlling how filter expressions are compiled.

use std::path::Path;

use serde::Deserialize;

use crate::{
    ast::Expr,
    error::{FilterError, Result},
    parser::DEFAULT_MAX_DEPTH,
};

/// Compile-time options for [`crate::compile_filter_with`].
///
/// Deserializable from JSON; omitted fields keep their defaults.
///
/// ```
/// use sift_lang::FilterOptions;
///
/// let options = FilterOptions::from_json_str(r#"{"searchable_prefixes": ["config."]}"#).unwrap();
/// assert_eq!(options.searchable_prefixes, ["config."]);
/// assert_eq!(options.max_depth, FilterOptions::default().max_depth);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    /// When non-empty, every field path must start with one of these.
    pub searchable_prefixes: Vec<String>,
    /// Deepest nesting accepted by the parser.
    pub max_depth: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            searchable_prefixes: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FilterOptions {
    /// Restricts queries to run metadata (`info.`) and run configuration (`config.`).
    pub fn experiment_defaults() -> Self {
        FilterOptions {
            searchable_prefixes: vec!["info.".to_string(), "config.".to_string()],
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| FilterError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn is_searchable(&self, key: &str) -> bool {
        self.searchable_prefixes.is_empty()
            || self.searchable_prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }

    /// Rejects the first field path outside the searchable prefixes.
    pub fn check_keys(&self, expr: &Expr) -> Result<()> {
        for path in expr.field_paths() {
            let key = path.dotted();
            if !self.is_searchable(&key) {
                return Err(FilterError::InvalidKey {
                    key,
                    allowed: self.searchable_prefixes.clone(),
                });
            }
        }
        Ok(())
    }
}
