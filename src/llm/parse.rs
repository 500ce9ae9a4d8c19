//! Parsing of free-text LLM output into structured results.
//!
//! The gateway returns untyped text; anything the workflow needs structure
//! from goes through an explicit fallible parse step here instead of being
//! assumed well-formed.

use crate::error::{RedlineError, Result};

/// Parse a rule-extraction response into one rule per non-blank line.
///
/// Lines are trimmed and blank lines dropped, mirroring how paragraphs are
/// segmented. An output with no usable lines is a parse error, not an empty
/// success: the workflow must not persist a zero-rule batch silently.
pub fn parse_rule_lines(raw: &str) -> Result<Vec<String>> {
    let rules: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if rules.is_empty() {
        return Err(RedlineError::Parse(
            "rule extraction returned no rules".to_string(),
        ));
    }

    Ok(rules)
}
