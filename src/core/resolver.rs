//! Turns one scanned placeholder into a rewritten line.

use std::collections::HashMap;

use super::{
    error::SubstitutionError,
    provider::VariableProvider,
    scanner::Span,
    token::{ESCAPED_BRACE_SENTINEL, SKIPPED_REGION_SENTINEL, fresh_token},
};
use crate::config::EngineOptions;

/// The two-character escape for a literal closing brace.
pub const ESCAPED_CLOSE: &str = "\\}";

/// Tokens parked in a line while it is being processed, keyed by token.
///
/// Both tables live for one line only and are drained by the restoration
/// pass before the line is emitted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SideTables {
    /// Token -> literal `}`.
    pub escaped_braces: HashMap<String, String>,
    /// Token -> verbatim placeholder text that was filtered out.
    pub skipped_regions: HashMap<String, String>,
}

impl SideTables {
    pub fn is_empty(&self) -> bool {
        self.escaped_braces.is_empty() && self.skipped_regions.is_empty()
    }
}

/// Result of resolving one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The placeholder was replaced by its value or default.
    Replaced(String),
    /// The placeholder was filtered out and parked behind a skip token.
    Deferred(String),
}

impl Outcome {
    pub fn into_line(self) -> String {
        match self {
            Outcome::Replaced(line) | Outcome::Deferred(line) => line,
        }
    }
}

/// Resolve the placeholder at `span` and return the rewritten line.
///
/// Keys that do not match the include filter are parked verbatim in
/// `tables.skipped_regions`. Otherwise the key (minus the strip prefix) is
/// looked up in `provider`, falling back to the written default. A key with
/// no default and no value fails with
/// [`SubstitutionError::RequiredVariableMissing`]; lookup errors from the
/// provider are passed through.
pub fn resolve(
    span: &Span,
    line: &str,
    options: &EngineOptions,
    provider: &impl VariableProvider,
    tables: &mut SideTables,
) -> Result<Outcome, SubstitutionError> {
    let key = span.key(line);

    if !options.includes(key) {
        let token = fresh_token(SKIPPED_REGION_SENTINEL, line);
        let rewritten = span.splice(line, &token);
        tables
            .skipped_regions
            .insert(token, span.raw(line).to_string());
        return Ok(Outcome::Deferred(rewritten));
    }

    let value = match (provider.lookup(options.lookup_key(key))?, span.default_value(line)) {
        (Some(value), _) => value,
        (None, Some(default)) => default.to_string(),
        (None, None) => {
            return Err(SubstitutionError::RequiredVariableMissing {
                key: key.to_string(),
            });
        }
    };

    let value = if span.had_escaped_end || value.contains(ESCAPED_CLOSE) {
        park_escaped_braces(&value, line, &mut tables.escaped_braces)
    } else {
        value
    };

    Ok(Outcome::Replaced(span.splice(line, &value)))
}

/// Replace every `\}` in `value` with a fresh token mapped to `}`.
///
/// The tokens keep the brace away from the scanner until the line converges.
fn park_escaped_braces(value: &str, line: &str, table: &mut HashMap<String, String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(idx) = rest.find(ESCAPED_CLOSE) {
        let token = fresh_token(ESCAPED_BRACE_SENTINEL, line);
        out.push_str(&rest[..idx]);
        out.push_str(&token);
        table.insert(token, "}".to_string());
        rest = &rest[idx + ESCAPED_CLOSE.len()..];
    }
    out.push_str(rest);

    out
}
