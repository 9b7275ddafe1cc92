use thiserror::Error;

use super::engine::MAX_ITERATIONS;

/// Errors raised while substituting placeholders in a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    /// A `${KEY}` without default whose key resolved to nothing.
    #[error("Environment Variable {key} is required")]
    RequiredVariableMissing { key: String },

    /// The variable is set, but its value is not valid UTF-8.
    #[error("Environment Variable {key} is not valid unicode")]
    InvalidUnicode { key: String },

    /// The line still contained a placeholder after the iteration cap.
    #[error(
        "Error processing line, no fixpoint after {max} substitutions: {line}",
        max = MAX_ITERATIONS
    )]
    ConvergenceExceeded { line: String },
}
