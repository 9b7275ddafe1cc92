//! Fixpoint driver: scan, resolve, repeat until the line is clean.

use super::{
    error::SubstitutionError,
    provider::VariableSource,
    resolver::{SideTables, resolve},
    restore::restore,
    scanner::scan,
};
use crate::config::EngineOptions;

/// Maximum number of placeholders resolved or deferred in a single line.
pub const MAX_ITERATIONS: usize = 99;

/// Working state of one line between the first scan and the final restore.
#[derive(Debug)]
struct LineState {
    line: String,
    tables: SideTables,
    iterations: usize,
}

/// Substitution engine: an immutable variable source plus options, shared by
/// every line and file of a run.
///
/// `Engine` is `Sync`, so files can be processed in parallel against a
/// single instance.
#[derive(Debug, Clone)]
pub struct Engine {
    source: VariableSource,
    options: EngineOptions,
}

impl Engine {
    pub fn new(source: VariableSource, options: EngineOptions) -> Self {
        Self { source, options }
    }

    /// Substitute every placeholder in a single line.
    ///
    /// One placeholder is handled per iteration, leftmost first. Filtered
    /// placeholders and escaped braces are parked behind tokens until no
    /// live placeholder remains, then restored.
    ///
    /// # Errors
    ///
    /// - [`SubstitutionError::RequiredVariableMissing`] when a `${KEY}` has
    ///   no value and no default.
    /// - [`SubstitutionError::ConvergenceExceeded`] when the line still holds
    ///   a placeholder after [`MAX_ITERATIONS`] rewrites.
    pub fn process_line(&self, line: &str) -> Result<String, SubstitutionError> {
        let mut state = LineState {
            line: line.to_string(),
            tables: SideTables::default(),
            iterations: 0,
        };

        while let Some(span) = scan(&state.line) {
            let outcome = resolve(
                &span,
                &state.line,
                &self.options,
                &self.source,
                &mut state.tables,
            )?;
            state.line = outcome.into_line();

            state.iterations += 1;
            if state.iterations > MAX_ITERATIONS {
                return Err(SubstitutionError::ConvergenceExceeded {
                    line: line.to_string(),
                });
            }
        }

        Ok(restore(state.line, &mut state.tables))
    }

    /// Substitute every line of `text`, keeping each line's terminator.
    ///
    /// Stops at the first failing line; `Err` carries its 1-based number.
    pub fn process_text(&self, text: &str) -> Result<String, (usize, SubstitutionError)> {
        self.process_text_with(text, |_, _| {})
    }

    /// Like [`Engine::process_text`], calling `inspect` with the input and
    /// output of every line once it has been substituted.
    pub fn process_text_with<F>(
        &self,
        text: &str,
        mut inspect: F,
    ) -> Result<String, (usize, SubstitutionError)>
    where
        F: FnMut(&str, &str),
    {
        let mut out = String::with_capacity(text.len());
        for (idx, (line, ending)) in split_lines(text).enumerate() {
            let processed = self.process_line(line).map_err(|e| (idx + 1, e))?;
            inspect(line, &processed);
            out.push_str(&processed);
            out.push_str(ending);
        }
        Ok(out)
    }
}

/// Split `text` into `(line, terminator)` pairs.
///
/// The terminator is `"\r\n"`, `"\n"`, or `""` for a final line without one.
/// An empty text yields no lines.
fn split_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.split_inclusive('\n').map(|chunk| {
        if let Some(line) = chunk.strip_suffix("\r\n") {
            (line, "\r\n")
        } else if let Some(line) = chunk.strip_suffix('\n') {
            (line, "\n")
        } else {
            (chunk, "")
        }
    })
}
