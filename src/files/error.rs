use std::{io, path::PathBuf};

use thiserror::Error;

use crate::core::SubstitutionError;

/// Why a file could not be rewritten.
///
/// Each variant maps to a distinct exit status, see `cli::ExitStatus`.
#[derive(Debug, Error)]
pub enum ReplaceError {
    #[error("Invalid path: \"{0}\"")]
    InvalidPath(String),

    /// A destination that another entry also reads or writes.
    #[error("Invalid path: {} (used by more than one entry)", .0.display())]
    OverlappingTarget(PathBuf),

    #[error("Invalid path: {} (File not found)", .0.display())]
    FileNotFound(PathBuf),

    #[error("Backup file exists and force backup mode is disabled. File: {}", .0.display())]
    BackupExists(PathBuf),

    #[error("Backup file is not writable: {}", .0.display())]
    BackupNotWritable(PathBuf),

    /// A required placeholder had no usable value. The file was left untouched.
    #[error("{error} ({}:{line})", path.display())]
    RequiredVariable {
        path: PathBuf,
        line: usize,
        error: SubstitutionError,
    },

    /// A line never reached a fixpoint.
    #[error("Internal error at {}:{line}: {error}", path.display())]
    Internal {
        path: PathBuf,
        line: usize,
        error: SubstitutionError,
    },

    #[error("{action}: {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReplaceError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Wrap a line-level substitution failure with its file location.
    pub fn substitution(path: impl Into<PathBuf>, line: usize, error: SubstitutionError) -> Self {
        let path = path.into();
        match error {
            SubstitutionError::RequiredVariableMissing { .. }
            | SubstitutionError::InvalidUnicode { .. } => {
                Self::RequiredVariable { path, line, error }
            }
            SubstitutionError::ConvergenceExceeded { .. } => Self::Internal { path, line, error },
        }
    }
}
