use std::process::ExitCode;

use crate::files::ReplaceError;

/// Exit status of the CLI. Every failure category has its own code so
/// scripts can tell a missing variable apart from an I/O problem.
///
/// | code | status |
/// |------|--------|
/// | 0    | success |
/// | 1    | invalid arguments or configuration |
/// | 2    | invalid path entry |
/// | 3    | file not found |
/// | 4    | backup file already exists |
/// | 5    | required variable missing or not valid unicode |
/// | 6    | I/O error (read, write, backup, rename) |
/// | 70   | internal error (line never converged) |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    InvalidArguments,
    InvalidPath,
    FileNotFound,
    BackupExists,
    /// A `${KEY}` without default could not be resolved.
    VariableRequired,
    IoError,
    /// Substitution did not converge.
    Internal,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::InvalidArguments => 1,
            ExitStatus::InvalidPath => 2,
            ExitStatus::FileNotFound => 3,
            ExitStatus::BackupExists => 4,
            ExitStatus::VariableRequired => 5,
            ExitStatus::IoError => 6,
            ExitStatus::Internal => 70,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<&ReplaceError> for ExitStatus {
    fn from(err: &ReplaceError) -> Self {
        match err {
            ReplaceError::InvalidPath(_) | ReplaceError::OverlappingTarget(_) => {
                ExitStatus::InvalidPath
            }
            ReplaceError::FileNotFound(_) => ExitStatus::FileNotFound,
            ReplaceError::BackupExists(_) => ExitStatus::BackupExists,
            ReplaceError::RequiredVariable { .. } => ExitStatus::VariableRequired,
            ReplaceError::BackupNotWritable(_) | ReplaceError::Io { .. } => ExitStatus::IoError,
            ReplaceError::Internal { .. } => ExitStatus::Internal,
        }
    }
}
