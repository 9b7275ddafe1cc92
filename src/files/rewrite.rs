//! Rewriting a single file through the substitution engine.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{
    error::ReplaceError,
    targets::{BackupMode, Target},
};
use crate::core::Engine;

/// Input and output of one line, kept for `--trace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTrace {
    pub input: String,
    pub output: String,
}

/// What happened to one successfully rewritten file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub target: Target,
    pub line_count: usize,
    /// Lines whose text differs after substitution.
    pub changed_lines: usize,
    pub backup: Option<PathBuf>,
    /// Per-line trace, empty unless tracing was requested.
    pub trace: Vec<LineTrace>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    pub backup: BackupMode,
    pub trace: bool,
}

/// Substitute every line of `target.origin` and write the result to
/// `target.destination`.
///
/// The whole file is transformed in memory first. If any line fails, nothing
/// is written: no backup, no temp file, and the original stays as it was.
/// On success the optional backup is taken, the output is written to a temp
/// file next to the destination and renamed over it.
pub fn rewrite_file(
    target: &Target,
    engine: &Engine,
    options: RewriteOptions,
) -> Result<FileReport, ReplaceError> {
    let content = fs::read_to_string(&target.origin)
        .map_err(|e| ReplaceError::io("Error reading from file", &target.origin, e))?;

    let mut trace = Vec::new();
    let mut line_count = 0;
    let mut changed_lines = 0;

    let output = engine
        .process_text_with(&content, |input, output| {
            line_count += 1;
            if input != output {
                changed_lines += 1;
            }
            if options.trace {
                trace.push(LineTrace {
                    input: input.to_string(),
                    output: output.to_string(),
                });
            }
        })
        .map_err(|(line, e)| ReplaceError::substitution(&target.origin, line, e))?;

    let backup = match options.backup {
        BackupMode::Off => None,
        mode => Some(create_backup(target, mode)?),
    };

    write_atomically(&output, target)?;

    Ok(FileReport {
        target: target.clone(),
        line_count,
        changed_lines,
        backup,
        trace,
    })
}

fn create_backup(target: &Target, mode: BackupMode) -> Result<PathBuf, ReplaceError> {
    let backup_path = target.backup_path();
    if mode == BackupMode::Create && backup_path.exists() {
        return Err(ReplaceError::BackupExists(backup_path));
    }

    fs::copy(&target.origin, &backup_path)
        .map_err(|e| ReplaceError::io("Error during backup of file", &target.origin, e))?;
    Ok(backup_path)
}

/// Write to `<destination>.tmp`, then rename onto the destination.
///
/// The origin's permissions are carried over so rewriting an executable
/// script keeps it executable.
fn write_atomically(content: &str, target: &Target) -> Result<(), ReplaceError> {
    let temp_path = target.temp_path();

    let result = fs::write(&temp_path, content)
        .map_err(|e| ReplaceError::io("Error writing to file", &temp_path, e))
        .and_then(|()| copy_permissions(&target.origin, &temp_path))
        .and_then(|()| {
            fs::rename(&temp_path, &target.destination)
                .map_err(|e| ReplaceError::io("Error moving tmp file", &temp_path, e))
        });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn copy_permissions(from: &Path, to: &Path) -> Result<(), ReplaceError> {
    let permissions = fs::metadata(from)
        .map_err(|e| ReplaceError::io("Error reading from file", from, e))?
        .permissions();
    fs::set_permissions(to, permissions)
        .map_err(|e| ReplaceError::io("Error writing to file", to, e))
}
