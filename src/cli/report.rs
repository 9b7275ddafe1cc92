//! Report formatting and printing utilities.
//!
//! Diagnostics go to stderr, traces and the summary to stdout. Each printer
//! has a `_to` variant taking a writer so output can be tested.

use std::{
    error::Error,
    io::{self, Write},
};

use colored::Colorize;

use crate::files::{FileReport, LineTrace, ReplaceError};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print an error, with its cause chain when `debug` is set.
pub fn print_error(err: &(dyn Error + 'static), debug: bool) {
    print_error_to(err, debug, &mut io::stderr().lock());
}

pub fn print_error_to<W: Write>(err: &(dyn Error + 'static), debug: bool, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", "error:".bold().red(), err);
    if !debug {
        return;
    }
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(writer, "  {} {}", "caused by:".dimmed(), cause);
        source = cause.source();
    }
}

/// Print an `anyhow` error; `{:#}` already joins the context chain.
pub fn print_anyhow_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".bold().red(), err);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".bold().yellow(), message);
}

pub fn print_debug(message: &str, debug: bool) {
    if debug {
        eprintln!("{} {}", "debug:".dimmed(), message);
    }
}

/// Print `input : ...` / `output: ...` pairs for each traced line.
pub fn print_trace_to<W: Write>(trace: &[LineTrace], writer: &mut W) {
    for line in trace {
        let _ = writeln!(writer, "input : {}", line.input);
        let _ = writeln!(writer, "output: {}", line.output);
    }
}

/// Print the debug notes for a rewritten file.
pub fn print_file_report_to<W: Write>(report: &FileReport, writer: &mut W) {
    let target = &report.target;
    if let Some(backup) = &report.backup {
        let _ = writeln!(
            writer,
            "{} Backup of {} written to {}",
            "debug:".dimmed(),
            target.origin.display(),
            backup.display()
        );
    }
    let _ = writeln!(
        writer,
        "{} Moving tmp file from: {} to: {}",
        "debug:".dimmed(),
        target.temp_path().display(),
        target.destination.display()
    );
    let _ = writeln!(
        writer,
        "{} {}: {} of {} {} changed",
        "debug:".dimmed(),
        target.origin.display(),
        report.changed_lines,
        report.line_count,
        if report.line_count == 1 { "line" } else { "lines" }
    );
}

/// Print one line per failed file.
pub fn print_failures_to<W: Write>(failures: &[&ReplaceError], debug: bool, writer: &mut W) {
    for err in failures {
        print_error_to(*err, debug, writer);
    }
}

/// Print the final summary line.
pub fn print_summary_to<W: Write>(succeeded: usize, failed: usize, changed_lines: usize, writer: &mut W) {
    let files = |n: usize| if n == 1 { "file" } else { "files" };

    if failed == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Processed {} {} ({} {} changed)",
                succeeded,
                files(succeeded),
                changed_lines,
                if changed_lines == 1 { "line" } else { "lines" }
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} of {} {} failed",
            FAILURE_MARK.red(),
            failed,
            succeeded + failed,
            files(succeeded + failed)
        );
    }
}
