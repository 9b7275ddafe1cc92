//! File-level orchestration around the substitution engine.
//!
//! - `targets`: turning path entries into validated [`Target`]s
//! - `rewrite`: backup, temp-file write and rename for one file
//!
//! Files are independent of each other and are processed in parallel.

mod error;
pub mod rewrite;
pub mod targets;

use rayon::prelude::*;

pub use error::ReplaceError;
pub use rewrite::{FileReport, LineTrace, RewriteOptions, rewrite_file};
pub use targets::{BackupMode, Target, collect_targets, validate_targets};

use crate::core::Engine;

/// Rewrite every target in parallel.
///
/// Results come back in the order of `targets`. A failing file never affects
/// the others.
pub fn rewrite_all(
    targets: &[Target],
    engine: &Engine,
    options: RewriteOptions,
) -> Vec<Result<FileReport, ReplaceError>> {
    targets
        .par_iter()
        .map(|target| rewrite_file(target, engine, options))
        .collect()
}
