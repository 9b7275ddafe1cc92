//! Resolving command-line path entries into files to rewrite.
//!
//! An entry is either a path, a glob pattern, or an `origin:target` pair
//! that writes the result of `origin` to `target` instead of in place.

use std::{
    collections::HashSet,
    fs::{self, File},
    path::{Component, Path, PathBuf},
};

use glob::glob;

use super::error::ReplaceError;

/// One file to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// File to read.
    pub origin: PathBuf,
    /// File to write; equal to `origin` unless remapped.
    pub destination: PathBuf,
}

impl Target {
    pub fn in_place(path: PathBuf) -> Self {
        Self {
            destination: path.clone(),
            origin: path,
        }
    }

    pub fn is_remapped(&self) -> bool {
        self.origin != self.destination
    }

    /// `<origin>.bak`
    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.origin, ".bak")
    }

    /// `<destination>.tmp`, next to the destination so the final rename
    /// stays on one filesystem.
    pub fn temp_path(&self) -> PathBuf {
        with_suffix(&self.destination, ".tmp")
    }
}

/// Backup behaviour for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackupMode {
    #[default]
    Off,
    /// Copy to `.bak`; an existing backup is an error.
    Create,
    /// Copy to `.bak`, overwriting an existing backup.
    Force,
}

impl BackupMode {
    pub fn from_flags(backup: bool, force: bool) -> Self {
        match (backup, force) {
            (_, true) => Self::Force,
            (true, false) => Self::Create,
            (false, false) => Self::Off,
        }
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Lexically normalize a path: drop `.` components, fold `..` into the
/// preceding component and strip any trailing separator.
pub fn normalize_path(path: &str) -> PathBuf {
    let mut out = PathBuf::new();

    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Parse one path entry into targets.
///
/// Glob patterns expand to every matching file and must match at least one.
pub fn parse_entry(entry: &str) -> Result<Vec<Target>, ReplaceError> {
    if entry.is_empty() {
        return Err(ReplaceError::InvalidPath(entry.to_string()));
    }

    if let Some((origin, destination)) = entry.split_once(':') {
        if origin.is_empty() || destination.is_empty() {
            return Err(ReplaceError::InvalidPath(entry.to_string()));
        }
        return Ok(vec![Target {
            origin: normalize_path(origin),
            destination: normalize_path(destination),
        }]);
    }

    if !is_glob_pattern(entry) {
        return Ok(vec![Target::in_place(normalize_path(entry))]);
    }

    let paths = glob(entry).map_err(|_| ReplaceError::InvalidPath(entry.to_string()))?;
    let mut targets: Vec<Target> = paths
        .flatten()
        .filter(|path| path.is_file())
        .map(|path| Target::in_place(normalize_path(&path.to_string_lossy())))
        .collect();

    if targets.is_empty() {
        return Err(ReplaceError::FileNotFound(PathBuf::from(entry)));
    }
    targets.sort_by(|a, b| a.origin.cmp(&b.origin));
    Ok(targets)
}

/// Read path entries from a list file, one per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_source_file(path: &Path) -> Result<Vec<String>, ReplaceError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReplaceError::FileNotFound(path.to_path_buf()),
        _ => ReplaceError::io("Error reading from file", path, e),
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Collect targets from direct entries followed by the entries listed in
/// each source file. Duplicate origins keep their first occurrence.
///
/// Files run in parallel, so a destination may be written by one target
/// only and must not be read as the origin of another.
pub fn collect_targets(entries: &[String], sources: &[PathBuf]) -> Result<Vec<Target>, ReplaceError> {
    let mut all_entries: Vec<String> = entries.to_vec();
    for source in sources {
        let normalized = normalize_path(&source.to_string_lossy());
        all_entries.extend(read_source_file(&normalized)?);
    }

    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for entry in &all_entries {
        for target in parse_entry(entry)? {
            if seen.insert(target.origin.clone()) {
                targets.push(target);
            }
        }
    }

    check_overlaps(&targets)?;
    Ok(targets)
}

fn check_overlaps(targets: &[Target]) -> Result<(), ReplaceError> {
    let origins: HashSet<&Path> = targets.iter().map(|t| t.origin.as_path()).collect();
    let mut destinations = HashSet::new();

    for target in targets {
        let destination = target.destination.as_path();
        let shared = !destinations.insert(destination)
            || (target.is_remapped() && origins.contains(destination));
        if shared {
            return Err(ReplaceError::OverlappingTarget(destination.to_path_buf()));
        }
    }

    Ok(())
}

/// Check every target before any file is touched.
pub fn validate_targets(targets: &[Target], backup: BackupMode) -> Result<(), ReplaceError> {
    for target in targets {
        let readable = File::open(&target.origin)
            .and_then(|file| file.metadata())
            .is_ok_and(|meta| meta.is_file());
        if !readable {
            return Err(ReplaceError::FileNotFound(target.origin.clone()));
        }

        if backup == BackupMode::Off {
            continue;
        }
        let backup_path = target.backup_path();
        let Ok(meta) = fs::metadata(&backup_path) else {
            continue;
        };
        match backup {
            BackupMode::Create => return Err(ReplaceError::BackupExists(backup_path)),
            BackupMode::Force if meta.permissions().readonly() => {
                return Err(ReplaceError::BackupNotWritable(backup_path));
            }
            _ => {}
        }
    }

    Ok(())
}
