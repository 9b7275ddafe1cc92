use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".envreplrc.json";

/// Options the substitution engine reads for every placeholder.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    strip_prefix: Option<String>,
    include_prefixes: Option<Vec<String>>,
}

impl EngineOptions {
    /// Empty strings are ignored: an empty strip prefix strips nothing and an
    /// empty include list disables filtering.
    pub fn new(
        strip_prefix: Option<String>,
        include_prefixes: impl IntoIterator<Item = String>,
    ) -> Self {
        let include_prefixes: Vec<String> = include_prefixes
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();

        Self {
            strip_prefix: strip_prefix.filter(|p| !p.is_empty()),
            include_prefixes: (!include_prefixes.is_empty()).then_some(include_prefixes),
        }
    }

    pub fn strip_prefix(&self) -> Option<&str> {
        self.strip_prefix.as_deref()
    }

    pub fn include_prefixes(&self) -> Option<&[String]> {
        self.include_prefixes.as_deref()
    }

    /// Whether a placeholder with this key should be resolved at all.
    pub fn includes(&self, key: &str) -> bool {
        match &self.include_prefixes {
            Some(prefixes) => prefixes.iter().any(|p| key.starts_with(p.as_str())),
            None => true,
        }
    }

    /// The name to look the key up under, with the strip prefix removed.
    pub fn lookup_key<'a>(&self, key: &'a str) -> &'a str {
        self.strip_prefix
            .as_deref()
            .and_then(|prefix| key.strip_prefix(prefix))
            .unwrap_or(key)
    }
}

/// Project-level defaults read from `.envreplrc.json`.
///
/// Every field can be overridden on the command line.
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Resolve placeholders from this properties file instead of the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<String>,
    #[serde(default)]
    pub filter_prefixes: Vec<String>,
    #[serde(default)]
    pub backup: bool,
    #[serde(default)]
    pub force_backup: bool,
}

impl Config {
    /// Resolve `properties_file` against the directory the config was found in.
    pub fn properties_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.properties_file
            .as_ref()
            .map(|file| config_dir.join(file))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file, or the start directory for defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            let base_dir = path
                .parent()
                .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
