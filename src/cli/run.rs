use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::{
    args::{Arguments, Command, ReplaceArgs},
    exit_status::ExitStatus,
    report,
};
use crate::{
    config::{CONFIG_FILE_NAME, Config, EngineOptions, default_config_json, load_config},
    core::{Engine, VariableSource},
    files::{
        BackupMode, ReplaceError, RewriteOptions, collect_targets, rewrite_all, validate_targets,
    },
    properties::load_properties,
};

/// Main entry point for the envrepl CLI.
///
/// Dispatches to `init` or to the default replace command and turns every
/// failure into its documented [`ExitStatus`].
pub fn run(Arguments { command, replace }: Arguments) -> ExitStatus {
    match command {
        Some(Command::Init) => init(),
        None => replace_files(replace),
    }
}

fn init() -> ExitStatus {
    match write_default_config(Path::new(CONFIG_FILE_NAME)) {
        Ok(()) => {
            println!(
                "{} Created {}",
                report::SUCCESS_MARK,
                CONFIG_FILE_NAME
            );
            ExitStatus::Success
        }
        Err(err) => {
            report::print_anyhow_error(&err);
            ExitStatus::InvalidArguments
        }
    }
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    fs::write(path, default_config_json()? + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Settings for one run after merging the config file with CLI flags.
#[derive(Debug, Default, PartialEq, Eq)]
struct Settings {
    properties: Option<PathBuf>,
    options: EngineOptions,
    backup: BackupMode,
}

impl Settings {
    /// CLI flags win over the config file; backup flags are OR-ed.
    fn merge(args: &ReplaceArgs, config: &Config, config_dir: &Path) -> Self {
        let properties = args
            .properties
            .clone()
            .or_else(|| config.properties_path(config_dir));
        let strip_prefix = args.strip_prefix.clone().or_else(|| config.strip_prefix.clone());
        let filter_prefixes = if args.filter_prefixes.is_empty() {
            config.filter_prefixes.clone()
        } else {
            args.filter_prefixes.clone()
        };

        Self {
            properties,
            options: EngineOptions::new(strip_prefix, filter_prefixes),
            backup: BackupMode::from_flags(
                args.backup || config.backup,
                args.force_backup || config.force_backup,
            ),
        }
    }
}

fn load_settings(args: &ReplaceArgs) -> Result<Settings> {
    if args.no_config {
        return Ok(Settings::merge(args, &Config::default(), Path::new(".")));
    }

    let cwd = env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(&cwd)?;
    if loaded.from_file {
        report::print_debug(
            &format!("Using {}", loaded.base_dir.join(CONFIG_FILE_NAME).display()),
            args.debug(),
        );
    }
    Ok(Settings::merge(args, &loaded.config, &loaded.base_dir))
}

fn build_engine(settings: &Settings, debug: bool) -> Result<Engine> {
    let source = match &settings.properties {
        Some(path) => {
            let properties = load_properties(path)?;
            if properties.is_empty() {
                report::print_warning(&format!(
                    "Properties file {} has no entries",
                    path.display()
                ));
            }
            report::print_debug(
                &format!(
                    "Loaded {} properties from {}",
                    properties.len(),
                    path.display()
                ),
                debug,
            );
            VariableSource::properties(properties)
        }
        None => VariableSource::environment(),
    };

    report::print_debug(
        &format!("Resolving variables from the {}", source.name()),
        debug,
    );
    Ok(Engine::new(source, settings.options.clone()))
}

fn replace_files(args: ReplaceArgs) -> ExitStatus {
    let debug = args.debug();

    if !args.has_inputs() {
        Arguments::print_help();
        return ExitStatus::InvalidArguments;
    }

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            report::print_anyhow_error(&err);
            return ExitStatus::InvalidArguments;
        }
    };

    let engine = match build_engine(&settings, debug) {
        Ok(engine) => engine,
        Err(err) => {
            report::print_anyhow_error(&err);
            return ExitStatus::IoError;
        }
    };

    let targets = match collect_targets(&args.paths, &args.sources)
        .and_then(|targets| validate_targets(&targets, settings.backup).map(|()| targets))
    {
        Ok(targets) => targets,
        Err(err) => {
            report::print_error(&err, debug);
            return ExitStatus::from(&err);
        }
    };

    let options = RewriteOptions {
        backup: settings.backup,
        trace: args.trace,
    };
    let results = rewrite_all(&targets, &engine, options);

    let stdout = &mut io::stdout().lock();
    let stderr = &mut io::stderr().lock();

    let mut failures: Vec<&ReplaceError> = Vec::new();
    let mut changed_lines = 0;
    for result in &results {
        match result {
            Ok(file) => {
                report::print_trace_to(&file.trace, stdout);
                if debug {
                    report::print_file_report_to(file, stderr);
                }
                changed_lines += file.changed_lines;
            }
            Err(err) => failures.push(err),
        }
    }

    report::print_failures_to(&failures, debug, stderr);
    let _ = stderr.flush();
    report::print_summary_to(
        results.len() - failures.len(),
        failures.len(),
        changed_lines,
        stdout,
    );

    failures
        .first()
        .map_or(ExitStatus::Success, |err| ExitStatus::from(*err))
}
