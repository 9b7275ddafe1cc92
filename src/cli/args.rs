//! CLI argument definitions using clap.
//!
//! Running `envrepl <PATHS>` rewrites files in place; `envrepl init` writes a
//! default `.envreplrc.json`.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub replace: ReplaceArgs,
}

impl Arguments {
    /// Print help to stderr when there is nothing to do.
    pub fn print_help() {
        let help = Self::command().render_help();
        eprintln!("{}", help);
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Initialize a new .envreplrc.json configuration file
    Init,
}

/// Arguments of the default (replace) command.
#[derive(Debug, Clone, Default, Args)]
pub struct ReplaceArgs {
    /// Files to rewrite: comma-separated paths, glob patterns or ORIGIN:TARGET pairs
    #[arg(value_delimiter = ',')]
    pub paths: Vec<String>,

    /// Read additional path entries from FILE, one per line (comma-separated list)
    #[arg(short, long = "source", value_name = "FILE", value_delimiter = ',')]
    pub sources: Vec<PathBuf>,

    /// Resolve placeholders from a properties file instead of the environment
    #[arg(short, long, value_name = "PROPERTIES_FILE")]
    pub properties: Option<PathBuf>,

    /// Copy each file to FILE.bak before rewriting it
    #[arg(short, long)]
    pub backup: bool,

    /// Like --backup, but overwrite existing .bak files
    #[arg(long)]
    pub force_backup: bool,

    /// Prefix removed from keys before looking them up
    #[arg(long, value_name = "PREFIX")]
    pub strip_prefix: Option<String>,

    /// Only resolve placeholders whose key starts with one of these prefixes
    #[arg(long = "filter-prefix", value_name = "PREFIXES", value_delimiter = ',')]
    pub filter_prefixes: Vec<String>,

    /// Print debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Print every line before and after substitution (implies --debug)
    #[arg(short, long)]
    pub trace: bool,

    /// Ignore .envreplrc.json
    #[arg(long)]
    pub no_config: bool,
}

impl ReplaceArgs {
    pub fn debug(&self) -> bool {
        self.debug || self.trace
    }

    pub fn has_inputs(&self) -> bool {
        !self.paths.is_empty() || !self.sources.is_empty()
    }
}
