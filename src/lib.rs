//! envrepl - replace `${VAR}` placeholders in files
//!
//! envrepl is a CLI tool and library that substitutes `${KEY}` and
//! `${KEY:default}` placeholders in arbitrary text files with values from the
//! process environment or a properties file.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, exit statuses, reporting)
//! - `config`: Engine options and `.envreplrc.json` loading
//! - `core`: Placeholder scanner and substitution engine
//! - `files`: Target resolution, backups and atomic file rewriting
//! - `properties`: `.properties` file parsing
//!
//! ## Example
//!
//! ```
//! use envrepl::config::EngineOptions;
//! use envrepl::core::{Engine, VariableSource};
//! use envrepl::properties::Properties;
//!
//! let properties: Properties = [("HOST", "db.local")].into_iter().collect();
//! let engine = Engine::new(VariableSource::properties(properties), EngineOptions::default());
//!
//! assert_eq!(
//!     engine.process_line("url=${HOST}:${PORT:5432}").unwrap(),
//!     "url=db.local:5432"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod files;
pub mod properties;
