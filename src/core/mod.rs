//! Placeholder substitution engine.
//!
//! A line flows through a fixpoint loop:
//!
//! 1. [`scanner`] finds the leftmost complete `${KEY}` / `${KEY:default}`.
//! 2. [`resolver`] replaces it with a value or default, or parks it behind a
//!    token when the include filter rejects the key.
//! 3. [`engine`] repeats until no placeholder is left, then [`restore`] puts
//!    the parked tokens back.
//!
//! Nothing here touches the filesystem; [`provider`] lookups are in-memory
//! reads (or `std::env`).

pub mod charset;
pub mod engine;
pub mod error;
pub mod provider;
pub mod resolver;
pub mod restore;
pub mod scanner;
pub mod token;

pub use charset::is_key_char;
pub use engine::{Engine, MAX_ITERATIONS};
pub use error::SubstitutionError;
pub use provider::{EnvironmentProvider, PropertiesProvider, VariableProvider, VariableSource};
pub use resolver::{Outcome, SideTables};
pub use scanner::{Span, scan};
