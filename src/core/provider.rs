//! Variable sources a placeholder key can be resolved against.
//!
//! Exactly one source is active for a run. A properties table never falls
//! back to the process environment.

use std::env;

use enum_dispatch::enum_dispatch;

use super::error::SubstitutionError;
use crate::properties::Properties;

/// Resolves a key name to its value, if any.
#[enum_dispatch]
pub trait VariableProvider {
    /// `Ok(None)` means the key is not set.
    fn lookup(&self, key: &str) -> Result<Option<String>, SubstitutionError>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentProvider;

impl VariableProvider for EnvironmentProvider {
    /// A variable that is set but not valid UTF-8 is an error, not a miss.
    fn lookup(&self, key: &str) -> Result<Option<String>, SubstitutionError> {
        // Empty keys are never valid variable names
        if key.is_empty() {
            return Ok(None);
        }
        env::var_os(key)
            .map(|value| {
                value
                    .into_string()
                    .map_err(|_| SubstitutionError::InvalidUnicode {
                        key: key.to_string(),
                    })
            })
            .transpose()
    }
}

/// Reads a preloaded properties table.
#[derive(Debug, Clone, Default)]
pub struct PropertiesProvider {
    properties: Properties,
}

impl PropertiesProvider {
    pub fn new(properties: Properties) -> Self {
        Self { properties }
    }
}

impl VariableProvider for PropertiesProvider {
    fn lookup(&self, key: &str) -> Result<Option<String>, SubstitutionError> {
        Ok(self.properties.get(key).map(str::to_string))
    }
}

/// The variable source selected for a run.
#[enum_dispatch(VariableProvider)]
#[derive(Debug, Clone)]
pub enum VariableSource {
    Environment(EnvironmentProvider),
    Properties(PropertiesProvider),
}

impl VariableSource {
    pub fn environment() -> Self {
        Self::Environment(EnvironmentProvider)
    }

    pub fn properties(properties: Properties) -> Self {
        Self::Properties(PropertiesProvider::new(properties))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Environment(_) => "environment",
            Self::Properties(_) => "properties",
        }
    }
}
