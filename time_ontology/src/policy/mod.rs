//! Validation policy and validator configuration.
//!
//! Enforcement strictness is an explicit value handed to the validator, never a
//! process-wide switch.
//!
//! ```
//! use time_ontology::{StandardRule, ValidationPolicy, ValidatorConfig};
//!
//! let config = ValidatorConfig::from_toml(
//!     r#"
//!     policy = "warning_only"
//!     standard_rules = ["interval_well_formedness"]
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.policy, ValidationPolicy::WarningOnly);
//! assert_eq!(config.standard_rules, vec![StandardRule::IntervalWellFormedness]);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// How violations found by the validator are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Violations are reported as errors.
    #[default]
    Strict,
    /// Every violation is downgraded to a warning.
    WarningOnly,
}

/// Built-in validator rules over temporal facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardRule {
    /// Interval beginnings must not come after their ends.
    IntervalWellFormedness,
    /// Interval endpoints should carry a timestamp.
    IntervalCompleteness,
    /// Asserted relations must agree with the declared timestamps.
    AssertedRelations,
}

impl StandardRule {
    pub const ALL: [StandardRule; 3] = [
        StandardRule::IntervalWellFormedness,
        StandardRule::IntervalCompleteness,
        StandardRule::AssertedRelations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StandardRule::IntervalWellFormedness => "interval_well_formedness",
            StandardRule::IntervalCompleteness => "interval_completeness",
            StandardRule::AssertedRelations => "asserted_relations",
        }
    }
}

impl std::fmt::Display for StandardRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

/// Upper bound for a dedicated validator thread pool.
pub const MAX_VALIDATOR_THREADS: usize = 256;

/// Configuration for the temporal validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Reporting policy. Default: strict.
    pub policy: ValidationPolicy,
    /// Standard rules enabled at construction. Default: none.
    pub standard_rules: Vec<StandardRule>,
    /// Worker threads for rule fan-out; 0 uses the global pool. Default: 0.
    pub threads: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            policy: ValidationPolicy::Strict,
            standard_rules: Vec::new(),
            threads: 0,
        }
    }
}

impl ValidatorConfig {
    /// Configuration with every standard rule enabled.
    pub fn all_standard_rules() -> Self {
        Self {
            standard_rules: StandardRule::ALL.to_vec(),
            ..Self::default()
        }
    }

    /// Set the policy.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ValidatorConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: ValidatorConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads > MAX_VALIDATOR_THREADS {
            return Err(ConfigError::ValidationFailed {
                field: "threads".to_string(),
                message: format!("must be at most {MAX_VALIDATOR_THREADS}"),
            });
        }
        Ok(())
    }
}
