//! Configuration system for LPForge.
//!
//! Load solver configuration from TOML or YAML files to control numeric
//! tolerances, iteration caps, the Big-M penalty and the pivoting rule
//! without code changes. The configuration is a plain value passed into
//! every solve; the solver keeps no global settings.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use lpforge_config::{EnteringRule, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     tolerance = 1e-9
//!     iteration_limit = 250
//!     entering_rule = "bland_on_degeneracy"
//! "#).unwrap();
//!
//! assert_eq!(config.iteration_limit, 250);
//! assert_eq!(config.entering_rule, EnteringRule::BlandOnDegeneracy);
//! assert_eq!(config.big_m, 1e6);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use lpforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("lpforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use lpforge_core::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default zero tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default pivot cap per phase.
pub const DEFAULT_ITERATION_LIMIT: usize = 100;

/// Default Big-M penalty.
pub const DEFAULT_BIG_M: f64 = 1e6;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Zero tolerance used by every comparison in the engine.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum number of pivots per phase.
    #[serde(default = "default_iteration_limit")]
    pub iteration_limit: usize,

    /// Penalty on artificial variables for the Big-M method.
    ///
    /// Fixed, independent of the problem's coefficient magnitudes.
    #[serde(default = "default_big_m")]
    pub big_m: f64,

    /// Entering-column policy.
    #[serde(default)]
    pub entering_rule: EnteringRule,

    /// How much of the solve is recorded in the result trace.
    #[serde(default)]
    pub trace: TraceLevel,

    /// Method used when the caller does not pick one.
    #[serde(default)]
    pub method: Option<Method>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_iteration_limit() -> usize {
    DEFAULT_ITERATION_LIMIT
}

fn default_big_m() -> f64 {
    DEFAULT_BIG_M
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            big_m: DEFAULT_BIG_M,
            entering_rule: EnteringRule::default(),
            trace: TraceLevel::default(),
            method: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`SolverConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the numeric settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.iteration_limit == 0 {
            return Err(ConfigError::Invalid(
                "iteration_limit must be at least 1".to_string(),
            ));
        }
        if !self.big_m.is_finite() || self.big_m <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "big_m must be positive and finite, got {}",
                self.big_m
            )));
        }
        Ok(())
    }

    /// Sets the zero tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the pivot cap per phase.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Sets the Big-M penalty.
    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.big_m = big_m;
        self
    }

    /// Sets the entering-column policy.
    pub fn with_entering_rule(mut self, rule: EnteringRule) -> Self {
        self.entering_rule = rule;
        self
    }

    /// Sets the trace level.
    pub fn with_trace(mut self, trace: TraceLevel) -> Self {
        self.trace = trace;
        self
    }

    /// Sets the default method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }
}

/// Entering-column policy of the pivoting engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnteringRule {
    /// Most negative (max) or most positive (min) reduced cost.
    #[default]
    Dantzig,

    /// Lowest-index improving column on every step.
    Bland,

    /// Dantzig, except on steps taken from a degenerate basis.
    BlandOnDegeneracy,
}

/// Amount of detail recorded in the result trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceLevel {
    /// No trace events.
    Off,

    /// Lifecycle, pivot and diagnostic events.
    #[default]
    Steps,

    /// Steps plus a tableau snapshot after each pivot.
    Tableaux,
}
