//! Error types for LPForge

use thiserror::Error;

/// Main error type for LPForge operations.
///
/// Only structurally invalid input is an error. Infeasible, unbounded and
/// iteration-limited solves are reported through [`crate::Outcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LpError {
    /// Mismatched dimensions between objective, matrix, relations and RHS
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// A coefficient or right-hand side is NaN or infinite
    #[error("Non-finite value in {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    /// A direction, relation or method name could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for LPForge operations
pub type Result<T> = std::result::Result<T, LpError>;
