//! LPForge Core - Core types for tableau Simplex solving
//!
//! This crate provides the fundamental abstractions for LPForge:
//! - Problem types for describing linear programs in canonical form
//! - Variable slots identifying every tableau column
//! - Outcome types carrying the status-specific payload of a solve
//! - Trace events recording what a solve did, step by step

pub mod error;
pub mod method;
pub mod problem;
pub mod result;
pub mod trace;
pub mod variable;

pub use error::{LpError, Result};
pub use method::Method;
pub use problem::{Direction, Problem, ProblemBuilder, Relation};
pub use result::{
    Diagnostics, Infeasibility, OptimalSolution, Outcome, ResultReport, Sensitivity, SolveResult,
    SolveStatus, StandardFormViolation,
};
pub use trace::{Stage, TableauSnapshot, Trace, TraceEvent};
pub use variable::{VariableKind, VariableSlot};
