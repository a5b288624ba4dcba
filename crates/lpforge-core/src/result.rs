//! Solve results.
//!
//! A solve produces a [`SolveResult`] whose [`Outcome`] is a tagged variant:
//! the solution vector and objective value exist only on the optimal arm,
//! the unbounded column only on the unbounded arm, and so on.

use std::fmt;

use crate::method::Method;
use crate::problem::Relation;
use crate::trace::{Stage, Trace};
use crate::variable::VariableSlot;

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SolveStatus {
    Optimal,
    Unbounded,
    Infeasible,
    IterationLimit,
    NotStandardForm,
}

impl SolveStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::IterationLimit => "iteration_limit",
            SolveStatus::NotStandardForm => "not_standard_form",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotations of an optimal tableau. Neither changes the status.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Basic variables sitting at zero.
    pub degenerate: Vec<VariableSlot>,
    /// Non-basic variables with zero reduced cost.
    pub alternative_optima: Vec<VariableSlot>,
}

impl Diagnostics {
    pub fn is_degenerate(&self) -> bool {
        !self.degenerate.is_empty()
    }

    pub fn has_alternative_optima(&self) -> bool {
        !self.alternative_optima.is_empty()
    }
}

/// Shadow prices and reduced costs read off the optimal tableau.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sensitivity {
    /// Change of the optimal value per unit increase of each RHS, in the
    /// caller's row orientation. `None` for equality and redundant rows.
    pub shadow_prices: Vec<Option<f64>>,
    /// Objective-row entry of each original variable.
    pub reduced_costs: Vec<f64>,
}

/// Payload of an optimal solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimalSolution {
    /// Value of each original variable.
    pub values: Vec<f64>,
    pub objective_value: f64,
    /// Basic variable of each surviving constraint row.
    pub basis: Vec<VariableSlot>,
    pub diagnostics: Diagnostics,
    pub sensitivity: Sensitivity,
}

/// Evidence that no feasible point exists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Infeasibility {
    /// Sum of the artificial values left at termination.
    pub residual: f64,
    /// Basic artificials with a positive value.
    pub artificials: Vec<(VariableSlot, f64)>,
}

/// Why the direct method refused a row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StandardFormViolation {
    /// The row is `>=` or `=`.
    Relation(Relation),
    /// The row is `<=` but its RHS is negative, so its slack cannot start basic.
    NegativeRhs(f64),
}

impl fmt::Display for StandardFormViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardFormViolation::Relation(relation) => {
                write!(f, "relation {relation} needs an artificial variable")
            }
            StandardFormViolation::NegativeRhs(rhs) => {
                write!(f, "right-hand side {rhs} is negative")
            }
        }
    }
}

/// Status-specific result of a solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", rename_all = "snake_case")
)]
pub enum Outcome {
    Optimal(OptimalSolution),
    /// The objective improves without bound as `column` increases.
    Unbounded { column: VariableSlot },
    Infeasible(Infeasibility),
    IterationLimit { stage: Stage, iterations: usize },
    /// The direct method does not apply; use Big-M or Two-Phase.
    NotStandardForm {
        row: usize,
        violation: StandardFormViolation,
    },
}

impl Outcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            Outcome::Optimal(_) => SolveStatus::Optimal,
            Outcome::Unbounded { .. } => SolveStatus::Unbounded,
            Outcome::Infeasible(_) => SolveStatus::Infeasible,
            Outcome::IterationLimit { .. } => SolveStatus::IterationLimit,
            Outcome::NotStandardForm { .. } => SolveStatus::NotStandardForm,
        }
    }
}

/// Everything a solve returns.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub method: Method,
    pub outcome: Outcome,
    pub trace: Trace,
    /// Pivots performed across all stages.
    pub iterations: usize,
}

impl SolveResult {
    pub fn status(&self) -> SolveStatus {
        self.outcome.status()
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self.outcome, Outcome::Optimal(_))
    }

    pub fn optimal(&self) -> Option<&OptimalSolution> {
        match &self.outcome {
            Outcome::Optimal(solution) => Some(solution),
            _ => None,
        }
    }

    /// Values of the original variables, present iff optimal.
    pub fn solution(&self) -> Option<&[f64]> {
        self.optimal().map(|s| s.values.as_slice())
    }

    pub fn optimal_value(&self) -> Option<f64> {
        self.optimal().map(|s| s.objective_value)
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.optimal().map(|s| &s.diagnostics)
    }

    /// Flattens the result into the collaborator-facing shape.
    pub fn report(&self) -> ResultReport {
        ResultReport {
            status: self.status(),
            solution: self.solution().map(<[f64]>::to_vec),
            optimal_value: self.optimal_value(),
            trace: self.trace.lines(),
        }
    }
}

/// Collaborator-facing result: status, optional solution and value, and
/// the rendered trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultReport {
    pub status: SolveStatus,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub solution: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub optimal_value: Option<f64>,
    pub trace: Vec<String>,
}
