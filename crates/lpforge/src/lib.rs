//! LPForge - A Tableau Simplex Solver in Rust
//!
//! Describe a linear program, pick a method (or let LPForge pick one) and
//! read the outcome, the solution, and the step trace off the result.
//!
//! # Example
//!
//! ```rust
//! use lpforge::prelude::*;
//!
//! let problem = Problem::builder(Direction::Maximize, vec![3.0, 2.0])
//!     .constraint(vec![2.0, 1.0], Relation::LessEqual, 6.0)
//!     .constraint(vec![1.0, 2.0], Relation::LessEqual, 8.0)
//!     .build()
//!     .unwrap();
//!
//! let result = lpforge::solve(&problem, &SolverConfig::default()).unwrap();
//! assert_eq!(result.method, Method::Direct);
//! assert_eq!(result.status(), SolveStatus::Optimal);
//! ```

// Problem model and results
pub use lpforge_core::{
    Diagnostics, Direction, Infeasibility, LpError, Method, OptimalSolution, Outcome, Problem,
    ProblemBuilder, Relation, Result, ResultReport, Sensitivity, SolveResult, SolveStatus, Stage,
    StandardFormViolation, TableauSnapshot, Trace, TraceEvent, VariableKind, VariableSlot,
};

// Configuration
pub use lpforge_config::{ConfigError, EnteringRule, SolverConfig, TraceLevel};

// Solver entry points
pub use lpforge_solver::{compare_methods, MethodComparison, SpecialCaseAnalyzer};

#[cfg(feature = "console")]
pub mod console;

/// Lower-level solver building blocks.
pub mod engine {
    pub use lpforge_solver::{
        strategy, Basis, BigMMethod, BuiltTableau, DirectMethod, EngineOutcome, EngineRun,
        NormalizedRow, ObjectiveMode, PivotEngine, SolveMethod, SolveScope, Tableau,
        TableauBuilder, TraceRecorder, TwoPhaseMethod,
    };
}

/// Solves `problem` with the configured method, or the recommended one.
///
/// With the `console` feature enabled the colored console output is
/// initialized on first use.
pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<SolveResult> {
    #[cfg(feature = "console")]
    console::init();
    lpforge_solver::solve_default(problem, config)
}

/// Solves `problem` with a specific method.
pub fn solve_with(problem: &Problem, method: Method, config: &SolverConfig) -> Result<SolveResult> {
    #[cfg(feature = "console")]
    console::init();
    lpforge_solver::solve(problem, method, config)
}

pub mod prelude {
    pub use super::{
        Direction, LpError, Method, Outcome, Problem, Relation, SolveResult, SolveStatus,
    };
    pub use super::{EnteringRule, SolverConfig, TraceLevel};
}
