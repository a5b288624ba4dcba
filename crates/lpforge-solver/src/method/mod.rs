//! Solve methods built on the pivot engine.
//!
//! - [`DirectMethod`]: canonical `<=` problems with a feasible slack basis
//! - [`BigMMethod`]: one pass with penalized artificial variables
//! - [`TwoPhaseMethod`]: feasibility pass, cleanup, optimization pass

mod big_m;
mod direct;
mod scope;
mod two_phase;

pub use big_m::BigMMethod;
pub use direct::{standard_form_violation, DirectMethod};
pub use scope::{EngineRunSummary, SolveScope};
pub use two_phase::TwoPhaseMethod;

use std::fmt::Debug;
use std::time::Instant;

use lpforge_config::SolverConfig;
use lpforge_core::{Method, Outcome, Problem, Result, SolveResult, SolveStatus, TraceEvent};
use tracing::{info, warn};

/// A strategy that turns a problem into an [`Outcome`].
///
/// Implementations drive the pivot engine through a [`SolveScope`], which
/// owns the trace and the iteration count for the solve.
pub trait SolveMethod: Send + Sync + Debug {
    /// Runs the method. Only malformed input is an error.
    fn solve(&self, scope: &mut SolveScope<'_>) -> Result<Outcome>;

    /// Returns which [`Method`] this strategy implements.
    fn method(&self) -> Method;
}

/// Returns the strategy implementing `method`.
pub fn strategy(method: Method) -> &'static dyn SolveMethod {
    match method {
        Method::Direct => &DirectMethod,
        Method::BigM => &BigMMethod,
        Method::TwoPhase => &TwoPhaseMethod,
    }
}

/// Solves `problem` with `method`.
///
/// # Errors
///
/// Returns an error only if the problem is malformed. Unbounded, infeasible
/// and similar terminations are reported in the result's outcome.
///
/// # Examples
///
/// ```
/// use lpforge_config::SolverConfig;
/// use lpforge_core::{Direction, Method, Problem, Relation};
/// use lpforge_solver::solve;
///
/// let problem = Problem::builder(Direction::Maximize, vec![3.0, 2.0])
///     .constraint(vec![2.0, 1.0], Relation::LessEqual, 6.0)
///     .constraint(vec![1.0, 2.0], Relation::LessEqual, 8.0)
///     .build()
///     .unwrap();
///
/// let result = solve(&problem, Method::Direct, &SolverConfig::default()).unwrap();
/// assert!(result.is_optimal());
/// assert!((result.optimal_value().unwrap() - 32.0 / 3.0).abs() < 1e-9);
/// ```
pub fn solve(problem: &Problem, method: Method, config: &SolverConfig) -> Result<SolveResult> {
    problem.validate()?;

    let start = Instant::now();
    info!(
        event = "solve_start",
        method = %method,
        direction = %problem.direction(),
        variables = problem.num_variables(),
        constraints = problem.num_constraints(),
    );

    let mut scope = SolveScope::new(problem, config);
    scope.record(TraceEvent::Started {
        method,
        direction: problem.direction(),
        variables: problem.num_variables(),
        constraints: problem.num_constraints(),
    });

    let outcome = strategy(method).solve(&mut scope)?;
    let status = outcome.status();
    scope.record(TraceEvent::Finished { status });

    let duration_ms = start.elapsed().as_millis() as u64;
    if status == SolveStatus::Optimal {
        info!(
            event = "solve_end",
            method = %method,
            status = %status,
            iterations = scope.iterations(),
            duration_ms = duration_ms,
        );
    } else {
        warn!(
            event = "solve_end",
            method = %method,
            status = %status,
            iterations = scope.iterations(),
            duration_ms = duration_ms,
        );
    }

    let (trace, iterations) = scope.finish();
    Ok(SolveResult {
        method,
        outcome,
        trace,
        iterations,
    })
}

/// Solves with the configured method, or the recommended one when unset.
pub fn solve_default(problem: &Problem, config: &SolverConfig) -> Result<SolveResult> {
    let method = config
        .method
        .unwrap_or_else(|| Method::recommended_for(problem));
    solve(problem, method, config)
}
