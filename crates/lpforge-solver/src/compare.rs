//! Solving one problem with every method.

use lpforge_config::SolverConfig;
use lpforge_core::{Method, Problem, Result, SolveResult, SolveStatus};
use rayon::prelude::*;
use tracing::info;

use crate::method::solve;

/// Results of [`compare_methods`], in [`Method::ALL`] order.
#[derive(Debug, Clone)]
pub struct MethodComparison {
    results: Vec<SolveResult>,
}

impl MethodComparison {
    pub fn results(&self) -> &[SolveResult] {
        &self.results
    }

    pub fn get(&self, method: Method) -> Option<&SolveResult> {
        self.results.iter().find(|r| r.method == method)
    }

    /// Results of the methods that applied to the problem.
    pub fn applicable(&self) -> impl Iterator<Item = &SolveResult> {
        self.results
            .iter()
            .filter(|r| r.status() != SolveStatus::NotStandardForm)
    }

    /// True if every applicable method reached the same status and, when
    /// optimal, optimal values within `tolerance` of each other.
    pub fn agree(&self, tolerance: f64) -> bool {
        let mut applicable = self.applicable();
        let Some(first) = applicable.next() else {
            return true;
        };
        applicable.all(|other| {
            if other.status() != first.status() {
                return false;
            }
            match (first.optimal_value(), other.optimal_value()) {
                (Some(a), Some(b)) => (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0),
                _ => true,
            }
        })
    }
}

/// Solves `problem` with every method in parallel.
///
/// Each method builds its own tableau, so the solves share nothing but the
/// read-only problem and configuration.
///
/// # Errors
///
/// Returns an error if the problem is malformed.
pub fn compare_methods(problem: &Problem, config: &SolverConfig) -> Result<MethodComparison> {
    problem.validate()?;
    let results = Method::ALL[..]
        .par_iter()
        .map(|&method| solve(problem, method, config))
        .collect::<Result<Vec<_>>>()?;

    let comparison = MethodComparison { results };
    info!(
        event = "compare_end",
        methods = comparison.results.len(),
        applicable = comparison.applicable().count(),
        agree = comparison.agree(config.tolerance.sqrt()),
    );
    Ok(comparison)
}
