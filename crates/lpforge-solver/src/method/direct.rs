//! Direct Simplex for canonical problems.

use lpforge_core::{Method, Outcome, Problem, Relation, Result, Stage, StandardFormViolation};

use super::{SolveMethod, SolveScope};
use crate::builder::ObjectiveMode;

/// Simplex started from the all-slack basis.
///
/// Applies only when every row is `<=` with a non-negative RHS. Anything
/// else yields [`Outcome::NotStandardForm`] naming the first offending row.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMethod;

impl SolveMethod for DirectMethod {
    fn solve(&self, scope: &mut SolveScope<'_>) -> Result<Outcome> {
        let problem = scope.problem();
        if let Some((row, violation)) = standard_form_violation(problem) {
            return Ok(Outcome::NotStandardForm { row, violation });
        }

        let built = scope.build(ObjectiveMode::Real, Stage::Single)?;
        let mut tableau = built.tableau;
        let run = scope.run(&mut tableau, problem.direction(), Stage::Single);
        if let Some(outcome) = scope.terminal(&tableau, run) {
            return Ok(outcome);
        }
        Ok(scope.optimal(&tableau, &built.normalized))
    }

    fn method(&self) -> Method {
        Method::Direct
    }
}

/// First row that keeps the direct method from starting, if any.
pub fn standard_form_violation(problem: &Problem) -> Option<(usize, StandardFormViolation)> {
    problem
        .relations()
        .iter()
        .zip(problem.rhs())
        .enumerate()
        .find_map(|(row, (&relation, &rhs))| {
            if relation != Relation::LessEqual {
                Some((row, StandardFormViolation::Relation(relation)))
            } else if rhs < 0.0 {
                Some((row, StandardFormViolation::NegativeRhs(rhs)))
            } else {
                None
            }
        })
}
