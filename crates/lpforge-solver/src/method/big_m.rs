//! Big-M penalty method.

use lpforge_core::{Method, Outcome, Result, Stage};
use tracing::debug;

use super::{SolveMethod, SolveScope};
use crate::builder::ObjectiveMode;
use crate::engine::EngineOutcome;

/// Single pass over the real objective with every artificial variable
/// penalized by the configured `big_m`.
///
/// A run that ends optimal or unbounded while an artificial is still basic
/// above tolerance means the problem is infeasible. The penalty dominates
/// every real reduced cost, so a ray is only taken once no penalized column
/// can lower the artificials any further.
#[derive(Debug, Clone, Copy, Default)]
pub struct BigMMethod;

impl SolveMethod for BigMMethod {
    fn solve(&self, scope: &mut SolveScope<'_>) -> Result<Outcome> {
        let problem = scope.problem();
        let big_m = scope.config().big_m;
        debug!(event = "big_m", penalty = big_m);

        let built = scope.build(ObjectiveMode::BigM(big_m), Stage::Single)?;
        let mut tableau = built.tableau;
        let run = scope.run(&mut tableau, problem.direction(), Stage::Single);
        if run.outcome != EngineOutcome::IterationLimit {
            if let Some(infeasibility) = scope.analyzer().infeasibility(&tableau) {
                return Ok(Outcome::Infeasible(infeasibility));
            }
        }
        if let Some(outcome) = scope.terminal(&tableau, run) {
            return Ok(outcome);
        }
        Ok(scope.optimal(&tableau, &built.normalized))
    }

    fn method(&self) -> Method {
        Method::BigM
    }
}
