//! Two-Phase method.

use lpforge_core::{Direction, Infeasibility, Method, Outcome, Result, Stage, TraceEvent};
use tracing::debug;

use super::{SolveMethod, SolveScope};
use crate::builder::{column_costs, ObjectiveMode};
use crate::tableau::Tableau;

/// Phase I minimizes the sum of the artificial variables; Phase II
/// optimizes the real objective from the feasible basis Phase I found.
///
/// Between the phases every artificial still basic at zero is pivoted out,
/// or its row is dropped when the constraint is linearly redundant. Then the
/// artificial columns are removed and the real objective is priced out.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPhaseMethod;

impl SolveMethod for TwoPhaseMethod {
    fn solve(&self, scope: &mut SolveScope<'_>) -> Result<Outcome> {
        let problem = scope.problem();
        let tolerance = scope.config().tolerance;

        let built = scope.build(ObjectiveMode::PhaseOne, Stage::PhaseOne)?;
        let mut tableau = built.tableau;

        if !built.artificials.is_empty() {
            let run = scope.run(&mut tableau, Direction::Minimize, Stage::PhaseOne);
            if let Some(outcome) = scope.terminal(&tableau, run) {
                return Ok(outcome);
            }

            let residual = tableau.objective_value();
            if residual > tolerance {
                let infeasibility = scope
                    .analyzer()
                    .infeasibility(&tableau)
                    .unwrap_or_else(|| Infeasibility {
                        residual,
                        artificials: Vec::new(),
                    });
                return Ok(Outcome::Infeasible(infeasibility));
            }

            drive_out_artificials(scope, &mut tableau, tolerance);
            tableau.retain_columns(|slot| !slot.is_artificial());
        }

        let costs = column_costs(problem, tableau.columns(), ObjectiveMode::Real);
        tableau.set_objective(&costs);
        scope.tableau_built(&tableau, Stage::PhaseTwo, 0);

        let run = scope.run(&mut tableau, problem.direction(), Stage::PhaseTwo);
        if let Some(outcome) = scope.terminal(&tableau, run) {
            return Ok(outcome);
        }
        Ok(scope.optimal(&tableau, &built.normalized))
    }

    fn method(&self) -> Method {
        Method::TwoPhase
    }
}

/// Replaces each basic artificial with the lowest-index non-basic,
/// non-artificial column that has a non-zero entry in its row. Rows with
/// no such column are redundant and removed.
fn drive_out_artificials(scope: &mut SolveScope<'_>, tableau: &mut Tableau, tolerance: f64) {
    let mut row = 0;
    while row < tableau.num_rows() {
        let artificial = tableau.basic_slot(row);
        if !artificial.is_artificial() {
            row += 1;
            continue;
        }

        let replacement = (0..tableau.num_columns()).find(|&col| {
            !tableau.basis().contains(col)
                && !tableau.slot(col).is_artificial()
                && tableau.value(row, col).abs() > tolerance
        });
        let constraint = tableau.row_origin(row);
        match replacement {
            Some(col) => {
                let slot = tableau.slot(col);
                tableau.pivot(row, col);
                debug!(
                    event = "artificial_driven_out",
                    row = constraint,
                    artificial = %artificial,
                    replacement = %slot,
                );
                scope.record(TraceEvent::ArtificialDrivenOut {
                    row: constraint,
                    artificial,
                    replacement: slot,
                });
                row += 1;
            }
            None => {
                tableau.remove_row(row);
                debug!(
                    event = "redundant_row_removed",
                    row = constraint,
                    artificial = %artificial,
                );
                scope.record(TraceEvent::RedundantRowRemoved {
                    row: constraint,
                    artificial,
                });
            }
        }
    }
}
