//! Iteration-limited pivoting loop shared by every method.

use std::time::Instant;

use lpforge_config::{EnteringRule, SolverConfig};
use lpforge_core::{Direction, SolveStatus, Stage, TraceEvent};
use tracing::{debug, info};

use crate::analysis::SpecialCaseAnalyzer;
use crate::recorder::TraceRecorder;
use crate::tableau::Tableau;

/// How a single engine run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOutcome {
    Optimal,
    /// No row limits the increase of `column`.
    Unbounded { column: usize },
    IterationLimit,
}

impl EngineOutcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            EngineOutcome::Optimal => SolveStatus::Optimal,
            EngineOutcome::Unbounded { .. } => SolveStatus::Unbounded,
            EngineOutcome::IterationLimit => SolveStatus::IterationLimit,
        }
    }
}

/// Result of [`PivotEngine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineRun {
    pub outcome: EngineOutcome,
    /// Pivots performed in this run.
    pub iterations: usize,
}

/// Simplex pivoting for one pass in one direction.
///
/// The objective row holds `z_j - c_j`. A maximizing pass is optimal when no
/// entry is below `-tolerance`, a minimizing pass when none is above
/// `tolerance`.
pub struct PivotEngine {
    direction: Direction,
    stage: Stage,
    rule: EnteringRule,
    tolerance: f64,
    iteration_limit: usize,
    analyzer: SpecialCaseAnalyzer,
}

impl PivotEngine {
    pub fn new(config: &SolverConfig, direction: Direction, stage: Stage) -> Self {
        Self {
            direction,
            stage,
            rule: config.entering_rule,
            tolerance: config.tolerance,
            iteration_limit: config.iteration_limit,
            analyzer: SpecialCaseAnalyzer::new(config.tolerance),
        }
    }

    pub fn is_optimal(&self, tableau: &Tableau) -> bool {
        self.entering_column(tableau).is_none()
    }

    /// Dantzig's choice: the most extreme improving entry, lowest index on ties.
    pub fn entering_column(&self, tableau: &Tableau) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for col in 0..tableau.num_columns() {
            let entry = tableau.reduced_cost(col);
            if !self.analyzer.improves(entry, self.direction) {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, incumbent)) => match self.direction {
                    Direction::Maximize => entry < incumbent,
                    Direction::Minimize => entry > incumbent,
                },
            };
            if better {
                best = Some((col, entry));
            }
        }
        best.map(|(col, _)| col)
    }

    /// Minimum ratio test on `column`, lowest row on ties.
    ///
    /// Returns `None` when no row has an entry above tolerance.
    pub fn leaving_row(&self, tableau: &Tableau, column: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for row in 0..tableau.num_rows() {
            let entry = tableau.value(row, column);
            if entry <= self.tolerance {
                continue;
            }
            let ratio = tableau.rhs(row) / entry;
            if ratio < 0.0 {
                continue;
            }
            if best.map_or(true, |(_, incumbent)| ratio < incumbent) {
                best = Some((row, ratio));
            }
        }
        best.map(|(row, _)| row)
    }

    /// Pivots until optimal, unbounded or the iteration limit.
    ///
    /// Optimality is checked before the limit, so a tableau that becomes
    /// optimal on the last permitted pivot is reported optimal.
    pub fn run(&self, tableau: &mut Tableau, recorder: &mut TraceRecorder) -> EngineRun {
        let start = Instant::now();
        info!(
            event = "phase_start",
            stage = %self.stage,
            direction = %self.direction,
            rows = tableau.num_rows(),
            columns = tableau.num_columns(),
        );
        recorder.snapshot(self.stage, 0, tableau);

        let mut iterations = 0;
        let outcome = loop {
            let Some(dantzig) = self.entering_column(tableau) else {
                break EngineOutcome::Optimal;
            };
            if iterations >= self.iteration_limit {
                break EngineOutcome::IterationLimit;
            }

            let column = self.select_column(tableau, dantzig, iterations + 1, recorder);
            let Some(row) = self.leaving_row(tableau, column) else {
                break EngineOutcome::Unbounded { column };
            };

            let entering = tableau.slot(column);
            let leaving = tableau.basic_slot(row);
            let element = tableau.value(row, column);
            tableau.pivot(row, column);
            iterations += 1;

            debug!(
                event = "pivot",
                stage = %self.stage,
                iteration = iterations,
                entering = %entering,
                leaving = %leaving,
                row = row,
                element = element,
                objective = tableau.objective_value(),
            );
            recorder.record(TraceEvent::Pivot {
                stage: self.stage,
                iteration: iterations,
                entering,
                leaving,
                row,
                element,
                objective: tableau.objective_value(),
            });
            recorder.snapshot(self.stage, iterations, tableau);
        };

        info!(
            event = "phase_end",
            stage = %self.stage,
            status = %outcome.status(),
            duration_ms = start.elapsed().as_millis() as u64,
            iterations = iterations,
            objective = tableau.objective_value(),
        );
        recorder.record(TraceEvent::StageEnded {
            stage: self.stage,
            status: outcome.status(),
            iterations,
            objective: tableau.objective_value(),
        });

        EngineRun {
            outcome,
            iterations,
        }
    }

    fn select_column(
        &self,
        tableau: &Tableau,
        dantzig: usize,
        iteration: usize,
        recorder: &mut TraceRecorder,
    ) -> usize {
        match self.rule {
            EnteringRule::Dantzig => dantzig,
            EnteringRule::Bland => self
                .analyzer
                .bland_column(tableau, self.direction)
                .unwrap_or(dantzig),
            EnteringRule::BlandOnDegeneracy => {
                if !self.analyzer.is_degenerate(tableau) {
                    return dantzig;
                }
                let column = self
                    .analyzer
                    .bland_column(tableau, self.direction)
                    .unwrap_or(dantzig);
                debug!(
                    event = "bland_engaged",
                    stage = %self.stage,
                    iteration = iteration,
                    column = %tableau.slot(column),
                );
                recorder.record(TraceEvent::BlandEngaged {
                    stage: self.stage,
                    iteration,
                    column: tableau.slot(column),
                });
                column
            }
        }
    }
}

#[cfg(test)]
mod tests;
