//! Solve-level scope shared by the methods.

use lpforge_config::SolverConfig;
use lpforge_core::{
    Direction, OptimalSolution, Outcome, Problem, Result, Stage, Trace, TraceEvent,
};

use crate::analysis::SpecialCaseAnalyzer;
use crate::builder::{BuiltTableau, NormalizedRow, ObjectiveMode, TableauBuilder};
use crate::engine::{EngineOutcome, PivotEngine};
use crate::recorder::TraceRecorder;
use crate::tableau::Tableau;

/// State of one solve: the input, the configuration, the trace being
/// recorded and the pivots performed so far.
pub struct SolveScope<'a> {
    problem: &'a Problem,
    config: &'a SolverConfig,
    analyzer: SpecialCaseAnalyzer,
    recorder: TraceRecorder,
    iterations: usize,
}

impl<'a> SolveScope<'a> {
    pub fn new(problem: &'a Problem, config: &'a SolverConfig) -> Self {
        Self {
            problem,
            config,
            analyzer: SpecialCaseAnalyzer::new(config.tolerance),
            recorder: TraceRecorder::new(config.trace),
            iterations: 0,
        }
    }

    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    pub fn config(&self) -> &'a SolverConfig {
        self.config
    }

    pub fn analyzer(&self) -> SpecialCaseAnalyzer {
        self.analyzer
    }

    /// Pivots performed across all runs so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.recorder.record(event);
    }

    /// Builds the initial tableau for `stage` and records how it was built.
    pub fn build(&mut self, mode: ObjectiveMode, stage: Stage) -> Result<BuiltTableau> {
        let built = TableauBuilder::new(self.problem).build(mode)?;
        for normalized in &built.normalized {
            self.recorder.record(TraceEvent::RowNormalized {
                row: normalized.row,
                from: normalized.from,
                to: normalized.to,
            });
        }
        self.tableau_built(&built.tableau, stage, built.artificials.len());
        Ok(built)
    }

    /// Records the shape of a tableau about to be pivoted in `stage`.
    pub fn tableau_built(&mut self, tableau: &Tableau, stage: Stage, artificials: usize) {
        self.recorder.record(TraceEvent::TableauBuilt {
            stage,
            rows: tableau.num_rows(),
            columns: tableau.num_columns(),
            artificials,
        });
    }

    /// Runs the pivot engine on `tableau` and counts its pivots.
    pub fn run(&mut self, tableau: &mut Tableau, direction: Direction, stage: Stage) -> EngineRunSummary {
        let engine = PivotEngine::new(self.config, direction, stage);
        let run = engine.run(tableau, &mut self.recorder);
        self.iterations += run.iterations;
        EngineRunSummary {
            outcome: run.outcome,
            iterations: run.iterations,
            stage,
        }
    }

    /// Extracts the optimal solution and records its diagnostics.
    ///
    /// The objective value is recomputed from the original variables, so
    /// penalty or Phase I terms never leak into it.
    pub fn optimal(&mut self, tableau: &Tableau, normalized: &[NormalizedRow]) -> Outcome {
        let values = tableau.original_values(self.problem.num_variables());
        let objective_value = self.problem.objective_value(&values);
        let diagnostics = self.analyzer.diagnostics(tableau);
        if diagnostics.is_degenerate() {
            self.recorder.record(TraceEvent::Degeneracy {
                slots: diagnostics.degenerate.clone(),
            });
        }
        if diagnostics.has_alternative_optima() {
            self.recorder.record(TraceEvent::AlternativeOptima {
                slots: diagnostics.alternative_optima.clone(),
            });
        }
        let sensitivity = self.analyzer.sensitivity(tableau, self.problem, normalized);
        let basis = (0..tableau.num_rows())
            .map(|row| tableau.basic_slot(row))
            .collect();

        Outcome::Optimal(OptimalSolution {
            values,
            objective_value,
            basis,
            diagnostics,
            sensitivity,
        })
    }

    /// Maps a non-optimal engine termination onto an outcome.
    ///
    /// Returns `None` for [`EngineOutcome::Optimal`], which each method
    /// finishes in its own way.
    pub fn terminal(&self, tableau: &Tableau, run: EngineRunSummary) -> Option<Outcome> {
        match run.outcome {
            EngineOutcome::Optimal => None,
            EngineOutcome::Unbounded { column } => Some(Outcome::Unbounded {
                column: tableau.slot(column),
            }),
            EngineOutcome::IterationLimit => Some(Outcome::IterationLimit {
                stage: run.stage,
                iterations: run.iterations,
            }),
        }
    }

    /// Consumes the scope, returning the trace and the total pivot count.
    pub fn finish(self) -> (Trace, usize) {
        (self.recorder.into_trace(), self.iterations)
    }
}

/// What [`SolveScope::run`] reports back to a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineRunSummary {
    pub outcome: EngineOutcome,
    pub iterations: usize,
    pub stage: Stage,
}
