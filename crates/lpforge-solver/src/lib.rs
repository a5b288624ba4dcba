//! Tableau Simplex engine for LPForge
//!
//! This crate provides:
//! - [`TableauBuilder`]: augmented tableau with slack, surplus and artificial columns
//! - [`PivotEngine`]: entering/leaving selection and the iteration-limited pivot loop
//! - Solve methods: [`DirectMethod`], [`BigMMethod`] and [`TwoPhaseMethod`]
//! - [`SpecialCaseAnalyzer`]: degeneracy, alternative optima, unboundedness,
//!   infeasibility, Bland's rule and sensitivity extraction
//! - [`compare_methods`]: every method on one problem, in parallel

pub mod analysis;
pub mod builder;
pub mod compare;
pub mod engine;
pub mod method;
pub mod recorder;
pub mod tableau;

#[cfg(test)]
mod proptests;

pub use analysis::SpecialCaseAnalyzer;
pub use builder::{BuiltTableau, NormalizedRow, ObjectiveMode, TableauBuilder};
pub use compare::{compare_methods, MethodComparison};
pub use engine::{EngineOutcome, EngineRun, PivotEngine};
pub use method::{
    solve, solve_default, strategy, BigMMethod, DirectMethod, SolveMethod, SolveScope,
    TwoPhaseMethod,
};
pub use recorder::TraceRecorder;
pub use tableau::{Basis, Tableau};
