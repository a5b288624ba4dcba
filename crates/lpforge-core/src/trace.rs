//! Structured step trace of a solve.
//!
//! The solver never prints. Every notable step is appended to a [`Trace`]
//! that travels back inside the result; presentation layers render it with
//! [`Trace::lines`] or walk the events themselves.

use std::fmt;

use crate::method::Method;
use crate::problem::{Direction, Relation};
use crate::result::SolveStatus;
use crate::variable::VariableSlot;

/// Pivoting pass a trace event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Stage {
    /// The only pass of the direct and Big-M methods.
    Single,
    /// Two-Phase feasibility pass.
    PhaseOne,
    /// Two-Phase optimization pass.
    PhaseTwo,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Single => f.write_str("simplex"),
            Stage::PhaseOne => f.write_str("phase I"),
            Stage::PhaseTwo => f.write_str("phase II"),
        }
    }
}

/// Rendered copy of a tableau at one point of the solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableauSnapshot {
    /// Column labels, RHS excluded.
    pub columns: Vec<VariableSlot>,
    /// Basic variable of each constraint row.
    pub basis: Vec<VariableSlot>,
    /// Constraint rows, RHS last.
    pub rows: Vec<Vec<f64>>,
    /// Objective row, current objective value last.
    pub objective: Vec<f64>,
}

impl fmt::Display for TableauSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}", "basis")?;
        for slot in &self.columns {
            write!(f, " {:>9}", slot.to_string())?;
        }
        writeln!(f, " {:>9}", "rhs")?;
        for (slot, row) in self.basis.iter().zip(&self.rows) {
            write!(f, "{:>6}", slot.to_string())?;
            for value in row {
                write!(f, " {value:>9.3}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{:>6}", "z")?;
        for value in &self.objective {
            write!(f, " {value:>9.3}")?;
        }
        Ok(())
    }
}

/// One step of a solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "event", rename_all = "snake_case")
)]
pub enum TraceEvent {
    Started {
        method: Method,
        direction: Direction,
        variables: usize,
        constraints: usize,
    },
    /// A row with negative RHS was multiplied by -1.
    RowNormalized {
        row: usize,
        from: Relation,
        to: Relation,
    },
    TableauBuilt {
        stage: Stage,
        rows: usize,
        columns: usize,
        artificials: usize,
    },
    Tableau {
        stage: Stage,
        iteration: usize,
        snapshot: TableauSnapshot,
    },
    Pivot {
        stage: Stage,
        iteration: usize,
        entering: VariableSlot,
        leaving: VariableSlot,
        row: usize,
        element: f64,
        objective: f64,
    },
    /// The lowest-index rule picked the entering column for this step.
    BlandEngaged {
        stage: Stage,
        iteration: usize,
        column: VariableSlot,
    },
    StageEnded {
        stage: Stage,
        status: SolveStatus,
        iterations: usize,
        objective: f64,
    },
    /// A basic artificial at zero was replaced before Phase II.
    ArtificialDrivenOut {
        row: usize,
        artificial: VariableSlot,
        replacement: VariableSlot,
    },
    /// A linearly dependent constraint was dropped before Phase II.
    RedundantRowRemoved { row: usize, artificial: VariableSlot },
    Degeneracy { slots: Vec<VariableSlot> },
    AlternativeOptima { slots: Vec<VariableSlot> },
    Finished { status: SolveStatus },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Started {
                method,
                direction,
                variables,
                constraints,
            } => write!(
                f,
                "{method}: {direction} over {variables} variables and {constraints} constraints"
            ),
            TraceEvent::RowNormalized { row, from, to } => write!(
                f,
                "row {} has negative RHS: multiplied by -1, {from} becomes {to}",
                row + 1
            ),
            TraceEvent::TableauBuilt {
                stage,
                rows,
                columns,
                artificials,
            } => write!(
                f,
                "{stage}: tableau with {rows} rows, {columns} columns, {artificials} artificials"
            ),
            TraceEvent::Tableau {
                stage,
                iteration,
                snapshot,
            } => write!(f, "{stage} tableau after iteration {iteration}\n{snapshot}"),
            TraceEvent::Pivot {
                stage,
                iteration,
                entering,
                leaving,
                row,
                element,
                objective,
            } => write!(
                f,
                "{stage} iteration {iteration}: {entering} enters, {leaving} leaves at row {}, \
                 pivot {element:.4}, z = {objective:.4}",
                row + 1
            ),
            TraceEvent::BlandEngaged {
                stage,
                iteration,
                column,
            } => write!(
                f,
                "{stage} iteration {iteration}: degenerate basis, Bland's rule selects {column}"
            ),
            TraceEvent::StageEnded {
                stage,
                status,
                iterations,
                objective,
            } => write!(
                f,
                "{stage} ended {status} after {iterations} iterations, z = {objective:.4}"
            ),
            TraceEvent::ArtificialDrivenOut {
                row,
                artificial,
                replacement,
            } => write!(
                f,
                "artificial {artificial} at zero in row {} replaced by {replacement}",
                row + 1
            ),
            TraceEvent::RedundantRowRemoved { row, artificial } => write!(
                f,
                "constraint {} is redundant: row of {artificial} removed",
                row + 1
            ),
            TraceEvent::Degeneracy { slots } => {
                write!(f, "degenerate basis: {} at zero", join_slots(slots))
            }
            TraceEvent::AlternativeOptima { slots } => write!(
                f,
                "alternative optima: {} non-basic with zero reduced cost",
                join_slots(slots)
            ),
            TraceEvent::Finished { status } => write!(f, "finished: {status}"),
        }
    }
}

fn join_slots(slots: &[VariableSlot]) -> String {
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered record of a solve.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEvent> {
        self.events.iter()
    }

    /// Number of pivots recorded across all stages.
    pub fn pivot_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Pivot { .. }))
            .count()
    }

    /// Renders every event as one human-readable entry.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEvent;
    type IntoIter = std::slice::Iter<'a, TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
