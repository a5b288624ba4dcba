//! Initial tableau construction.

use lpforge_core::{Direction, LpError, Problem, Relation, Result, VariableKind, VariableSlot};

use crate::tableau::{Basis, Tableau};

/// Objective written into a freshly built tableau.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectiveMode {
    /// The problem objective. Every row must start with a slack basic.
    Real,
    /// The problem objective plus a penalty of the given size on every
    /// artificial variable.
    BigM(f64),
    /// Minimize the sum of the artificial variables.
    PhaseOne,
}

/// A constraint that was multiplied by -1 because its RHS was negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRow {
    pub row: usize,
    pub from: Relation,
    pub to: Relation,
}

/// Output of [`TableauBuilder::build`].
#[derive(Debug, Clone)]
pub struct BuiltTableau {
    pub tableau: Tableau,
    /// Artificial columns, in row order.
    pub artificials: Vec<VariableSlot>,
    pub normalized: Vec<NormalizedRow>,
}

/// Turns a [`Problem`] into an augmented tableau with an initial basis.
///
/// Columns are allocated originals first, then row by row: a slack for a
/// `<=` row, a surplus followed by an artificial for a `>=` row and an
/// artificial for a `=` row. The slack or artificial of each row starts
/// basic in it.
pub struct TableauBuilder<'a> {
    problem: &'a Problem,
}

impl<'a> TableauBuilder<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// Builds the initial tableau for `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the problem is malformed, or if `mode` is
    /// [`ObjectiveMode::Real`] and some normalized row needs an artificial.
    pub fn build(&self, mode: ObjectiveMode) -> Result<BuiltTableau> {
        self.problem.validate()?;

        let n = self.problem.num_variables();
        let (relations, rhs, normalized) = self.normalized_rows();

        if mode == ObjectiveMode::Real {
            if let Some(row) = relations.iter().position(|&r| r != Relation::LessEqual) {
                return Err(LpError::InputShape(format!(
                    "row {} is {} after normalization and needs an artificial variable",
                    row + 1,
                    relations[row]
                )));
            }
        }

        let mut columns: Vec<VariableSlot> = (0..n).map(VariableSlot::original).collect();
        // Column index of each row's initial basic variable.
        let mut basis = Vec::with_capacity(relations.len());
        for (row, relation) in relations.iter().enumerate() {
            match relation {
                Relation::LessEqual => {
                    basis.push(columns.len());
                    columns.push(VariableSlot::slack(row));
                }
                Relation::GreaterEqual => {
                    columns.push(VariableSlot::surplus(row));
                    basis.push(columns.len());
                    columns.push(VariableSlot::artificial(row));
                }
                Relation::Equal => {
                    basis.push(columns.len());
                    columns.push(VariableSlot::artificial(row));
                }
            }
        }

        let width = columns.len() + 1;
        let mut rows = Vec::with_capacity(relations.len());
        for (i, coefficients) in self.problem.matrix().iter().enumerate() {
            let sign = if normalized.iter().any(|r| r.row == i) {
                -1.0
            } else {
                1.0
            };
            let mut row = vec![0.0; width];
            for (j, &a) in coefficients.iter().enumerate() {
                row[j] = sign * a;
            }
            for (col, slot) in columns.iter().enumerate().skip(n) {
                if slot.index != i {
                    continue;
                }
                row[col] = match slot.kind {
                    VariableKind::Surplus => -1.0,
                    _ => 1.0,
                };
            }
            row[width - 1] = rhs[i];
            rows.push(row);
        }

        let artificials: Vec<VariableSlot> =
            columns.iter().copied().filter(|s| s.is_artificial()).collect();
        let costs = column_costs(self.problem, &columns, mode);
        let origins = (0..rows.len()).collect();
        let mut tableau = Tableau::new(columns, rows, vec![0.0; width], Basis::new(basis), origins);
        tableau.set_objective(&costs);

        Ok(BuiltTableau {
            tableau,
            artificials,
            normalized,
        })
    }

    fn normalized_rows(&self) -> (Vec<Relation>, Vec<f64>, Vec<NormalizedRow>) {
        let mut relations = self.problem.relations().to_vec();
        let mut rhs = self.problem.rhs().to_vec();
        let mut normalized = Vec::new();
        for row in 0..rhs.len() {
            if rhs[row] < 0.0 {
                let from = relations[row];
                rhs[row] = -rhs[row];
                relations[row] = from.flipped();
                normalized.push(NormalizedRow {
                    row,
                    from,
                    to: relations[row],
                });
            }
        }
        (relations, rhs, normalized)
    }
}

/// Cost of every column under `mode`, in the direction the pass optimizes.
///
/// Phase I always minimizes, so its costs ignore the problem direction.
pub fn column_costs(problem: &Problem, columns: &[VariableSlot], mode: ObjectiveMode) -> Vec<f64> {
    columns
        .iter()
        .map(|slot| match (slot.kind, mode) {
            (VariableKind::Original, ObjectiveMode::PhaseOne) => 0.0,
            (VariableKind::Original, _) => problem.objective()[slot.index],
            (VariableKind::Artificial, ObjectiveMode::PhaseOne) => 1.0,
            (VariableKind::Artificial, ObjectiveMode::BigM(m)) => match problem.direction() {
                Direction::Maximize => -m,
                Direction::Minimize => m,
            },
            _ => 0.0,
        })
        .collect()
}
