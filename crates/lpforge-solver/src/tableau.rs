//! Simplex tableau and basis.
//!
//! The tableau holds one row per surviving constraint plus a separate
//! objective row. Every row has `num_columns() + 1` entries; the last one
//! is the right-hand side. The objective row stores `z_j - c_j` for each
//! column and the current objective value `z` in its last cell.
//!
//! Each column carries its [`VariableSlot`], and each row remembers which
//! constraint of the problem it came from, so columns and rows can be
//! dropped without re-deriving any index arithmetically.

use lpforge_core::{TableauSnapshot, VariableSlot};

/// Basic column of each constraint row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    columns: Vec<usize>,
}

impl Basis {
    pub fn new(columns: Vec<usize>) -> Self {
        Self { columns }
    }

    /// Basic column of `row`.
    pub fn column(&self, row: usize) -> usize {
        self.columns[row]
    }

    /// Row in which `column` is basic, if it is.
    pub fn row_of(&self, column: usize) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    pub fn contains(&self, column: usize) -> bool {
        self.columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    fn set(&mut self, row: usize, column: usize) {
        self.columns[row] = column;
    }
}

/// Dense simplex tableau.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    columns: Vec<VariableSlot>,
    rows: Vec<Vec<f64>>,
    objective: Vec<f64>,
    basis: Basis,
    origins: Vec<usize>,
}

impl Tableau {
    /// Assembles a tableau.
    ///
    /// `origins[i]` is the problem constraint that row `i` represents.
    ///
    /// # Panics
    ///
    /// Panics if the row widths, basis length or origins length do not
    /// match the column count.
    pub fn new(
        columns: Vec<VariableSlot>,
        rows: Vec<Vec<f64>>,
        objective: Vec<f64>,
        basis: Basis,
        origins: Vec<usize>,
    ) -> Self {
        let width = columns.len() + 1;
        assert!(rows.iter().all(|r| r.len() == width), "row width mismatch");
        assert_eq!(objective.len(), width, "objective width mismatch");
        assert_eq!(basis.len(), rows.len(), "one basic column per row");
        assert_eq!(origins.len(), rows.len(), "one origin per row");
        Self {
            columns,
            rows,
            objective,
            basis,
            origins,
        }
    }

    /// Number of constraint rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of variable columns, RHS excluded.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.rows[row][column]
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.rows[row][self.columns.len()]
    }

    /// Full constraint row, RHS last.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.rows[row]
    }

    /// Full objective row, objective value last.
    pub fn objective_row(&self) -> &[f64] {
        &self.objective
    }

    /// Objective-row entry of `column`.
    pub fn reduced_cost(&self, column: usize) -> f64 {
        self.objective[column]
    }

    /// Objective value of the current basic solution.
    pub fn objective_value(&self) -> f64 {
        self.objective[self.columns.len()]
    }

    pub fn columns(&self) -> &[VariableSlot] {
        &self.columns
    }

    pub fn slot(&self, column: usize) -> VariableSlot {
        self.columns[column]
    }

    /// Column currently holding `slot`, if it survives.
    pub fn column_of(&self, slot: VariableSlot) -> Option<usize> {
        self.columns.iter().position(|&s| s == slot)
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Variable that is basic in `row`.
    pub fn basic_slot(&self, row: usize) -> VariableSlot {
        self.columns[self.basis.column(row)]
    }

    /// Problem constraint represented by `row`.
    pub fn row_origin(&self, row: usize) -> usize {
        self.origins[row]
    }

    /// Row representing problem constraint `constraint`, if it survives.
    pub fn row_for_constraint(&self, constraint: usize) -> Option<usize> {
        self.origins.iter().position(|&o| o == constraint)
    }

    /// Values of the first `n` original variables in the current basic solution.
    pub fn original_values(&self, n: usize) -> Vec<f64> {
        let mut values = vec![0.0; n];
        for row in 0..self.num_rows() {
            let slot = self.basic_slot(row);
            if slot.is_original() && slot.index < n {
                values[slot.index] = self.rhs(row);
            }
        }
        values
    }

    /// Gauss-Jordan pivot on (`row`, `column`).
    ///
    /// Normalizes the pivot row, eliminates the pivot column from every
    /// other row including the objective row, and makes `column` basic in
    /// `row`. The pivot column is written as an exact unit vector.
    pub fn pivot(&mut self, row: usize, column: usize) {
        let element = self.rows[row][column];
        debug_assert!(element != 0.0, "pivot on a zero element");

        for value in self.rows[row].iter_mut() {
            *value /= element;
        }
        self.rows[row][column] = 1.0;

        let pivot_row = std::mem::take(&mut self.rows[row]);
        for (i, other) in self.rows.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            eliminate(other, &pivot_row, column);
        }
        eliminate(&mut self.objective, &pivot_row, column);
        self.rows[row] = pivot_row;

        self.basis.set(row, column);
    }

    /// Replaces the objective with `costs` and prices out the basis.
    ///
    /// `costs[j]` is the cost of column `j` in the direction being
    /// optimized. The row is reset to `-costs` with value zero, then for
    /// every row whose basic column has a non-zero entry `t`, `t` times that
    /// row is subtracted so basic columns end with zero reduced cost.
    pub fn set_objective(&mut self, costs: &[f64]) {
        assert_eq!(costs.len(), self.columns.len(), "one cost per column");
        self.objective = costs.iter().map(|c| -c).collect();
        self.objective.push(0.0);
        self.price_out();
    }

    fn price_out(&mut self) {
        for row in 0..self.rows.len() {
            let column = self.basis.column(row);
            let factor = self.objective[column];
            if factor != 0.0 {
                for (target, source) in self.objective.iter_mut().zip(&self.rows[row]) {
                    *target -= factor * source;
                }
                self.objective[column] = 0.0;
            }
        }
    }

    /// Keeps only the columns whose slot satisfies `keep`.
    ///
    /// Basic columns must be kept.
    pub fn retain_columns(&mut self, keep: impl Fn(&VariableSlot) -> bool) {
        let kept: Vec<bool> = self.columns.iter().map(&keep).collect();
        let mut remap = vec![None; self.columns.len()];
        let mut next = 0;
        for (old, &k) in kept.iter().enumerate() {
            if k {
                remap[old] = Some(next);
                next += 1;
            }
        }

        let filter = |row: &mut Vec<f64>| {
            let rhs = row[kept.len()];
            let mut j = 0;
            row.retain(|_| {
                let k = j < kept.len() && kept[j];
                j += 1;
                k
            });
            row.push(rhs);
        };
        for row in self.rows.iter_mut() {
            filter(row);
        }
        filter(&mut self.objective);

        self.columns.retain(|slot| keep(slot));
        for row in 0..self.basis.len() {
            debug_assert!(remap[self.basis.column(row)].is_some(), "basic column removed");
            if let Some(column) = remap[self.basis.column(row)] {
                self.basis.set(row, column);
            }
        }
    }

    /// Deletes constraint row `row` together with its basis entry.
    pub fn remove_row(&mut self, row: usize) {
        self.rows.remove(row);
        self.origins.remove(row);
        self.basis.columns.remove(row);
    }

    /// Returns true if `column` is the unit vector of `row` across every
    /// row of the tableau, the objective row included.
    pub fn is_unit_column(&self, column: usize, row: usize, tolerance: f64) -> bool {
        let rows_ok = self.rows.iter().enumerate().all(|(i, r)| {
            let expected = if i == row { 1.0 } else { 0.0 };
            (r[column] - expected).abs() <= tolerance
        });
        rows_ok && self.objective[column].abs() <= tolerance
    }

    /// Renders the tableau for the trace.
    pub fn snapshot(&self) -> TableauSnapshot {
        TableauSnapshot {
            columns: self.columns.clone(),
            basis: (0..self.num_rows()).map(|r| self.basic_slot(r)).collect(),
            rows: self.rows.clone(),
            objective: self.objective.clone(),
        }
    }
}

/// `target -= target[column] * pivot_row`, leaving `target[column]` at zero.
fn eliminate(target: &mut [f64], pivot_row: &[f64], column: usize) {
    let factor = target[column];
    if factor == 0.0 {
        return;
    }
    for (t, p) in target.iter_mut().zip(pivot_row) {
        *t -= factor * p;
    }
    target[column] = 0.0;
}
