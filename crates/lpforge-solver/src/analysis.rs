//! Read-only diagnostics on a tableau.
//!
//! [`SpecialCaseAnalyzer`] never mutates the tableau it inspects. The
//! methods consult it when a run terminates, and the engine asks it for
//! Bland's choice when the entering rule calls for it.

use lpforge_core::{
    Diagnostics, Direction, Infeasibility, Problem, Relation, Sensitivity, VariableSlot,
};

use crate::builder::NormalizedRow;
use crate::tableau::Tableau;

/// Stateless special-case detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialCaseAnalyzer {
    tolerance: f64,
}

impl SpecialCaseAnalyzer {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Basic variables whose value is zero within tolerance.
    pub fn degenerate_variables(&self, tableau: &Tableau) -> Vec<VariableSlot> {
        (0..tableau.num_rows())
            .filter(|&row| tableau.rhs(row).abs() < self.tolerance)
            .map(|row| tableau.basic_slot(row))
            .collect()
    }

    pub fn is_degenerate(&self, tableau: &Tableau) -> bool {
        (0..tableau.num_rows()).any(|row| tableau.rhs(row).abs() < self.tolerance)
    }

    /// Non-basic, non-artificial variables with a zero reduced cost.
    ///
    /// Meaningful only on an optimal tableau, where each such column can
    /// enter without changing the objective value.
    pub fn alternative_optima(&self, tableau: &Tableau) -> Vec<VariableSlot> {
        (0..tableau.num_columns())
            .filter(|&col| {
                !tableau.basis().contains(col)
                    && !tableau.slot(col).is_artificial()
                    && tableau.reduced_cost(col).abs() < self.tolerance
            })
            .map(|col| tableau.slot(col))
            .collect()
    }

    /// True iff no constraint row has a positive entry in `column`.
    pub fn is_unbounded_column(&self, tableau: &Tableau, column: usize) -> bool {
        (0..tableau.num_rows()).all(|row| tableau.value(row, column) <= self.tolerance)
    }

    /// Basic artificials left at a positive value, if any.
    pub fn infeasibility(&self, tableau: &Tableau) -> Option<Infeasibility> {
        let artificials: Vec<(VariableSlot, f64)> = (0..tableau.num_rows())
            .filter_map(|row| {
                let slot = tableau.basic_slot(row);
                let value = tableau.rhs(row);
                (slot.is_artificial() && value > self.tolerance).then_some((slot, value))
            })
            .collect();
        if artificials.is_empty() {
            return None;
        }
        let residual = artificials.iter().map(|(_, v)| v).sum();
        Some(Infeasibility {
            residual,
            artificials,
        })
    }

    /// Lowest-index improving column, or `None` when the tableau is optimal
    /// for `direction`.
    pub fn bland_column(&self, tableau: &Tableau, direction: Direction) -> Option<usize> {
        (0..tableau.num_columns()).find(|&col| self.improves(tableau.reduced_cost(col), direction))
    }

    /// True if a column with objective-row entry `entry` improves the objective.
    pub fn improves(&self, entry: f64, direction: Direction) -> bool {
        match direction {
            Direction::Maximize => entry < -self.tolerance,
            Direction::Minimize => entry > self.tolerance,
        }
    }

    pub fn diagnostics(&self, tableau: &Tableau) -> Diagnostics {
        Diagnostics {
            degenerate: self.degenerate_variables(tableau),
            alternative_optima: self.alternative_optima(tableau),
        }
    }

    /// Shadow prices and reduced costs of an optimal tableau.
    ///
    /// A shadow price is read from the slack (`y = entry`) or surplus
    /// (`y = -entry`) column of the constraint and negated when the row was
    /// normalized, so it refers to the caller's orientation of the row.
    pub fn sensitivity(
        &self,
        tableau: &Tableau,
        problem: &Problem,
        normalized: &[NormalizedRow],
    ) -> Sensitivity {
        let reduced_costs = (0..problem.num_variables())
            .map(|j| {
                tableau
                    .column_of(VariableSlot::original(j))
                    .map_or(0.0, |col| tableau.reduced_cost(col))
            })
            .collect();

        let shadow_prices = (0..problem.num_constraints())
            .map(|i| {
                tableau.row_for_constraint(i)?;
                let flip = normalized.iter().any(|r| r.row == i);
                let relation = if flip {
                    problem.relations()[i].flipped()
                } else {
                    problem.relations()[i]
                };
                let price = match relation {
                    Relation::LessEqual => tableau
                        .column_of(VariableSlot::slack(i))
                        .map(|col| tableau.reduced_cost(col)),
                    Relation::GreaterEqual => tableau
                        .column_of(VariableSlot::surplus(i))
                        .map(|col| -tableau.reduced_cost(col)),
                    Relation::Equal => None,
                }?;
                Some(if flip { -price } else { price })
            })
            .collect();

        Sensitivity {
            shadow_prices,
            reduced_costs,
        }
    }
}

#[cfg(test)]
mod tests;
