//! Checks for reported solutions.

use lpforge_core::Problem;

/// Asserts `|actual - expected| <= tolerance`, scaled by the magnitude of
/// `expected` when that exceeds one.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance * scale,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// Asserts that `solution` satisfies every constraint and sign restriction
/// of `problem` and that `c · solution` equals `value`.
#[track_caller]
pub fn assert_feasible(problem: &Problem, solution: &[f64], value: f64, tolerance: f64) {
    assert_eq!(
        solution.len(),
        problem.num_variables(),
        "solution has {} values for {} variables",
        solution.len(),
        problem.num_variables()
    );
    for (j, &x) in solution.iter().enumerate() {
        assert!(x >= -tolerance, "x{} = {x} is negative", j + 1);
    }
    for (i, relation) in problem.relations().iter().enumerate() {
        let lhs = problem.row_activity(i, solution);
        let rhs = problem.rhs()[i];
        assert!(
            relation.holds(lhs, rhs, tolerance),
            "constraint {} violated: {lhs} {relation} {rhs}",
            i + 1
        );
    }
    assert_close(problem.objective_value(solution), value, tolerance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_catalog_solutions_are_feasible() {
        for entry in catalog::all() {
            if let catalog::Expected::Optimal {
                value,
                solution: Some(x),
            } = &entry.expected
            {
                assert_feasible(&entry.problem, x, *value, 1e-9);
            }
        }
    }

    #[test]
    #[should_panic(expected = "constraint 1 violated")]
    fn test_violation_detected() {
        let entry = catalog::standard();
        assert_feasible(&entry.problem, &[3.0, 3.0], 15.0, 1e-9);
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let names: std::collections::HashSet<_> = catalog::all().iter().map(|e| e.name).collect();
        assert_eq!(names.len(), catalog::all().len());
        assert!(catalog::by_name("diet").is_some());
        assert!(catalog::by_name("missing").is_none());
    }
}
