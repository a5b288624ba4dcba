//! End-to-end solves of the classic cases through the facade.

use lpforge::prelude::*;
use lpforge::{compare_methods, solve_with, VariableSlot};
use lpforge_test::{assert_close, assert_feasible, catalog};

const TOL: f64 = 1e-9;

fn config() -> SolverConfig {
    SolverConfig::default()
}

#[test]
fn standard_problem_with_direct_method() {
    let entry = catalog::standard();
    let result = solve_with(&entry.problem, Method::Direct, &config()).unwrap();

    assert_eq!(result.status(), SolveStatus::Optimal);
    let x = result.solution().unwrap();
    assert_close(x[0], 4.0 / 3.0, TOL);
    assert_close(x[1], 10.0 / 3.0, TOL);
    assert_close(result.optimal_value().unwrap(), 32.0 / 3.0, TOL);
}

#[test]
fn greater_equal_row_with_big_m() {
    let entry = catalog::big_m();
    let result = solve_with(&entry.problem, Method::BigM, &config()).unwrap();

    let value = result.optimal_value().unwrap();
    assert_close(value, 32.0 / 3.0, TOL);
    assert_feasible(&entry.problem, result.solution().unwrap(), value, TOL);
}

#[test]
fn equality_row_with_two_phase() {
    let entry = catalog::two_phase();
    let result = solve_with(&entry.problem, Method::TwoPhase, &config()).unwrap();

    assert_eq!(result.status(), SolveStatus::Optimal);
    let x = result.solution().unwrap();
    assert_close(x[0], 4.0, TOL);
    assert_close(x[1], 0.0, TOL);
    assert_close(result.optimal_value().unwrap(), 8.0, TOL);
}

#[test]
fn degenerate_optimum_is_flagged() {
    let entry = catalog::degenerate();
    let result = solve_with(&entry.problem, Method::Direct, &config()).unwrap();

    assert_close(result.optimal_value().unwrap(), 2.0, TOL);
    assert!(result.diagnostics().unwrap().is_degenerate());
}

#[test]
fn unbounded_problem_has_no_solution() {
    let entry = catalog::unbounded();
    let result = solve_with(&entry.problem, Method::Direct, &config()).unwrap();

    assert_eq!(result.status(), SolveStatus::Unbounded);
    assert!(result.solution().is_none());
    assert!(result.optimal_value().is_none());
    assert_eq!(
        result.outcome,
        Outcome::Unbounded {
            column: VariableSlot::original(0)
        }
    );
}

#[test]
fn infeasible_problem_with_both_artificial_methods() {
    let entry = catalog::infeasible();
    for method in [Method::BigM, Method::TwoPhase] {
        let result = solve_with(&entry.problem, method, &config()).unwrap();
        assert_eq!(result.status(), SolveStatus::Infeasible, "{method}");
        assert!(result.solution().is_none());
    }
}

#[test]
fn multiple_optima_are_flagged() {
    let entry = catalog::multiple_optima();
    let result = solve_with(&entry.problem, Method::Direct, &config()).unwrap();

    assert_close(result.optimal_value().unwrap(), 3.0, TOL);
    assert!(result.diagnostics().unwrap().has_alternative_optima());
    assert_feasible(&entry.problem, result.solution().unwrap(), 3.0, TOL);
}

#[test]
fn direct_method_rejects_non_canonical_rows() {
    let entry = catalog::two_phase();
    let result = solve_with(&entry.problem, Method::Direct, &config()).unwrap();

    assert_eq!(result.status(), SolveStatus::NotStandardForm);
    assert_eq!(result.iterations, 0);
}

#[test]
fn default_solve_uses_recommended_method() {
    let entry = catalog::diet();
    let result = lpforge::solve(&entry.problem, &config()).unwrap();

    assert_eq!(result.method, Method::TwoPhase);
    assert_close(result.optimal_value().unwrap(), 2.25, TOL);
}

#[test]
fn every_method_agrees_on_the_catalog() {
    for entry in catalog::all() {
        let comparison = compare_methods(&entry.problem, &config()).unwrap();
        assert!(comparison.agree(1e-6), "{}", entry.name);
    }
}

#[test]
fn report_carries_trace_lines() {
    let entry = catalog::standard();
    let report = solve_with(&entry.problem, Method::Direct, &config())
        .unwrap()
        .report();

    assert_eq!(report.status, SolveStatus::Optimal);
    assert!(report.trace[0].starts_with("Direct Simplex"));
    assert!(report.trace.iter().any(|line| line.contains("enters")));
    assert_eq!(report.trace.last().unwrap(), "finished: optimal");
}

#[test]
fn malformed_problem_is_rejected() {
    let err = Problem::new(
        Direction::Maximize,
        vec![1.0, 2.0],
        vec![vec![1.0, 1.0], vec![1.0]],
        vec![Relation::LessEqual, Relation::LessEqual],
        vec![1.0, 2.0],
    )
    .unwrap_err();
    assert!(matches!(err, LpError::InputShape(_)));
}
