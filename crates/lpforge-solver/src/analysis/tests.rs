use super::*;
use lpforge_core::{Direction, Problem, Relation};

use crate::builder::{ObjectiveMode, TableauBuilder};

const TOL: f64 = 1e-10;

fn analyzer() -> SpecialCaseAnalyzer {
    SpecialCaseAnalyzer::new(TOL)
}

fn textbook() -> Problem {
    Problem::builder(Direction::Maximize, vec![3.0, 2.0])
        .constraint(vec![2.0, 1.0], Relation::LessEqual, 6.0)
        .constraint(vec![1.0, 2.0], Relation::LessEqual, 8.0)
        .build()
        .unwrap()
}

fn textbook_optimum() -> Tableau {
    let mut t = TableauBuilder::new(&textbook())
        .build(ObjectiveMode::Real)
        .unwrap()
        .tableau;
    t.pivot(0, 0);
    t.pivot(1, 1);
    t
}

#[test]
fn test_bland_picks_lowest_improving_column() {
    let t = TableauBuilder::new(&textbook())
        .build(ObjectiveMode::Real)
        .unwrap()
        .tableau;
    assert_eq!(analyzer().bland_column(&t, Direction::Maximize), Some(0));
    assert_eq!(analyzer().bland_column(&t, Direction::Minimize), None);
    assert_eq!(analyzer().bland_column(&textbook_optimum(), Direction::Maximize), None);
}

#[test]
fn test_improves_mirrors_direction() {
    let a = analyzer();
    assert!(a.improves(-1.0, Direction::Maximize));
    assert!(!a.improves(1.0, Direction::Maximize));
    assert!(a.improves(1.0, Direction::Minimize));
    assert!(!a.improves(-1e-12, Direction::Maximize));
}

#[test]
fn test_no_special_cases_at_unique_optimum() {
    let t = textbook_optimum();
    let diagnostics = analyzer().diagnostics(&t);
    assert!(!diagnostics.is_degenerate());
    assert!(!diagnostics.has_alternative_optima());
    assert!(analyzer().infeasibility(&t).is_none());
}

#[test]
fn test_degeneracy_detected() {
    // max x1 + x2, x1 + x2 <= 2, x1 <= 0, x2 <= 2
    let problem = Problem::builder(Direction::Maximize, vec![1.0, 1.0])
        .constraint(vec![1.0, 1.0], Relation::LessEqual, 2.0)
        .constraint(vec![1.0, 0.0], Relation::LessEqual, 0.0)
        .constraint(vec![0.0, 1.0], Relation::LessEqual, 2.0)
        .build()
        .unwrap();
    let mut t = TableauBuilder::new(&problem)
        .build(ObjectiveMode::Real)
        .unwrap()
        .tableau;
    assert_eq!(analyzer().degenerate_variables(&t), vec![VariableSlot::slack(1)]);

    t.pivot(1, 0);
    assert_eq!(analyzer().degenerate_variables(&t), vec![VariableSlot::original(0)]);
    assert!(analyzer().is_degenerate(&t));
}

#[test]
fn test_alternative_optima_include_slacks() {
    // max x1 + x2, x1 + x2 <= 3, x1 <= 2, x2 <= 2
    let problem = Problem::builder(Direction::Maximize, vec![1.0, 1.0])
        .constraint(vec![1.0, 1.0], Relation::LessEqual, 3.0)
        .constraint(vec![1.0, 0.0], Relation::LessEqual, 2.0)
        .constraint(vec![0.0, 1.0], Relation::LessEqual, 2.0)
        .build()
        .unwrap();
    let mut t = TableauBuilder::new(&problem)
        .build(ObjectiveMode::Real)
        .unwrap()
        .tableau;
    t.pivot(1, 0);
    t.pivot(0, 1);

    assert_eq!(analyzer().bland_column(&t, Direction::Maximize), None);
    assert_eq!(analyzer().alternative_optima(&t), vec![VariableSlot::slack(1)]);
}

#[test]
fn test_unbounded_column() {
    // max x1 + x2, -x1 + x2 <= 1
    let problem = Problem::builder(Direction::Maximize, vec![1.0, 1.0])
        .constraint(vec![-1.0, 1.0], Relation::LessEqual, 1.0)
        .build()
        .unwrap();
    let t = TableauBuilder::new(&problem)
        .build(ObjectiveMode::Real)
        .unwrap()
        .tableau;
    assert!(analyzer().is_unbounded_column(&t, 0));
    assert!(!analyzer().is_unbounded_column(&t, 1));
}

#[test]
fn test_infeasibility_reports_basic_artificials() {
    // x1 + x2 >= 3 with x1 + x2 <= 1: the artificial stays basic.
    let problem = Problem::builder(Direction::Maximize, vec![1.0, 1.0])
        .constraint(vec![1.0, 1.0], Relation::GreaterEqual, 3.0)
        .constraint(vec![1.0, 1.0], Relation::LessEqual, 1.0)
        .build()
        .unwrap();
    let mut t = TableauBuilder::new(&problem)
        .build(ObjectiveMode::PhaseOne)
        .unwrap()
        .tableau;
    t.pivot(1, 0);

    let infeasibility = analyzer().infeasibility(&t).unwrap();
    assert_eq!(infeasibility.artificials, vec![(VariableSlot::artificial(0), 2.0)]);
    assert_eq!(infeasibility.residual, 2.0);
}

#[test]
fn test_sensitivity_reads_shadow_prices() {
    let t = textbook_optimum();
    let sensitivity = analyzer().sensitivity(&t, &textbook(), &[]);

    let prices: Vec<f64> = sensitivity.shadow_prices.iter().map(|p| p.unwrap()).collect();
    assert!((prices[0] - 4.0 / 3.0).abs() < 1e-12);
    assert!((prices[1] - 1.0 / 3.0).abs() < 1e-12);
    assert!(sensitivity.reduced_costs.iter().all(|c| c.abs() < 1e-12));
}

#[test]
fn test_sensitivity_respects_normalization() {
    // min x1, -x1 <= -2 (that is x1 >= 2): raising the caller's RHS
    // towards zero lowers the optimum, so the price is -1.
    let problem = Problem::builder(Direction::Minimize, vec![1.0])
        .constraint(vec![-1.0], Relation::LessEqual, -2.0)
        .build()
        .unwrap();
    let built = TableauBuilder::new(&problem)
        .build(ObjectiveMode::PhaseOne)
        .unwrap();
    let mut t = built.tableau;
    t.pivot(0, 0);
    t.retain_columns(|slot| !slot.is_artificial());
    t.set_objective(&[1.0, 0.0]);

    let sensitivity = analyzer().sensitivity(&t, &problem, &built.normalized);
    assert_eq!(sensitivity.shadow_prices, vec![Some(-1.0)]);
}

#[test]
fn test_equality_rows_have_no_shadow_price() {
    let problem = Problem::builder(Direction::Minimize, vec![1.0])
        .constraint(vec![1.0], Relation::Equal, 2.0)
        .build()
        .unwrap();
    let mut t = TableauBuilder::new(&problem)
        .build(ObjectiveMode::PhaseOne)
        .unwrap()
        .tableau;
    t.pivot(0, 0);
    t.retain_columns(|slot| !slot.is_artificial());
    t.set_objective(&[1.0]);

    let sensitivity = analyzer().sensitivity(&t, &problem, &[]);
    assert_eq!(sensitivity.shadow_prices, vec![None]);
    assert_eq!(sensitivity.reduced_costs, vec![0.0]);
}
