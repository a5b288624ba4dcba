use super::*;
use lpforge_config::TraceLevel;
use lpforge_core::{Problem, Relation, VariableSlot};

use crate::builder::{ObjectiveMode, TableauBuilder};

fn real_tableau(problem: &Problem) -> Tableau {
    TableauBuilder::new(problem)
        .build(ObjectiveMode::Real)
        .unwrap()
        .tableau
}

fn textbook() -> Problem {
    Problem::builder(Direction::Maximize, vec![3.0, 2.0])
        .constraint(vec![2.0, 1.0], Relation::LessEqual, 6.0)
        .constraint(vec![1.0, 2.0], Relation::LessEqual, 8.0)
        .build()
        .unwrap()
}

fn degenerate() -> Problem {
    Problem::builder(Direction::Maximize, vec![1.0, 1.0])
        .constraint(vec![1.0, 1.0], Relation::LessEqual, 2.0)
        .constraint(vec![1.0, 0.0], Relation::LessEqual, 0.0)
        .constraint(vec![0.0, 1.0], Relation::LessEqual, 2.0)
        .build()
        .unwrap()
}

/// Beale's example: Dantzig's rule with lowest-row ties cycles forever.
fn beale() -> Problem {
    Problem::builder(Direction::Minimize, vec![-0.75, 150.0, -0.02, 6.0])
        .constraint(vec![0.25, -60.0, -0.04, 9.0], Relation::LessEqual, 0.0)
        .constraint(vec![0.5, -90.0, -0.02, 3.0], Relation::LessEqual, 0.0)
        .constraint(vec![0.0, 0.0, 1.0, 0.0], Relation::LessEqual, 1.0)
        .build()
        .unwrap()
}

#[test]
fn test_entering_and_leaving_selection() {
    let t = real_tableau(&textbook());
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Maximize, Stage::Single);

    assert!(!engine.is_optimal(&t));
    assert_eq!(engine.entering_column(&t), Some(0));
    assert_eq!(engine.leaving_row(&t, 0), Some(0));
    assert_eq!(engine.leaving_row(&t, 1), Some(1));
}

#[test]
fn test_ratio_ties_go_to_lowest_row() {
    let problem = Problem::builder(Direction::Maximize, vec![1.0])
        .constraint(vec![2.0], Relation::LessEqual, 4.0)
        .constraint(vec![1.0], Relation::LessEqual, 2.0)
        .build()
        .unwrap();
    let t = real_tableau(&problem);
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Maximize, Stage::Single);
    assert_eq!(engine.leaving_row(&t, 0), Some(0));
}

#[test]
fn test_run_reaches_optimum() {
    let mut t = real_tableau(&textbook());
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Maximize, Stage::Single);
    let mut recorder = TraceRecorder::new(TraceLevel::Steps);

    let run = engine.run(&mut t, &mut recorder);

    assert_eq!(run.outcome, EngineOutcome::Optimal);
    assert_eq!(run.iterations, 2);
    assert!((t.objective_value() - 32.0 / 3.0).abs() < 1e-9);

    let trace = recorder.into_trace();
    assert_eq!(trace.pivot_count(), 2);
    match &trace.events()[0] {
        TraceEvent::Pivot {
            iteration,
            entering,
            leaving,
            row,
            element,
            ..
        } => {
            assert_eq!(*iteration, 1);
            assert_eq!(*entering, VariableSlot::original(0));
            assert_eq!(*leaving, VariableSlot::slack(0));
            assert_eq!(*row, 0);
            assert_eq!(*element, 2.0);
        }
        other => panic!("expected a pivot, got {other:?}"),
    }
    assert!(matches!(
        trace.events().last(),
        Some(TraceEvent::StageEnded {
            status: SolveStatus::Optimal,
            iterations: 2,
            ..
        })
    ));
}

#[test]
fn test_unit_columns_after_each_pivot() {
    let mut t = real_tableau(&textbook());
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Maximize, Stage::Single);
    while let Some(col) = engine.entering_column(&t) {
        let row = engine.leaving_row(&t, col).unwrap();
        t.pivot(row, col);
        assert!(t.is_unit_column(col, row, 1e-9));
    }
}

#[test]
fn test_minimization_enters_positive_entries() {
    // min x1 - x2, x1 + x2 <= 4
    let problem = Problem::builder(Direction::Minimize, vec![1.0, -1.0])
        .constraint(vec![1.0, 1.0], Relation::LessEqual, 4.0)
        .build()
        .unwrap();
    let mut t = real_tableau(&problem);
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Minimize, Stage::Single);
    assert_eq!(engine.entering_column(&t), Some(1));

    let run = engine.run(&mut t, &mut TraceRecorder::new(TraceLevel::Off));
    assert_eq!(run.outcome, EngineOutcome::Optimal);
    assert_eq!(t.objective_value(), -4.0);
    assert_eq!(t.original_values(2), vec![0.0, 4.0]);
}

#[test]
fn test_unbounded_column_reported() {
    let problem = Problem::builder(Direction::Maximize, vec![1.0, 1.0])
        .constraint(vec![-1.0, 1.0], Relation::LessEqual, 1.0)
        .build()
        .unwrap();
    let mut t = real_tableau(&problem);
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Maximize, Stage::Single);

    let run = engine.run(&mut t, &mut TraceRecorder::new(TraceLevel::Steps));
    assert!(matches!(run.outcome, EngineOutcome::Unbounded { .. }));
    if let EngineOutcome::Unbounded { column } = run.outcome {
        assert!(SpecialCaseAnalyzer::new(1e-10).is_unbounded_column(&t, column));
    }
}

#[test]
fn test_iteration_limit_checked_after_optimality() {
    let config = SolverConfig::default().with_iteration_limit(1);
    let engine = PivotEngine::new(&config, Direction::Maximize, Stage::Single);
    let mut t = real_tableau(&textbook());
    let run = engine.run(&mut t, &mut TraceRecorder::new(TraceLevel::Off));
    assert_eq!(run.outcome, EngineOutcome::IterationLimit);
    assert_eq!(run.iterations, 1);

    let config = SolverConfig::default().with_iteration_limit(2);
    let engine = PivotEngine::new(&config, Direction::Maximize, Stage::Single);
    let mut t = real_tableau(&textbook());
    let run = engine.run(&mut t, &mut TraceRecorder::new(TraceLevel::Off));
    assert_eq!(run.outcome, EngineOutcome::Optimal);
}

#[test]
fn test_bland_rule_takes_lowest_index() {
    // max x1 + 5x2: Dantzig picks x2, Bland picks x1.
    let problem = Problem::builder(Direction::Maximize, vec![1.0, 5.0])
        .constraint(vec![1.0, 1.0], Relation::LessEqual, 4.0)
        .build()
        .unwrap();
    let t = real_tableau(&problem);
    let dantzig = PivotEngine::new(&SolverConfig::default(), Direction::Maximize, Stage::Single);
    assert_eq!(dantzig.entering_column(&t), Some(1));

    let config = SolverConfig::default().with_entering_rule(EnteringRule::Bland);
    let bland = PivotEngine::new(&config, Direction::Maximize, Stage::Single);
    let mut t = t;
    let mut recorder = TraceRecorder::new(TraceLevel::Steps);
    let run = bland.run(&mut t, &mut recorder);

    assert_eq!(run.outcome, EngineOutcome::Optimal);
    assert_eq!(t.objective_value(), 20.0);
    assert!(matches!(
        recorder.into_trace().events()[0],
        TraceEvent::Pivot {
            entering: VariableSlot {
                kind: lpforge_core::VariableKind::Original,
                index: 0
            },
            ..
        }
    ));
}

#[test]
fn test_bland_engaged_on_degenerate_basis() {
    let config = SolverConfig::default().with_entering_rule(EnteringRule::BlandOnDegeneracy);
    let engine = PivotEngine::new(&config, Direction::Maximize, Stage::Single);
    let mut t = real_tableau(&degenerate());
    let mut recorder = TraceRecorder::new(TraceLevel::Steps);

    let run = engine.run(&mut t, &mut recorder);

    assert_eq!(run.outcome, EngineOutcome::Optimal);
    assert!((t.objective_value() - 2.0).abs() < 1e-12);
    assert!(recorder
        .into_trace()
        .iter()
        .any(|e| matches!(e, TraceEvent::BlandEngaged { iteration: 1, .. })));
}

#[test]
fn test_tableaux_level_snapshots_every_pivot() {
    let mut t = real_tableau(&textbook());
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Maximize, Stage::Single);
    let mut recorder = TraceRecorder::new(TraceLevel::Tableaux);
    engine.run(&mut t, &mut recorder);

    let snapshots = recorder
        .into_trace()
        .iter()
        .filter(|e| matches!(e, TraceEvent::Tableau { .. }))
        .count();
    assert_eq!(snapshots, 3);
}

#[test]
fn test_dantzig_cycles_on_beale_until_limit() {
    let engine = PivotEngine::new(&SolverConfig::default(), Direction::Minimize, Stage::Single);
    let mut t = real_tableau(&beale());
    let run = engine.run(&mut t, &mut TraceRecorder::new(TraceLevel::Off));

    assert_eq!(run.outcome, EngineOutcome::IterationLimit);
    assert_eq!(run.iterations, 100);
}

#[test]
fn test_bland_rules_break_beale_cycle() {
    let problem = beale();
    for rule in [EnteringRule::Bland, EnteringRule::BlandOnDegeneracy] {
        let config = SolverConfig::default().with_entering_rule(rule);
        let engine = PivotEngine::new(&config, Direction::Minimize, Stage::Single);
        let mut t = real_tableau(&problem);
        let run = engine.run(&mut t, &mut TraceRecorder::new(TraceLevel::Off));

        assert_eq!(run.outcome, EngineOutcome::Optimal, "{rule:?}");
        assert!(run.iterations < 100);
        let value = problem.objective_value(&t.original_values(4));
        assert!((value + 0.05).abs() < 1e-9, "{rule:?}: {value}");
    }
}
