//! Property tests over randomly generated feasible problems.

use lpforge_config::SolverConfig;
use lpforge_core::{Direction, Method, Problem, Relation, SolveStatus, Stage};
use lpforge_test::{assert_close, assert_feasible};
use proptest::prelude::*;

use crate::builder::{ObjectiveMode, TableauBuilder};
use crate::engine::PivotEngine;
use crate::method::solve;

/// max c·x over positive `<=` rows, which is always feasible and bounded.
fn canonical_problem() -> impl Strategy<Value = Problem> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(0.1f64..5.0, n),
            prop::collection::vec(prop::collection::vec(0.5f64..5.0, n), m),
            prop::collection::vec(1.0f64..20.0, m),
        )
            .prop_map(|(c, rows, b)| {
                rows.into_iter()
                    .zip(b)
                    .fold(Problem::builder(Direction::Maximize, c), |p, (a, rhs)| {
                        p.constraint(a, Relation::LessEqual, rhs)
                    })
                    .build()
                    .unwrap()
            })
    })
}

/// min c·x with c > 0 over mixed rows built around a known feasible point.
fn mixed_problem() -> impl Strategy<Value = Problem> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(n, m)| {
        (
            prop::collection::vec(0.1f64..5.0, n),
            prop::collection::vec(0.1f64..3.0, n),
            prop::collection::vec(
                (
                    prop::collection::vec(0.5f64..5.0, n),
                    0usize..3,
                    0.0f64..2.0,
                ),
                m,
            ),
        )
            .prop_map(|(c, x0, rows)| {
                rows.into_iter()
                    .fold(
                        Problem::builder(Direction::Minimize, c),
                        |p, (a, kind, gap)| {
                            let lhs: f64 = a.iter().zip(&x0).map(|(a, x)| a * x).sum();
                            match kind {
                                0 => p.constraint(a, Relation::LessEqual, lhs + gap),
                                1 => p.constraint(a, Relation::GreaterEqual, lhs - gap),
                                _ => p.constraint(a, Relation::Equal, lhs),
                            }
                        },
                    )
                    .build()
                    .unwrap()
            })
    })
}

proptest! {
    #[test]
    fn pivot_column_becomes_unit_vector(problem in canonical_problem()) {
        let config = SolverConfig::default();
        let mut tableau = TableauBuilder::new(&problem)
            .build(ObjectiveMode::Real)
            .unwrap()
            .tableau;
        let engine = PivotEngine::new(&config, Direction::Maximize, Stage::Single);
        let mut steps = 0;
        while let Some(col) = engine.entering_column(&tableau) {
            let row = engine.leaving_row(&tableau, col).unwrap();
            tableau.pivot(row, col);
            prop_assert!(tableau.is_unit_column(col, row, 1e-9));
            steps += 1;
            prop_assert!(steps <= config.iteration_limit);
        }
    }

    #[test]
    fn direct_optimum_is_feasible(problem in canonical_problem()) {
        let result = solve(&problem, Method::Direct, &SolverConfig::default()).unwrap();
        prop_assert_eq!(result.status(), SolveStatus::Optimal);
        let optimal = result.optimal().unwrap();
        assert_feasible(&problem, &optimal.values, optimal.objective_value, 1e-7);
    }

    #[test]
    fn big_m_and_two_phase_agree(problem in mixed_problem()) {
        let config = SolverConfig::default();
        let big_m = solve(&problem, Method::BigM, &config).unwrap();
        let two_phase = solve(&problem, Method::TwoPhase, &config).unwrap();

        prop_assert_eq!(two_phase.status(), SolveStatus::Optimal);
        prop_assert_eq!(big_m.status(), two_phase.status());
        let value = two_phase.optimal_value().unwrap();
        assert_close(big_m.optimal_value().unwrap(), value, 1e-6);
        assert_feasible(&problem, two_phase.solution().unwrap(), value, 1e-7);
    }

    #[test]
    fn solving_twice_gives_same_outcome(problem in mixed_problem()) {
        let config = SolverConfig::default();
        for method in [Method::BigM, Method::TwoPhase] {
            let first = solve(&problem, method, &config).unwrap();
            let second = solve(&problem, method, &config).unwrap();
            prop_assert_eq!(first.outcome, second.outcome);
            prop_assert_eq!(first.iterations, second.iterations);
        }
    }
}
