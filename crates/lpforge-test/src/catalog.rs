//! Reference linear programs.
//!
//! Each entry pairs a small problem with the method it is meant to exercise
//! and the true outcome of the program. The first seven cover the classic
//! classroom cases; the rest exercise normalization, redundancy,
//! minimization and infeasibility hidden behind an unbounded direction.
//!
//! # Example
//!
//! ```
//! use lpforge_test::catalog::{self, Expected};
//!
//! for entry in catalog::all() {
//!     if let Expected::Optimal { value, .. } = entry.expected {
//!         assert!(value.is_finite());
//!     }
//! }
//! ```

use lpforge_core::{Direction, Method, Problem, Relation};
use Relation::{Equal, GreaterEqual as Ge, LessEqual as Le};

/// Known outcome of a catalog problem.
#[derive(Clone, Debug, PartialEq)]
pub enum Expected {
    /// Optimal with `value`. `solution` is `None` when the optimum is not
    /// unique.
    Optimal {
        value: f64,
        solution: Option<Vec<f64>>,
    },
    Unbounded,
    Infeasible,
}

/// A reference problem.
#[derive(Clone, Debug)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub problem: Problem,
    /// Method the entry is meant for.
    pub method: Method,
    pub expected: Expected,
    /// Whether the optimal tableau of `method` has a basic variable at zero.
    pub degenerate: bool,
    /// Whether `method` reports alternative optima.
    pub alternative_optima: bool,
}

impl CatalogEntry {
    fn new(
        name: &'static str,
        description: &'static str,
        problem: Problem,
        method: Method,
        expected: Expected,
    ) -> Self {
        Self {
            name,
            description,
            problem,
            method,
            expected,
            degenerate: false,
            alternative_optima: false,
        }
    }

    fn degenerate(mut self) -> Self {
        self.degenerate = true;
        self
    }

    fn alternative_optima(mut self) -> Self {
        self.alternative_optima = true;
        self
    }

    /// True if the expected outcome is optimal.
    pub fn is_solvable(&self) -> bool {
        matches!(self.expected, Expected::Optimal { .. })
    }
}

fn optimal(value: f64, solution: &[f64]) -> Expected {
    Expected::Optimal {
        value,
        solution: Some(solution.to_vec()),
    }
}

fn build<const N: usize>(
    direction: Direction,
    c: [f64; N],
    rows: &[([f64; N], Relation, f64)],
) -> Problem {
    rows.iter()
        .fold(Problem::builder(direction, c.to_vec()), |b, (a, rel, rhs)| {
            b.constraint(a.to_vec(), *rel, *rhs)
        })
        .build()
        .expect("catalog problems are well formed")
}

/// max 3x1 + 2x2, 2x1 + x2 <= 6, x1 + 2x2 <= 8.
pub fn standard() -> CatalogEntry {
    CatalogEntry::new(
        "standard",
        "canonical maximization solved from the slack basis",
        build(
            Direction::Maximize,
            [3.0, 2.0],
            &[([2.0, 1.0], Le, 6.0), ([1.0, 2.0], Le, 8.0)],
        ),
        Method::Direct,
        optimal(32.0 / 3.0, &[4.0 / 3.0, 10.0 / 3.0]),
    )
}

/// max 3x1 + 2x2, x1 + x2 >= 1, 2x1 + x2 <= 6, x1 + 2x2 <= 8.
pub fn big_m() -> CatalogEntry {
    CatalogEntry::new(
        "big_m",
        "a >= row needs an artificial variable",
        build(
            Direction::Maximize,
            [3.0, 2.0],
            &[
                ([1.0, 1.0], Ge, 1.0),
                ([2.0, 1.0], Le, 6.0),
                ([1.0, 2.0], Le, 8.0),
            ],
        ),
        Method::BigM,
        optimal(32.0 / 3.0, &[4.0 / 3.0, 10.0 / 3.0]),
    )
}

/// min 2x1 + 3x2, x1 + x2 = 4, 2x1 + x2 >= 6.
pub fn two_phase() -> CatalogEntry {
    CatalogEntry::new(
        "two_phase",
        "minimization over an equality and a >= row",
        build(
            Direction::Minimize,
            [2.0, 3.0],
            &[([1.0, 1.0], Equal, 4.0), ([2.0, 1.0], Ge, 6.0)],
        ),
        Method::TwoPhase,
        optimal(8.0, &[4.0, 0.0]),
    )
}

/// max x1 + x2, x1 + x2 <= 2, x1 <= 0, x2 <= 2.
pub fn degenerate() -> CatalogEntry {
    CatalogEntry::new(
        "degenerate",
        "the optimal basis holds variables at zero",
        build(
            Direction::Maximize,
            [1.0, 1.0],
            &[
                ([1.0, 1.0], Le, 2.0),
                ([1.0, 0.0], Le, 0.0),
                ([0.0, 1.0], Le, 2.0),
            ],
        ),
        Method::Direct,
        optimal(2.0, &[0.0, 2.0]),
    )
    .degenerate()
    .alternative_optima()
}

/// max x1 + x2, -x1 + x2 <= 1.
pub fn unbounded() -> CatalogEntry {
    CatalogEntry::new(
        "unbounded",
        "x1 grows without limit",
        build(Direction::Maximize, [1.0, 1.0], &[([-1.0, 1.0], Le, 1.0)]),
        Method::Direct,
        Expected::Unbounded,
    )
}

/// max x1 + x2, x1 + x2 >= 3, x1 + x2 <= 1.
pub fn infeasible() -> CatalogEntry {
    CatalogEntry::new(
        "infeasible",
        "contradictory bounds on x1 + x2",
        build(
            Direction::Maximize,
            [1.0, 1.0],
            &[([1.0, 1.0], Ge, 3.0), ([1.0, 1.0], Le, 1.0)],
        ),
        Method::BigM,
        Expected::Infeasible,
    )
}

/// max x1 + x2, x1 + x2 <= 3, x1 <= 2, x2 <= 2.
pub fn multiple_optima() -> CatalogEntry {
    CatalogEntry::new(
        "multiple_optima",
        "the objective is parallel to a binding constraint",
        build(
            Direction::Maximize,
            [1.0, 1.0],
            &[
                ([1.0, 1.0], Le, 3.0),
                ([1.0, 0.0], Le, 2.0),
                ([0.0, 1.0], Le, 2.0),
            ],
        ),
        Method::Direct,
        Expected::Optimal {
            value: 3.0,
            solution: None,
        },
    )
    .alternative_optima()
}

/// min x1 + 2x2, x1 + x2 = 2, 2x1 + 2x2 = 4.
pub fn redundant() -> CatalogEntry {
    CatalogEntry::new(
        "redundant",
        "the second equality is twice the first",
        build(
            Direction::Minimize,
            [1.0, 2.0],
            &[([1.0, 1.0], Equal, 2.0), ([2.0, 2.0], Equal, 4.0)],
        ),
        Method::TwoPhase,
        optimal(2.0, &[2.0, 0.0]),
    )
}

/// min 3x1 + 2x2, -x1 - x2 <= -4, x1 <= 3.
pub fn negative_rhs() -> CatalogEntry {
    CatalogEntry::new(
        "negative_rhs",
        "a <= row with negative right-hand side is normalized to >=",
        build(
            Direction::Minimize,
            [3.0, 2.0],
            &[([-1.0, -1.0], Le, -4.0), ([1.0, 0.0], Le, 3.0)],
        ),
        Method::TwoPhase,
        optimal(8.0, &[0.0, 4.0]),
    )
}

/// min 0.6x1 + 0.35x2, 5x1 + 7x2 >= 8, 4x1 + 2x2 >= 15, 2x1 + x2 >= 3.
pub fn diet() -> CatalogEntry {
    CatalogEntry::new(
        "diet",
        "covering problem with only >= rows",
        build(
            Direction::Minimize,
            [0.6, 0.35],
            &[
                ([5.0, 7.0], Ge, 8.0),
                ([4.0, 2.0], Ge, 15.0),
                ([2.0, 1.0], Ge, 3.0),
            ],
        ),
        Method::TwoPhase,
        optimal(2.25, &[3.75, 0.0]),
    )
}

/// max x1, x2 >= 1, x2 <= 0.
pub fn infeasible_ray() -> CatalogEntry {
    CatalogEntry::new(
        "infeasible_ray",
        "no feasible point, yet x1 is an improving direction",
        build(
            Direction::Maximize,
            [1.0, 0.0],
            &[([0.0, 1.0], Ge, 1.0), ([0.0, 1.0], Le, 0.0)],
        ),
        Method::BigM,
        Expected::Infeasible,
    )
}

/// Every catalog entry, classic cases first.
pub fn all() -> Vec<CatalogEntry> {
    vec![
        standard(),
        big_m(),
        two_phase(),
        degenerate(),
        unbounded(),
        infeasible(),
        multiple_optima(),
        redundant(),
        negative_rhs(),
        diet(),
        infeasible_ray(),
    ]
}

/// Looks an entry up by name.
pub fn by_name(name: &str) -> Option<CatalogEntry> {
    all().into_iter().find(|e| e.name == name)
}
