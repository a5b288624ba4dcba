//! Canonical linear program description.
//!
//! A [`Problem`] is the read-only input of every solve: an objective vector,
//! a dense constraint matrix, one relation and one right-hand side per row,
//! and an optimization direction. All variables are implicitly non-negative.

use std::fmt;
use std::str::FromStr;

use crate::error::{LpError, Result};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[cfg_attr(feature = "serde", serde(rename = "max", alias = "maximize"))]
    Maximize,
    #[cfg_attr(feature = "serde", serde(rename = "min", alias = "minimize"))]
    Minimize,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Maximize => f.write_str("max"),
            Direction::Minimize => f.write_str("min"),
        }
    }
}

impl FromStr for Direction {
    type Err = LpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" | "maximise" => Ok(Direction::Maximize),
            "min" | "minimize" | "minimise" => Ok(Direction::Minimize),
            other => Err(LpError::Parse(format!("unknown direction '{other}'"))),
        }
    }
}

/// Relation between a constraint's left-hand side and its RHS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    #[cfg_attr(feature = "serde", serde(rename = "<=", alias = "≤"))]
    LessEqual,
    #[cfg_attr(feature = "serde", serde(rename = ">=", alias = "≥"))]
    GreaterEqual,
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Equal,
}

impl Relation {
    /// Returns the relation obtained by multiplying both sides by -1.
    pub fn flipped(self) -> Self {
        match self {
            Relation::LessEqual => Relation::GreaterEqual,
            Relation::GreaterEqual => Relation::LessEqual,
            Relation::Equal => Relation::Equal,
        }
    }

    /// Returns the ASCII symbol of the relation.
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::LessEqual => "<=",
            Relation::GreaterEqual => ">=",
            Relation::Equal => "=",
        }
    }

    /// Checks `lhs <relation> rhs` with an absolute tolerance.
    pub fn holds(&self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Relation::LessEqual => lhs <= rhs + tolerance,
            Relation::GreaterEqual => lhs >= rhs - tolerance,
            Relation::Equal => (lhs - rhs).abs() <= tolerance,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Relation {
    type Err = LpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "≤" | "=<" => Ok(Relation::LessEqual),
            ">=" | "≥" | "=>" => Ok(Relation::GreaterEqual),
            "=" | "==" => Ok(Relation::Equal),
            other => Err(LpError::Parse(format!("unknown relation '{other}'"))),
        }
    }
}

/// A linear program in canonical form.
///
/// Construct with [`Problem::new`] or [`Problem::builder`]; both validate
/// the shape, so a `Problem` obtained from them is always well-formed.
///
/// # Examples
///
/// ```
/// use lpforge_core::{Direction, Problem, Relation};
///
/// let problem = Problem::builder(Direction::Maximize, vec![3.0, 2.0])
///     .constraint(vec![2.0, 1.0], Relation::LessEqual, 6.0)
///     .constraint(vec![1.0, 2.0], Relation::LessEqual, 8.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(problem.num_variables(), 2);
/// assert_eq!(problem.num_constraints(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    direction: Direction,
    #[cfg_attr(feature = "serde", serde(rename = "c"))]
    objective: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "A"))]
    matrix: Vec<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    rhs: Vec<f64>,
    relations: Vec<Relation>,
}

impl Problem {
    /// Creates a validated problem from its canonical parts.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::InputShape`] on mismatched dimensions and
    /// [`LpError::NonFinite`] on NaN or infinite entries.
    pub fn new(
        direction: Direction,
        objective: Vec<f64>,
        matrix: Vec<Vec<f64>>,
        relations: Vec<Relation>,
        rhs: Vec<f64>,
    ) -> Result<Self> {
        let problem = Self {
            direction,
            objective,
            matrix,
            rhs,
            relations,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Starts a row-by-row builder.
    pub fn builder(direction: Direction, objective: Vec<f64>) -> ProblemBuilder {
        ProblemBuilder {
            direction,
            objective,
            matrix: Vec::new(),
            relations: Vec::new(),
            rhs: Vec::new(),
        }
    }

    /// Checks the shape invariants.
    ///
    /// Called again by the solver before any tableau is built, so problems
    /// obtained through deserialization are covered too.
    pub fn validate(&self) -> Result<()> {
        let n = self.objective.len();
        if n == 0 {
            return Err(LpError::InputShape(
                "objective must have at least one coefficient".to_string(),
            ));
        }
        let m = self.matrix.len();
        if self.rhs.len() != m {
            return Err(LpError::InputShape(format!(
                "{m} constraint rows but {} right-hand sides",
                self.rhs.len()
            )));
        }
        if self.relations.len() != m {
            return Err(LpError::InputShape(format!(
                "{m} constraint rows but {} relations",
                self.relations.len()
            )));
        }
        for (i, row) in self.matrix.iter().enumerate() {
            if row.len() != n {
                return Err(LpError::InputShape(format!(
                    "constraint row {} has {} coefficients, expected {n}",
                    i + 1,
                    row.len()
                )));
            }
        }

        if let Some(index) = self.objective.iter().position(|v| !v.is_finite()) {
            return Err(LpError::NonFinite {
                what: "objective",
                index,
            });
        }
        for (i, row) in self.matrix.iter().enumerate() {
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(LpError::NonFinite {
                    what: "constraint matrix",
                    index: i * n + j,
                });
            }
        }
        if let Some(index) = self.rhs.iter().position(|v| !v.is_finite()) {
            return Err(LpError::NonFinite {
                what: "right-hand side",
                index,
            });
        }
        Ok(())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Number of original decision variables (n).
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Number of constraint rows (m).
    pub fn num_constraints(&self) -> usize {
        self.matrix.len()
    }

    /// Evaluates `c · x`.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, v)| c * v).sum()
    }

    /// Evaluates the left-hand side `A_i · x` of constraint `row`.
    pub fn row_activity(&self, row: usize, x: &[f64]) -> f64 {
        self.matrix[row].iter().zip(x).map(|(a, v)| a * v).sum()
    }

    /// Returns true if `x` is non-negative and satisfies every relation.
    pub fn is_feasible(&self, x: &[f64], tolerance: f64) -> bool {
        x.len() == self.num_variables()
            && x.iter().all(|&v| v >= -tolerance)
            && (0..self.num_constraints()).all(|i| {
                self.relations[i].holds(self.row_activity(i, x), self.rhs[i], tolerance)
            })
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.direction, format_linear(&self.objective))?;
        for i in 0..self.num_constraints() {
            writeln!(
                f,
                "  {} {} {}",
                format_linear(&self.matrix[i]),
                self.relations[i],
                self.rhs[i]
            )?;
        }
        write!(f, "  x >= 0")
    }
}

fn format_linear(coefficients: &[f64]) -> String {
    let terms: Vec<String> = coefficients
        .iter()
        .enumerate()
        .filter(|(_, c)| **c != 0.0)
        .map(|(j, c)| format!("{c}*x{}", j + 1))
        .collect();
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    }
}

/// Row-by-row builder for [`Problem`].
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    direction: Direction,
    objective: Vec<f64>,
    matrix: Vec<Vec<f64>>,
    relations: Vec<Relation>,
    rhs: Vec<f64>,
}

impl ProblemBuilder {
    /// Appends the constraint `coefficients · x <relation> rhs`.
    pub fn constraint(mut self, coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Self {
        self.matrix.push(coefficients);
        self.relations.push(relation);
        self.rhs.push(rhs);
        self
    }

    /// Validates and returns the problem.
    pub fn build(self) -> Result<Problem> {
        Problem::new(
            self.direction,
            self.objective,
            self.matrix,
            self.relations,
            self.rhs,
        )
    }
}
