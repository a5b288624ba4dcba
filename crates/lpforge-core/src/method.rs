//! Solution methods.

use std::fmt;
use std::str::FromStr;

use crate::error::LpError;
use crate::problem::{Problem, Relation};

/// Entry strategy used to bring a problem into the pivoting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Method {
    /// Slack-only tableau; requires every row to be `<=` with non-negative RHS.
    Direct,

    /// Single pass with artificial variables penalized by a large constant.
    BigM,

    /// Feasibility phase on the artificial sum, then the real objective.
    TwoPhase,
}

impl Method {
    /// Every method, in the order they are usually presented.
    pub const ALL: [Method; 3] = [Method::Direct, Method::BigM, Method::TwoPhase];

    /// Returns the human-readable method name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Direct => "Direct Simplex",
            Method::BigM => "Big-M",
            Method::TwoPhase => "Two-Phase",
        }
    }

    /// Picks the cheapest method able to solve `problem`.
    ///
    /// Problems whose all-slack basis is already feasible go to the direct
    /// method; everything else goes to Two-Phase, which does not depend on
    /// the magnitude of a penalty constant.
    ///
    /// # Examples
    ///
    /// ```
    /// use lpforge_core::{Direction, Method, Problem, Relation};
    ///
    /// let problem = Problem::builder(Direction::Maximize, vec![1.0, 1.0])
    ///     .constraint(vec![1.0, 1.0], Relation::GreaterEqual, 1.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(Method::recommended_for(&problem), Method::TwoPhase);
    /// ```
    pub fn recommended_for(problem: &Problem) -> Method {
        let canonical = problem
            .relations()
            .iter()
            .zip(problem.rhs())
            .all(|(relation, &rhs)| *relation == Relation::LessEqual && rhs >= 0.0);
        if canonical {
            Method::Direct
        } else {
            Method::TwoPhase
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = LpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "simplex" => Ok(Method::Direct),
            "big_m" | "big-m" | "bigm" => Ok(Method::BigM),
            "two_phase" | "two-phase" | "twophase" => Ok(Method::TwoPhase),
            other => Err(LpError::Parse(format!("unknown method '{other}'"))),
        }
    }
}
