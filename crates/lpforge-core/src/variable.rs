//! Tableau column identities.

use std::fmt;

/// Role of a tableau column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum VariableKind {
    /// Decision variable of the caller's problem.
    Original,
    /// Added to a `<=` row.
    Slack,
    /// Subtracted from a `>=` row.
    Surplus,
    /// Added to a `>=` or `=` row to supply an initial basis.
    Artificial,
}

/// Stable identity of a tableau column.
///
/// `index` is the decision variable index for [`VariableKind::Original`]
/// and the constraint row index for every other kind, so a slot keeps its
/// meaning when columns or rows are removed from the tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableSlot {
    pub kind: VariableKind,
    pub index: usize,
}

impl VariableSlot {
    pub fn original(index: usize) -> Self {
        Self {
            kind: VariableKind::Original,
            index,
        }
    }

    pub fn slack(row: usize) -> Self {
        Self {
            kind: VariableKind::Slack,
            index: row,
        }
    }

    pub fn surplus(row: usize) -> Self {
        Self {
            kind: VariableKind::Surplus,
            index: row,
        }
    }

    pub fn artificial(row: usize) -> Self {
        Self {
            kind: VariableKind::Artificial,
            index: row,
        }
    }

    pub fn is_original(&self) -> bool {
        self.kind == VariableKind::Original
    }

    pub fn is_artificial(&self) -> bool {
        self.kind == VariableKind::Artificial
    }
}

impl fmt::Display for VariableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            VariableKind::Original => 'x',
            VariableKind::Slack => 's',
            VariableKind::Surplus => 'e',
            VariableKind::Artificial => 'a',
        };
        write!(f, "{prefix}{}", self.index + 1)
    }
}
