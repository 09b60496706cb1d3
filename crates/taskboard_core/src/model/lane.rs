//! Lane (board column) model.
//!
//! # Invariants
//! - Lane ids come from the fixed set `todo | not-today | never`.
//! - Task order inside a lane is the user-chosen order.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Fixed lane identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LaneId {
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "not-today")]
    NotToday,
    #[serde(rename = "never")]
    Never,
}

impl LaneId {
    /// All lanes in board order.
    pub const ALL: [LaneId; 3] = [LaneId::Todo, LaneId::NotToday, LaneId::Never];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::NotToday => "not-today",
            Self::Never => "never",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::NotToday => "Not today",
            Self::Never => "Never",
        }
    }

    /// Position of this lane inside the board.
    pub fn position(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::NotToday => 1,
            Self::Never => 2,
        }
    }
}

impl Display for LaneId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown lane label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLaneIdError(pub String);

impl Display for ParseLaneIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown lane `{}`; expected todo|not-today|never",
            self.0
        )
    }
}

impl std::error::Error for ParseLaneIdError {}

impl FromStr for LaneId {
    type Err = ParseLaneIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "todo" => Ok(Self::Todo),
            "not-today" => Ok(Self::NotToday),
            "never" => Ok(Self::Never),
            other => Err(ParseLaneIdError(other.to_string())),
        }
    }
}

/// One named bucket of ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub id: LaneId,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Lane {
    /// Empty lane with its default title.
    pub fn empty(id: LaneId) -> Self {
        Self {
            id,
            title: id.default_title().to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == task_id)
    }
}
