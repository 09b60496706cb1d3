//! Board model and drag-move resolution.
//!
//! # Responsibility
//! - Hold the three fixed lanes in board order.
//! - Validate persisted boards before they become live state.
//! - Resolve a completed drag gesture into a new board, without I/O.
//!
//! # Invariants
//! - Exactly three lanes, ordered `todo`, `not-today`, `never`.
//! - A task id appears at most once across the whole board.
//! - Same-lane moves follow remove-then-insert splice semantics; the target
//!   index is applied to the already-shortened sequence.

use crate::model::lane::{Lane, LaneId};
use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Structural problems found while validating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardValidationError {
    /// Board did not contain exactly three lanes.
    LaneCount { found: usize },
    /// Lane at `position` is not the one the fixed order requires.
    LaneOrder {
        position: usize,
        expected: LaneId,
        found: LaneId,
    },
    /// Same task id stored more than once.
    DuplicateTask(TaskId),
}

impl Display for BoardValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LaneCount { found } => write!(f, "board must have 3 lanes, found {found}"),
            Self::LaneOrder {
                position,
                expected,
                found,
            } => write!(
                f,
                "lane at position {position} must be `{expected}`, found `{found}`"
            ),
            Self::DuplicateTask(id) => write!(f, "task `{id}` appears more than once"),
        }
    }
}

impl Error for BoardValidationError {}

/// The three lanes of the task board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Lane>", into = "Vec<Lane>")]
pub struct Board {
    lanes: Vec<Lane>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            lanes: LaneId::ALL.into_iter().map(Lane::empty).collect(),
        }
    }
}

impl TryFrom<Vec<Lane>> for Board {
    type Error = BoardValidationError;

    fn try_from(lanes: Vec<Lane>) -> Result<Self, Self::Error> {
        let board = Self { lanes };
        board.validate()?;
        Ok(board)
    }
}

impl From<Board> for Vec<Lane> {
    fn from(board: Board) -> Self {
        board.lanes
    }
}

/// Lane plus index inside that lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanePosition {
    pub lane: LaneId,
    pub index: usize,
}

impl LanePosition {
    pub fn new(lane: LaneId, index: usize) -> Self {
        Self { lane, index }
    }
}

/// A released drag gesture. `destination` is `None` when dropped outside
/// every lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    pub source: LanePosition,
    pub destination: Option<LanePosition>,
}

/// Why a gesture produced no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAbort {
    DroppedOutside,
    SamePosition,
    /// Source index does not hold a task.
    MissingSource,
}

/// Outcome of resolving a gesture against a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResolution {
    Aborted(MoveAbort),
    Moved {
        board: Board,
        task_id: TaskId,
        /// Task left `todo` for another lane.
        completed: bool,
    },
}

impl Board {
    /// Checks lane set, lane order and task id uniqueness.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        if self.lanes.len() != LaneId::ALL.len() {
            return Err(BoardValidationError::LaneCount {
                found: self.lanes.len(),
            });
        }

        for (position, (lane, expected)) in self.lanes.iter().zip(LaneId::ALL).enumerate() {
            if lane.id != expected {
                return Err(BoardValidationError::LaneOrder {
                    position,
                    expected,
                    found: lane.id,
                });
            }
        }

        let mut seen = HashSet::new();
        for task in self.tasks() {
            if !seen.insert(task.id.as_str()) {
                return Err(BoardValidationError::DuplicateTask(task.id.clone()));
            }
        }

        Ok(())
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, id: LaneId) -> &Lane {
        &self.lanes[id.position()]
    }

    /// All tasks in board order (lane by lane, top to bottom).
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.lanes.iter().flat_map(|lane| lane.tasks.iter())
    }

    pub fn task_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.tasks.len()).sum()
    }

    /// Finds the lane and index currently holding `task_id`.
    pub fn locate(&self, task_id: &str) -> Option<LanePosition> {
        self.lanes.iter().find_map(|lane| {
            lane.position_of(task_id)
                .map(|index| LanePosition::new(lane.id, index))
        })
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.locate(task_id)
            .map(|at| &self.lane(at.lane).tasks[at.index])
    }

    pub(crate) fn insert_front(&mut self, lane: LaneId, task: Task) {
        self.lane_mut(lane).tasks.insert(0, task);
    }

    /// Replaces the stored task with the same id, keeping its index.
    pub(crate) fn replace_task(&mut self, task: Task) -> bool {
        let Some(at) = self.locate(&task.id) else {
            return false;
        };
        self.lane_mut(at.lane).tasks[at.index] = task;
        true
    }

    pub(crate) fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let at = self.locate(task_id)?;
        Some(self.lane_mut(at.lane).tasks.remove(at.index))
    }

    pub(crate) fn adjust_task_time(&mut self, task_id: &str, delta_minutes: i64) -> bool {
        let Some(at) = self.locate(task_id) else {
            return false;
        };
        self.lane_mut(at.lane).tasks[at.index].adjust_estimated_time(delta_minutes);
        true
    }

    /// Resolves a released drag gesture into a new board.
    ///
    /// Pure: `self` is never modified. A destination index past the end of
    /// the target sequence is clamped to its end.
    pub fn resolve_move(&self, gesture: &DragGesture) -> MoveResolution {
        let source = gesture.source;
        let Some(destination) = gesture.destination else {
            return MoveResolution::Aborted(MoveAbort::DroppedOutside);
        };
        if source == destination {
            return MoveResolution::Aborted(MoveAbort::SamePosition);
        }
        if source.index >= self.lane(source.lane).tasks.len() {
            return MoveResolution::Aborted(MoveAbort::MissingSource);
        }

        let mut board = self.clone();
        let moved = board.lane_mut(source.lane).tasks.remove(source.index);
        let task_id = moved.id.clone();

        let target = &mut board.lane_mut(destination.lane).tasks;
        let at = destination.index.min(target.len());
        target.insert(at, moved);

        MoveResolution::Moved {
            board,
            task_id,
            completed: source.lane == LaneId::Todo && destination.lane != LaneId::Todo,
        }
    }

    fn lane_mut(&mut self, id: LaneId) -> &mut Lane {
        &mut self.lanes[id.position()]
    }
}
