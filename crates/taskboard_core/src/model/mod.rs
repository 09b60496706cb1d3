//! Task board domain model.
//!
//! # Responsibility
//! - Define tasks, lanes and the three-lane board.
//! - Define auxiliary profile state stored beside the board.
//!
//! # Invariants
//! - The board always has the three fixed lanes in fixed order.
//! - A task id lives in at most one lane, at most once.

pub mod board;
pub mod lane;
pub mod prefs;
pub mod task;
