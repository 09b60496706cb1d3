//! Core domain logic for the task board.
//! This crate is the single source of truth for board invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{
    Board, BoardValidationError, DragGesture, LanePosition, MoveAbort, MoveResolution,
};
pub use model::lane::{Lane, LaneId, ParseLaneIdError};
pub use model::prefs::{
    AppNameOption, CollapsedCards, LoginState, APP_NAME_OPTIONS, FALLBACK_APP_TITLE,
};
pub use model::task::{ParsePriorityError, Priority, Task, TaskDefaults, TaskId};
pub use repo::kv_repo::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use service::board_store::{BoardState, BoardStore, MoveOutcome};
pub use service::chunker::{suggest_steps, ChunkPlan, ChunkProgress, ChunkStep};
pub use service::daily_reset::{Clock, ManualClock, SystemClock, RESET_POLL_INTERVAL};
pub use service::editor::TaskEditor;
pub use service::effects::{Effect, SoundCue, ToastKind, CELEBRATION_DURATION};
pub use service::motivation::{MeterTier, MotivationMeter};
pub use service::persistence::{DecodeFailure, Decoded, Hydration, PersistenceBridge};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
