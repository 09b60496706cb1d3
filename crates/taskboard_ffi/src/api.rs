//! FFI use-case API for the Flutter board screen.
//!
//! # Responsibility
//! - Expose board actions to Dart via FRB as flat, use-case-level calls.
//! - Own the single process-wide board session.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Calls are serialized through one `Mutex`; a poisoned lock is recovered.
//! - Every board call returns the full board JSON so the UI never diffs.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Instant;
use taskboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, suggest_steps,
    BoardStore, DragGesture, Effect, LaneId, LanePosition, MoveOutcome, SqliteKvStore, Task,
    TaskDefaults,
};

const BOARD_DB_FILE_NAME: &str = "taskboard.sqlite3";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<BoardStore<SqliteKvStore>>> = Mutex::new(None);

/// Health-check for FRB wiring.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns `pong`.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    "pong".to_string()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; other combinations fail.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Board state envelope returned by every board call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    /// Whether the call reached the board.
    pub ok: bool,
    /// Human-readable result for diagnostics/UI.
    pub message: String,
    /// Lane array in persisted layout; empty when `ok` is false.
    pub board_json: String,
    pub completed_today: u32,
    pub sound_enabled: bool,
    /// Id of the task created or moved, when there is one.
    pub task_id: Option<String>,
    /// Effect names such as `sound:pop`, `celebrate`, `toast:task-moved`.
    pub effects: Vec<String>,
}

impl BoardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            board_json: String::new(),
            completed_today: 0,
            sound_enabled: false,
            task_id: None,
            effects: Vec::new(),
        }
    }
}

/// Chunker envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkResponse {
    pub ok: bool,
    pub message: String,
    /// Step texts in display order.
    pub steps: Vec<String>,
}

/// Current board without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot() -> BoardResponse {
    with_session("board_snapshot", |_| (None, Vec::new(), "Board loaded.".to_string()))
}

/// Adds a task to the top of `todo`. `None` fields use the defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_task(title: Option<String>, estimated_minutes: Option<u32>) -> BoardResponse {
    let title = title
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    with_session("board_add_task", |store| {
        let (task_id, effects) = store.add_task(TaskDefaults {
            title,
            estimated_time: estimated_minutes,
            ..TaskDefaults::default()
        });
        (Some(task_id), effects, "Task added.".to_string())
    })
}

/// Replaces a task from its JSON form (same shape as in `board_json`).
///
/// Unknown ids are accepted and change nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn board_update_task(task_json: String) -> BoardResponse {
    let task: Task = match serde_json::from_str(&task_json) {
        Ok(task) => task,
        Err(err) => return BoardResponse::failure(format!("board_update_task failed: {err}")),
    };
    with_session("board_update_task", |store| {
        let task_id = task.id.clone();
        let effects = store.update_task(task);
        (Some(task_id), effects, "Task saved.".to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_task(task_id: String) -> BoardResponse {
    with_session("board_delete_task", |store| {
        let effects = store.delete_task(task_id.trim());
        (None, effects, "Task deleted.".to_string())
    })
}

/// Shifts a task's estimate; the result never drops below zero.
#[flutter_rust_bridge::frb(sync)]
pub fn board_adjust_time(task_id: String, delta_minutes: i64) -> BoardResponse {
    with_session("board_adjust_time", |store| {
        let effects = store.adjust_task_time(task_id.trim(), delta_minutes);
        (Some(task_id), effects, "Estimate updated.".to_string())
    })
}

/// Applies a finished drag. `destination_lane = None` means dropped outside.
///
/// # FFI contract
/// - Unknown lane labels return `ok = false` without touching the board.
/// - Aborted gestures return `ok = true` with a message and no effects.
#[flutter_rust_bridge::frb(sync)]
pub fn board_move_task(
    source_lane: String,
    source_index: u32,
    destination_lane: Option<String>,
    destination_index: u32,
) -> BoardResponse {
    let source = match source_lane.parse::<LaneId>() {
        Ok(lane) => LanePosition::new(lane, source_index as usize),
        Err(err) => return BoardResponse::failure(format!("board_move_task failed: {err}")),
    };
    let destination = match destination_lane.map(|lane| lane.parse::<LaneId>()).transpose() {
        Ok(lane) => lane.map(|lane| LanePosition::new(lane, destination_index as usize)),
        Err(err) => return BoardResponse::failure(format!("board_move_task failed: {err}")),
    };

    with_session("board_move_task", |store| {
        match store.move_task(DragGesture {
            source,
            destination,
        }) {
            MoveOutcome::Aborted(reason) => (None, Vec::new(), format!("Move ignored: {reason:?}.")),
            MoveOutcome::Moved {
                task_id,
                completed,
                effects,
            } => {
                let message = if completed {
                    "Task completed!".to_string()
                } else {
                    "Task moved.".to_string()
                };
                (Some(task_id), effects, message)
            }
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_toggle_sound() -> BoardResponse {
    with_session("board_toggle_sound", |store| {
        let effects = store.toggle_sound();
        (None, effects, "Sound toggled.".to_string())
    })
}

/// Timer hook; call about once per second from the UI event loop.
#[flutter_rust_bridge::frb(sync)]
pub fn board_tick() -> BoardResponse {
    with_session("board_tick", |store| {
        let message = if store.tick(Instant::now()) {
            "Daily counter reset."
        } else {
            "No reset due."
        };
        (None, Vec::new(), message.to_string())
    })
}

/// Suggested steps for a big task. Blank input returns `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn chunk_task(big_task: String) -> ChunkResponse {
    match suggest_steps(&big_task) {
        Some(steps) => ChunkResponse {
            ok: true,
            message: format!("{} steps suggested.", steps.len()),
            steps: steps.into_iter().map(|step| step.text).collect(),
        },
        None => ChunkResponse {
            ok: false,
            message: "Describe the task first.".to_string(),
            steps: Vec::new(),
        },
    }
}

type ActionResult = (Option<String>, Vec<Effect>, String);

fn with_session(
    operation: &'static str,
    action: impl FnOnce(&mut BoardStore<SqliteKvStore>) -> ActionResult,
) -> BoardResponse {
    let mut guard = lock_session();
    if guard.is_none() {
        match open_session() {
            Ok(store) => *guard = Some(store),
            Err(message) => {
                warn!("event={operation} module=ffi status=error error_code=session_open_failed error={message}");
                return BoardResponse::failure(format!("{operation} failed: {message}"));
            }
        }
    }
    let Some(store) = guard.as_mut() else {
        return BoardResponse::failure(format!("{operation} failed: session unavailable"));
    };

    let (task_id, effects, message) = action(store);
    let board_json = match serde_json::to_string(store.board()) {
        Ok(json) => json,
        Err(err) => return BoardResponse::failure(format!("{operation} failed: {err}")),
    };

    BoardResponse {
        ok: true,
        message,
        board_json,
        completed_today: store.completed_today(),
        sound_enabled: store.sound_enabled(),
        task_id,
        effects: effects.iter().map(ToString::to_string).collect(),
    }
}

fn lock_session() -> MutexGuard<'static, Option<BoardStore<SqliteKvStore>>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn open_session() -> Result<BoardStore<SqliteKvStore>, String> {
    let db_path = resolve_board_db_path();
    let kv = SqliteKvStore::open(&db_path)
        .map_err(|err| format!("board DB open failed at {}: {err}", db_path.display()))?;
    let store = BoardStore::load(kv);
    for (key, reason) in store.load_fallbacks() {
        warn!("event=session_open module=ffi status=skip key={key} reason={reason}");
    }
    Ok(store)
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TASKBOARD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::{
        board_add_task, board_adjust_time, board_delete_task, board_move_task, board_snapshot,
        board_tick, board_update_task, chunk_task, core_version, init_logging, ping,
        resolve_board_db_path,
    };
    use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
    use taskboard_core::db::open_db;
    use taskboard_core::Task;

    static TEST_DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
    static BOARD_LOCK: Mutex<()> = Mutex::new(());

    /// Points the session at a database private to this test run and holds
    /// the board for the caller so lane indexes stay stable.
    fn isolated_board() -> MutexGuard<'static, ()> {
        let dir = TEST_DIR.get_or_init(|| {
            tempfile::Builder::new()
                .prefix("taskboard-ffi-")
                .tempdir()
                .unwrap()
        });
        let expected = dir.path().join("board.sqlite3");
        let resolved = super::BOARD_DB_PATH.get_or_init(|| expected.clone());
        assert_eq!(resolved, &expected);
        BOARD_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn snapshot_returns_three_lanes() {
        let _board = isolated_board();
        let response = board_snapshot();
        assert!(response.ok, "{}", response.message);
        let lanes: serde_json::Value = serde_json::from_str(&response.board_json).unwrap();
        assert_eq!(lanes.as_array().unwrap().len(), 3);
    }

    #[test]
    fn added_task_is_persisted_and_editable() {
        let _board = isolated_board();
        let added = board_add_task(Some("  ffi water plants ".to_string()), Some(12));
        assert!(added.ok, "{}", added.message);
        let task_id = added.task_id.clone().unwrap();
        let task = find_task(&added.board_json, &task_id).unwrap();
        assert_eq!(task.title, "ffi water plants");
        assert_eq!(task.estimated_time, 12);

        let adjusted = board_adjust_time(task_id.clone(), -100);
        assert_eq!(find_task(&adjusted.board_json, &task_id).unwrap().estimated_time, 0);

        let mut edited = find_task(&adjusted.board_json, &task_id).unwrap();
        edited.title = "ffi water cactus".to_string();
        let updated = board_update_task(serde_json::to_string(&edited).unwrap());
        assert_eq!(
            find_task(&updated.board_json, &task_id).unwrap().title,
            "ffi water cactus"
        );

        let db_path = resolve_board_db_path();
        assert!(db_path.starts_with(TEST_DIR.get().unwrap().path()));
        let conn = open_db(db_path).unwrap();
        let stored: String = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = 'adhd-todo-columns';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(stored.contains(&task_id));

        let deleted = board_delete_task(task_id.clone());
        assert!(find_task(&deleted.board_json, &task_id).is_none());
    }

    #[test]
    fn move_out_of_todo_counts_completion() {
        let _board = isolated_board();
        let added = board_add_task(Some("ffi move me".to_string()), None);
        let before = added.completed_today;

        let moved = board_move_task("todo".to_string(), 0, Some("never".to_string()), 0);
        assert!(moved.ok, "{}", moved.message);
        assert_eq!(moved.completed_today, before + 1);
        assert!(moved.effects.iter().any(|effect| effect == "celebrate"));

        board_delete_task(added.task_id.unwrap());
    }

    #[test]
    fn move_rejects_unknown_lane_and_ignores_outside_drop() {
        let _board = isolated_board();
        let bad = board_move_task("done".to_string(), 0, None, 0);
        assert!(!bad.ok);
        assert!(bad.message.contains("unknown lane"));

        let outside = board_move_task("todo".to_string(), 0, None, 0);
        assert!(outside.ok);
        assert!(outside.effects.is_empty());
    }

    #[test]
    fn update_rejects_malformed_json() {
        let _board = isolated_board();
        let response = board_update_task("{".to_string());
        assert!(!response.ok);
    }

    #[test]
    fn tick_before_interval_does_nothing() {
        let _board = isolated_board();
        let response = board_tick();
        assert!(response.ok);
        assert!(response.effects.is_empty());
    }

    #[test]
    fn chunk_task_routes_keywords_and_rejects_blank() {
        let response = chunk_task("clean my room".to_string());
        assert!(response.ok);
        assert_eq!(response.steps.len(), 7);
        assert_eq!(response.steps[0], "Clear visible trash");

        assert!(!chunk_task("  ".to_string()).ok);
    }

    fn find_task(board_json: &str, task_id: &str) -> Option<Task> {
        let lanes: serde_json::Value = serde_json::from_str(board_json).ok()?;
        lanes
            .as_array()?
            .iter()
            .filter_map(|lane| lane["tasks"].as_array())
            .flatten()
            .find(|task| task["id"] == task_id)
            .and_then(|task| serde_json::from_value(task.clone()).ok())
    }
}
