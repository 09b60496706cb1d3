//! Command-line surface.
//!
//! One invocation loads the board, applies at most one action, persists it
//! and prints the resulting effects.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskboard_core::{default_log_level, LaneId, Priority};

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "Three-lane task board with a daily completion counter")]
#[command(version)]
pub struct Cli {
    /// SQLite file holding the board
    #[arg(long, global = true, env = "TASKBOARD_DB_PATH", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level used when file logging is enabled
    #[arg(long, global = true, default_value = default_log_level(), env = "TASKBOARD_LOG_LEVEL")]
    pub log_level: String,

    /// Absolute directory for rotating log files; logging is off when unset
    #[arg(long, global = true, env = "TASKBOARD_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all lanes (default)
    Show,
    /// Add a task to the top of `todo`
    Add {
        /// Task title
        #[arg(value_name = "TITLE")]
        title: Option<String>,
        /// Estimated minutes
        #[arg(short, long)]
        minutes: Option<u32>,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(short, long)]
        description: Option<String>,
        /// Tag, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Edit fields of an existing task
    Edit {
        /// Task id or unique id prefix
        #[arg(value_name = "TASK")]
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        minutes: Option<u32>,
        /// Minutes needed to finish once started
        #[arg(long)]
        completion_minutes: Option<u32>,
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Card color class
        #[arg(long)]
        color: Option<String>,
        /// Planned start, RFC 3339 (e.g. 2026-10-20T09:00:00Z)
        #[arg(long, conflicts_with = "unschedule")]
        schedule: Option<DateTime<Utc>>,
        /// Clear the planned start
        #[arg(long)]
        unschedule: bool,
        /// Tag to add, repeatable
        #[arg(long = "tag")]
        add_tags: Vec<String>,
        /// Tag to remove, repeatable
        #[arg(long = "untag")]
        remove_tags: Vec<String>,
    },
    /// Delete a task
    Delete {
        #[arg(value_name = "TASK")]
        task: String,
    },
    /// Shift a task's estimate by a signed number of minutes
    Adjust {
        #[arg(value_name = "TASK")]
        task: String,
        #[arg(value_name = "DELTA", allow_hyphen_values = true)]
        delta: i64,
    },
    /// Drag a card from one position to another
    Move {
        /// Source lane (todo|not-today|never)
        #[arg(value_name = "LANE")]
        lane: LaneId,
        /// Index inside the source lane
        #[arg(value_name = "INDEX")]
        index: usize,
        /// Destination lane; omit to drop outside the board
        #[arg(long = "to")]
        to_lane: Option<LaneId>,
        /// Index inside the destination lane
        #[arg(long = "at", default_value_t = 0)]
        to_index: usize,
    },
    /// Toggle one card, or every card with --all
    Collapse {
        #[arg(value_name = "TASK", required_unless_present = "all")]
        task: Option<String>,
        #[arg(long, conflicts_with = "task")]
        all: bool,
    },
    /// Toggle sound effects
    Sound,
    /// Pretend to sign in
    Login,
    Logout,
    /// Show, set or reset the app name
    Name {
        #[arg(value_name = "NAME", conflicts_with = "reset")]
        name: Option<String>,
        #[arg(long)]
        reset: bool,
    },
    /// Break a big task into small steps
    Chunk {
        #[arg(value_name = "BIG_TASK", num_args = 1.., required = true)]
        words: Vec<String>,
    },
    /// Completed-today counter and motivation meter
    Stats,
}
