//! `taskboard` command-line shell.
//!
//! # Responsibility
//! - Resolve the database location and optional file logging.
//! - Apply one board action per invocation and print its effects.

mod cli;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use directories::ProjectDirs;
use log::info;
use std::path::PathBuf;
use taskboard_core::{
    init_logging, Board, BoardStore, ChunkPlan, DragGesture, Effect, LanePosition, MoveOutcome,
    SqliteKvStore, TaskDefaults, TaskEditor, APP_NAME_OPTIONS, FALLBACK_APP_TITLE,
};

const DB_FILE_NAME: &str = "taskboard.sqlite3";

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory is not valid UTF-8")?;
        init_logging(&cli.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    let kv = SqliteKvStore::open(&db_path)
        .with_context(|| format!("failed to open board at {}", db_path.display()))?;
    let mut store = BoardStore::load(kv);
    for (key, reason) in store.load_fallbacks() {
        eprintln!("warning: ignored stored `{key}`: {reason}");
    }

    run(&mut store, cli.command.unwrap_or(Commands::Show))
}

fn default_db_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "taskboard", "taskboard")
        .context("could not determine a data directory; pass --db")?;
    Ok(dirs.data_dir().join(DB_FILE_NAME))
}

fn run(store: &mut BoardStore<SqliteKvStore>, command: Commands) -> Result<()> {
    let mut rng = rand::rng();
    let effects = match command {
        Commands::Show => {
            println!("{}", render::board(store.state(), store.all_collapsed()));
            Vec::new()
        }
        Commands::Add {
            title,
            minutes,
            priority,
            description,
            tags,
        } => {
            let (task_id, effects) = store.add_task(TaskDefaults {
                title,
                description,
                estimated_time: minutes,
                priority,
                tags,
                ..TaskDefaults::default()
            });
            println!("added {}", render::short_id(&task_id));
            effects
        }
        Commands::Edit {
            task,
            title,
            description,
            minutes,
            completion_minutes,
            priority,
            color,
            schedule,
            unschedule,
            add_tags,
            remove_tags,
        } => {
            let task_id = resolve_task_id(store.board(), &task)?;
            let Some(current) = store.board().task(&task_id) else {
                bail!("no task matches `{task}`");
            };
            let mut editor = TaskEditor::open(current);
            if let Some(title) = title {
                editor.set_title(title);
            }
            if let Some(description) = description {
                editor.set_description(description);
            }
            if let Some(minutes) = minutes {
                editor.set_estimated_time(minutes);
            }
            if completion_minutes.is_some() {
                editor.set_estimated_completion_time(completion_minutes);
            }
            if let Some(priority) = priority {
                editor.set_priority(priority);
            }
            if color.is_some() {
                editor.set_color(color);
            }
            if unschedule {
                editor.set_scheduled_for(None);
            } else if schedule.is_some() {
                editor.set_scheduled_for(schedule);
            }
            for tag in &add_tags {
                editor.add_tag(tag);
            }
            for tag in &remove_tags {
                editor.remove_tag(tag);
            }
            if !editor.is_dirty() {
                println!("nothing to change");
                return Ok(());
            }
            editor.save(store)
        }
        Commands::Delete { task } => {
            let task_id = resolve_task_id(store.board(), &task)?;
            store.delete_task(&task_id)
        }
        Commands::Adjust { task, delta } => {
            let task_id = resolve_task_id(store.board(), &task)?;
            store.adjust_task_time(&task_id, delta)
        }
        Commands::Move {
            lane,
            index,
            to_lane,
            to_index,
        } => {
            let gesture = DragGesture {
                source: LanePosition::new(lane, index),
                destination: to_lane.map(|to| LanePosition::new(to, to_index)),
            };
            let outcome = store.move_task(gesture);
            if let MoveOutcome::Aborted(reason) = &outcome {
                println!("nothing moved ({reason:?})");
            }
            outcome.effects().to_vec()
        }
        Commands::Collapse { task, all } => {
            if all {
                store.toggle_all_collapsed()
            } else {
                let task = task.context("task id required")?;
                let task_id = resolve_task_id(store.board(), &task)?;
                store.toggle_card_collapse(&task_id)
            }
        }
        Commands::Sound => {
            let effects = store.toggle_sound();
            let state = if store.sound_enabled() { "on" } else { "off" };
            println!("sound {state}");
            effects
        }
        Commands::Login => {
            let effects = store.login();
            println!("signed in as {}", store.login_state().username);
            effects
        }
        Commands::Logout => store.logout(),
        Commands::Name { name, reset } => {
            if reset {
                store.reset_app_name();
            } else if let Some(name) = name {
                if !store.set_app_name(&name) {
                    bail!("app name cannot be blank");
                }
            } else {
                for option in APP_NAME_OPTIONS {
                    println!("{:<16} {}", option.name, option.description);
                }
            }
            println!(
                "app name: {}",
                store.app_name().unwrap_or(FALLBACK_APP_TITLE)
            );
            Vec::new()
        }
        Commands::Chunk { words } => {
            let big_task = words.join(" ");
            let Some(plan) = ChunkPlan::suggest(&big_task) else {
                bail!("describe the task to chunk");
            };
            println!("{}", render::chunk_plan(&plan));
            Vec::new()
        }
        Commands::Stats => {
            println!("{}", render::stats(store.completed_today(), &mut rng));
            Vec::new()
        }
    };

    print_effects(&effects, &mut rng);
    info!(
        "event=cli_command module=cli status=ok effects={}",
        effects.len()
    );
    Ok(())
}

fn print_effects(effects: &[Effect], rng: &mut impl rand::Rng) {
    for line in render::effects(effects, rng) {
        println!("{line}");
    }
}

/// Accepts a full id or a unique prefix. Ids with no match pass through
/// unchanged so the store treats them as a no-op.
fn resolve_task_id(board: &Board, input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        bail!("task id cannot be empty");
    }
    if board.task(input).is_some() {
        return Ok(input.to_string());
    }

    let mut matches = board.tasks().filter(|task| task.id.starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id.clone()),
        (Some(_), Some(_)) => bail!("task prefix `{input}` is ambiguous"),
        (None, _) => Ok(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_task_id;
    use chrono::NaiveDate;
    use taskboard_core::{BoardStore, ManualClock, MemoryKvStore, TaskDefaults};

    #[test]
    fn resolve_task_id_accepts_unique_prefix() {
        let kv = MemoryKvStore::new();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(today));
        let (task_id, _) = store.add_task(TaskDefaults::default());

        let resolved = resolve_task_id(store.board(), &task_id[..8]).unwrap();
        assert_eq!(resolved, task_id);
        assert_eq!(
            resolve_task_id(store.board(), "zzz-not-there").unwrap(),
            "zzz-not-there"
        );
        assert!(resolve_task_id(store.board(), "  ").is_err());
    }
}
