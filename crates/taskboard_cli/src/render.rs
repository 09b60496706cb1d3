//! Plain-text rendering of board state and effects.

use rand::Rng;
use std::fmt::Write;
use taskboard_core::service::cheer::{motto, toast_text};
use taskboard_core::{
    BoardState, ChunkPlan, Effect, MeterTier, MotivationMeter, Task, FALLBACK_APP_TITLE,
};

const SHORT_ID_LEN: usize = 8;
const METER_WIDTH: usize = 20;

pub fn board(state: &BoardState, all_collapsed: bool) -> String {
    let mut out = String::new();
    let title = state.app_name.as_deref().unwrap_or(FALLBACK_APP_TITLE);
    let _ = writeln!(out, "{title}");
    if state.login.is_logged_in {
        let _ = writeln!(out, "signed in as {}", state.login.username);
    }

    for lane in state.board.lanes() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} [{}] ({})", lane.title, lane.id, lane.tasks.len());
        for (index, task) in lane.tasks.iter().enumerate() {
            let collapsed =
                all_collapsed || state.collapsed_cards.get(&task.id).copied().unwrap_or(false);
            task_line(&mut out, index, task, collapsed);
        }
    }
    out
}

fn task_line(out: &mut String, index: usize, task: &Task, collapsed: bool) {
    let _ = write!(
        out,
        "  {index:>2}. {} {} ({} min, {})",
        short_id(&task.id),
        task.title,
        task.estimated_time,
        task.priority
    );
    if !task.tags.is_empty() {
        let _ = write!(out, " #{}", task.tags.join(" #"));
    }
    let _ = writeln!(out);
    if !collapsed && !task.description.trim().is_empty() {
        let _ = writeln!(out, "        {}", task.description.trim());
    }
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

pub fn stats<R: Rng + ?Sized>(completed_today: u32, rng: &mut R) -> String {
    let meter = MotivationMeter::from_completed(completed_today);
    let filled = meter.percent as usize * METER_WIDTH / 100;
    let tier = match meter.tier {
        MeterTier::Low => "warming up",
        MeterTier::Medium => "in the zone",
        MeterTier::High => "on fire",
    };
    format!(
        "completed today: {}\n[{}{}] {}% {tier}\n{}",
        meter.completed,
        "#".repeat(filled),
        "-".repeat(METER_WIDTH - filled),
        meter.percent,
        motto(rng)
    )
}

pub fn chunk_plan(plan: &ChunkPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.big_task);
    for (index, step) in plan.steps.iter().enumerate() {
        let mark = if step.completed { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {}. {}", index + 1, step.text);
    }
    let progress = plan.progress();
    let _ = write!(
        out,
        "{}/{} steps ({:.0}%)",
        progress.completed, progress.total, progress.percent
    );
    out
}

/// One line per effect; sounds are only named, never played.
pub fn effects<R: Rng + ?Sized>(effects: &[Effect], rng: &mut R) -> Vec<String> {
    effects
        .iter()
        .map(|effect| match effect {
            Effect::PlaySound(cue) => format!("♪ {}", cue.name()),
            Effect::Celebrate => "🎉 🎊 🎉".to_string(),
            Effect::Toast(kind) => {
                let text = toast_text(*kind, rng);
                format!("{} {}", text.title, text.description)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{board, effects, short_id, stats};
    use chrono::NaiveDate;
    use taskboard_core::{
        BoardStore, Effect, ManualClock, MemoryKvStore, SoundCue, TaskDefaults,
    };

    #[test]
    fn short_id_keeps_first_eight_chars() {
        assert_eq!(short_id("0123456789ab"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn board_lists_every_lane_and_task() {
        let kv = MemoryKvStore::new();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut store = BoardStore::load_with_clock(&kv, ManualClock::new(today));
        store.add_task(TaskDefaults {
            title: Some("buy milk".to_string()),
            description: Some("oat, not dairy".to_string()),
            ..TaskDefaults::default()
        });

        let expanded = board(store.state(), false);
        assert!(expanded.contains("Todo [todo] (1)"));
        assert!(expanded.contains("Not today [not-today] (0)"));
        assert!(expanded.contains("buy milk (30 min, medium)"));
        assert!(expanded.contains("oat, not dairy"));

        let collapsed = board(store.state(), true);
        assert!(!collapsed.contains("oat, not dairy"));
    }

    #[test]
    fn stats_caps_meter_at_full() {
        let text = stats(14, &mut rand::rng());
        assert!(text.contains("completed today: 14"));
        assert!(text.contains("100% on fire"));
    }

    #[test]
    fn effects_name_sounds() {
        let lines = effects(&[Effect::PlaySound(SoundCue::Pop)], &mut rand::rng());
        assert_eq!(lines, vec!["♪ pop".to_string()]);
    }
}
