//! Task domain model.
//!
//! # Responsibility
//! - Define the task record held by board lanes.
//! - Provide creation defaults and the in-place duration adjustment rule.
//!
//! # Invariants
//! - `id` is generated fresh on creation and never reused.
//! - `estimated_time` is never negative; adjustments saturate at zero and
//!   out-of-range stored values are clamped on decode.
//! - Wire field names are camelCase to match the persisted board layout.

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque task identifier.
///
/// Generated as UUID v4 text, but persisted boards may carry any string.
pub type TaskId = String;

/// Title given to tasks created through the "add" action.
pub const DEFAULT_TASK_TITLE: &str = "New Task";
/// Estimated duration (minutes) given to new tasks.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;

/// Card color tags a new task can be painted with.
pub const TASK_COLOR_PALETTE: [&str; 6] = [
    "bg-gradient-to-r from-pink-500 to-rose-500",
    "bg-gradient-to-r from-violet-500 to-purple-500",
    "bg-gradient-to-r from-blue-500 to-cyan-500",
    "bg-gradient-to-r from-emerald-500 to-green-500",
    "bg-gradient-to-r from-amber-500 to-yellow-500",
    "bg-gradient-to-r from-orange-500 to-red-500",
];

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown priority label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError(pub String);

impl Display for ParsePriorityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown priority `{}`; expected low|medium|high",
            self.0
        )
    }
}

impl std::error::Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_string())),
        }
    }
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Minutes.
    #[serde(deserialize_with = "minutes_clamped")]
    pub estimated_time: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Minutes.
    #[serde(default, deserialize_with = "optional_minutes_clamped")]
    pub estimated_completion_time: Option<u32>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Stored boards may carry negative, fractional or `null` minute counts
/// (unvalidated number inputs). They are clamped into `0..=u32::MAX`;
/// `null` reads as zero.
fn minutes_clamped<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.map_or(0, clamp_minutes))
}

fn optional_minutes_clamped<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.map(clamp_minutes))
}

fn clamp_minutes(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.min(f64::from(u32::MAX)) as u32
}

/// Caller-supplied values for a new task.
///
/// Every `None` falls back to the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDefaults {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<u32>,
    pub color: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub estimated_completion_time: Option<u32>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

impl Task {
    /// Builds a task with a fresh id from `defaults`.
    ///
    /// A missing color is drawn from [`TASK_COLOR_PALETTE`] with `rng`.
    pub fn create<R: Rng + ?Sized>(
        defaults: TaskDefaults,
        created_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let color = defaults.color.or_else(|| {
            TASK_COLOR_PALETTE
                .choose(rng)
                .map(|value| (*value).to_string())
        });

        Self {
            id: Uuid::new_v4().to_string(),
            title: defaults
                .title
                .unwrap_or_else(|| DEFAULT_TASK_TITLE.to_string()),
            description: defaults.description.unwrap_or_default(),
            estimated_time: defaults
                .estimated_time
                .unwrap_or(DEFAULT_ESTIMATED_MINUTES),
            created_at,
            color,
            scheduled_for: defaults.scheduled_for,
            estimated_completion_time: defaults.estimated_completion_time,
            priority: defaults.priority.unwrap_or_default(),
            tags: defaults.tags,
        }
    }

    /// Applies a signed minute delta, saturating at zero.
    pub fn adjust_estimated_time(&mut self, delta_minutes: i64) {
        let next = i64::from(self.estimated_time).saturating_add(delta_minutes);
        self.estimated_time = next.clamp(0, i64::from(u32::MAX)) as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskDefaults, TASK_COLOR_PALETTE};
    use chrono::Utc;

    #[test]
    fn create_uses_palette_color_when_none_given() {
        let task = Task::create(TaskDefaults::default(), Utc::now(), &mut rand::rng());
        let color = task.color.expect("color should be assigned");
        assert!(TASK_COLOR_PALETTE.contains(&color.as_str()));
    }

    #[test]
    fn adjust_saturates_at_zero_and_u32_max() {
        let mut task = Task::create(TaskDefaults::default(), Utc::now(), &mut rand::rng());
        task.adjust_estimated_time(-10_000);
        assert_eq!(task.estimated_time, 0);

        task.adjust_estimated_time(i64::MAX);
        assert_eq!(task.estimated_time, u32::MAX);
    }

    #[test]
    fn decode_clamps_out_of_range_minutes() {
        let raw = r#"{"id":"b","title":"b","estimatedTime":-5,"createdAt":"2026-10-19T08:00:00Z","estimatedCompletionTime":12.7}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.estimated_time, 0);
        assert_eq!(task.estimated_completion_time, Some(12));

        let raw = r#"{"id":"c","title":"c","estimatedTime":null,"createdAt":"2026-10-19T08:00:00Z","estimatedCompletionTime":-3}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.estimated_time, 0);
        assert_eq!(task.estimated_completion_time, Some(0));
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
