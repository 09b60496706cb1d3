//! Task chunker: break a big task into small checklist steps.
//!
//! # Responsibility
//! - Suggest steps for a task title from keyword rules.
//! - Track an editable checklist and its progress.
//!
//! # Invariants
//! - Blank input yields no plan.
//! - Exactly one keyword group applies, checked in rule order; its steps come
//!   before the common steps.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

struct StepRule {
    keywords: Regex,
    steps: [&'static str; 4],
}

static STEP_RULES: Lazy<Vec<StepRule>> = Lazy::new(|| {
    vec![
        StepRule {
            keywords: Regex::new(r"(?i)clean|room|tidy").expect("valid cleaning regex"),
            steps: [
                "Clear visible trash",
                "Put away clothes",
                "Make the bed",
                "Organize desk/surfaces",
            ],
        },
        StepRule {
            keywords: Regex::new(r"(?i)email|write|message").expect("valid writing regex"),
            steps: [
                "Outline main points",
                "Draft first version",
                "Review and edit",
                "Send/submit",
            ],
        },
        StepRule {
            keywords: Regex::new(r"(?i)homework|study|assignment").expect("valid study regex"),
            steps: [
                "Review instructions/requirements",
                "Gather reference materials",
                "Complete first section",
                "Review work",
            ],
        },
    ]
});

const GENERIC_STEPS: [&str; 4] = [
    "Start with the easiest part",
    "Work for 10 minutes without stopping",
    "Check progress",
    "Complete final steps",
];

const COMMON_STEPS: [&str; 3] = [
    "Gather all necessary materials",
    "Set a timer for 5 minutes",
    "Take a quick break if needed",
];

/// One checklist item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkStep {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl ChunkStep {
    fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Completed vs. total steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkProgress {
    pub completed: usize,
    pub total: usize,
    /// `0.0..=100.0`; zero for an empty plan.
    pub percent: f64,
}

/// Suggested steps for `big_task`, or `None` when it is blank.
pub fn suggest_steps(big_task: &str) -> Option<Vec<ChunkStep>> {
    let big_task = big_task.trim();
    if big_task.is_empty() {
        return None;
    }

    let specific = STEP_RULES
        .iter()
        .find(|rule| rule.keywords.is_match(big_task))
        .map_or(GENERIC_STEPS, |rule| rule.steps);

    Some(
        specific
            .iter()
            .chain(COMMON_STEPS.iter())
            .map(|text| ChunkStep::new(*text))
            .collect(),
    )
}

/// Editable checklist for one big task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    pub big_task: String,
    pub steps: Vec<ChunkStep>,
}

impl ChunkPlan {
    /// Starts a plan from suggestions; `None` for blank input.
    pub fn suggest(big_task: &str) -> Option<Self> {
        let steps = suggest_steps(big_task)?;
        Some(Self {
            big_task: big_task.trim().to_string(),
            steps,
        })
    }

    /// Appends an empty step and returns its id.
    pub fn add_step(&mut self) -> String {
        let step = ChunkStep::new(String::new());
        let id = step.id.clone();
        self.steps.push(step);
        id
    }

    pub fn update_step(&mut self, step_id: &str, text: impl Into<String>) -> bool {
        match self.step_mut(step_id) {
            Some(step) => {
                step.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn toggle_step(&mut self, step_id: &str) -> bool {
        match self.step_mut(step_id) {
            Some(step) => {
                step.completed = !step.completed;
                true
            }
            None => false,
        }
    }

    pub fn remove_step(&mut self, step_id: &str) {
        self.steps.retain(|step| step.id != step_id);
    }

    pub fn progress(&self) -> ChunkProgress {
        let total = self.steps.len();
        let completed = self.steps.iter().filter(|step| step.completed).count();
        let percent = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        ChunkProgress {
            completed,
            total,
            percent,
        }
    }

    fn step_mut(&mut self, step_id: &str) -> Option<&mut ChunkStep> {
        self.steps.iter_mut().find(|step| step.id == step_id)
    }
}
