//! Auxiliary per-profile state persisted next to the board.

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collapsed-display flag per task card. Absent means expanded.
pub type CollapsedCards = BTreeMap<TaskId, bool>;

/// Simulated login display state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginState {
    pub is_logged_in: bool,
    pub username: String,
}

impl LoginState {
    pub fn logged_in(username: impl Into<String>) -> Self {
        Self {
            is_logged_in: true,
            username: username.into(),
        }
    }
}

/// A suggested display name for the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppNameOption {
    pub name: &'static str,
    pub description: &'static str,
}

/// Built-in suggestions offered by the name picker.
pub const APP_NAME_OPTIONS: [AppNameOption; 6] = [
    AppNameOption {
        name: "BrainWave",
        description: "Ride the wave of productivity with this ADHD-friendly task manager",
    },
    AppNameOption {
        name: "FocusFlex",
        description: "Flexible task management for flexible brains",
    },
    AppNameOption {
        name: "TaskTamer",
        description: "Tame the chaos of your to-do list, one task at a time",
    },
    AppNameOption {
        name: "MindMosaic",
        description: "Piece together your scattered thoughts into a beautiful productivity system",
    },
    AppNameOption {
        name: "AttentionAnchor",
        description: "Stay anchored to your tasks, even when your mind wants to drift away",
    },
    AppNameOption {
        name: "DopamineDesk",
        description: "Get that sweet dopamine hit with every completed task",
    },
];

/// Title shown when no app name has been chosen.
pub const FALLBACK_APP_TITLE: &str = "Your ADHD-Friendly Todo App";
