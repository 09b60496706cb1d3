//! Staged task editing for the detail view.
//!
//! Edits apply to a scratch copy. Nothing reaches the board until `save`;
//! dropping the editor discards the edits.

use crate::model::task::{Priority, Task};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::board_store::BoardStore;
use crate::service::daily_reset::Clock;
use crate::service::effects::Effect;
use chrono::{DateTime, Utc};

/// Scratch copy of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEditor {
    original: Task,
    draft: Task,
}

impl TaskEditor {
    pub fn open(task: &Task) -> Self {
        Self {
            original: task.clone(),
            draft: task.clone(),
        }
    }

    pub fn draft(&self) -> &Task {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_estimated_time(&mut self, minutes: u32) {
        self.draft.estimated_time = minutes;
    }

    pub fn set_estimated_completion_time(&mut self, minutes: Option<u32>) {
        self.draft.estimated_completion_time = minutes;
    }

    pub fn set_scheduled_for(&mut self, at: Option<DateTime<Utc>>) {
        self.draft.scheduled_for = at;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.draft.priority = priority;
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.draft.color = color;
    }

    /// Appends a trimmed tag. Blank or already present tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.draft.tags.iter().any(|existing| existing == trimmed) {
            return false;
        }
        self.draft.tags.push(trimmed.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.draft.tags.retain(|existing| existing != tag);
    }

    /// Commits the draft through [`BoardStore::update_task`].
    pub fn save<S: KeyValueStore, C: Clock>(self, store: &mut BoardStore<S, C>) -> Vec<Effect> {
        store.update_task(self.draft)
    }
}

#[cfg(test)]
mod tests {
    use super::TaskEditor;
    use crate::model::task::{Task, TaskDefaults};
    use chrono::Utc;

    #[test]
    fn add_tag_trims_and_deduplicates() {
        let task = Task::create(TaskDefaults::default(), Utc::now(), &mut rand::rng());
        let mut editor = TaskEditor::open(&task);

        assert!(editor.add_tag(" focus "));
        assert!(!editor.add_tag("focus"));
        assert!(!editor.add_tag("   "));
        assert_eq!(editor.draft().tags, vec!["focus".to_string()]);

        editor.remove_tag("focus");
        assert!(editor.draft().tags.is_empty());
        assert!(!editor.is_dirty());
    }
}
