//! Text pools for toasts, the fake login handle and the sidebar motto.

use crate::service::effects::ToastKind;
use rand::seq::IndexedRandom;
use rand::Rng;

const TASK_MOVED_MESSAGES: [&str; 7] = [
    "You're crushing it! 🚀",
    "One less thing to worry about! 🎉",
    "Brain: 1, Chaos: 0 ✨",
    "Look at you being all productive! 🌟",
    "That's how it's done! 💪",
    "Your future self thanks you! 🙏",
    "Dopamine boost unlocked! 🧠",
];

const MOTTO_EMOJIS: [&str; 10] = ["✨", "🚀", "🎯", "💫", "⚡", "🔥", "🌈", "💪", "🧠", "🦄"];

const MOTTOS: [&str; 8] = [
    "You've got this!",
    "One task at a time...",
    "Progress, not perfection",
    "Your brain is awesome!",
    "Small steps, big wins",
    "Focus on what matters",
    "Embrace the chaos",
    "You're doing great!",
];

const HANDLE_NAMES: [&str; 6] = [
    "CoolCat",
    "ADHDBrain",
    "TaskMaster",
    "FocusNinja",
    "ChaoticGood",
    "DistractedGenius",
];

const HANDLE_NUMBERS: [&str; 6] = ["420", "69", "1337", "42", "007", "404"];

/// Rendered toast text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastText {
    pub title: &'static str,
    pub description: &'static str,
}

/// Picks the title and description for a toast.
pub fn toast_text<R: Rng + ?Sized>(kind: ToastKind, rng: &mut R) -> ToastText {
    match kind {
        ToastKind::TaskMoved => ToastText {
            title: "Task moved!",
            description: pick(&TASK_MOVED_MESSAGES, rng),
        },
        ToastKind::CollapsedAll => ToastText {
            title: "Collapsed all cards",
            description: "Now you can see what matters!",
        },
        ToastKind::ExpandedAll => ToastText {
            title: "Expanded all cards",
            description: "Back to full details mode!",
        },
        ToastKind::LoggedIn => ToastText {
            title: "Logged in!",
            description: "Your tasks are now synced to the cloud. Not really, but imagine they are!",
        },
        ToastKind::LoggedOut => ToastText {
            title: "Logged out",
            description: "Your tasks are still saved locally. Login to sync them!",
        },
    }
}

/// Random `<Name>#<Number>` handle for the simulated login.
pub fn random_handle<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}#{}",
        pick(&HANDLE_NAMES, rng),
        pick(&HANDLE_NUMBERS, rng)
    )
}

/// Emoji-prefixed motivational line.
pub fn motto<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(&MOTTO_EMOJIS, rng), pick(&MOTTOS, rng))
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{random_handle, toast_text, HANDLE_NAMES, TASK_MOVED_MESSAGES};
    use crate::service::effects::ToastKind;

    #[test]
    fn handle_has_name_and_number() {
        let handle = random_handle(&mut rand::rng());
        let (name, number) = handle.split_once('#').expect("handle has a separator");
        assert!(HANDLE_NAMES.contains(&name));
        assert!(!number.is_empty());
    }

    #[test]
    fn task_moved_toast_uses_message_pool() {
        let text = toast_text(ToastKind::TaskMoved, &mut rand::rng());
        assert_eq!(text.title, "Task moved!");
        assert!(TASK_MOVED_MESSAGES.contains(&text.description));
    }
}
