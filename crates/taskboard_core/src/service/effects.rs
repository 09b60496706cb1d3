//! Side effects requested by board operations.
//!
//! Store operations never play audio or show UI; they return these values
//! and an outer layer dispatches them.

use std::fmt::{Display, Formatter};
use std::time::Duration;

/// How long the celebration overlay stays visible.
pub const CELEBRATION_DURATION: Duration = Duration::from_secs(3);

/// Named sound asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Pop,
    Save,
    Delete,
    Click,
    Success,
    SwitchOn,
    SwitchOff,
    Collapse,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pop => "pop",
            Self::Save => "save",
            Self::Delete => "delete",
            Self::Click => "click",
            Self::Success => "success",
            Self::SwitchOn => "switch-on",
            Self::SwitchOff => "switch-off",
            Self::Collapse => "collapse",
        }
    }

    pub fn asset_path(self) -> String {
        format!("/sounds/{}.mp3", self.name())
    }

    /// Playback volume in `0.0..=1.0`.
    pub fn volume(self) -> f32 {
        match self {
            Self::Click => 0.3,
            _ => 0.5,
        }
    }
}

/// Toast notification category. Text is chosen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    TaskMoved,
    CollapsedAll,
    ExpandedAll,
    LoggedIn,
    LoggedOut,
}

impl ToastKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::TaskMoved => "task-moved",
            Self::CollapsedAll => "collapsed-all",
            Self::ExpandedAll => "expanded-all",
            Self::LoggedIn => "logged-in",
            Self::LoggedOut => "logged-out",
        }
    }
}

/// One thing the outer layer should do after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    PlaySound(SoundCue),
    /// Confetti for [`CELEBRATION_DURATION`].
    Celebrate,
    Toast(ToastKind),
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlaySound(cue) => write!(f, "sound:{}", cue.name()),
            Self::Celebrate => f.write_str("celebrate"),
            Self::Toast(kind) => write!(f, "toast:{}", kind.name()),
        }
    }
}
