//! Board state store.
//!
//! # Responsibility
//! - Own the live board and auxiliary state for one profile.
//! - Be the only mutation entry point; persist each changed concern.
//! - Report side effects as data instead of performing them.
//!
//! # Invariants
//! - Unknown task ids make update/delete/adjust/collapse a silent no-op.
//! - Sound effects are only emitted while sound is enabled, except the cue
//!   confirming a sound toggle.
//! - The completed-today counter only ever increases through moves; moving
//!   a task back into `todo` never decrements it.

use crate::model::board::{Board, DragGesture, MoveAbort, MoveResolution};
use crate::model::lane::LaneId;
use crate::model::prefs::{CollapsedCards, LoginState};
use crate::model::task::{Task, TaskDefaults, TaskId};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::cheer::random_handle;
use crate::service::daily_reset::{Clock, ResetPoller, SystemClock, RESET_POLL_INTERVAL};
use crate::service::effects::{Effect, SoundCue, ToastKind};
use crate::service::persistence::{DecodeFailure, PersistenceBridge};
use log::{debug, info};
use std::time::Instant;

/// Everything persisted for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub board: Board,
    pub completed_today: u32,
    pub app_name: Option<String>,
    pub sound_enabled: bool,
    pub collapsed_cards: CollapsedCards,
    pub login: LoginState,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            board: Board::default(),
            completed_today: 0,
            app_name: None,
            sound_enabled: true,
            collapsed_cards: CollapsedCards::new(),
            login: LoginState::default(),
        }
    }
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Aborted(MoveAbort),
    Moved {
        task_id: TaskId,
        completed: bool,
        effects: Vec<Effect>,
    },
}

impl MoveOutcome {
    pub fn effects(&self) -> &[Effect] {
        match self {
            Self::Aborted(_) => &[],
            Self::Moved { effects, .. } => effects.as_slice(),
        }
    }
}

/// Live board store backed by a key-value store.
pub struct BoardStore<S: KeyValueStore, C: Clock = SystemClock> {
    bridge: PersistenceBridge<S>,
    clock: C,
    state: BoardState,
    fallbacks: Vec<(&'static str, DecodeFailure)>,
    reset_poller: ResetPoller,
    all_collapsed: bool,
}

impl<S: KeyValueStore> BoardStore<S, SystemClock> {
    /// Loads state using the system clock.
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> BoardStore<S, C> {
    /// Hydrates state from `store` and runs the first daily reset check.
    pub fn load_with_clock(store: S, clock: C) -> Self {
        let bridge = PersistenceBridge::new(store);
        let hydration = bridge.hydrate();
        let mut loaded = Self {
            bridge,
            clock,
            state: hydration.state,
            fallbacks: hydration.fallbacks,
            reset_poller: ResetPoller::new(Instant::now(), RESET_POLL_INTERVAL),
            all_collapsed: false,
        };
        loaded.run_reset_check();
        loaded
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn completed_today(&self) -> u32 {
        self.state.completed_today
    }

    pub fn sound_enabled(&self) -> bool {
        self.state.sound_enabled
    }

    pub fn collapsed_cards(&self) -> &CollapsedCards {
        &self.state.collapsed_cards
    }

    pub fn is_collapsed(&self, task_id: &str) -> bool {
        self.state
            .collapsed_cards
            .get(task_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn all_collapsed(&self) -> bool {
        self.all_collapsed
    }

    pub fn login_state(&self) -> &LoginState {
        &self.state.login
    }

    pub fn app_name(&self) -> Option<&str> {
        self.state.app_name.as_deref()
    }

    /// Keys whose stored values were unusable at load time.
    pub fn load_fallbacks(&self) -> &[(&'static str, DecodeFailure)] {
        &self.fallbacks
    }

    /// Creates a task at the top of `todo`.
    pub fn add_task(&mut self, defaults: TaskDefaults) -> (TaskId, Vec<Effect>) {
        let task = Task::create(defaults, self.clock.now_utc(), &mut rand::rng());
        let task_id = task.id.clone();
        self.state.board.insert_front(LaneId::Todo, task);
        self.bridge.save_board(&self.state.board);
        info!("event=task_add module=board_store status=ok task_id={task_id}");

        (task_id, self.sound(SoundCue::Pop).into_iter().collect())
    }

    /// Replaces the stored task with the same id, keeping its position.
    pub fn update_task(&mut self, task: Task) -> Vec<Effect> {
        let task_id = task.id.clone();
        if !self.state.board.replace_task(task) {
            debug!("event=task_update module=board_store status=skip reason=not_found task_id={task_id}");
            return Vec::new();
        }
        self.bridge.save_board(&self.state.board);
        info!("event=task_update module=board_store status=ok task_id={task_id}");

        self.sound(SoundCue::Save).into_iter().collect()
    }

    pub fn delete_task(&mut self, task_id: &str) -> Vec<Effect> {
        if self.state.board.remove_task(task_id).is_none() {
            debug!("event=task_delete module=board_store status=skip reason=not_found task_id={task_id}");
            return Vec::new();
        }
        self.bridge.save_board(&self.state.board);
        if self.state.collapsed_cards.remove(task_id).is_some() {
            self.bridge.save_collapsed_cards(&self.state.collapsed_cards);
        }
        info!("event=task_delete module=board_store status=ok task_id={task_id}");

        self.sound(SoundCue::Delete).into_iter().collect()
    }

    /// Shifts a task's estimate by `delta_minutes`, never below zero.
    pub fn adjust_task_time(&mut self, task_id: &str, delta_minutes: i64) -> Vec<Effect> {
        if !self.state.board.adjust_task_time(task_id, delta_minutes) {
            debug!("event=task_adjust module=board_store status=skip reason=not_found task_id={task_id}");
            return Vec::new();
        }
        self.bridge.save_board(&self.state.board);

        self.sound(SoundCue::Click).into_iter().collect()
    }

    /// Applies a released drag gesture.
    pub fn move_task(&mut self, gesture: DragGesture) -> MoveOutcome {
        let (board, task_id, completed) = match self.state.board.resolve_move(&gesture) {
            MoveResolution::Aborted(reason) => {
                debug!("event=task_move module=board_store status=skip reason={reason:?}");
                return MoveOutcome::Aborted(reason);
            }
            MoveResolution::Moved {
                board,
                task_id,
                completed,
            } => (board, task_id, completed),
        };

        self.state.board = board;
        self.bridge.save_board(&self.state.board);

        let mut effects = Vec::new();
        if completed {
            self.state.completed_today = self.state.completed_today.saturating_add(1);
            self.bridge.save_completed(self.state.completed_today);
            effects.push(Effect::Celebrate);
            effects.push(Effect::Toast(ToastKind::TaskMoved));
            effects.extend(self.sound(SoundCue::Success));
        }
        info!(
            "event=task_move module=board_store status=ok task_id={} completed={} completed_today={}",
            task_id, completed, self.state.completed_today
        );

        MoveOutcome::Moved {
            task_id,
            completed,
            effects,
        }
    }

    /// Flips the sound flag; the confirming cue plays either way.
    pub fn toggle_sound(&mut self) -> Vec<Effect> {
        let was_enabled = self.state.sound_enabled;
        self.state.sound_enabled = !was_enabled;
        self.bridge.save_sound_enabled(self.state.sound_enabled);

        let cue = if was_enabled {
            SoundCue::SwitchOff
        } else {
            SoundCue::SwitchOn
        };
        vec![Effect::PlaySound(cue)]
    }

    pub fn toggle_card_collapse(&mut self, task_id: &str) -> Vec<Effect> {
        if self.state.board.locate(task_id).is_none() {
            debug!("event=card_collapse module=board_store status=skip reason=not_found task_id={task_id}");
            return Vec::new();
        }
        let collapsed = !self.is_collapsed(task_id);
        self.state
            .collapsed_cards
            .insert(task_id.to_string(), collapsed);
        self.bridge.save_collapsed_cards(&self.state.collapsed_cards);

        self.sound(SoundCue::Click).into_iter().collect()
    }

    /// Collapses or expands every current card at once.
    pub fn toggle_all_collapsed(&mut self) -> Vec<Effect> {
        self.all_collapsed = !self.all_collapsed;
        let collapsed = self.all_collapsed;
        self.state.collapsed_cards = self
            .state
            .board
            .tasks()
            .map(|task| (task.id.clone(), collapsed))
            .collect();
        self.bridge.save_collapsed_cards(&self.state.collapsed_cards);

        let mut effects: Vec<Effect> = self.sound(SoundCue::Collapse).into_iter().collect();
        effects.push(Effect::Toast(if collapsed {
            ToastKind::CollapsedAll
        } else {
            ToastKind::ExpandedAll
        }));
        effects
    }

    /// Simulated login with a random handle.
    pub fn login(&mut self) -> Vec<Effect> {
        self.state.login = LoginState::logged_in(random_handle(&mut rand::rng()));
        self.bridge.save_login(&self.state.login);
        info!("event=login module=board_store status=ok");

        let mut effects: Vec<Effect> = self.sound(SoundCue::Success).into_iter().collect();
        effects.push(Effect::Toast(ToastKind::LoggedIn));
        effects
    }

    pub fn logout(&mut self) -> Vec<Effect> {
        self.state.login = LoginState::default();
        self.bridge.save_login(&self.state.login);
        info!("event=logout module=board_store status=ok");

        let mut effects: Vec<Effect> = self.sound(SoundCue::SwitchOff).into_iter().collect();
        effects.push(Effect::Toast(ToastKind::LoggedOut));
        effects
    }

    /// Stores a display name. Blank names are ignored and return `false`.
    pub fn set_app_name(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.state.app_name = Some(trimmed.to_string());
        self.bridge.save_app_name(self.state.app_name.as_deref());
        true
    }

    pub fn reset_app_name(&mut self) {
        self.state.app_name = None;
        self.bridge.save_app_name(None);
    }

    /// Timer hook from the outer event loop; runs the daily reset check
    /// when the polling interval has elapsed. Returns whether the counter
    /// was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.reset_poller.poll(now) {
            return false;
        }
        self.run_reset_check()
    }

    fn run_reset_check(&mut self) -> bool {
        let today = self.clock.today();
        if !self.bridge.roll_reset_date(today) {
            return false;
        }
        self.state.completed_today = 0;
        self.bridge.save_completed(0);
        info!("event=daily_reset module=board_store status=ok date={today}");
        true
    }

    fn sound(&self, cue: SoundCue) -> Option<Effect> {
        self.state
            .sound_enabled
            .then_some(Effect::PlaySound(cue))
    }
}
