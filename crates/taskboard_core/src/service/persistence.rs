//! Persistence bridge between live board state and the key-value store.
//!
//! # Responsibility
//! - Encode each state concern as JSON under its own fixed key.
//! - Hydrate state at startup, substituting defaults for bad entries.
//! - Own the stored "last reset" date used by the daily counter reset.
//!
//! # Invariants
//! - Writes are independent per key and never fail the caller.
//! - A malformed stored value is logged and left untouched.
//! - Decoding never panics and always yields a usable value.

use crate::model::board::Board;
use crate::model::prefs::{CollapsedCards, LoginState};
use crate::repo::kv_repo::KeyValueStore;
use crate::service::board_store::BoardState;
use crate::service::daily_reset::{parse_reset_date, reset_date_text};
use chrono::NaiveDate;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const BOARD_KEY: &str = "adhd-todo-columns";
pub const COMPLETED_KEY: &str = "adhd-todo-completed";
pub const LAST_RESET_KEY: &str = "adhd-todo-last-reset";
pub const APP_NAME_KEY: &str = "adhd-app-name";
pub const SOUND_ENABLED_KEY: &str = "adhd-sound-enabled";
pub const COLLAPSED_CARDS_KEY: &str = "adhd-collapsed-cards";
pub const LOGIN_STATE_KEY: &str = "adhd-login-state";

/// Why a stored value could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// Key not present.
    Missing,
    /// Present but not valid JSON for the expected shape.
    Malformed(String),
    /// Store could not be read.
    Unavailable(String),
}

impl Display for DecodeFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("no stored value"),
            Self::Malformed(message) => write!(f, "malformed stored value: {message}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for DecodeFailure {}

/// Tagged decode result: stored value, or default plus the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    Value(T),
    Fallback { value: T, reason: DecodeFailure },
}

impl<T> Decoded<T> {
    pub fn into_value(self) -> T {
        match self {
            Self::Value(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn failure(&self) -> Option<&DecodeFailure> {
        match self {
            Self::Value(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Result of hydrating all concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hydration {
    pub state: BoardState,
    /// Keys that fell back to defaults because the stored value was bad or
    /// unreadable. Missing keys are not listed.
    pub fallbacks: Vec<(&'static str, DecodeFailure)>,
}

/// Reads and writes board state through a [`KeyValueStore`].
pub struct PersistenceBridge<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decodes the JSON value stored under `key`.
    ///
    /// Missing, malformed and unreadable values all produce
    /// `Decoded::Fallback` carrying `default()`.
    pub fn decode_key<T: DeserializeOwned>(
        &self,
        key: &'static str,
        default: impl FnOnce() -> T,
    ) -> Decoded<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                return Decoded::Fallback {
                    value: default(),
                    reason: DecodeFailure::Missing,
                }
            }
            Err(err) => {
                warn!(
                    "event=state_decode module=persistence status=error key={} error_code=store_read_failed error={}",
                    key, err
                );
                return Decoded::Fallback {
                    value: default(),
                    reason: DecodeFailure::Unavailable(err.to_string()),
                };
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Decoded::Value(value),
            Err(err) => {
                warn!(
                    "event=state_decode module=persistence status=error key={} error_code=malformed_value error={}",
                    key, err
                );
                Decoded::Fallback {
                    value: default(),
                    reason: DecodeFailure::Malformed(err.to_string()),
                }
            }
        }
    }

    /// Hydrates every concern, falling back per key.
    pub fn hydrate(&self) -> Hydration {
        let defaults = BoardState::default();
        let mut fallbacks = Vec::new();

        let board = self.decode_key(BOARD_KEY, Board::default);
        note_fallback(BOARD_KEY, &board, &mut fallbacks);
        let completed_today = self.decode_key(COMPLETED_KEY, || defaults.completed_today);
        note_fallback(COMPLETED_KEY, &completed_today, &mut fallbacks);
        let app_name = self.decode_key(APP_NAME_KEY, || defaults.app_name.clone());
        note_fallback(APP_NAME_KEY, &app_name, &mut fallbacks);
        let sound_enabled = self.decode_key(SOUND_ENABLED_KEY, || defaults.sound_enabled);
        note_fallback(SOUND_ENABLED_KEY, &sound_enabled, &mut fallbacks);
        let collapsed_cards = self.decode_key(COLLAPSED_CARDS_KEY, CollapsedCards::new);
        note_fallback(COLLAPSED_CARDS_KEY, &collapsed_cards, &mut fallbacks);
        let login = self.decode_key(LOGIN_STATE_KEY, LoginState::default);
        note_fallback(LOGIN_STATE_KEY, &login, &mut fallbacks);

        let state = BoardState {
            board: board.into_value(),
            completed_today: completed_today.into_value(),
            app_name: app_name.into_value(),
            sound_enabled: sound_enabled.into_value(),
            collapsed_cards: collapsed_cards.into_value(),
            login: login.into_value(),
        };

        info!(
            "event=state_hydrate module=persistence status=ok tasks={} completed_today={} fallbacks={}",
            state.board.task_count(),
            state.completed_today,
            fallbacks.len()
        );

        Hydration { state, fallbacks }
    }

    pub fn save_board(&self, board: &Board) {
        self.write_json(BOARD_KEY, board);
    }

    pub fn save_completed(&self, completed_today: u32) {
        self.write_json(COMPLETED_KEY, &completed_today);
    }

    pub fn save_sound_enabled(&self, enabled: bool) {
        self.write_json(SOUND_ENABLED_KEY, &enabled);
    }

    pub fn save_collapsed_cards(&self, cards: &CollapsedCards) {
        self.write_json(COLLAPSED_CARDS_KEY, cards);
    }

    pub fn save_login(&self, login: &LoginState) {
        self.write_json(LOGIN_STATE_KEY, login);
    }

    /// Stores the app name, or removes the key when `None`.
    pub fn save_app_name(&self, name: Option<&str>) {
        match name {
            Some(name) => self.write_json(APP_NAME_KEY, &name),
            None => {
                if let Err(err) = self.store.remove(APP_NAME_KEY) {
                    warn!(
                        "event=state_write module=persistence status=error key={} error_code=store_remove_failed error={}",
                        APP_NAME_KEY, err
                    );
                }
            }
        }
    }

    /// Compares the stored last-reset date with `today`.
    ///
    /// On mismatch (including a missing or unreadable stored date) stores
    /// `today` and returns `true`; the caller zeroes the counter.
    pub fn roll_reset_date(&self, today: NaiveDate) -> bool {
        let stored = match self.store.get(LAST_RESET_KEY) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(
                    "event=daily_reset module=persistence status=error error_code=store_read_failed error={}",
                    err
                );
                None
            }
        };

        if stored.as_deref().and_then(parse_reset_date) == Some(today) {
            return false;
        }

        if let Err(err) = self.store.set(LAST_RESET_KEY, &reset_date_text(today)) {
            warn!(
                "event=state_write module=persistence status=error key={} error_code=store_write_failed error={}",
                LAST_RESET_KEY, err
            );
        }
        true
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=state_write module=persistence status=error key={} error_code=encode_failed error={}",
                    key, err
                );
                return;
            }
        };

        if let Err(err) = self.store.set(key, &encoded) {
            warn!(
                "event=state_write module=persistence status=error key={} error_code=store_write_failed error={}",
                key, err
            );
        }
    }
}

fn note_fallback<T>(
    key: &'static str,
    decoded: &Decoded<T>,
    fallbacks: &mut Vec<(&'static str, DecodeFailure)>,
) {
    match decoded.failure() {
        None | Some(DecodeFailure::Missing) => {}
        Some(reason) => fallbacks.push((key, reason.clone())),
    }
}
