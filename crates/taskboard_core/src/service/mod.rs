//! Board use-case services.
//!
//! # Responsibility
//! - Orchestrate board mutations, persistence and effect reporting.
//! - Keep CLI/FFI shells decoupled from storage details.

pub mod board_store;
pub mod cheer;
pub mod chunker;
pub mod daily_reset;
pub mod editor;
pub mod effects;
pub mod motivation;
pub mod persistence;
