//! Storage layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the key-value contract the persistence bridge writes through.
//! - Isolate SQLite details from service orchestration.

pub mod kv_repo;
