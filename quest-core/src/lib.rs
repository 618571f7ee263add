//! Core library for Quest Dashboard.
//!
//! This crate provides the domain models, SQLite storage, the XP/leveling
//! formulas and the completion workflow, independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use quest_core::{Completable, Database};
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! # let user_id = uuid::Uuid::new_v4();
//! # let task_id = uuid::Uuid::new_v4();
//! let outcome = db.complete(user_id, Completable::Task { id: task_id })?;
//! println!("gained {} xp", outcome.xp_gained);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod completion;
pub mod db;
pub mod leveling;
pub mod models;

// Re-export commonly used types at crate root
pub use completion::{Completable, CompletionError, CompletionOutcome};
pub use db::Database;
