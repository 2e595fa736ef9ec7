#![forbid(unsafe_code)]

//! Core domain model and business logic for FitHome.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, summaries, stats, profile)
//! - Exercise catalog, workout templates and library filtering
//! - Countdown timers and a cancellable tick scheduler
//! - The workout session state machine
//! - Stat aggregation and achievements
//! - Persistence (key-value store, application state holder, CSV export)
//! - Text rendering for each view

pub mod types;
pub mod error;
pub mod catalog;
pub mod filter;
pub mod config;
pub mod logging;
pub mod timer;
pub mod ticker;
pub mod session;
pub mod stats;
pub mod store;
pub mod app;
pub mod share;
pub mod shell;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, TemplateKind, WorkoutTemplate};
pub use filter::ExerciseFilter;
pub use config::Config;
pub use timer::{Countdown, TickOutcome};
pub use ticker::{Ticker, TickerHandle};
pub use session::{SessionPhase, Transition, WorkoutSession, DEFAULT_WEIGHT_KG, REST_SECONDS};
pub use stats::{achievements, aggregate, weekly_activity, Achievement};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use app::AppState;
pub use share::{share, share_text, ShareTarget};
pub use shell::Tab;
pub use export::export_history_csv;
