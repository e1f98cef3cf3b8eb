//! Genie-RS: query orchestration engine for a keyboard-driven quick launcher
//!
//! As the user types, the engine fans the query out to independent result
//! providers, merges their batches under a single relevance ranking and
//! publishes a bounded top-N list for keyboard-driven selection and action.

pub mod backend;
pub mod config;
pub mod providers;
pub mod results;
pub mod search;

pub use backend::{Backend, NullBackend};
pub use config::Settings;
pub use providers::{Provider, ProviderRegistry};
pub use results::{Category, ResultItem};
pub use search::{Orchestrator, SessionSnapshot};

use std::time::Duration;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Debounce window between the last keystroke and dispatch
pub const DEBOUNCE: Duration = Duration::from_millis(50);

/// Per-provider time limit in fan-out mode
pub const FANOUT_TIMEOUT: Duration = Duration::from_millis(400);

/// Maximum number of entries in the published result list
pub const MAX_RESULTS: usize = 8;
