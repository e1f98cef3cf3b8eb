//! Query orchestration: session state and the dispatch state machine

mod orchestrator;
mod session;

pub use orchestrator::Orchestrator;
pub use session::{ActiveKeyword, SessionSnapshot};
