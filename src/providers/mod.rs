//! Provider contract, registry and built-in providers

pub mod calculator;
pub mod media;
pub mod registry;
pub mod traits;
pub mod web_search;

pub use registry::ProviderRegistry;
pub use traits::{KeywordMatch, Provider};
