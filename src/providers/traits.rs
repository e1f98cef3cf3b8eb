//! Provider traits and types

use crate::results::ResultItem;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Main provider trait that every result source implements
///
/// A provider owns one data domain (calculator, clipboard history, media
/// control, ...). The orchestrator never inspects results beyond ranking;
/// `action_data` round-trips back to the owning provider on confirm.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Globally unique, stable id
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Symbolic icon name
    fn icon(&self) -> &str {
        "puzzle"
    }

    /// Optional routing prefix: a query starting with `keyword + " "` is
    /// routed exclusively to this provider, bypassing fan-out
    fn keyword(&self) -> Option<&str> {
        None
    }

    /// Advisory debounce hint for collaborators. The orchestrator applies
    /// one fixed window regardless; this is surfaced for shells that want
    /// to vary their own input handling per provider.
    fn debounce_hint(&self) -> Option<Duration> {
        None
    }

    /// Search one query. Errors degrade to an empty batch at the call site
    /// and never abort the rest of a fan-out.
    async fn search(&self, query: &str) -> anyhow::Result<Vec<ResultItem>>;

    /// Perform the action behind a result. Fire-and-forget from the
    /// orchestrator's perspective; the outcome is the provider's business.
    async fn action(&self, result: &ResultItem) -> anyhow::Result<()>;

    /// Optional initialization, called exactly once on registration.
    /// A failure is logged and swallowed; the provider stays registered.
    fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Optional teardown, called exactly once on unregistration
    fn destroy(&self) {}
}

/// A keyword routing hit: the owning provider and the query remainder with
/// the `keyword + " "` prefix stripped
#[derive(Clone)]
pub struct KeywordMatch {
    pub provider: Arc<dyn Provider>,
    pub query: String,
}
