//! Native backend collaborator
//!
//! The app/file/full-text index lives outside the engine and is consumed as
//! an opaque asynchronous source with the same search/action shape as a
//! provider. It participates in every fan-out as an implicit always-enabled
//! keyword-less source; failure or non-availability degrades to an empty
//! batch and never propagates.

use crate::results::ResultItem;
use async_trait::async_trait;

/// Origin id under which backend results are routed back for actions
pub const BACKEND_ID: &str = "native";

/// The native search backend contract
#[async_trait]
pub trait Backend: Send + Sync {
    /// Search the native index
    async fn search(&self, query: &str) -> anyhow::Result<Vec<ResultItem>>;

    /// Perform the action behind a backend-originated result
    async fn action(&self, result: &ResultItem) -> anyhow::Result<()>;
}

/// Backend used when no native index is wired in
pub struct NullBackend;

#[async_trait]
impl Backend for NullBackend {
    async fn search(&self, _query: &str) -> anyhow::Result<Vec<ResultItem>> {
        Ok(Vec::new())
    }

    async fn action(&self, _result: &ResultItem) -> anyhow::Result<()> {
        Ok(())
    }
}
