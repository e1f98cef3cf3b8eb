//! Web search fallback provider
//!
//! Always offers one low-scored escape hatch; the ranked merge keeps it at
//! the bottom unless nothing better matched.

use super::traits::Provider;
use crate::results::{Category, ResultItem};
use async_trait::async_trait;
use tracing::info;

/// Fallback "search the web for ..." row
pub struct WebSearchProvider;

impl WebSearchProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for WebSearchProvider {
    fn id(&self) -> &str {
        "core:web-search"
    }

    fn name(&self) -> &str {
        "Web Search"
    }

    fn icon(&self) -> &str {
        "globe"
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<ResultItem>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "https://www.google.com/search?q={}",
            urlencoding::encode(trimmed)
        );
        Ok(vec![ResultItem::new(
            "web:search",
            format!("Search web: {}", trimmed),
            Category::Web,
        )
        .with_subtitle("Web fallback")
        .with_icon("globe")
        .with_action_data(url)
        .with_score(10)])
    }

    async fn action(&self, result: &ResultItem) -> anyhow::Result<()> {
        // opening the browser is app-side
        info!("web search selected: {}", result.action_data);
        Ok(())
    }
}
