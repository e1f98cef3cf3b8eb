//! Media player control provider
//!
//! Keyword-routed (`sp`): the whole query after the prefix is a transport
//! command filter, or a search-and-play term when nothing matches.

use super::traits::Provider;
use crate::results::{Category, ResultItem};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

struct Command {
    cmd: &'static str,
    title: &'static str,
}

const COMMANDS: &[Command] = &[
    Command { cmd: "play", title: "Play / Resume" },
    Command { cmd: "pause", title: "Pause" },
    Command { cmd: "next", title: "Next Track" },
    Command { cmd: "prev", title: "Previous Track" },
];

/// Transport controls and search-and-play for the system media player
pub struct MediaProvider;

impl MediaProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MediaProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn command_result(command: &Command, score: i64) -> ResultItem {
    ResultItem::new(format!("media:{}", command.cmd), command.title, Category::Media)
        .with_subtitle("Media • Playback")
        .with_icon("music")
        .with_action_data(command.cmd)
        .with_score(score)
}

#[async_trait]
impl Provider for MediaProvider {
    fn id(&self) -> &str {
        "integration:media"
    }

    fn name(&self) -> &str {
        "Media Player"
    }

    fn icon(&self) -> &str {
        "music"
    }

    fn keyword(&self) -> Option<&str> {
        Some("sp")
    }

    fn debounce_hint(&self) -> Option<Duration> {
        Some(Duration::from_millis(100))
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<ResultItem>> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Ok(COMMANDS
                .iter()
                .enumerate()
                .map(|(i, c)| command_result(c, 900 - i as i64))
                .collect());
        }

        let mut results: Vec<ResultItem> = COMMANDS
            .iter()
            .filter(|c| c.cmd.contains(&q) || c.title.to_lowercase().contains(&q))
            .enumerate()
            .map(|(i, c)| command_result(c, 800 - i as i64))
            .collect();

        if results.is_empty() && q.len() > 1 {
            let term = query.trim();
            results.push(
                ResultItem::new("media:search", format!("Play: {}", term), Category::Media)
                    .with_subtitle("Media • Search & Play")
                    .with_icon("music")
                    .with_action_data(format!("search:{}", term))
                    .with_score(700),
            );
        }

        Ok(results)
    }

    async fn action(&self, result: &ResultItem) -> anyhow::Result<()> {
        // actual player control is app-side; surface the dispatched command
        if let Some(term) = result.action_data.strip_prefix("search:") {
            info!("media search-and-play: {}", term);
        } else {
            info!("media transport command: {}", result.action_data);
        }
        Ok(())
    }
}
