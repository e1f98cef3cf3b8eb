//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single candidate shown to the user
///
/// Created fresh on every search call, never mutated, and replaced wholesale
/// by the next search or a clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Unique within one result set; used for action routing and stable
    /// keyboard shortcuts
    pub id: String,
    /// Primary display text
    pub title: String,
    /// Secondary display text
    pub subtitle: String,
    /// Result tag from the closed category set
    pub category: Category,
    /// Symbolic icon name
    pub icon: String,
    /// Opaque payload interpreted only by the owning provider's action
    pub action_data: String,
    /// Provider-chosen relevance; no fixed scale across providers
    pub score: i64,
}

impl ResultItem {
    /// Create a new result
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            category,
            icon: String::new(),
            action_data: String::new(),
            score: 0,
        }
    }

    /// Set the subtitle
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the icon name
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the action payload
    pub fn with_action_data(mut self, action_data: impl Into<String>) -> Self {
        self.action_data = action_data.into();
        self
    }

    /// Set the raw relevance score
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }
}

/// Closed set of result tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    App,
    File,
    Calc,
    Web,
    Sys,
    Media,
    Currency,
    Clipboard,
}

impl Category {
    /// Get the string representation used on the UI boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "APP",
            Self::File => "FILE",
            Self::Calc => "CALC",
            Self::Web => "WEB",
            Self::Sys => "SYS",
            Self::Media => "MEDIA",
            Self::Currency => "CURRENCY",
            Self::Clipboard => "CLIPBOARD",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
