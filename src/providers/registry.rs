//! Provider registry: registration, enablement and keyword routing

use super::traits::{KeywordMatch, Provider};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of all registered providers, in registration order
///
/// Registration order is load-bearing: keyword routing is first-match-wins
/// over it, and fan-out preserves it.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
    disabled: HashSet<String>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            disabled: HashSet::new(),
        }
    }

    /// Create a registry with the built-in providers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::calculator::CalculatorProvider::new()));
        registry.register(Arc::new(super::web_search::WebSearchProvider::new()));
        registry.register(Arc::new(super::media::MediaProvider::new()));
        registry
    }

    /// Register a provider. Re-registering an existing id is a no-op;
    /// `init` runs exactly once on first registration and a failing `init`
    /// is logged while the provider stays registered.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        if self.contains(provider.id()) {
            debug!("provider {} already registered, ignoring", provider.id());
            return;
        }
        if let Err(e) = provider.init() {
            warn!("provider {} init failed: {}", provider.id(), e);
        }
        self.providers.push(provider);
    }

    /// Unregister by id, running `destroy` first. No-op if absent.
    pub fn unregister(&mut self, id: &str) {
        if let Some(pos) = self.providers.iter().position(|p| p.id() == id) {
            self.providers[pos].destroy();
            self.providers.remove(pos);
        }
    }

    /// Replace the disabled set. Disabled providers drop out of both
    /// keyword routing and fan-out until re-enabled.
    pub fn set_disabled<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled = ids.into_iter().map(Into::into).collect();
    }

    /// Check whether a provider id is enabled
    pub fn is_enabled(&self, id: &str) -> bool {
        !self.disabled.contains(id)
    }

    /// Check whether a provider id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.providers.iter().any(|p| p.id() == id)
    }

    /// Look up a provider by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn Provider>> {
        self.providers.iter().find(|p| p.id() == id).cloned()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve keyword routing for a raw query: the first enabled provider
    /// whose keyword prefixes the trimmed query at a space boundary wins,
    /// in registration order. The remainder keeps any further whitespace.
    pub fn match_keyword(&self, query: &str) -> Option<KeywordMatch> {
        let trimmed = query.trim();
        for provider in self.providers.iter().filter(|p| self.is_enabled(p.id())) {
            let Some(keyword) = provider.keyword() else {
                continue;
            };
            if let Some(rest) = trimmed
                .strip_prefix(keyword)
                .and_then(|r| r.strip_prefix(' '))
            {
                return Some(KeywordMatch {
                    provider: Arc::clone(provider),
                    query: rest.to_string(),
                });
            }
        }
        None
    }

    /// Enabled subset, preserving registration order
    pub fn enabled_providers(&self) -> Vec<Arc<dyn Provider>> {
        self.providers
            .iter()
            .filter(|p| self.is_enabled(p.id()))
            .cloned()
            .collect()
    }

    /// Enabled keyword-less providers eligible for fan-out
    pub fn fanout_providers(&self) -> Vec<Arc<dyn Provider>> {
        self.providers
            .iter()
            .filter(|p| self.is_enabled(p.id()) && p.keyword().is_none())
            .cloned()
            .collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
