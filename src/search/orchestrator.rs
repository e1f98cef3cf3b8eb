//! Query orchestration and dispatch
//!
//! The orchestrator turns raw keystroke events into a published result
//! list: it debounces edits, routes keyword-prefixed queries to a single
//! provider, fans everything else out concurrently under per-call
//! timeouts, and guards publication with a monotonic request counter so a
//! stale response can never overwrite a fresher one.

use super::session::{ActiveKeyword, SessionSnapshot, SessionState};
use crate::backend::{Backend, NullBackend, BACKEND_ID};
use crate::providers::{KeywordMatch, Provider, ProviderRegistry};
use crate::results::{merge_ranked, ResultItem};
use crate::{DEBOUNCE, FANOUT_TIMEOUT};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

/// Stateful controller turning raw keystrokes into a published, consistent
/// result list.
///
/// Cheap to clone; clones share the same session. Cancellation is soft:
/// in-flight provider calls are never aborted, their responses are dropped
/// on arrival if the request counter has moved on.
#[derive(Clone)]
pub struct Orchestrator {
    registry: Arc<RwLock<ProviderRegistry>>,
    backend: Arc<dyn Backend>,
    state: Arc<RwLock<SessionState>>,
    /// Monotonic request counter; only the response whose captured value
    /// still equals the counter may mutate visible state
    seq: Arc<AtomicU64>,
    debounce: Duration,
    fanout_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator without a native backend
    pub fn new(registry: ProviderRegistry) -> Self {
        Self::with_backend(registry, Arc::new(NullBackend))
    }

    /// Create an orchestrator with a native backend participating in
    /// every fan-out
    pub fn with_backend(registry: ProviderRegistry, backend: Arc<dyn Backend>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            backend,
            state: Arc::new(RwLock::new(SessionState::default())),
            seq: Arc::new(AtomicU64::new(0)),
            debounce: DEBOUNCE,
            fanout_timeout: FANOUT_TIMEOUT,
        }
    }

    /// Override the debounce window
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Override the fan-out timeout
    pub fn with_fanout_timeout(mut self, limit: Duration) -> Self {
        self.fanout_timeout = limit;
        self
    }

    /// Shared registry handle, for dynamic registration
    pub fn registry(&self) -> Arc<RwLock<ProviderRegistry>> {
        Arc::clone(&self.registry)
    }

    /// Refresh the disabled-provider set from settings
    pub fn sync_disabled<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.write().unwrap().set_disabled(ids);
    }

    /// Read-only view of the session for the UI
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().unwrap().snapshot()
    }

    /// Handle a raw text edit.
    ///
    /// Bumps the request counter, so any in-flight dispatch is stale from
    /// this point on. An empty (after trim) query resets to idle
    /// immediately; anything else schedules a debounced dispatch.
    ///
    /// Must be called inside a Tokio runtime: the debounced dispatch is
    /// spawned onto it.
    pub fn handle_input(&self, text: &str) {
        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let trimmed = text.trim().to_string();

        if trimmed.is_empty() {
            let mut state = self.state.write().unwrap();
            state.query = text.to_string();
            state.reset();
            return;
        }

        let kw = self.registry.read().unwrap().match_keyword(&trimmed);
        {
            let mut state = self.state.write().unwrap();
            state.query = text.to_string();
            state.active_keyword = kw.as_ref().map(|m| ActiveKeyword {
                provider_id: m.provider.id().to_string(),
                query: m.query.clone(),
            });
        }

        let this = self.clone();
        tokio::spawn(async move {
            sleep(this.debounce).await;
            if this.seq.load(Ordering::SeqCst) != id {
                // superseded before dispatch
                return;
            }
            this.dispatch(id, trimmed, kw).await;
        });
    }

    /// Clear the session (escape, or the shell hiding the window).
    /// In-flight responses are orphaned by the counter bump and can never
    /// repopulate the list.
    pub fn clear(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().unwrap();
        state.query.clear();
        state.reset();
    }

    /// Move the selection down, wrapping around
    pub fn select_next(&self) {
        let mut state = self.state.write().unwrap();
        if !state.results.is_empty() {
            state.selected = (state.selected + 1) % state.results.len();
        }
    }

    /// Move the selection up, wrapping around
    pub fn select_previous(&self) {
        let mut state = self.state.write().unwrap();
        if !state.results.is_empty() {
            state.selected = if state.selected == 0 {
                state.results.len() - 1
            } else {
                state.selected - 1
            };
        }
    }

    /// Select by index (keyboard shortcut); out-of-range input is ignored
    pub fn select(&self, index: usize) {
        let mut state = self.state.write().unwrap();
        if index < state.results.len() {
            state.selected = index;
        }
    }

    /// Invoke the owning provider's action on the selected result.
    ///
    /// Fire-and-forget: the action runs on a task detached onto the
    /// calling Tokio runtime and its outcome never reaches orchestrator
    /// state.
    pub fn confirm(&self) {
        let (item, origin) = {
            let state = self.state.read().unwrap();
            let Some(item) = state.results.get(state.selected).cloned() else {
                return;
            };
            let origin = state.origins.get(&item.id).cloned();
            (item, origin)
        };

        let provider: Option<Arc<dyn Provider>> = match origin.as_deref() {
            Some(BACKEND_ID) | None => None,
            Some(id) => {
                let provider = self.registry.read().unwrap().get(id);
                if provider.is_none() {
                    warn!("result {} has no registered provider, dropping action", item.id);
                    return;
                }
                provider
            }
        };

        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            let outcome = match provider {
                Some(p) => p.action(&item).await,
                None => backend.action(&item).await,
            };
            if let Err(e) = outcome {
                warn!("action for {} failed: {}", item.id, e);
            }
        });
    }

    async fn dispatch(&self, id: u64, query: String, kw: Option<KeywordMatch>) {
        {
            let mut state = self.state.write().unwrap();
            if self.seq.load(Ordering::SeqCst) != id {
                return;
            }
            state.loading = true;
        }

        let started = Instant::now();
        let (results, origins) = match kw {
            Some(m) => self.keyword_dispatch(&m).await,
            None => self.fanout_dispatch(&query).await,
        };

        let mut state = self.state.write().unwrap();
        if self.seq.load(Ordering::SeqCst) != id {
            debug!("dropping stale response for request {}", id);
            return;
        }
        debug!(
            "request {} published {} results in {:?}",
            id,
            results.len(),
            started.elapsed()
        );
        state.publish(results, origins);
    }

    /// Keyword mode: one authoritative provider, no competing timeout, raw
    /// return published without re-sorting
    async fn keyword_dispatch(&self, m: &KeywordMatch) -> (Vec<ResultItem>, HashMap<String, String>) {
        let provider_id = m.provider.id().to_string();
        debug!("keyword dispatch to {} (unbounded)", provider_id);

        let results = match m.provider.search(&m.query).await {
            Ok(results) => results,
            Err(e) => {
                warn!("provider {} search failed: {}", provider_id, e);
                Vec::new()
            }
        };
        let origins = results
            .iter()
            .map(|r| (r.id.clone(), provider_id.clone()))
            .collect();
        (results, origins)
    }

    /// Fan-out mode: all enabled keyword-less providers concurrently under
    /// the fan-out timeout, plus the backend with its own error fallback,
    /// fused by the ranked merge
    async fn fanout_dispatch(&self, query: &str) -> (Vec<ResultItem>, HashMap<String, String>) {
        let providers = self.registry.read().unwrap().fanout_providers();
        debug!(
            "fan-out dispatch of '{}' to {} providers",
            query,
            providers.len()
        );

        let limit = self.fanout_timeout;
        let provider_calls = providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let query = query.to_string();
            async move {
                let started = Instant::now();
                let batch = match timeout(limit, provider.search(&query)).await {
                    Ok(Ok(batch)) => batch,
                    Ok(Err(e)) => {
                        warn!("provider {} search failed: {}", provider.id(), e);
                        Vec::new()
                    }
                    Err(_) => {
                        warn!("provider {} timed out after {:?}", provider.id(), limit);
                        Vec::new()
                    }
                };
                debug!(
                    "provider {} returned {} results in {:?}",
                    provider.id(),
                    batch.len(),
                    started.elapsed()
                );
                (provider.id().to_string(), batch)
            }
        });

        let backend_call = async {
            match self.backend.search(query).await {
                Ok(batch) => (BACKEND_ID.to_string(), batch),
                Err(e) => {
                    warn!("backend search failed: {}", e);
                    (BACKEND_ID.to_string(), Vec::new())
                }
            }
        };

        let (mut batches, backend_batch) = futures::join!(join_all(provider_calls), backend_call);
        batches.push(backend_batch);

        let mut origins = HashMap::new();
        for (provider_id, batch) in &batches {
            for item in batch {
                // earlier batch wins on duplicate ids, matching
                // registration order
                origins
                    .entry(item.id.clone())
                    .or_insert_with(|| provider_id.clone());
            }
        }

        let normalized = query.trim().to_lowercase();
        let merged = merge_ranked(batches.into_iter().map(|(_, b)| b).collect(), &normalized);
        (merged, origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Category;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::task::yield_now;

    fn item(id: &str, title: &str, score: i64) -> ResultItem {
        ResultItem::new(id, title, Category::App).with_score(score)
    }

    /// Let spawned tasks run between virtual-time steps
    async fn settle() {
        for _ in 0..32 {
            yield_now().await;
        }
    }

    #[derive(Default)]
    struct Recorder {
        searches: Mutex<Vec<String>>,
        actions: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn searched(&self) -> Vec<String> {
            self.searches.lock().unwrap().clone()
        }

        fn actioned(&self) -> Vec<String> {
            self.actions.lock().unwrap().clone()
        }
    }

    struct TestProvider {
        id: &'static str,
        keyword: Option<&'static str>,
        delay: Duration,
        /// query substring that makes `search` hang forever
        hang_on: Option<&'static str>,
        fail: bool,
        results: Vec<ResultItem>,
        recorder: Arc<Recorder>,
    }

    impl TestProvider {
        fn new(id: &'static str, results: Vec<ResultItem>) -> Self {
            Self {
                id,
                keyword: None,
                delay: Duration::ZERO,
                hang_on: None,
                fail: false,
                results,
                recorder: Arc::new(Recorder::default()),
            }
        }

        fn keyword(mut self, keyword: &'static str) -> Self {
            self.keyword = Some(keyword);
            self
        }

        fn delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn hang_on(mut self, query: &'static str) -> Self {
            self.hang_on = Some(query);
            self
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn recorder(&self) -> Arc<Recorder> {
            Arc::clone(&self.recorder)
        }
    }

    #[async_trait]
    impl Provider for TestProvider {
        fn id(&self) -> &str {
            self.id
        }

        fn name(&self) -> &str {
            self.id
        }

        fn keyword(&self) -> Option<&str> {
            self.keyword
        }

        async fn search(&self, query: &str) -> anyhow::Result<Vec<ResultItem>> {
            self.recorder.searches.lock().unwrap().push(query.to_string());
            if self.hang_on == Some(query) {
                futures::future::pending::<()>().await;
            }
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            if self.fail {
                anyhow::bail!("provider down");
            }
            Ok(self.results.clone())
        }

        async fn action(&self, result: &ResultItem) -> anyhow::Result<()> {
            self.recorder.actions.lock().unwrap().push(result.id.clone());
            Ok(())
        }
    }

    struct TestBackend {
        results: Vec<ResultItem>,
        fail: bool,
        recorder: Arc<Recorder>,
    }

    impl TestBackend {
        fn new(results: Vec<ResultItem>) -> Self {
            Self {
                results,
                fail: false,
                recorder: Arc::new(Recorder::default()),
            }
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }

        fn recorder(&self) -> Arc<Recorder> {
            Arc::clone(&self.recorder)
        }
    }

    #[async_trait]
    impl Backend for TestBackend {
        async fn search(&self, query: &str) -> anyhow::Result<Vec<ResultItem>> {
            self.recorder.searches.lock().unwrap().push(query.to_string());
            if self.fail {
                anyhow::bail!("index unavailable");
            }
            Ok(self.results.clone())
        }

        async fn action(&self, result: &ResultItem) -> anyhow::Result<()> {
            self.recorder.actions.lock().unwrap().push(result.id.clone());
            Ok(())
        }
    }

    /// Route engine logs through the test harness when RUST_LOG asks
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn orchestrator_with(providers: Vec<TestProvider>) -> Orchestrator {
        init_tracing();
        let mut registry = ProviderRegistry::new();
        for p in providers {
            registry.register(Arc::new(p));
        }
        Orchestrator::new(registry)
    }

    /// Drive past debounce and an instant dispatch
    async fn run_to_publish() {
        sleep(DEBOUNCE + Duration::from_millis(10)).await;
        settle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces_rapid_edits() {
        let provider = TestProvider::new("p", vec![item("r1", "Result", 1)]);
        let recorder = provider.recorder();
        let orch = orchestrator_with(vec![provider]);

        orch.handle_input("c");
        sleep(Duration::from_millis(10)).await;
        orch.handle_input("ca");
        sleep(Duration::from_millis(10)).await;
        orch.handle_input("calc");
        run_to_publish().await;

        // only the final edit ever reached the provider
        assert_eq!(recorder.searched(), vec!["calc"]);
        let snap = orch.snapshot();
        assert_eq!(snap.results.len(), 1);
        assert!(!snap.loading);
        assert_eq!(snap.selected, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_routes_exclusively() {
        let media = TestProvider::new(
            "media",
            // deliberately not score-sorted: keyword mode publishes raw order
            vec![item("m2", "Pause", 1), item("m1", "Play", 5)],
        )
        .keyword("sp");
        let media_rec = media.recorder();
        let global = TestProvider::new("global", vec![item("g1", "Global", 9)]);
        let global_rec = global.recorder();
        let orch = orchestrator_with(vec![media, global]);

        orch.handle_input("sp play");
        run_to_publish().await;

        assert_eq!(media_rec.searched(), vec!["play"]);
        assert!(global_rec.searched().is_empty());

        let snap = orch.snapshot();
        let ids: Vec<&str> = snap.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m1"]);
        let kw = snap.active_keyword.unwrap();
        assert_eq!(kw.provider_id, "media");
        assert_eq!(kw.query, "play");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fanout_merges_providers_and_backend() {
        let provider = TestProvider::new("p", vec![item("p1", "Calculator", 100)]);
        let backend = TestBackend::new(vec![item("b1", "calc notes.txt", 300)]);
        let backend_rec = backend.recorder();

        init_tracing();
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(provider));
        let orch = Orchestrator::with_backend(registry, Arc::new(backend));

        orch.handle_input("calc");
        run_to_publish().await;

        assert_eq!(backend_rec.searched(), vec!["calc"]);
        let snap = orch.snapshot();
        let ids: Vec<&str> = snap.results.iter().map(|r| r.id.as_str()).collect();
        // both earn the prefix boost; the raw scores order them
        assert_eq!(ids, vec!["b1", "p1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fanout_timeout_substitutes_empty_batch() {
        let fast = TestProvider::new("fast", vec![item("f1", "Fast", 1)]);
        let slow =
            TestProvider::new("slow", vec![item("s1", "Slow", 99)]).delay(Duration::from_secs(2));
        let orch = orchestrator_with(vec![fast, slow]);

        orch.handle_input("q");
        sleep(DEBOUNCE + FANOUT_TIMEOUT + Duration::from_millis(10)).await;
        settle().await;

        let snap = orch.snapshot();
        let ids: Vec<&str> = snap.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["f1"]);
        assert!(!snap.loading);

        // the orphaned call finishing later changes nothing
        sleep(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(orch.snapshot().results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_error_degrades_to_empty_batch() {
        let broken = TestProvider::new("broken", vec![item("x", "Never", 1)]).failing();
        let healthy = TestProvider::new("healthy", vec![item("h1", "Healthy", 1)]);
        let orch = orchestrator_with(vec![broken, healthy]);

        orch.handle_input("q");
        run_to_publish().await;

        let snap = orch.snapshot();
        let ids: Vec<&str> = snap.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["h1"]);
        assert!(!snap.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_search_failure_publishes_empty_list() {
        let media = TestProvider::new("media", vec![item("m1", "Play", 5)])
            .keyword("sp")
            .failing();
        let recorder = media.recorder();
        let orch = orchestrator_with(vec![media]);

        orch.handle_input("sp play");
        run_to_publish().await;

        assert_eq!(recorder.searched(), vec!["play"]);
        let snap = orch.snapshot();
        assert!(snap.results.is_empty());
        assert!(!snap.loading);
        assert_eq!(snap.active_keyword.unwrap().provider_id, "media");
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_failure_degrades_to_empty_batch() {
        let provider = TestProvider::new("p", vec![item("p1", "Fine", 1)]);
        init_tracing();
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(provider));
        let orch =
            Orchestrator::with_backend(registry, Arc::new(TestBackend::new(vec![]).failing()));

        orch.handle_input("q");
        run_to_publish().await;

        assert_eq!(orch.snapshot().results.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_overwrites_fresh_one() {
        let provider = TestProvider::new("media", vec![item("ok", "Ok", 1)])
            .keyword("sp")
            .hang_on("hang");
        let recorder = provider.recorder();
        let orch = orchestrator_with(vec![provider]);

        // keyword mode is unbounded: this dispatch never resolves
        orch.handle_input("sp hang");
        sleep(DEBOUNCE + Duration::from_millis(10)).await;
        settle().await;
        assert!(orch.snapshot().loading);

        orch.handle_input("sp ok");
        run_to_publish().await;

        assert_eq!(recorder.searched(), vec!["hang", "ok"]);
        let snap = orch.snapshot();
        assert_eq!(snap.results.len(), 1);
        assert_eq!(snap.results[0].id, "ok");
        assert!(!snap.loading);

        // a long time later the hung request is still orphaned
        sleep(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(orch.snapshot().results[0].id, "ok");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_response_is_dropped_after_newer_accept() {
        // the first dispatch is still inside its timeout window when the
        // second one gets accepted; its eventual batch must be discarded
        let provider = TestProvider::new("p", vec![item("r", "R", 1)])
            .delay(Duration::from_millis(200));
        let recorder = provider.recorder();
        let orch = orchestrator_with(vec![provider]);

        orch.handle_input("first");
        sleep(DEBOUNCE + Duration::from_millis(10)).await;
        settle().await;
        assert!(orch.snapshot().loading);

        orch.handle_input("second");
        sleep(Duration::from_secs(1)).await;
        settle().await;

        assert_eq!(recorder.searched(), vec!["first", "second"]);
        let snap = orch.snapshot();
        assert_eq!(snap.query, "second");
        assert_eq!(snap.results.len(), 1);
        assert!(!snap.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_while_in_flight() {
        let provider =
            TestProvider::new("p", vec![item("r", "R", 1)]).delay(Duration::from_millis(200));
        let orch = orchestrator_with(vec![provider]);

        orch.handle_input("q");
        sleep(DEBOUNCE + Duration::from_millis(10)).await;
        settle().await;
        assert!(orch.snapshot().loading);

        orch.clear();
        let snap = orch.snapshot();
        assert!(snap.query.is_empty());
        assert!(snap.results.is_empty());
        assert!(!snap.loading);
        assert!(snap.active_keyword.is_none());

        // the in-flight response arrives and is discarded
        sleep(Duration::from_secs(1)).await;
        settle().await;
        assert!(orch.snapshot().results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_resets_immediately() {
        let provider = TestProvider::new("p", vec![item("r", "R", 1)]);
        let recorder = provider.recorder();
        let orch = orchestrator_with(vec![provider]);

        orch.handle_input("stuff");
        run_to_publish().await;
        assert_eq!(orch.snapshot().results.len(), 1);

        orch.handle_input("   ");
        let snap = orch.snapshot();
        assert!(snap.results.is_empty());
        assert!(!snap.loading);

        // whitespace never reaches providers
        sleep(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(recorder.searched(), vec!["stuff"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_provider_skipped_until_reenabled() {
        let provider = TestProvider::new("p", vec![item("r", "R", 1)]);
        let recorder = provider.recorder();
        let orch = orchestrator_with(vec![provider]);

        orch.sync_disabled(["p"]);
        orch.handle_input("q");
        run_to_publish().await;
        assert!(recorder.searched().is_empty());
        assert!(orch.snapshot().results.is_empty());

        orch.sync_disabled(Vec::<String>::new());
        orch.handle_input("q2");
        run_to_publish().await;
        assert_eq!(recorder.searched(), vec!["q2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_navigation_wraps() {
        let provider = TestProvider::new(
            "p",
            vec![item("a", "A", 3), item("b", "B", 2), item("c", "C", 1)],
        );
        let orch = orchestrator_with(vec![provider]);

        orch.handle_input("q");
        run_to_publish().await;
        assert_eq!(orch.snapshot().selected, 0);

        orch.select_next();
        orch.select_next();
        assert_eq!(orch.snapshot().selected, 2);
        orch.select_next();
        assert_eq!(orch.snapshot().selected, 0);

        orch.select_previous();
        assert_eq!(orch.snapshot().selected, 2);

        orch.select(1);
        assert_eq!(orch.snapshot().selected, 1);
        orch.select(99);
        assert_eq!(orch.snapshot().selected, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_routes_action_to_owning_provider() {
        let provider = TestProvider::new("p", vec![item("p1", "Alpha row", 10)]);
        let provider_rec = provider.recorder();
        let backend = TestBackend::new(vec![item("b1", "Bravo row", 5)]);
        let backend_rec = backend.recorder();

        init_tracing();
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(provider));
        let orch = Orchestrator::with_backend(registry, Arc::new(backend));

        orch.handle_input("row");
        run_to_publish().await;
        let snap = orch.snapshot();
        assert_eq!(snap.results.len(), 2);

        // p1 sorts first (same substring boost, higher score)
        orch.confirm();
        settle().await;
        assert_eq!(provider_rec.actioned(), vec!["p1"]);

        orch.select_next();
        orch.confirm();
        settle().await;
        assert_eq!(backend_rec.actioned(), vec!["b1"]);
    }
}
