//! Typeahead search controller
//!
//! Owns the query text, the scope, the result list and the selection cursor,
//! and decides when the [`SearchService`] gets called. Timers and service
//! calls run as tokio tasks that post back into the controller's own event
//! queue; state is only ever mutated through `&mut self`, from whatever task
//! owns the controller.
//!
//! # Phases
//!
//! ```text
//!            non-empty input               timer fires, dispatch
//!   Idle ───────────────────────▶ Debouncing ───────────────────▶ Searching
//!    ▲                              │  ▲                            │   │
//!    │   input cleared / too short  │  │ new input     Esc, outside │   │
//!    └──────────────────────────────┘  └──────────── Dismissed ◀────┘   │
//!    ▲                                                                  │
//!    └──────────────── selection made / input cleared ──────────────────┘
//! ```
//!
//! # Cursor invariant
//!
//! The cursor is either `None` or a valid index into the current results.
//! Every replacement of the result list resets it: `Some(0)` for a non-empty
//! list, `None` otherwise.

use super::debounce::{DebounceToken, Debouncer};
use super::error::ServiceError;
use super::grouping::{Dropdown, RenderRow, group_by_kind};
use super::traits::{ResultConsumer, SearchService};
use super::types::{ResultItem, SearchOptions, SearchScope};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Tunables for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Quiet period before a keystroke dispatches a search
    pub debounce: Duration,
    /// Minimum trimmed query length, in characters
    pub min_query_len: usize,
    /// Query that bypasses the minimum length (lists everything)
    pub wildcard: String,
    /// Close the dropdown when the service fails
    ///
    /// Off by default: a failure clears the results but leaves the dropdown
    /// open on its "No results found" state.
    pub close_on_error: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: 3,
            wildcard: "*".to_string(),
            close_on_error: false,
        }
    }
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Move the cursor down, wrapping
    ArrowDown,
    /// Move the cursor up, wrapping
    ArrowUp,
    /// Select the highlighted result
    Enter,
    /// Hide the dropdown
    Escape,
}

/// Whether a key was consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed: the host must suppress its default handling
    Handled,
    /// Not consumed: the dropdown is hidden or empty
    Ignored,
}

impl KeyOutcome {
    /// Whether the host should suppress its default behaviour
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Observable phase of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing pending, dropdown closed
    Idle,
    /// A debounce timer is outstanding
    Debouncing,
    /// A request is in flight or results are shown
    Searching,
    /// Dropdown hidden by Escape or an outside interaction; text and results kept
    Dismissed,
}

/// Messages posted back by timer and service tasks
#[derive(Debug)]
enum ControllerEvent {
    DebounceElapsed {
        token: DebounceToken,
        value: String,
    },
    SearchFinished {
        seq: u64,
        query: String,
        scope: SearchScope,
        outcome: Result<Vec<ResultItem>, ServiceError>,
    },
}

/// Debounced, keyboard-navigable search over a [`SearchService`]
pub struct SearchController<S> {
    service: Arc<S>,
    settings: ControllerSettings,
    query: String,
    scope: SearchScope,
    searching: bool,
    dismissed: bool,
    results: Vec<ResultItem>,
    cursor: Option<usize>,
    debouncer: Debouncer,
    /// Sequence number of the latest dispatch; responses carrying any
    /// other number are discarded
    dispatch_seq: u64,
    /// Value of the latest accepted dispatch, until results are cleared
    last_dispatched: Option<String>,
    /// Failure of the latest dispatch, until taken
    last_error: Option<ServiceError>,
    in_flight: usize,
    consumer: Option<Box<dyn ResultConsumer>>,
    events_tx: UnboundedSender<ControllerEvent>,
    events_rx: UnboundedReceiver<ControllerEvent>,
}

impl<S> SearchController<S>
where
    S: SearchService + 'static,
{
    /// Create a controller in the idle state
    #[must_use]
    pub fn new(service: Arc<S>, settings: ControllerSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(settings.debounce);

        Self {
            service,
            settings,
            query: String::new(),
            scope: SearchScope::All,
            searching: false,
            dismissed: false,
            results: Vec::new(),
            cursor: None,
            debouncer,
            dispatch_seq: 0,
            last_dispatched: None,
            last_error: None,
            in_flight: 0,
            consumer: None,
            events_tx,
            events_rx,
        }
    }

    /// Register the selection consumer
    #[must_use]
    pub fn with_consumer(mut self, consumer: impl ResultConsumer + 'static) -> Self {
        self.consumer = Some(Box::new(consumer));
        self
    }

    /// Start in the given scope
    #[must_use]
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Replace the selection consumer
    pub fn set_consumer(&mut self, consumer: impl ResultConsumer + 'static) {
        self.consumer = Some(Box::new(consumer));
    }

    /// Remove the selection consumer
    pub fn clear_consumer(&mut self) {
        self.consumer = None;
    }

    /// Handle a change of the input text
    ///
    /// The text is stored immediately. Blank input clears everything
    /// synchronously; anything else (re)starts the debounce timer.
    pub fn on_input_change(&mut self, raw: impl Into<String>) {
        self.query = raw.into();
        self.dismissed = false;

        if self.query.trim().is_empty() {
            self.debouncer.cancel();
            self.searching = false;
            self.clear_results();
            return;
        }

        let value = self.query.clone();
        self.debouncer
            .schedule(&self.events_tx, |token| ControllerEvent::DebounceElapsed { token, value });
    }

    /// Dispatch a search for `value` in the current scope
    ///
    /// Normally reached through a debounce fire, but may be called directly.
    /// Queries shorter than the minimum length (other than the wildcard)
    /// clear the results instead of reaching the service.
    pub fn perform_search(&mut self, value: &str) {
        if !self.is_dispatchable(value) {
            debug!(query = %value, "Query below minimum length, not dispatching");
            self.searching = false;
            self.clear_results();
            return;
        }

        self.searching = true;
        self.dismissed = false;
        self.dispatch_seq += 1;
        self.in_flight += 1;
        self.last_dispatched = Some(value.to_string());
        self.last_error = None;

        let seq = self.dispatch_seq;
        let scope = self.scope;
        let query = value.to_string();
        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();

        debug!(query = %query, scope = %scope, seq, "Dispatching search");
        tokio::spawn(async move {
            let call = {
                let query = query.clone();
                tokio::spawn(async move { service.search(&query, SearchOptions::new(scope)).await })
            };
            // A panicked call still reports back
            let outcome = call
                .await
                .unwrap_or_else(|err| Err(ServiceError::Backend(format!("search task failed: {err}"))));
            let _ = tx.send(ControllerEvent::SearchFinished {
                seq,
                query,
                scope,
                outcome,
            });
        });
    }

    /// Change the result-type filter
    ///
    /// Clears results and closes the dropdown; the last query is not re-run.
    /// An outstanding debounce timer is left alone and will search in the new
    /// scope when it fires.
    pub fn on_scope_change(&mut self, scope: SearchScope) {
        debug!(from = %self.scope, to = %scope, "Scope changed");
        self.scope = scope;
        self.searching = false;
        self.dismissed = false;
        self.clear_results();
    }

    /// Handle a navigation key
    ///
    /// Only active while the dropdown is open with at least one result.
    pub fn on_key_down(&mut self, key: NavKey) -> KeyOutcome {
        if !self.searching || self.results.is_empty() {
            return KeyOutcome::Ignored;
        }

        let len = self.results.len();
        match key {
            NavKey::ArrowDown => {
                self.cursor = Some(self.cursor.map_or(0, |i| (i + 1) % len));
            }
            NavKey::ArrowUp => {
                self.cursor = Some(self.cursor.map_or(len - 1, |i| (i + len - 1) % len));
            }
            NavKey::Enter => {
                if let Some(item) = self.cursor.and_then(|i| self.results.get(i)).cloned() {
                    self.select_result(item);
                }
            }
            NavKey::Escape => {
                self.searching = false;
                self.dismissed = true;
                self.cursor = None;
            }
        }

        KeyOutcome::Handled
    }

    /// Hand `item` to the consumer and reset to the initial state
    pub fn select_result(&mut self, item: ResultItem) {
        info!(id = %item.id, kind = %item.kind, "Result selected");
        if let Some(consumer) = self.consumer.as_mut() {
            consumer.on_select(&item);
        }

        self.debouncer.cancel();
        self.searching = false;
        self.dismissed = false;
        self.query.clear();
        self.clear_results();
    }

    /// Select the result at `index` (e.g. a click)
    ///
    /// Returns `false` if there is no such result.
    pub fn select_at(&mut self, index: usize) -> bool {
        match self.results.get(index).cloned() {
            Some(item) => {
                self.select_result(item);
                true
            }
            None => false,
        }
    }

    /// Move the cursor to `index` (e.g. the pointer entering a row)
    ///
    /// Out-of-range indices are ignored.
    pub fn hover(&mut self, index: usize) {
        if index < self.results.len() {
            self.cursor = Some(index);
        }
    }

    /// A pointer-down landed outside the component
    ///
    /// Hides the dropdown; the query text and results are kept.
    pub fn on_outside_interaction(&mut self) {
        if self.searching {
            self.dismissed = true;
        }
        self.searching = false;
        self.cursor = None;
    }

    /// Tear down: cancel the timer and forget everything
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.searching = false;
        self.dismissed = false;
        self.query.clear();
        self.clear_results();
    }

    /// Apply the next timer or service event
    ///
    /// Waits if work is outstanding; returns `false` immediately when there
    /// is nothing left to wait for.
    pub async fn process_next(&mut self) -> bool {
        let event = match self.events_rx.try_recv() {
            Ok(event) => event,
            Err(_) if !self.has_outstanding_work() => return false,
            Err(_) => match self.events_rx.recv().await {
                Some(event) => event,
                None => return false,
            },
        };

        self.apply(event);
        true
    }

    /// Apply every event already queued, without waiting
    ///
    /// Returns the number of events applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Apply events until no timer or request is outstanding
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    fn apply(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::DebounceElapsed { token, value } => {
                if self.debouncer.accept(token) {
                    self.perform_search(&value);
                } else {
                    debug!("Discarding superseded debounce fire");
                }
            }
            ControllerEvent::SearchFinished {
                seq,
                query,
                scope,
                outcome,
            } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                if seq != self.dispatch_seq {
                    debug!(query = %query, seq, latest = self.dispatch_seq, "Discarding stale search response");
                    return;
                }

                match outcome {
                    Ok(results) => {
                        debug!(query = %query, scope = %scope, count = results.len(), "Search completed");
                        self.cursor = if results.is_empty() { None } else { Some(0) };
                        self.results = results;
                    }
                    Err(err) => {
                        error!(error = %err, query = %query, scope = %scope, "Search failed");
                        self.results.clear();
                        self.cursor = None;
                        self.last_error = Some(err);
                        if self.settings.close_on_error {
                            self.searching = false;
                        }
                    }
                }
            }
        }
    }

    /// Empty the result list and invalidate any in-flight response
    fn clear_results(&mut self) {
        self.results.clear();
        self.cursor = None;
        self.dispatch_seq += 1;
        self.last_dispatched = None;
        self.last_error = None;
    }

    /// Whether `value` is long enough to reach the service
    fn is_dispatchable(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed == self.settings.wildcard || trimmed.chars().count() >= self.settings.min_query_len
    }

    /// Take the failure of the latest search, if it failed
    ///
    /// Each failure is handed out once; a new dispatch or a clear drops it.
    pub fn take_error(&mut self) -> Option<ServiceError> {
        self.last_error.take()
    }

    /// Current input text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current scope
    #[must_use]
    pub const fn scope(&self) -> SearchScope {
        self.scope
    }

    /// Current results, in service order
    #[must_use]
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Highlighted result index
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Highlighted result
    #[must_use]
    pub fn highlighted(&self) -> Option<&ResultItem> {
        self.cursor.and_then(|i| self.results.get(i))
    }

    /// Whether the dropdown is open
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    /// Settings in effect
    #[must_use]
    pub const fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> SearchPhase {
        if self.debouncer.is_pending() {
            SearchPhase::Debouncing
        } else if self.searching {
            SearchPhase::Searching
        } else if self.dismissed {
            SearchPhase::Dismissed
        } else {
            SearchPhase::Idle
        }
    }

    /// When the outstanding debounce timer fires
    #[must_use]
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debouncer.pending().map(|p| p.deadline())
    }

    /// Whether a timer or request is outstanding
    #[must_use]
    pub const fn has_outstanding_work(&self) -> bool {
        self.debouncer.is_pending() || self.in_flight > 0
    }

    /// Results with group headers, for rendering
    #[must_use]
    pub fn render_rows(&self) -> Vec<RenderRow<'_>> {
        group_by_kind(&self.results)
    }

    /// Text the empty-dropdown placeholder describes
    ///
    /// The last dispatched value, unless newer input is still waiting on
    /// the timer.
    fn placeholder_text(&self) -> &str {
        match &self.last_dispatched {
            Some(value) if !self.debouncer.is_pending() => value,
            _ => &self.query,
        }
    }

    /// What the dropdown should show
    #[must_use]
    pub fn dropdown(&self) -> Dropdown<'_> {
        if !self.searching {
            Dropdown::Hidden
        } else if !self.results.is_empty() {
            Dropdown::Results(self.render_rows())
        } else if self.is_dispatchable(self.placeholder_text()) {
            Dropdown::NoResults
        } else {
            Dropdown::TooShort {
                min_len: self.settings.min_query_len,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ResultKind;
    use crate::search::mock::MockSearchService;

    fn patients() -> Vec<ResultItem> {
        vec![
            ResultItem::new("1", ResultKind::Patient, "Jane Doe"),
            ResultItem::new("2", ResultKind::Patient, "John Doe"),
            ResultItem::new("3", ResultKind::Encounter, "ED visit"),
        ]
    }

    fn controller(mock: MockSearchService) -> (SearchController<MockSearchService>, Arc<MockSearchService>) {
        let mock = Arc::new(mock);
        (SearchController::new(Arc::clone(&mock), ControllerSettings::default()), mock)
    }

    /// Dispatch directly and wait for the response
    async fn searched(items: Vec<ResultItem>) -> SearchController<MockSearchService> {
        let (mut c, _) = controller(MockSearchService::returning(items));
        c.perform_search("doe");
        c.settle().await;
        c
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state() {
        let (c, _) = controller(MockSearchService::default());
        assert_eq!(c.query(), "");
        assert_eq!(c.cursor(), None);
        assert_eq!(c.phase(), SearchPhase::Idle);
        assert_eq!(c.scope(), SearchScope::All);
        assert!(!c.has_outstanding_work());
        assert_eq!(c.dropdown(), Dropdown::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_is_stored_without_debounce() {
        let (mut c, mock) = controller(MockSearchService::default());
        c.on_input_change("jan");
        assert_eq!(c.query(), "jan");
        assert_eq!(c.phase(), SearchPhase::Debouncing);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_clears_synchronously() {
        let (mut c, mock) = controller(MockSearchService::returning(patients()));
        c.perform_search("doe");
        c.settle().await;
        assert_eq!(c.results().len(), 3);

        c.on_input_change("abc");
        c.on_input_change("   ");
        assert!(c.results().is_empty());
        assert_eq!(c.cursor(), None);
        assert!(!c.is_searching());
        assert_eq!(c.phase(), SearchPhase::Idle);

        // The cancelled timer never reaches the service
        c.settle().await;
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_too_short_does_not_call_service() {
        let (mut c, mock) = controller(MockSearchService::returning(patients()));
        c.perform_search(" ab ");
        c.settle().await;

        assert_eq!(mock.call_count(), 0);
        assert!(!c.is_searching());
        assert!(c.results().is_empty());
        assert_eq!(c.cursor(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wildcard_bypasses_minimum() {
        let (mut c, mock) = controller(MockSearchService::returning(patients()));
        c.perform_search("*");
        c.settle().await;

        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].query, "*");
        assert_eq!(c.results().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_sets_cursor_to_first() {
        let c = searched(patients()).await;
        assert_eq!(c.cursor(), Some(0));
        assert_eq!(c.phase(), SearchPhase::Searching);

        let c = searched(Vec::new()).await;
        assert_eq!(c.cursor(), None);
        assert_eq!(c.dropdown(), Dropdown::NoResults);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_dropdown_open_by_default() {
        let (mut c, _) = controller(MockSearchService::failing(ServiceError::Unavailable(
            "offline".to_string(),
        )));
        c.perform_search("jane");
        c.settle().await;

        assert!(c.results().is_empty());
        assert_eq!(c.cursor(), None);
        assert!(c.is_searching());
        assert_eq!(c.dropdown(), Dropdown::NoResults);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_closes_dropdown_when_configured() {
        let mock = Arc::new(MockSearchService::failing(ServiceError::Backend("500".to_string())));
        let settings = ControllerSettings {
            close_on_error: true,
            ..ControllerSettings::default()
        };
        let mut c = SearchController::new(mock, settings);
        c.perform_search("jane");
        c.settle().await;

        assert!(!c.is_searching());
        assert_eq!(c.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_arrow_navigation_wraps() {
        let mut c = searched(patients()).await;

        assert_eq!(c.on_key_down(NavKey::ArrowUp), KeyOutcome::Handled);
        assert_eq!(c.cursor(), Some(2));
        c.on_key_down(NavKey::ArrowDown);
        assert_eq!(c.cursor(), Some(0));
        c.on_key_down(NavKey::ArrowDown);
        c.on_key_down(NavKey::ArrowDown);
        assert_eq!(c.cursor(), Some(2));
        c.on_key_down(NavKey::ArrowDown);
        assert_eq!(c.cursor(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_ignored_when_closed_or_empty() {
        let (mut c, _) = controller(MockSearchService::default());
        for key in [NavKey::ArrowDown, NavKey::ArrowUp, NavKey::Enter, NavKey::Escape] {
            assert_eq!(c.on_key_down(key), KeyOutcome::Ignored);
            assert!(!c.on_key_down(key).prevents_default());
        }
        assert_eq!(c.cursor(), None);

        let mut c = searched(Vec::new()).await;
        assert!(c.is_searching());
        assert_eq!(c.on_key_down(NavKey::ArrowDown), KeyOutcome::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_hides_but_keeps_results() {
        let mut c = searched(patients()).await;
        c.on_input_change("doe");
        c.debouncer.cancel();

        assert_eq!(c.on_key_down(NavKey::Escape), KeyOutcome::Handled);
        assert!(!c.is_searching());
        assert_eq!(c.cursor(), None);
        assert_eq!(c.results().len(), 3);
        assert_eq!(c.query(), "doe");
        assert_eq!(c.phase(), SearchPhase::Dismissed);
        assert_eq!(c.dropdown(), Dropdown::Hidden);

        // Hidden dropdown swallows no keys
        assert_eq!(c.on_key_down(NavKey::ArrowDown), KeyOutcome::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_selects_and_resets() {
        let picked = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&picked);
        let mut c = searched(patients())
            .await
            .with_consumer(move |item: &ResultItem| sink.lock().unwrap().push(item.clone()));
        c.on_key_down(NavKey::ArrowDown);

        assert_eq!(c.on_key_down(NavKey::Enter), KeyOutcome::Handled);
        assert_eq!(picked.lock().unwrap().as_slice(), &patients()[1..2]);
        assert_eq!(c.query(), "");
        assert!(c.results().is_empty());
        assert_eq!(c.cursor(), None);
        assert_eq!(c.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_without_consumer() {
        let mut c = searched(patients()).await;
        assert!(c.select_at(2));
        assert!(c.results().is_empty());
        assert!(!c.select_at(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_moves_cursor_within_bounds() {
        let mut c = searched(patients()).await;
        c.hover(2);
        assert_eq!(c.highlighted().map(|i| i.id.as_str()), Some("3"));
        c.hover(7);
        assert_eq!(c.cursor(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_outside_interaction_keeps_text_and_results() {
        let mut c = searched(patients()).await;
        c.query = "doe".to_string();

        c.on_outside_interaction();
        assert!(!c.is_searching());
        assert_eq!(c.cursor(), None);
        assert_eq!(c.query(), "doe");
        assert_eq!(c.results().len(), 3);
        assert_eq!(c.phase(), SearchPhase::Dismissed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outside_interaction_while_idle_stays_idle() {
        let (mut c, _) = controller(MockSearchService::default());
        c.on_outside_interaction();
        assert_eq!(c.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scope_change_clears_without_research() {
        let (mut c, mock) = controller(MockSearchService::returning(patients()));
        c.perform_search("doe");
        c.settle().await;

        c.on_scope_change(SearchScope::Only(ResultKind::Patient));
        assert_eq!(c.scope(), SearchScope::Only(ResultKind::Patient));
        assert!(c.results().is_empty());
        assert!(!c.is_searching());
        assert_eq!(c.cursor(), None);

        c.settle().await;
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_timer_uses_scope_at_fire_time() {
        let (mut c, mock) = controller(MockSearchService::returning(patients()));
        c.on_input_change("jane");
        c.on_scope_change(SearchScope::Only(ResultKind::Encounter));
        assert_eq!(c.phase(), SearchPhase::Debouncing);

        c.settle().await;
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].scope, SearchScope::Only(ResultKind::Encounter));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let mock = MockSearchService::returning(patients())
            .with_latency_for("slow", Duration::from_millis(500))
            .with_response_for("fast", Ok(vec![ResultItem::new("9", ResultKind::Document, "Discharge summary")]));
        let (mut c, _) = controller(mock);

        c.perform_search("slow");
        c.perform_search("fast");
        c.settle().await;

        assert_eq!(c.results().len(), 1);
        assert_eq!(c.results()[0].id, "9");
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_selection_is_discarded() {
        let mock = MockSearchService::returning(patients()).with_latency(Duration::from_millis(200));
        let (mut c, _) = controller(mock);
        c.perform_search("doe");
        c.settle().await;

        c.perform_search("john");
        c.select_at(0);
        c.settle().await;
        assert!(c.results().is_empty());
        assert!(!c.is_searching());
    }

    /// Controller with a response for "doe" still 200ms out
    async fn in_flight() -> SearchController<MockSearchService> {
        let mock = MockSearchService::returning(patients()).with_latency(Duration::from_millis(200));
        let (mut c, _) = controller(mock);
        c.on_input_change("doe");
        c.process_next().await;
        assert!(c.has_outstanding_work());
        assert!(c.is_searching());
        c
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_clearing_input_is_discarded() {
        let mut c = in_flight().await;
        c.on_input_change("");
        c.settle().await;

        assert!(c.results().is_empty());
        assert_eq!(c.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_too_short_is_discarded() {
        let mut c = in_flight().await;
        c.perform_search("do");
        c.settle().await;

        assert!(c.results().is_empty());
        assert_eq!(c.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_scope_change_is_discarded() {
        let mut c = in_flight().await;
        c.on_scope_change(SearchScope::Only(ResultKind::Patient));
        c.settle().await;

        assert!(c.results().is_empty());
        assert_eq!(c.cursor(), None);
        assert_eq!(c.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_shutdown_is_discarded() {
        let mut c = in_flight().await;
        c.shutdown();
        c.settle().await;

        assert!(c.results().is_empty());
        assert_eq!(c.query(), "");
        assert_eq!(c.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_service_reports_failure() {
        let mock = MockSearchService::returning(patients()).with_panic_for("boom");
        let (mut c, _) = controller(mock);
        c.perform_search("boom");
        c.settle().await;

        assert!(!c.has_outstanding_work());
        assert!(c.results().is_empty());
        assert!(matches!(c.take_error(), Some(ServiceError::Backend(_))));
        assert_eq!(c.dropdown(), Dropdown::NoResults);
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_error_hands_out_failure_once() {
        let mock = MockSearchService::returning(patients())
            .with_response_for("jane", Err(ServiceError::Unavailable("offline".to_string())));
        let (mut c, _) = controller(mock);
        c.perform_search("jane");
        c.settle().await;

        assert_eq!(c.take_error(), Some(ServiceError::Unavailable("offline".to_string())));
        assert_eq!(c.take_error(), None);

        // A later success leaves nothing to report
        c.perform_search("jane");
        c.perform_search("doe");
        c.settle().await;
        assert_eq!(c.results().len(), 3);
        assert_eq!(c.take_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_placeholder_follows_dispatched_text() {
        let (mut c, _) = controller(MockSearchService::default());
        c.on_input_change("jane");
        c.settle().await;
        assert_eq!(c.dropdown(), Dropdown::NoResults);

        // Shorter text still waiting on the timer gets the hint
        c.on_input_change("ja");
        assert_eq!(c.dropdown(), Dropdown::TooShort { min_len: 3 });

        // Once the timer rejects it, the dropdown closes
        c.settle().await;
        assert_eq!(c.dropdown(), Dropdown::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_timer() {
        let (mut c, mock) = controller(MockSearchService::returning(patients()));
        c.on_input_change("jane");
        c.shutdown();

        assert!(!c.has_outstanding_work());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(c.process_pending(), 0);
        assert_eq!(mock.call_count(), 0);
        assert_eq!(c.query(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropdown_too_short_message() {
        let (mut c, _) = controller(MockSearchService::default());
        c.searching = true;
        c.query = "ab".to_string();
        assert_eq!(c.dropdown(), Dropdown::TooShort { min_len: 3 });

        c.query = "*".to_string();
        assert_eq!(c.dropdown(), Dropdown::NoResults);
    }
}
