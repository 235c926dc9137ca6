//! Search session controller (pure).
//!
//! `SearchSession` owns the query text, the requested page window, the screen
//! being shown, and the bookkeeping for in-flight requests. It never talks to
//! the network: operations that need data return a [`Ticket`], and the data
//! comes back through [`SearchSession::apply`].
//!
//! # State Machine
//!
//! The visible state is a single [`Screen`]:
//!
//! - `Idle` - nothing searched yet (or the query was cleared)
//! - `Search(Results)` - the last search matched at least one document
//! - `Search(Empty)` - the last search matched nothing
//! - `Metrics` - crawler metrics, holding the search screen it covers
//!
//! # Ordering
//!
//! Only the most recently issued request may change the screen. Replies carry
//! the sequence number of their ticket; a reply for anything other than the
//! request currently in flight is stale and dropped, whatever order the
//! network delivers them in.

use crate::gateway::{Outcome, Reply, Request, RequestSeq, SearchRequest, Ticket};
use crate::model::{GatewayError, MetricsSnapshot, PageWindow, ResultItem, SearchQuery, SearchResponse};
use crate::state::query_input::{QueryEdit, QueryInput};
use std::num::NonZeroUsize;

// ===== ViewMode =====

/// Which renderer the current screen selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Entry affordances: search bar, metrics button, tagline.
    Idle,
    /// Result cards plus pagination.
    Results,
    /// The empty-state message.
    Empty,
    /// The metrics card.
    Metrics,
}

// ===== ResultPage =====

/// A displayed page of results. Only built when the query matched something.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    query: SearchQuery,
    window: PageWindow,
    results: Vec<ResultItem>,
    total_results: usize,
    selected: usize,
}

impl ResultPage {
    /// The query these results were fetched for.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// The window these results were fetched for.
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Results in server rank order.
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Total matches for the query across all pages.
    pub fn total_results(&self) -> usize {
        self.total_results
    }

    /// Index of the highlighted result on this page.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The highlighted result, if the page has any.
    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.results.get(self.selected)
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// A search that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPage {
    query: SearchQuery,
    window: PageWindow,
}

impl EmptyPage {
    /// The query that matched nothing.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

// ===== Screens =====

/// Outcome of the last successful search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchScreen {
    /// At least one document matched.
    Results(ResultPage),
    /// No document matched.
    Empty(EmptyPage),
}

impl SearchScreen {
    /// Build the screen for a search response. `total_results == 0` means `Empty`.
    fn from_response(request: SearchRequest, response: SearchResponse) -> Self {
        if response.total_results == 0 {
            SearchScreen::Empty(EmptyPage {
                query: request.query,
                window: request.window,
            })
        } else {
            SearchScreen::Results(ResultPage {
                query: request.query,
                window: request.window,
                results: response.results,
                total_results: response.total_results,
                selected: 0,
            })
        }
    }

    /// The query this screen answers.
    pub fn query(&self) -> &SearchQuery {
        match self {
            SearchScreen::Results(page) => page.query(),
            SearchScreen::Empty(empty) => empty.query(),
        }
    }

    fn window(&self) -> PageWindow {
        match self {
            SearchScreen::Results(page) => page.window,
            SearchScreen::Empty(empty) => empty.window,
        }
    }

    fn results(&self) -> &[ResultItem] {
        match self {
            SearchScreen::Results(page) => page.results(),
            SearchScreen::Empty(_) => &[],
        }
    }

    fn total_results(&self) -> usize {
        match self {
            SearchScreen::Results(page) => page.total_results(),
            SearchScreen::Empty(_) => 0,
        }
    }
}

/// Crawler metrics covering whatever search screen was showing.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsScreen {
    snapshot: MetricsSnapshot,
    behind: Option<SearchScreen>,
}

impl MetricsScreen {
    /// The snapshot being shown.
    pub fn snapshot(&self) -> &MetricsSnapshot {
        &self.snapshot
    }

    /// The search screen restored when the metrics view is dismissed.
    pub fn behind(&self) -> Option<&SearchScreen> {
        self.behind.as_ref()
    }
}

/// What the session is showing. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    /// Start screen.
    #[default]
    Idle,
    /// Results or the empty-state message.
    Search(SearchScreen),
    /// Metrics card.
    Metrics(MetricsScreen),
}

impl Screen {
    /// Renderer selected by this screen.
    pub fn view_mode(&self) -> ViewMode {
        match self {
            Screen::Idle => ViewMode::Idle,
            Screen::Search(SearchScreen::Results(_)) => ViewMode::Results,
            Screen::Search(SearchScreen::Empty(_)) => ViewMode::Empty,
            Screen::Metrics(_) => ViewMode::Metrics,
        }
    }

    /// The search screen held by this screen, shown or covered by metrics.
    fn search(&self) -> Option<&SearchScreen> {
        match self {
            Screen::Idle => None,
            Screen::Search(search) => Some(search),
            Screen::Metrics(metrics) => metrics.behind.as_ref(),
        }
    }
}

// ===== Pagination =====

/// Direction of a page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// One page further on.
    Next,
    /// One page back.
    Previous,
}

/// Enabled state of the pagination controls for the displayed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Whether "Previous" is enabled.
    pub previous_enabled: bool,
    /// Whether "Next" is enabled.
    pub next_enabled: bool,
    /// 1-based number of the displayed page.
    pub page: usize,
    /// Number of pages for the displayed query.
    pub page_count: usize,
}

// ===== Requests =====

/// Kind of gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// A search call.
    Search,
    /// A metrics call.
    Metrics,
}

/// Non-blocking notice that the last request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    /// Which call failed.
    pub kind: RequestKind,
    /// Why it failed.
    pub error: GatewayError,
}

/// What `apply` did with a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The reply updated the screen.
    Applied,
    /// The reply was a failure; the screen was kept and a notice raised.
    Failed,
    /// The reply answered a superseded or cancelled request and was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    seq: RequestSeq,
    request: Request,
}

// ===== SearchSession =====

/// The search session controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    /// Query text being edited.
    input: QueryInput,
    /// Results per page, fixed for the session.
    page_size: NonZeroUsize,
    /// Window the next search will request.
    window: PageWindow,
    /// What is being shown.
    screen: Screen,
    /// Last metrics snapshot fetched, kept until the next fetch.
    metrics: Option<MetricsSnapshot>,
    /// The only request whose reply may still be applied.
    in_flight: Option<InFlight>,
    /// Set by a failed reply, cleared by the next success or a reset.
    failure: Option<FailureNotice>,
    /// Sequence number of the last ticket issued.
    last_seq: u64,
}

impl SearchSession {
    /// Fresh session on the idle screen.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            input: QueryInput::default(),
            page_size,
            window: PageWindow::first(page_size),
            screen: Screen::Idle,
            metrics: None,
            in_flight: None,
            failure: None,
            last_seq: 0,
        }
    }

    // ----- Query text -----

    /// Current query text.
    pub fn query(&self) -> &str {
        self.input.text()
    }

    /// Query text with its cursor.
    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    /// Edit the query text.
    ///
    /// An edit that turns a non-empty query into the empty string clears the
    /// session, exactly like [`SearchSession::clear_query`].
    pub fn edit_query(&mut self, edit: QueryEdit) {
        let was_empty = self.input.is_empty();
        self.input.apply(edit);
        if !was_empty && self.input.is_empty() {
            self.clear_query();
        }
    }

    /// Replace the query text, cursor at the end. Same clearing rule as `edit_query`.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let was_empty = self.input.is_empty();
        self.input = QueryInput::with_text(text);
        if !was_empty && self.input.is_empty() {
            self.clear_query();
        }
    }

    // ----- Operations -----

    /// Search for the current query at the current window.
    ///
    /// The offset is kept as is, so re-submitting stays on the same page. An
    /// empty or whitespace-only query issues nothing and returns to idle.
    pub fn submit_search(&mut self) -> Option<Ticket> {
        match SearchQuery::new(self.input.text()) {
            Some(query) => Some(self.issue(Request::Search(SearchRequest {
                query,
                window: self.window,
            }))),
            None => {
                self.clear_query();
                None
            }
        }
    }

    /// Move one page in `direction` and search again.
    ///
    /// Returns `None` without changing anything unless a results page is
    /// displayed and the move stays in bounds: `offset > 0` for previous,
    /// `offset + limit < total_results` for next.
    pub fn change_page(&mut self, direction: PageDirection) -> Option<Ticket> {
        let Screen::Search(SearchScreen::Results(page)) = &self.screen else {
            return None;
        };

        let target = match direction {
            PageDirection::Next => self.window.next(page.total_results())?,
            PageDirection::Previous => self.window.previous()?,
        };

        self.window = target;
        self.submit_search()
    }

    /// Reset to the idle screen: empty query, offset 0, no results, no metrics view.
    ///
    /// Any in-flight request is abandoned. The metrics cache is kept. Idempotent.
    pub fn clear_query(&mut self) {
        self.input.apply(QueryEdit::Clear);
        self.window = PageWindow::first(self.page_size);
        self.screen = Screen::Idle;
        self.in_flight = None;
        self.failure = None;
    }

    /// Fetch crawler metrics to show in place of the current screen.
    ///
    /// A search still in flight is abandoned and its page move undone.
    pub fn request_metrics(&mut self) -> Ticket {
        if matches!(
            self.in_flight,
            Some(InFlight {
                request: Request::Search(_),
                ..
            })
        ) {
            self.window = self.displayed_window();
        }
        self.issue(Request::Metrics)
    }

    /// Leave the metrics view, restoring the screen it covered without a fetch.
    ///
    /// Also abandons a metrics request still in flight. The snapshot stays cached.
    pub fn dismiss_metrics(&mut self) {
        if matches!(self.screen, Screen::Metrics(_)) {
            if let Screen::Metrics(metrics) = std::mem::take(&mut self.screen) {
                self.screen = metrics.behind.map(Screen::Search).unwrap_or_default();
            }
        }

        if matches!(
            self.in_flight,
            Some(InFlight {
                request: Request::Metrics,
                ..
            })
        ) {
            self.in_flight = None;
        }
    }

    /// Apply a gateway reply.
    ///
    /// Only the reply to the request currently in flight is applied; anything
    /// else is stale. On failure the screen and displayed page stay as they
    /// were and a [`FailureNotice`] is raised.
    pub fn apply(&mut self, reply: Reply) -> ApplyOutcome {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.seq == reply.seq => in_flight,
            other => {
                self.in_flight = other;
                return ApplyOutcome::Stale;
            }
        };

        match (in_flight.request, reply.outcome) {
            (Request::Search(request), Outcome::Search(Ok(response))) => {
                self.window = request.window;
                self.screen = Screen::Search(SearchScreen::from_response(request, response));
                self.failure = None;
                ApplyOutcome::Applied
            }
            (Request::Search(_), Outcome::Search(Err(error))) => {
                self.window = self.displayed_window();
                self.fail(RequestKind::Search, error)
            }
            (Request::Metrics, Outcome::Metrics(Ok(snapshot))) => {
                let behind = match std::mem::take(&mut self.screen) {
                    Screen::Idle => None,
                    Screen::Search(search) => Some(search),
                    Screen::Metrics(previous) => previous.behind,
                };
                self.metrics = Some(snapshot.clone());
                self.screen = Screen::Metrics(MetricsScreen { snapshot, behind });
                self.failure = None;
                ApplyOutcome::Applied
            }
            (Request::Metrics, Outcome::Metrics(Err(error))) => {
                self.fail(RequestKind::Metrics, error)
            }
            (request, _) => {
                let kind = match request {
                    Request::Search(_) => {
                        self.window = self.displayed_window();
                        RequestKind::Search
                    }
                    Request::Metrics => RequestKind::Metrics,
                };
                self.fail(
                    kind,
                    GatewayError::Malformed("reply does not match its request".to_string()),
                )
            }
        }
    }

    // ----- Result browsing -----

    /// Highlight the next result on the displayed page.
    pub fn select_next_result(&mut self) {
        if let Screen::Search(SearchScreen::Results(page)) = &mut self.screen {
            page.select_next();
        }
    }

    /// Highlight the previous result on the displayed page.
    pub fn select_previous_result(&mut self) {
        if let Screen::Search(SearchScreen::Results(page)) = &mut self.screen {
            page.select_previous();
        }
    }

    // ----- Derived state -----

    /// The screen being shown.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Renderer selected by the current screen.
    pub fn view_mode(&self) -> ViewMode {
        self.screen.view_mode()
    }

    /// Whether a search outcome is held, displayed or covered by metrics.
    pub fn has_searched(&self) -> bool {
        self.screen.search().is_some()
    }

    /// Whether the metrics view is showing.
    pub fn show_metrics(&self) -> bool {
        matches!(self.screen, Screen::Metrics(_))
    }

    /// Results of the held search outcome.
    pub fn results(&self) -> &[ResultItem] {
        self.screen.search().map(SearchScreen::results).unwrap_or(&[])
    }

    /// Total matches of the held search outcome, 0 when none.
    pub fn total_results(&self) -> usize {
        self.screen
            .search()
            .map(SearchScreen::total_results)
            .unwrap_or(0)
    }

    /// Offset the next search will request.
    pub fn offset(&self) -> usize {
        self.window.offset()
    }

    /// Results per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Pagination controls, present only while a results page is displayed.
    pub fn pagination(&self) -> Option<Pagination> {
        let Screen::Search(SearchScreen::Results(page)) = &self.screen else {
            return None;
        };
        Some(Pagination {
            previous_enabled: self.window.previous().is_some(),
            next_enabled: self.window.next(page.total_results()).is_some(),
            page: page.window().page_number(),
            page_count: page.window().page_count(page.total_results()),
        })
    }

    /// Last metrics snapshot fetched, if any.
    pub fn metrics(&self) -> Option<&MetricsSnapshot> {
        self.metrics.as_ref()
    }

    /// Kind of request in flight, if any.
    pub fn pending(&self) -> Option<RequestKind> {
        self.in_flight.as_ref().map(|in_flight| match in_flight.request {
            Request::Search(_) => RequestKind::Search,
            Request::Metrics => RequestKind::Metrics,
        })
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the last completed request failed.
    pub fn request_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Details of the last failure, if the notice is still raised.
    pub fn failure(&self) -> Option<&FailureNotice> {
        self.failure.as_ref()
    }

    // ----- Internals -----

    fn issue(&mut self, request: Request) -> Ticket {
        self.last_seq += 1;
        let seq = RequestSeq::new(self.last_seq);
        self.in_flight = Some(InFlight {
            seq,
            request: request.clone(),
        });
        Ticket { seq, request }
    }

    fn fail(&mut self, kind: RequestKind, error: GatewayError) -> ApplyOutcome {
        self.failure = Some(FailureNotice { kind, error });
        ApplyOutcome::Failed
    }

    /// Window of the displayed (or covered) search outcome, or the first page.
    fn displayed_window(&self) -> PageWindow {
        self.screen
            .search()
            .map(SearchScreen::window)
            .unwrap_or_else(|| PageWindow::first(self.page_size))
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
