//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod layout;
mod metrics_card;
mod result_card;
mod search_bar;
mod styles;

pub use help::render_help_overlay;
pub use layout::{
    empty_message, pagination_line, render_layout, results_heading, status_line, ViewOptions,
};
pub use metrics_card::{format_count, metric_rows, MetricsCard, HEADLINE_CAPTION};
pub use result_card::{parse_snippet, snippet_line, title_line, ResultList, SnippetSegment};
pub use search_bar::SearchBar;
pub use styles::{ColorConfig, Theme};

use crate::config::{KeyBindings, Settings};
use crate::gateway::{DispatchMode, HttpGateway, RequestDispatcher, Ticket};
use crate::model::AppError;
use crate::state::{self, AppState, ApplyOutcome, KeyOutcome};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How long the event loop waits for input before checking for replies.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// What to do right after the terminal opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupOptions {
    /// Query to type and submit on startup.
    pub query: Option<String>,
    /// Open the metrics view on startup.
    pub metrics: bool,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    dispatcher: RequestDispatcher,
    key_bindings: KeyBindings,
    options: ViewOptions,
    /// Metrics requested on startup, sent once the startup search has answered.
    deferred_metrics: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        dispatcher: RequestDispatcher,
        key_bindings: KeyBindings,
        options: ViewOptions,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            dispatcher,
            key_bindings,
            options,
            deferred_metrics: false,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws on key presses, resizes and
    /// applied replies; an idle loop does not redraw.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let mut dirty = false;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            if self.pump_replies() {
                dirty = true;
            }

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Submit the startup query and/or open metrics.
    ///
    /// With both, the search goes first and metrics follow its reply, so the
    /// results sit behind the metrics view.
    pub fn start(&mut self, startup: &StartupOptions) {
        let query = startup
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        if let Some(query) = query {
            self.app_state.session_mut().set_query(query);
            if let Some(ticket) = self.app_state.session_mut().submit_search() {
                self.app_state.focus_browse();
                self.deferred_metrics = startup.metrics;
                self.dispatch(ticket);
                return;
            }
        }

        if startup.metrics {
            self.app_state.focus_browse();
            let ticket = self.app_state.session_mut().request_metrics();
            self.dispatch(ticket);
        }
    }

    /// Handle keyboard input
    ///
    /// Returns true if app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match state::handle_key(&mut self.app_state, &self.key_bindings, key) {
            KeyOutcome::Quit => {
                info!("quit requested");
                true
            }
            KeyOutcome::Dispatch(ticket) => {
                self.deferred_metrics = false;
                self.dispatch(ticket);
                false
            }
            KeyOutcome::Handled | KeyOutcome::Ignored => false,
        }
    }

    fn dispatch(&self, ticket: Ticket) {
        info!(seq = ticket.seq.get(), request = ?ticket.request, "request issued");
        self.dispatcher.dispatch(ticket);
    }

    /// Apply every reply that has arrived. Returns true if the screen changed.
    fn pump_replies(&mut self) -> bool {
        let mut changed = false;

        for reply in self.dispatcher.drain() {
            let seq = reply.seq.get();
            match self.app_state.session_mut().apply(reply) {
                ApplyOutcome::Applied => changed = true,
                ApplyOutcome::Failed => {
                    if let Some(notice) = self.app_state.session().failure() {
                        warn!(seq, kind = ?notice.kind, error = %notice.error, "request failed");
                    }
                    changed = true;
                }
                ApplyOutcome::Stale => debug!(seq, "discarding stale reply"),
            }
        }

        if changed && self.deferred_metrics && !self.app_state.session().is_loading() {
            self.deferred_metrics = false;
            let ticket = self.app_state.session_mut().request_metrics();
            self.dispatch(ticket);
            changed |= self.pump_replies();
        }

        changed
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let app_state = &self.app_state;
        let options = &self.options;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, app_state, options);
        })?;
        Ok(())
    }
}

// ===== Test Helpers =====
// DO NOT use these in production code.

#[cfg(test)]
#[allow(dead_code)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// Skips terminal initialization. Used by the acceptance test harness.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        dispatcher: RequestDispatcher,
        key_bindings: KeyBindings,
        options: ViewOptions,
    ) -> Self {
        Self {
            terminal,
            app_state,
            dispatcher,
            key_bindings,
            options,
            deferred_metrics: false,
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Apply pending replies (test-only accessor)
    pub(crate) fn pump_replies_test(&mut self) -> bool {
        self.pump_replies()
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Builds the HTTP gateway from `settings`, sets up the terminal, runs the
/// event loop, and restores the terminal on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_app(
    settings: &Settings,
    startup: &StartupOptions,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let gateway = HttpGateway::new(&settings.base_url, settings.request_timeout)
        .map_err(AppError::from)?;
    let dispatcher = RequestDispatcher::new(Arc::new(gateway), DispatchMode::Background);
    let options = ViewOptions {
        show_scores: settings.show_scores,
        tagline: settings.tagline.clone(),
        theme: Theme::with_color_config(colors),
    };

    let mut app = TuiApp::new(
        AppState::new(settings.page_size),
        dispatcher,
        KeyBindings::default(),
        options,
    )?;
    app.start(startup);

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
