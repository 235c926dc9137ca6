//! Acceptance Test Harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend>` over a scripted [`FakeGateway`] so user
//! stories can be driven key by key. Requests run inline; by default their
//! replies are applied right after the key that issued them, as if the
//! service answered instantly.

use crate::config::KeyBindings;
use crate::gateway::fake::FakeGateway;
use crate::gateway::{DispatchMode, RequestDispatcher};
use crate::state::AppState;
use crate::view::{StartupOptions, TuiApp, ViewOptions};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty trailing lines are removed to keep snapshots clean.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    gateway: Arc<FakeGateway>,
    running: bool,
    /// Apply replies after every key. Off to observe loading states.
    deliver_replies: bool,
}

impl AcceptanceTestHarness {
    /// Harness over `gateway` with an 80x24 terminal and 15 results per page.
    pub fn new(gateway: FakeGateway) -> Self {
        Self::with_size(gateway, 80, 24)
    }

    /// Harness with a custom terminal size.
    pub fn with_size(gateway: FakeGateway, width: u16, height: u16) -> Self {
        Self::build(gateway, width, height, ViewOptions::default())
    }

    /// Harness with custom view options.
    pub fn with_options(gateway: FakeGateway, options: ViewOptions) -> Self {
        Self::build(gateway, 80, 24, options)
    }

    fn build(gateway: FakeGateway, width: u16, height: u16, options: ViewOptions) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        let gateway = Arc::new(gateway);
        let dispatcher = RequestDispatcher::new(gateway.clone(), DispatchMode::Inline);
        let page_size = NonZeroUsize::new(15).expect("non-zero");

        let app = TuiApp::new_for_test(
            terminal,
            AppState::new(page_size),
            dispatcher,
            KeyBindings::default(),
            options,
        );

        Self {
            app,
            gateway,
            running: true,
            deliver_replies: true,
        }
    }

    /// Run startup actions as `run_app` would.
    pub fn start(&mut self, startup: StartupOptions) {
        self.app.start(&startup);
        self.settle();
    }

    /// Send a single key event. Returns true if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C). Returns true if the app quit.
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        } else {
            self.settle();
        }
        quit
    }

    /// Send a sequence of keys, stopping early on quit.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text into whatever has focus, one key per character.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Type a query into the search bar and press Enter.
    pub fn search(&mut self, query: &str) {
        self.type_text(query);
        self.send_key(KeyCode::Enter);
    }

    /// Hold replies back until [`Self::deliver`] is called.
    pub fn hold_replies(&mut self) {
        self.deliver_replies = false;
    }

    /// Apply every held reply and go back to delivering after each key.
    pub fn deliver(&mut self) {
        self.deliver_replies = true;
        self.settle();
    }

    fn settle(&mut self) {
        if self.deliver_replies {
            self.app.pump_replies_test();
        }
    }

    /// The scripted gateway, for queuing failures and checking calls.
    pub fn gateway(&self) -> &FakeGateway {
        &self.gateway
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
