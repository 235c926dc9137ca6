//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions while browsing.
///
/// Keys typed into the search bar are handled as text before bindings are
/// consulted, so these only apply outside the text field (plus the few
/// non-character keys the search bar passes through).
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let mut bindings = HashMap::new();

        // Result list
        bindings.insert(plain(KeyCode::Char('j')), KeyAction::SelectNext);
        bindings.insert(plain(KeyCode::Down), KeyAction::SelectNext);
        bindings.insert(plain(KeyCode::Char('k')), KeyAction::SelectPrevious);
        bindings.insert(plain(KeyCode::Up), KeyAction::SelectPrevious);

        // Pagination
        bindings.insert(plain(KeyCode::Char('n')), KeyAction::NextPage);
        bindings.insert(plain(KeyCode::Right), KeyAction::NextPage);
        bindings.insert(plain(KeyCode::PageDown), KeyAction::NextPage);
        bindings.insert(plain(KeyCode::Char('p')), KeyAction::PreviousPage);
        bindings.insert(plain(KeyCode::Left), KeyAction::PreviousPage);
        bindings.insert(plain(KeyCode::PageUp), KeyAction::PreviousPage);

        // Search
        bindings.insert(plain(KeyCode::Char('/')), KeyAction::FocusSearch);
        bindings.insert(plain(KeyCode::Char('i')), KeyAction::FocusSearch);
        bindings.insert(plain(KeyCode::Tab), KeyAction::FocusSearch);
        bindings.insert(plain(KeyCode::Enter), KeyAction::Submit);
        bindings.insert(plain(KeyCode::Char('r')), KeyAction::Reset);

        // Metrics
        bindings.insert(plain(KeyCode::Char('m')), KeyAction::ShowMetrics);
        bindings.insert(plain(KeyCode::Esc), KeyAction::Back);
        bindings.insert(plain(KeyCode::Backspace), KeyAction::Back);

        // Application controls
        bindings.insert(plain(KeyCode::Char('?')), KeyAction::Help);
        bindings.insert(plain(KeyCode::Char('q')), KeyAction::Quit);
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}
