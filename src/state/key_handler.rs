//! Keyboard routing (pure).
//!
//! Turns a key event into a state transition and, when the transition needs
//! data, the ticket the shell should dispatch.

use crate::config::KeyBindings;
use crate::gateway::Ticket;
use crate::model::KeyAction;
use crate::state::{AppState, Focus, PageDirection, QueryEdit, RequestKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the shell should do after a key was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Nothing bound to the key; state unchanged.
    Ignored,
    /// State may have changed; redraw.
    Handled,
    /// State changed and this ticket needs to be executed.
    Dispatch(Ticket),
    /// Exit the application.
    Quit,
}

impl From<Option<Ticket>> for KeyOutcome {
    fn from(ticket: Option<Ticket>) -> Self {
        ticket.map_or(KeyOutcome::Handled, KeyOutcome::Dispatch)
    }
}

/// Route one key event.
///
/// Ctrl+C always quits. While the help overlay is open only closing it and
/// quitting work. With the search bar focused, text keys edit the query and
/// everything else falls through to the bindings.
pub fn handle_key(state: &mut AppState, bindings: &KeyBindings, key: KeyEvent) -> KeyOutcome {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }

    if state.help_visible {
        return handle_help_key(state, bindings, key);
    }

    if state.focus == Focus::Input {
        if let Some(outcome) = handle_input_key(state, key) {
            return outcome;
        }
    }

    match bindings.get(key) {
        Some(action) => handle_action(state, action),
        None => KeyOutcome::Ignored,
    }
}

/// Apply a bound action.
pub fn handle_action(state: &mut AppState, action: KeyAction) -> KeyOutcome {
    match action {
        KeyAction::SelectNext => {
            state.session_mut().select_next_result();
            KeyOutcome::Handled
        }
        KeyAction::SelectPrevious => {
            state.session_mut().select_previous_result();
            KeyOutcome::Handled
        }
        KeyAction::NextPage => state.session_mut().change_page(PageDirection::Next).into(),
        KeyAction::PreviousPage => state
            .session_mut()
            .change_page(PageDirection::Previous)
            .into(),
        KeyAction::FocusSearch => {
            state.focus_input();
            KeyOutcome::Handled
        }
        KeyAction::Submit => state.session_mut().submit_search().into(),
        KeyAction::Reset => {
            state.session_mut().clear_query();
            state.focus_input();
            KeyOutcome::Handled
        }
        KeyAction::ShowMetrics => KeyOutcome::Dispatch(state.session_mut().request_metrics()),
        KeyAction::Back => {
            let session = state.session();
            if session.show_metrics() || session.pending() == Some(RequestKind::Metrics) {
                state.session_mut().dismiss_metrics();
            } else {
                state.focus_input();
            }
            KeyOutcome::Handled
        }
        KeyAction::Help => {
            state.toggle_help();
            KeyOutcome::Handled
        }
        KeyAction::Quit => KeyOutcome::Quit,
    }
}

fn handle_help_key(state: &mut AppState, bindings: &KeyBindings, key: KeyEvent) -> KeyOutcome {
    if key.code == KeyCode::Esc {
        state.help_visible = false;
        return KeyOutcome::Handled;
    }
    match bindings.get(key) {
        Some(KeyAction::Help) => {
            state.help_visible = false;
            KeyOutcome::Handled
        }
        Some(KeyAction::Quit) => KeyOutcome::Quit,
        _ => KeyOutcome::Ignored,
    }
}

/// Keys the search bar consumes. `None` lets the key reach the bindings.
fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Option<KeyOutcome> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let edit = match key.code {
        KeyCode::Char('u') if ctrl => QueryEdit::Clear,
        KeyCode::Char('a') if ctrl => QueryEdit::Home,
        KeyCode::Char('e') if ctrl => QueryEdit::End,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(ch) => QueryEdit::Insert(ch),
        KeyCode::Backspace => QueryEdit::Backspace,
        KeyCode::Delete => QueryEdit::Delete,
        KeyCode::Left => QueryEdit::Left,
        KeyCode::Right => QueryEdit::Right,
        KeyCode::Home => QueryEdit::Home,
        KeyCode::End => QueryEdit::End,
        KeyCode::Enter => {
            let ticket = state.session_mut().submit_search();
            if ticket.is_some() {
                state.focus_browse();
            }
            return Some(ticket.into());
        }
        KeyCode::Esc | KeyCode::Tab => {
            state.focus_browse();
            return Some(KeyOutcome::Handled);
        }
        _ => return None,
    };

    state.session_mut().edit_query(edit);
    Some(KeyOutcome::Handled)
}

#[cfg(test)]
#[path = "key_handler_tests.rs"]
mod tests;
