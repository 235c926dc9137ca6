//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI or network.

pub mod app_state;
pub mod key_handler;
pub mod query_input;
pub mod session;

pub use app_state::{AppState, Focus};
pub use key_handler::{handle_action, handle_key, KeyOutcome};
pub use query_input::{QueryEdit, QueryInput};
pub use session::{
    ApplyOutcome, EmptyPage, FailureNotice, MetricsScreen, PageDirection, Pagination,
    RequestKind, ResultPage, Screen, SearchScreen, SearchSession, ViewMode,
};
