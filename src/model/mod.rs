//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod metrics;
pub mod search;

// Re-export for convenience
pub use error::{AppError, FailureKind, GatewayError};
pub use key_action::KeyAction;
pub use metrics::MetricsSnapshot;
pub use search::{PageWindow, ResultItem, SearchQuery, SearchResponse, DEFAULT_PAGE_SIZE};
