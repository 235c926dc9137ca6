//! Search domain types: queries, page windows, and the search response payload.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use super::error::GatewayError;

/// Number of results requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 15;

// ===== SearchQuery =====

/// Validated search query. Never empty or whitespace-only.
///
/// The remote service's behavior for an empty term is undefined, so a request
/// can only be built from a `SearchQuery`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Smart constructor: returns `None` if the text is empty or whitespace-only.
    ///
    /// The text is kept as typed; the service does its own tokenizing.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.trim().is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// The query text as typed.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== PageWindow =====

/// The `(offset, limit)` pair defining the requested result slice.
///
/// `limit` is fixed for a session. `offset` moves in steps of `limit` but is
/// not forced onto a multiple of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: usize,
    limit: NonZeroUsize,
}

impl PageWindow {
    /// First page for the given page size.
    pub fn first(limit: NonZeroUsize) -> Self {
        Self { offset: 0, limit }
    }

    /// Window at an explicit offset.
    pub fn at(offset: usize, limit: NonZeroUsize) -> Self {
        Self { offset, limit }
    }

    /// Index of the first requested result.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Page size.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Window one page further on, if it would still start before `total`.
    pub fn next(&self, total: usize) -> Option<Self> {
        let offset = self.offset.checked_add(self.limit())?;
        (offset < total).then_some(Self { offset, ..*self })
    }

    /// Window one page back, if the current offset is past the start.
    ///
    /// Clamps at zero when the offset is not a multiple of the limit.
    pub fn previous(&self) -> Option<Self> {
        (self.offset > 0).then(|| Self {
            offset: self.offset.saturating_sub(self.limit()),
            ..*self
        })
    }

    /// 1-based page number of this window.
    pub fn page_number(&self) -> usize {
        self.offset / self.limit() + 1
    }

    /// Number of pages needed for `total` results (at least 1).
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.limit()).max(1)
    }
}

// ===== ResultItem =====

/// One ranked search hit, exactly as the service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Stable identity of the document.
    pub doc_id: String,
    /// Page title. May be empty.
    #[serde(default)]
    pub title: String,
    /// Address of the page.
    #[serde(default)]
    pub url: String,
    /// Excerpt around the first matching term, may contain `<strong>` markup.
    #[serde(default)]
    pub snippet: String,
    /// Ranking score. Opaque to the client; never re-sorted on.
    #[serde(default)]
    pub score: f64,
}

impl ResultItem {
    /// Text to use as the heading: the title, or the URL when the title is blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

// ===== SearchResponse =====

/// One page of results plus the total match count for the query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    /// Results in server rank order.
    pub results: Vec<ResultItem>,
    /// Total number of matching documents across all pages.
    pub total_results: usize,
}

/// Wire shape of `GET /search`.
#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(default)]
    results: Option<Vec<ResultItem>>,
    #[serde(rename = "totalResults")]
    total_results: usize,
}

impl SearchResponse {
    /// Decode a `GET /search` body.
    ///
    /// A `null` or missing `results` array decodes as an empty page.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Malformed` if the body is not the expected shape.
    pub fn from_json(body: &str) -> Result<Self, GatewayError> {
        let wire: SearchResponseBody = serde_json::from_str(body)
            .map_err(|e| GatewayError::Malformed(format!("search response: {}", e)))?;

        Ok(Self {
            results: wire.results.unwrap_or_default(),
            total_results: wire.total_results,
        })
    }
}
