//! Scripted in-memory gateway for tests.

use super::{Gateway, SearchRequest};
use crate::model::{GatewayError, MetricsSnapshot, ResultItem, SearchResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Gateway that synthesizes deterministic results.
///
/// Every query matches `default_total` documents unless overridden per query.
/// Failures can be queued and are returned by the next calls in order.
pub(crate) struct FakeGateway {
    default_total: usize,
    totals: HashMap<String, usize>,
    metrics: MetricsSnapshot,
    failures: Mutex<VecDeque<GatewayError>>,
    search_calls: Mutex<Vec<SearchRequest>>,
    metrics_calls: Mutex<usize>,
}

impl FakeGateway {
    /// Every query matches `total` documents.
    pub(crate) fn with_total(total: usize) -> Self {
        Self {
            default_total: total,
            totals: HashMap::new(),
            metrics: sample_metrics(),
            failures: Mutex::new(VecDeque::new()),
            search_calls: Mutex::new(Vec::new()),
            metrics_calls: Mutex::new(0),
        }
    }

    /// Override the match count for one query.
    pub(crate) fn query_total(mut self, query: &str, total: usize) -> Self {
        self.totals.insert(query.to_string(), total);
        self
    }

    /// Make the next gateway call fail with `error`.
    pub(crate) fn fail_next(&self, error: GatewayError) {
        self.failures
            .lock()
            .expect("fake gateway lock")
            .push_back(error);
    }

    /// Every search request received so far.
    pub(crate) fn search_calls(&self) -> Vec<SearchRequest> {
        self.search_calls.lock().expect("fake gateway lock").clone()
    }

    /// Number of metrics calls received so far.
    pub(crate) fn metrics_calls(&self) -> usize {
        *self.metrics_calls.lock().expect("fake gateway lock")
    }

    fn take_failure(&self) -> Option<GatewayError> {
        self.failures.lock().expect("fake gateway lock").pop_front()
    }
}

impl Gateway for FakeGateway {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, GatewayError> {
        self.search_calls
            .lock()
            .expect("fake gateway lock")
            .push(request.clone());
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let query = request.query.as_str();
        let total = self.totals.get(query).copied().unwrap_or(self.default_total);
        let start = request.window.offset().min(total);
        let end = (start + request.window.limit()).min(total);

        Ok(SearchResponse {
            results: page_items(query, start, end - start),
            total_results: total,
        })
    }

    fn fetch_metrics(&self) -> Result<MetricsSnapshot, GatewayError> {
        *self.metrics_calls.lock().expect("fake gateway lock") += 1;
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(self.metrics.clone()),
        }
    }

    fn health(&self) -> Result<(), GatewayError> {
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// `count` synthetic results for `query`, ranked from `offset`.
pub(crate) fn page_items(query: &str, offset: usize, count: usize) -> Vec<ResultItem> {
    (offset..offset + count)
        .map(|rank| ResultItem {
            doc_id: format!("{}-{}", query, rank),
            title: format!("Result {} for {}", rank + 1, query),
            url: format!("https://example.com/{}/{}", query, rank),
            snippet: format!("All about <strong>{}</strong>, entry {}", query, rank + 1),
            score: 1.0 / (rank as f64 + 1.0),
        })
        .collect()
}

/// Metrics returned by every fake gateway.
pub(crate) fn sample_metrics() -> MetricsSnapshot {
    MetricsSnapshot {
        pages_crawled: vec![1_200, 25_800, 26_013],
        queue_size: vec![4_000, 3_512],
        page_errors: 312,
        pages_skipped_for_language: 1_045,
        duplicates_avoided: 2_210,
        number_of_searches: 1_337,
    }
}
