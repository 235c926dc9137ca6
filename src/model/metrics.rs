//! Crawler/index pipeline metrics as reported by the service.

use serde::{Deserialize, Serialize};

use super::error::GatewayError;

/// Snapshot of crawler and search counters.
///
/// `pages_crawled` and `queue_size` are time series sampled by the crawler;
/// only their latest sample is ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Cumulative pages crawled, one sample per interval.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pages_crawled: Vec<u64>,
    /// Frontier queue length, one sample per interval.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub queue_size: Vec<u64>,
    /// Pages skipped because fetching or parsing failed.
    #[serde(default, rename = "page_errs")]
    pub page_errors: u64,
    /// Pages skipped because they were not in a supported language.
    #[serde(default, rename = "pages_skipped_lang")]
    pub pages_skipped_for_language: u64,
    /// Duplicate pages the crawler declined to re-index.
    #[serde(default)]
    pub duplicates_avoided: u64,
    /// Searches served so far.
    #[serde(default)]
    pub number_of_searches: u64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<u64>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wire shape of `GET /metrics`.
#[derive(Debug, Deserialize)]
struct MetricsBody {
    metrics: MetricsSnapshot,
}

impl MetricsSnapshot {
    /// Latest pages-crawled sample, 0 if none yet.
    pub fn latest_pages_crawled(&self) -> u64 {
        self.pages_crawled.last().copied().unwrap_or(0)
    }

    /// Latest queue-size sample, 0 if none yet.
    pub fn latest_queue_size(&self) -> u64 {
        self.queue_size.last().copied().unwrap_or(0)
    }

    /// Decode a `GET /metrics` body.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Malformed` if the `metrics` object is missing or mistyped.
    pub fn from_json(body: &str) -> Result<Self, GatewayError> {
        serde_json::from_str::<MetricsBody>(body)
            .map(|wire| wire.metrics)
            .map_err(|e| GatewayError::Malformed(format!("metrics response: {}", e)))
    }
}
