//! OpenSearch query (osq)
//!
//! Terminal front end for the OpenSearch web search service: type a query,
//! page through ranked results, and look at the crawler's metrics.
//!
//! Pure core (`model`, `state`) with an impure shell (`gateway`, `view`).

pub mod config;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
