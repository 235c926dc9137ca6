//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests driving the full app over a scripted
//! gateway.

mod acceptance_metrics;
