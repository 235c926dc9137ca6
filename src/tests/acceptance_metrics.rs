//! Acceptance tests: the crawler metrics view.

use crate::gateway::fake::FakeGateway;
use crate::state::{Focus, ViewMode};
use crate::test_harness::AcceptanceTestHarness;
use crate::view::StartupOptions;
use crossterm::event::KeyCode;

#[test]
fn m_from_start_screen_opens_metrics() {
    let mut harness = AcceptanceTestHarness::new(FakeGateway::with_total(42));
    harness.send_key(KeyCode::Esc);

    harness.send_key(KeyCode::Char('m'));

    assert_eq!(harness.state().session().view_mode(), ViewMode::Metrics);
    assert_eq!(harness.gateway().metrics_calls(), 1);

    let screen = harness.render_to_string();
    assert!(screen.contains("Crawler metrics"));
    assert!(screen.contains("1,337"));
    assert!(screen.contains("searches made on OpenSearch"));
    assert!(screen.contains("26,013"), "latest pages crawled sample");
    assert!(screen.contains("3,512"), "latest queue size sample");
}

#[test]
fn metrics_hide_results_and_esc_restores_them_without_refetch() {
    let mut harness = AcceptanceTestHarness::new(FakeGateway::with_total(42));
    harness.search("cats");
    harness.send_key(KeyCode::Char('n'));

    harness.send_key(KeyCode::Char('m'));
    let screen = harness.render_to_string();
    assert!(!screen.contains("Showing 42 results"));
    assert!(!screen.contains("Page 2 of 3"));

    harness.send_key(KeyCode::Esc);

    assert_eq!(harness.state().session().view_mode(), ViewMode::Results);
    assert_eq!(harness.gateway().search_calls().len(), 2, "no refetch");
    let screen = harness.render_to_string();
    assert!(screen.contains("Showing 42 results for cats"));
    assert!(screen.contains("Page 2 of 3"));
}

#[test]
fn esc_from_metrics_opened_on_start_screen_returns_there() {
    let mut harness = AcceptanceTestHarness::new(FakeGateway::with_total(42));
    harness.send_keys(&[KeyCode::Esc, KeyCode::Char('m'), KeyCode::Esc]);

    assert_eq!(harness.state().session().view_mode(), ViewMode::Idle);
    assert_eq!(harness.state().focus, Focus::Browse);
}

#[test]
fn pagination_keys_do_nothing_on_metrics() {
    let mut harness = AcceptanceTestHarness::new(FakeGateway::with_total(42));
    harness.search("cats");
    harness.send_key(KeyCode::Char('m'));

    harness.send_keys(&[KeyCode::Char('n'), KeyCode::Char('p')]);

    assert_eq!(harness.gateway().search_calls().len(), 1);
    assert_eq!(harness.state().session().view_mode(), ViewMode::Metrics);
}

#[test]
fn new_search_from_metrics_replaces_metrics_view() {
    let mut harness = AcceptanceTestHarness::new(FakeGateway::with_total(42));
    harness.search("cats");
    harness.send_key(KeyCode::Char('m'));

    harness.send_key(KeyCode::Char('/'));
    harness.type_text("s");
    harness.send_key(KeyCode::Enter);

    assert_eq!(harness.state().session().view_mode(), ViewMode::Results);
    assert!(harness
        .render_to_string()
        .contains("Showing 42 results for catss"));
}

#[test]
fn dismissing_metrics_before_reply_keeps_results() {
    let mut harness = AcceptanceTestHarness::new(FakeGateway::with_total(42));
    harness.search("cats");

    harness.hold_replies();
    harness.send_key(KeyCode::Char('m'));
    harness.send_key(KeyCode::Esc);
    harness.deliver();

    assert_eq!(harness.state().session().view_mode(), ViewMode::Results);
    assert!(!harness.state().session().is_loading());
}

#[test]
fn startup_metrics_flag_opens_metrics_view() {
    let mut harness = AcceptanceTestHarness::new(FakeGateway::with_total(42));

    harness.start(StartupOptions {
        query: None,
        metrics: true,
    });

    assert_eq!(harness.state().session().view_mode(), ViewMode::Metrics);
    assert_eq!(harness.state().focus, Focus::Browse);
}
