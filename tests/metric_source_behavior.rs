//! Behavior-driven tests for metric sources.
//!
//! These tests verify how adapters classify provider failures and how
//! snapshots round-trip through serialization.

use ratiolens_tests::{
    symbol, FetchError, FetchErrorKind, FixtureMetricSource, MetricSource, RawSnapshot,
    YahooMetricSource,
};

// =============================================================================
// Metric Source: Offline Yahoo Adapter
// =============================================================================

#[tokio::test]
async fn when_yahoo_runs_offline_it_serves_deterministic_snapshots() {
    // Given: The default (offline) yahoo adapter
    let source = YahooMetricSource::default();
    let ticker = symbol("8058.T");

    // When: The same symbol is fetched twice
    let first = source.fetch(&ticker).await.expect("fake fetch succeeds");
    let second = source.fetch(&ticker).await.expect("fake fetch succeeds");

    // Then: Snapshots are identical and populated
    assert_eq!(first, second);
    assert!(first.operating_margins.expect("margins present") > 0.0);
    assert!(first.total_stockholder_equity.expect("equity present") > 0.0);
}

#[tokio::test]
async fn when_two_symbols_differ_their_fake_snapshots_differ() {
    let source = YahooMetricSource::default();

    let a = source.fetch(&symbol("AAA")).await.expect("fake fetch succeeds");
    let b = source.fetch(&symbol("BBBB")).await.expect("fake fetch succeeds");

    assert_ne!(a, b);
}

// =============================================================================
// Metric Source: Fixture Error Classification
// =============================================================================

#[tokio::test]
async fn when_a_symbol_is_unknown_the_error_is_not_retryable() {
    let source = FixtureMetricSource::new();

    let error = source
        .fetch(&symbol("NOPE"))
        .await
        .expect_err("fetch should fail");

    assert_eq!(error.kind(), FetchErrorKind::InvalidSymbol);
    assert!(!error.retryable());
    assert_eq!(error.code(), "fetch.invalid_symbol");
}

#[tokio::test]
async fn when_a_failure_is_configured_its_kind_is_preserved() {
    let source = FixtureMetricSource::new()
        .with_failure(symbol("AAA"), FetchError::rate_limited("slow down"));

    let error = source
        .fetch(&symbol("AAA"))
        .await
        .expect_err("fetch should fail");

    assert_eq!(error.kind(), FetchErrorKind::RateLimited);
    assert!(error.retryable());
}

// =============================================================================
// Metric Source: Snapshot Serialization
// =============================================================================

#[test]
fn snapshot_survives_a_json_round_trip() {
    let snapshot = RawSnapshot {
        short_name: Some(String::from("Example Co")),
        forward_pe: Some(14.5),
        return_on_equity: Some(0.15),
        total_stockholder_equity: Some(5_000_000_000.0),
        ..RawSnapshot::default()
    };

    let encoded = serde_json::to_string(&snapshot).expect("snapshot serializes");
    let decoded: RawSnapshot = serde_json::from_str(&encoded).expect("snapshot deserializes");
    assert_eq!(decoded, snapshot);
}

#[test]
fn absent_fields_deserialize_as_none() {
    let decoded: RawSnapshot =
        serde_json::from_str(r#"{"short_name": "Example Co"}"#).expect("snapshot deserializes");
    assert_eq!(decoded.short_name.as_deref(), Some("Example Co"));
    assert_eq!(decoded.forward_pe, None);
    assert_eq!(decoded.total_assets, None);
}
