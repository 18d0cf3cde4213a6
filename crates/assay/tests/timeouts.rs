//! Timeout behaviour against delayed responses.

#![allow(clippy::unwrap_used)]

mod common;

use std::time::Instant;

use assay::{DefaultConfig, ErrorKind, SpecError, status};
use common::{MockServer, assay_with};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn response_slower_than_timeout_is_a_timeout() {
    let server = MockServer::start().await;
    let assay = assay_with(DefaultConfig::new());

    let started = Instant::now();
    let report = assay
        .run(
            assay
                .spec()
                .get(server.url("/users"))
                .with_query_param("delay", "0.5")
                .with_timeout(150)
                .expect_status(status::OK),
        )
        .await
        .unwrap();

    assert_eq!(report.state().error_kind(), Some(ErrorKind::Timeout));
    assert!(report.response().is_none());
    assert!(started.elapsed().as_millis() < 500);
    assert!(matches!(
        report.into_result(),
        Err(SpecError::Timeout { timeout_ms: 150 })
    ));
}

#[tokio::test]
async fn default_timeout_applies_without_override() {
    let server = MockServer::start().await;
    let mut config = DefaultConfig::new();
    config.set_default_timeout(100).unwrap();
    let assay = assay_with(config);

    let error = assay
        .execute(
            assay
                .spec()
                .get(server.url("/unknown"))
                .with_query_param("delay", 0.4)
                .expect_status(status::OK),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, SpecError::Timeout { timeout_ms: 100 }));
}

#[tokio::test]
async fn delayed_response_within_timeout_passes() {
    let server = MockServer::start().await;
    let mut config = DefaultConfig::new();
    config.set_default_timeout(5_000).unwrap();
    let assay = assay_with(config);

    let response = assay
        .execute(
            assay
                .spec()
                .get(server.url("/users"))
                .with_query_params([("delay", json!(0.2))])
                .expect_status(status::OK)
                .expect_json_schema(&json!({
                    "type": "object",
                    "properties": {"data": {"type": "array"}}
                }))
                .expect_response_time(5_000),
        )
        .await
        .unwrap();

    assert!(response.elapsed_ms() >= 200);
}

#[tokio::test]
async fn slow_response_fails_response_time_expectation() {
    let server = MockServer::start().await;
    let assay = assay_with(DefaultConfig::new());

    let report = assay
        .run(
            assay
                .spec()
                .get(server.url("/users"))
                .with_query_param("delay", "0.2")
                .expect_status(status::OK)
                .expect_response_time(50),
        )
        .await
        .unwrap();

    assert!(report.state().is_failed());
    let failing: Vec<_> = report.failures().map(|(e, _)| e.kind()).collect();
    assert_eq!(failing, vec!["response-time"]);
}
