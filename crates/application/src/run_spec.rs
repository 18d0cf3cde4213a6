//! Run Spec Use Case
//!
//! Sends a built spec through the [`HttpClient`] port, checks the response
//! against every expectation and reports the terminal state.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};

use assay_domain::{
    CapturedResponse, Expectation, HttpMethod, MatchResult, Spec, SpecState,
};
use chrono::{DateTime, Utc};
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::assertions::evaluate_all;
use crate::error::{AssertionFailure, SpecError, failure_line};
use crate::ports::{Clock, HttpClient, HttpClientError};

/// Outcome of running one spec.
#[derive(Debug, Clone)]
pub struct SpecReport {
    spec_id: Uuid,
    method: HttpMethod,
    url: String,
    state: SpecState,
    outcome: Result<CapturedResponse, HttpClientError>,
    results: Vec<(Expectation, MatchResult)>,
    started_at: DateTime<Utc>,
    duration: Duration,
}

impl SpecReport {
    /// Id of the request that was sent.
    #[must_use]
    pub const fn spec_id(&self) -> Uuid {
        self.spec_id
    }

    /// Terminal state.
    #[must_use]
    pub const fn state(&self) -> &SpecState {
        &self.state
    }

    /// Returns true if every expectation held.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.state.is_passed()
    }

    /// The response, when one was received.
    #[must_use]
    pub fn response(&self) -> Option<&CapturedResponse> {
        self.outcome.as_ref().ok()
    }

    /// Every expectation with its result, in declaration order.
    ///
    /// Empty when no response was received.
    #[must_use]
    pub fn results(&self) -> &[(Expectation, MatchResult)] {
        &self.results
    }

    /// Expectations that did not hold.
    pub fn failures(&self) -> impl Iterator<Item = &(Expectation, MatchResult)> {
        self.results.iter().filter(|(_, result)| !result.ok())
    }

    /// When the run started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wall time of the whole run, checks included.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Human-readable summary listing every failing expectation.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} {} {} ({}ms)",
            self.state.label().to_uppercase(),
            self.method,
            self.url,
            self.duration.as_millis()
        );

        match &self.outcome {
            Err(error) => {
                let _ = write!(out, "\n  error: {error}");
            }
            Ok(response) => {
                let _ = write!(
                    out,
                    "\n  status {} in {}ms",
                    response.status(),
                    response.elapsed_ms()
                );
                for (expectation, result) in self.failures() {
                    let _ = write!(out, "\n  - {}", expectation.description());
                    for mismatch in result.mismatches() {
                        let _ = write!(out, "\n      {mismatch}");
                    }
                }
            }
        }
        out
    }

    /// Converts the report into the response or the reason it was rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::AssertionFailure`] with every failing expectation,
    /// or the transport error when no response was received.
    pub fn into_result(self) -> Result<CapturedResponse, SpecError> {
        let response = self.outcome?;
        let failures: Vec<_> = self
            .results
            .into_iter()
            .filter(|(_, result)| !result.ok())
            .collect();
        if failures.is_empty() {
            Ok(response)
        } else {
            Err(AssertionFailure::new(failures).into())
        }
    }
}

/// Use case for running specs.
///
/// Holds no per-spec state, so one runner can drive many specs concurrently.
///
/// # Example
///
/// ```ignore
/// let runner = SpecRunner::new(Arc::new(ReqwestHttpClient::new()?), Arc::new(SystemClock));
/// let response = runner.execute(&spec).await?;
/// ```
pub struct SpecRunner<C: HttpClient> {
    client: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C: HttpClient> Clone for SpecRunner<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C: HttpClient> SpecRunner<C> {
    /// Creates a runner over the given client and clock.
    pub fn new(client: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    /// The underlying HTTP client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Runs the spec and returns the response if every expectation held.
    ///
    /// # Errors
    ///
    /// Returns `SpecError` on transport failure, timeout or failed
    /// expectations.
    pub async fn execute(&self, spec: &Spec) -> Result<CapturedResponse, SpecError> {
        self.run(spec).await.into_result()
    }

    /// Runs the spec to a terminal state.
    pub async fn run(&self, spec: &Spec) -> SpecReport {
        let request = spec.request();
        let url = request.full_url().to_string();
        let span = info_span!(
            "spec",
            id = %request.id(),
            method = %request.method(),
            url = %url,
        );

        async move {
            let started_at = self.clock.now();
            let start = Instant::now();

            let mut state = SpecState::Sent;
            debug!(timeout_ms = request.timeout_ms(), state = state.label(), "dispatching request");

            let outcome = self.client.execute(request).await;
            let results = match &outcome {
                Ok(response) => {
                    debug!(
                        status = response.status(),
                        elapsed_ms = response.elapsed_ms(),
                        "response received"
                    );
                    evaluate_all(spec.expectations(), response)
                }
                Err(error) => {
                    warn!(error = %error, "request failed");
                    Vec::new()
                }
            };

            state = match &outcome {
                Err(error) => SpecState::errored(error.to_error_kind(), error.to_string()),
                Ok(_) => {
                    let reasons: Vec<String> = results
                        .iter()
                        .filter(|(_, result)| !result.ok())
                        .map(|(expectation, result)| failure_line(expectation, result))
                        .collect();
                    for reason in &reasons {
                        warn!(reason = %reason, "expectation failed");
                    }
                    if reasons.is_empty() {
                        SpecState::Passed
                    } else {
                        SpecState::failed(reasons)
                    }
                }
            };
            debug!(state = state.label(), "spec finished");

            SpecReport {
                spec_id: request.id(),
                method: request.method(),
                url,
                state,
                outcome,
                results,
                started_at,
                duration: start.elapsed(),
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assay_domain::{DefaultConfig, ErrorKind, JsonPattern, RequestSpec, SpecBuilder};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::ports::NetworkErrorKind;

    /// Mock HTTP client for testing.
    struct MockHttpClient {
        response: Result<CapturedResponse, HttpClientError>,
        calls: AtomicUsize,
    }

    impl MockHttpClient {
        fn json(status: u16, body: serde_json::Value) -> Self {
            Self {
                response: Ok(CapturedResponse::new(
                    status,
                    [("content-type".to_string(), "application/json".to_string())],
                    body.to_string().into_bytes(),
                    Duration::from_millis(40),
                )),
                calls: AtomicUsize::new(0),
            }
        }

        fn error(err: HttpClientError) -> Self {
            Self {
                response: Err(err),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(
            &self,
            _request: &RequestSpec,
        ) -> impl Future<Output = Result<CapturedResponse, HttpClientError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self.response.clone();
            async move { result }
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn runner(client: MockHttpClient) -> SpecRunner<MockHttpClient> {
        SpecRunner::new(Arc::new(client), Arc::new(FixedClock(fixed_time())))
    }

    fn register_spec() -> Spec {
        SpecBuilder::new(&DefaultConfig::new())
            .post("https://reqres.in/api/register")
            .with_json(json!({"email": "eve.holt@reqres.in", "password": "pistol"}))
            .expect_status(200)
            .expect_json_like(JsonPattern::object([
                ("id", JsonPattern::from(4_i64)),
                ("token", JsonPattern::regex(".+").unwrap()),
            ]))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_passes() {
        let runner = runner(MockHttpClient::json(
            200,
            json!({"id": 4, "token": "QpwL5tke4Pnpja7X4"}),
        ));

        let report = runner.run(&register_spec()).await;

        assert_eq!(report.state(), &SpecState::Passed);
        assert_eq!(report.started_at(), fixed_time());
        assert_eq!(report.results().len(), 2);
        assert_eq!(report.failures().count(), 0);
        assert_eq!(report.response().map(CapturedResponse::status), Some(200));
    }

    #[tokio::test]
    async fn test_run_fails_with_every_reason() {
        let runner = runner(MockHttpClient::json(
            400,
            json!({"error": "Missing password"}),
        ));

        let report = runner.run(&register_spec()).await;

        let SpecState::Failed { reasons } = report.state() else {
            panic!("expected Failed, got {:?}", report.state());
        };
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].contains("expected status 200, got 400"));
        assert!(reasons[1].contains("missing key 'id'"));
        assert!(report.response().is_some());
    }

    #[tokio::test]
    async fn test_execute_returns_assertion_failure() {
        let runner = runner(MockHttpClient::json(200, json!({"id": 5, "token": ""})));

        let error = runner.execute(&register_spec()).await.unwrap_err();

        let failure = error.as_assertion_failure().unwrap();
        assert_eq!(failure.failures().len(), 1);
        assert_eq!(failure.failures()[0].1.mismatches().len(), 2);
    }

    #[tokio::test]
    async fn test_execute_returns_response() {
        let runner = runner(MockHttpClient::json(
            200,
            json!({"id": 4, "token": "QpwL5tke4Pnpja7X4"}),
        ));

        let response = runner.execute(&register_spec()).await.unwrap();
        assert_eq!(response.json_pointer("/id"), Some(&json!(4)));
    }

    #[tokio::test]
    async fn test_timeout_is_errored_without_checks() {
        let runner = runner(MockHttpClient::error(HttpClientError::Timeout {
            timeout_ms: 100,
        }));

        let report = runner.run(&register_spec()).await;

        assert_eq!(report.state().error_kind(), Some(ErrorKind::Timeout));
        assert!(report.results().is_empty());
        assert!(report.response().is_none());
        assert!(matches!(
            report.into_result(),
            Err(SpecError::Timeout { timeout_ms: 100 })
        ));
    }

    #[tokio::test]
    async fn test_network_error() {
        let runner = runner(MockHttpClient::error(HttpClientError::network(
            NetworkErrorKind::ConnectionRefused,
            "connection refused",
        )));

        let error = runner.execute(&register_spec()).await.unwrap_err();
        assert!(matches!(
            error,
            SpecError::Network {
                kind: NetworkErrorKind::ConnectionRefused,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_render_lists_failures() {
        let runner = runner(MockHttpClient::json(404, json!({})));

        let rendered = runner.run(&register_spec()).await.render();

        assert!(rendered.starts_with("FAILED POST https://reqres.in/api/register"));
        assert!(rendered.contains("- Status code = 200"));
        assert!(rendered.contains("at /: expected status 200, got 404"));
        assert!(rendered.contains("at /id: missing key 'id'"));
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_client() {
        let runner = runner(MockHttpClient::json(
            200,
            json!({"id": 4, "token": "QpwL5tke4Pnpja7X4"}),
        ));
        let first = register_spec();
        let second = register_spec();

        let (a, b) = tokio::join!(runner.run(&first), runner.run(&second));

        assert!(a.is_passed());
        assert!(b.is_passed());
        assert_ne!(a.spec_id(), b.spec_id());
        assert_eq!(runner.client().calls.load(Ordering::SeqCst), 2);
    }
}
