//! Assay - declarative HTTP contract testing
//!
//! Describe a request and what its response must look like, send it, and get
//! back either the response or every expectation that did not hold.
//!
//! ```no_run
//! use assay::{Assay, JsonPattern, status};
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), assay::SpecError> {
//! let mut assay = Assay::new()?;
//! assay.set_default_headers([("x-api-key", "reqres-free-v1")]);
//! assay.set_default_timeout(30_000)?;
//!
//! let registered = assay
//!     .execute(
//!         assay
//!             .spec()
//!             .post("https://reqres.in/api/register")
//!             .with_json(json!({"email": "eve.holt@reqres.in", "password": "pistol"}))
//!             .expect_status(status::OK)
//!             .expect_json_like(JsonPattern::from_json(json!({
//!                 "id": 4,
//!                 "token": {"$regex": ".+"}
//!             }))?),
//!     )
//!     .await?;
//!
//! let id = registered.json_pointer("/id").cloned().unwrap_or_default();
//! assay
//!     .execute(
//!         assay
//!             .spec()
//!             .get(format!("https://reqres.in/api/users/{id}"))
//!             .expect_status(status::OK)
//!             .expect_json_like(json!({"data": {"id": id}})),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::info;

pub use assay_application::assertions;
pub use assay_application::{
    AssertionFailure, Clock, HttpClient, HttpClientError, NetworkErrorKind, SpecError, SpecReport,
    SpecRunner,
};
pub use assay_domain::status;
pub use assay_domain::{
    CapturedResponse, DEFAULT_TIMEOUT_MS, DefaultConfig, DomainError, ErrorKind, Expectation,
    HttpMethod, JsonPath, JsonPattern, JsonSchema, MatchResult, Mismatch, PathSegment,
    RequestBody, RequestSpec, SchemaType, Spec, SpecBuilder, SpecState,
};
pub use assay_infrastructure::{
    ReqwestHttpClient, SystemClock, config_from_env, config_from_lookup, init_tracing,
};

/// Entry point holding the default config and the runner.
///
/// Configure defaults first, then describe specs with [`spec`](Self::spec).
/// Each builder copies the defaults when it is created.
pub struct Assay<C: HttpClient = ReqwestHttpClient> {
    config: DefaultConfig,
    runner: SpecRunner<C>,
}

impl Assay<ReqwestHttpClient> {
    /// Creates an instance with built-in defaults and a reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Network`] if the HTTP client cannot be created.
    pub fn new() -> Result<Self, SpecError> {
        Self::with_config(DefaultConfig::new())
    }

    /// Creates an instance with defaults from `ASSAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidConfig`] for malformed variables, or
    /// [`SpecError::Network`] if the HTTP client cannot be created.
    pub fn from_env() -> Result<Self, SpecError> {
        Self::with_config(config_from_env()?)
    }

    /// Creates an instance with the given defaults and a reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Network`] if the HTTP client cannot be created.
    pub fn with_config(config: DefaultConfig) -> Result<Self, SpecError> {
        let client = ReqwestHttpClient::new()?;
        Ok(Self::with_client(Arc::new(client), config))
    }
}

impl<C: HttpClient> Assay<C> {
    /// Creates an instance over any [`HttpClient`].
    pub fn with_client(client: Arc<C>, config: DefaultConfig) -> Self {
        Self {
            config,
            runner: SpecRunner::new(client, Arc::new(SystemClock::new())),
        }
    }

    /// Current defaults.
    #[must_use]
    pub const fn config(&self) -> &DefaultConfig {
        &self.config
    }

    /// Replaces the default headers for specs created afterwards.
    pub fn set_default_headers<K, V>(&mut self, headers: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.config.set_default_headers(headers);
    }

    /// Sets the default timeout for specs created afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidConfig`] for a negative timeout.
    pub fn set_default_timeout(&mut self, timeout_ms: i64) -> Result<(), SpecError> {
        self.config
            .set_default_timeout(timeout_ms)
            .map_err(SpecError::from)
    }

    /// Starts describing a spec seeded from the current defaults.
    pub fn spec(&self) -> SpecBuilder {
        SpecBuilder::new(&self.config)
    }

    /// The runner, for driving already built specs.
    #[must_use]
    pub const fn runner(&self) -> &SpecRunner<C> {
        &self.runner
    }

    /// Builds and runs a spec to its terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidSpec`] if the builder was misused. Nothing
    /// is sent in that case.
    pub async fn run(&self, builder: SpecBuilder) -> Result<SpecReport, SpecError> {
        let spec = builder.build()?;
        let report = self.runner.run(&spec).await;
        info!(state = report.state().label(), "{}", report.render());
        Ok(report)
    }

    /// Builds and runs a spec, returning the response if every expectation
    /// held.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidSpec`] for builder misuse, a network or
    /// timeout error, or [`SpecError::AssertionFailure`] listing every
    /// failing expectation.
    pub async fn execute(&self, builder: SpecBuilder) -> Result<CapturedResponse, SpecError> {
        self.run(builder).await?.into_result()
    }
}
