//! Fluent spec construction.
//!
//! A [`SpecBuilder`] is a plain value: every call consumes it and returns the
//! updated builder, so a partially described spec can be cloned and extended
//! in two directions without either copy observing the other.
//!
//! Builder misuse is recorded as it happens and reported by
//! [`SpecBuilder::build`], which is the only fallible step. Nothing touches the
//! network before `build` succeeds.
//!
//! ```
//! use assay_domain::{DefaultConfig, JsonPattern, SpecBuilder, status};
//! use serde_json::json;
//!
//! let mut config = DefaultConfig::new();
//! config.set_default_headers([("x-api-key", "reqres-free-v1")]);
//!
//! let spec = SpecBuilder::new(&config)
//!     .post("https://reqres.in/api/register")
//!     .with_json(json!({"email": "eve.holt@reqres.in", "password": "pistol"}))
//!     .expect_status(status::OK)
//!     .expect_json_like(JsonPattern::object([
//!         ("id", JsonPattern::from(4_i64)),
//!         ("token", JsonPattern::regex(".+").unwrap()),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(spec.request().headers().get("X-API-KEY"), Some("reqres-free-v1"));
//! assert_eq!(spec.expectations().len(), 2);
//! ```

use http::header::{HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::config::DefaultConfig;
use crate::error::{DomainError, DomainResult};
use crate::request::{
    Header, Headers, HttpMethod, QueryParam, QueryParams, RequestBody, RequestSpec,
    query_value_text,
};
use crate::testing::{Expectation, JsonPattern, JsonSchema};

/// A built request plus the expectations its response must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spec {
    request: RequestSpec,
    expectations: Vec<Expectation>,
}

impl Spec {
    /// Starts a builder seeded from `config`.
    #[must_use]
    pub fn builder(config: &DefaultConfig) -> SpecBuilder {
        SpecBuilder::new(config)
    }

    /// The request to send.
    #[must_use]
    pub const fn request(&self) -> &RequestSpec {
        &self.request
    }

    /// Expectations in declaration order.
    #[must_use]
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Splits the spec into its request and expectations.
    #[must_use]
    pub fn into_parts(self) -> (RequestSpec, Vec<Expectation>) {
        (self.request, self.expectations)
    }
}

/// Value-semantics builder for a [`Spec`].
#[derive(Debug, Clone)]
#[must_use = "builder methods return the updated builder"]
pub struct SpecBuilder {
    default_headers: Headers,
    default_timeout_ms: u64,
    method: Option<HttpMethod>,
    url: String,
    query_params: QueryParams,
    headers: Headers,
    body: Option<RequestBody>,
    timeout_ms: Option<u64>,
    expectations: Vec<Expectation>,
    errors: Vec<String>,
}

impl SpecBuilder {
    /// Creates a builder holding a snapshot of `config`.
    ///
    /// Later changes to `config` do not affect this builder.
    pub fn new(config: &DefaultConfig) -> Self {
        Self {
            default_headers: config.headers().clone(),
            default_timeout_ms: config.timeout_ms(),
            method: None,
            url: String::new(),
            query_params: QueryParams::new(),
            headers: Headers::new(),
            body: None,
            timeout_ms: None,
            expectations: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Sets the method and URL. Only one call is allowed per spec.
    pub fn request(mut self, method: HttpMethod, url: impl Into<String>) -> Self {
        match self.method {
            Some(existing) => self.errors.push(format!(
                "method already set ({existing}), cannot switch to {method}"
            )),
            None => {
                self.method = Some(method);
                self.url = url.into();
            }
        }
        self
    }

    /// Describes a GET request.
    pub fn get(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Get, url)
    }

    /// Describes a POST request.
    pub fn post(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Post, url)
    }

    /// Describes a PUT request.
    pub fn put(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Put, url)
    }

    /// Describes a PATCH request.
    pub fn patch(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Patch, url)
    }

    /// Describes a DELETE request.
    pub fn delete(self, url: impl Into<String>) -> Self {
        self.request(HttpMethod::Delete, url)
    }

    /// Sends `value` as a JSON body. Cannot be combined with a raw body.
    pub fn with_json(mut self, value: serde_json::Value) -> Self {
        if matches!(self.body, Some(RequestBody::Raw { .. })) {
            self.errors
                .push("with_json cannot be combined with a raw body".to_string());
        } else {
            self.body = Some(RequestBody::json(value));
        }
        self
    }

    /// Sends raw bytes with the given content type. Cannot be combined with a
    /// JSON body.
    pub fn with_body(mut self, content_type: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        if matches!(self.body, Some(RequestBody::Json { .. })) {
            self.errors
                .push("a raw body cannot be combined with with_json".to_string());
        } else {
            self.body = Some(RequestBody::raw(content_type, content));
        }
        self
    }

    /// Adds one query parameter; scalars such as `2` are rendered as text.
    pub fn with_query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.query_params
            .set(QueryParam::new(key, query_value_text(&value.into())));
        self
    }

    /// Adds query parameters; a repeated key keeps the last value.
    pub fn with_query_params<K, V>(self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        params
            .into_iter()
            .fold(self, |builder, (key, value)| builder.with_query_param(key, value))
    }

    /// Adds one header, overriding a default with the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(Header::new(name, value));
        self
    }

    /// Adds headers, overriding defaults with the same names.
    pub fn with_headers<K, V>(self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.with_header(name, value))
    }

    /// Overrides the default timeout for this spec.
    pub fn with_timeout(mut self, timeout_ms: i64) -> Self {
        match u64::try_from(timeout_ms) {
            Ok(ms) => self.timeout_ms = Some(ms),
            Err(_) => self
                .errors
                .push(format!("timeout must be non-negative, got {timeout_ms}")),
        }
        self
    }

    /// Expects the status code to equal `code`.
    pub fn expect_status(mut self, code: u16) -> Self {
        self.expectations.push(Expectation::StatusEquals { code });
        self
    }

    /// Expects the JSON body to contain `pattern`.
    pub fn expect_json_like(mut self, pattern: impl Into<JsonPattern>) -> Self {
        self.expectations.push(Expectation::JsonLike {
            pattern: pattern.into(),
        });
        self
    }

    /// Expects the JSON body to conform to a schema given in JSON form.
    pub fn expect_json_schema(self, schema: &serde_json::Value) -> Self {
        match JsonSchema::from_json(schema) {
            Ok(schema) => self.expect_schema(schema),
            Err(e) => self.record(&e),
        }
    }

    /// Expects the JSON body to conform to an already parsed schema.
    pub fn expect_schema(mut self, schema: JsonSchema) -> Self {
        self.expectations.push(Expectation::JsonSchema { schema });
        self
    }

    /// Expects a header with exactly this value.
    pub fn expect_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.expectations.push(Expectation::HeaderEquals {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Expects the full response within `max_ms` milliseconds.
    pub fn expect_response_time(mut self, max_ms: u64) -> Self {
        self.expectations
            .push(Expectation::ResponseTimeWithin { max_ms });
        self
    }

    fn record(mut self, error: &DomainError) -> Self {
        let message = match error {
            DomainError::InvalidSpec(message) | DomainError::InvalidConfig(message) => message,
        };
        self.errors.push(message.clone());
        self
    }

    /// Finalizes the spec.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidSpec`] listing every problem recorded
    /// while building. Missing methods, URLs that are not absolute
    /// `http`/`https` URLs and headers that cannot be sent are reported too.
    pub fn build(self) -> DomainResult<Spec> {
        let mut errors = self.errors;
        let headers = self.headers.merged_over(&self.default_headers);
        errors.extend(headers.iter().filter_map(|h| check_header(h).err()));

        let url = match self.method {
            None => {
                errors.push("method not set".to_string());
                None
            }
            Some(_) => match parse_url(&self.url) {
                Ok(url) => Some(url),
                Err(message) => {
                    errors.push(message);
                    None
                }
            },
        };

        let (Some(method), Some(url), true) = (self.method, url, errors.is_empty()) else {
            return Err(DomainError::InvalidSpec(errors.join("; ")));
        };

        let request = RequestSpec::from_parts(
            method,
            url,
            self.query_params,
            headers,
            self.body,
            self.timeout_ms.unwrap_or(self.default_timeout_ms),
        );

        Ok(Spec {
            request,
            expectations: self.expectations,
        })
    }
}

fn check_header(header: &Header) -> Result<(), String> {
    HeaderName::from_bytes(header.name.as_bytes())
        .map_err(|_| format!("invalid header name '{}'", header.name.escape_debug()))?;
    HeaderValue::from_str(&header.value)
        .map_err(|_| format!("invalid value for header '{}'", header.name))?;
    Ok(())
}

fn parse_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("malformed URL '{raw}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "unsupported URL scheme '{other}' in '{raw}', expected http or https"
        )),
    }
}
