//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{Headers, HttpMethod, QueryParams, RequestBody};

/// Complete, immutable description of one HTTP request.
///
/// Values are produced by [`SpecBuilder`](crate::spec::SpecBuilder) with the
/// default configuration already merged in. There are no setters; describing
/// a different request means building a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    id: Uuid,
    method: HttpMethod,
    url: Url,
    #[serde(default)]
    query_params: QueryParams,
    #[serde(default)]
    headers: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<RequestBody>,
    timeout_ms: u64,
}

impl RequestSpec {
    pub(crate) fn from_parts(
        method: HttpMethod,
        url: Url,
        query_params: QueryParams,
        headers: Headers,
        body: Option<RequestBody>,
        timeout_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            url,
            query_params,
            headers,
            body,
            timeout_ms,
        }
    }

    /// Unique identifier, used to correlate log lines.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Target URL as given to the builder, without the extra query parameters.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Query parameters appended at send time.
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Effective headers (spec-level merged over the defaults).
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Request body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Effective timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the URL with the query parameters appended.
    ///
    /// Parameters already present in the URL are kept.
    #[must_use]
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in self.query_params.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }
        url
    }
}
