//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! The whole exchange, from dispatch to the last body byte, runs under the
//! spec's timeout.

use std::error::Error as _;
use std::future::Future;
use std::time::{Duration, Instant};

use assay_application::ports::{HttpClient, HttpClientError, NetworkErrorKind};
use assay_domain::{CapturedResponse, HttpMethod, RequestBody, RequestSpec};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use tracing::debug;

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client`, which pools connections and is cheap to share
/// between concurrently running specs.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Redirects: not followed, the 3xx response is captured as is
    /// - TLS verification: enabled
    /// - User-Agent: "Assay/<version>"
    ///
    /// Timeouts are applied per request, not on the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("Assay/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HttpClientError::network(NetworkErrorKind::Other, e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Encodes the request body into bytes.
    fn encode_body(body: &RequestBody) -> Result<Vec<u8>, HttpClientError> {
        match body {
            RequestBody::Json { value } => serde_json::to_vec(value)
                .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}"))),
            RequestBody::Raw { content, .. } => Ok(content.clone()),
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = error_chain(error);
        if error.is_builder() {
            return HttpClientError::InvalidRequest(message);
        }
        let lower = message.to_lowercase();

        let kind = if lower.contains("dns") || lower.contains("resolve") {
            NetworkErrorKind::Dns
        } else if lower.contains("refused") {
            NetworkErrorKind::ConnectionRefused
        } else if lower.contains("certificate") || lower.contains("tls") {
            NetworkErrorKind::Tls
        } else if error.is_connect() {
            NetworkErrorKind::Connect
        } else {
            NetworkErrorKind::Other
        };

        HttpClientError::network(kind, message)
    }
}

/// Joins an error with its sources; reqwest keeps the useful detail there.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<CapturedResponse, HttpClientError>> + Send {
        let method = Self::to_reqwest_method(request.method());
        let url = request.full_url();
        let headers = request.headers().clone();
        let body = request.body().cloned();
        let timeout_ms = request.timeout_ms();

        async move {
            let mut builder = self.client.request(method, url);

            for header in headers.iter() {
                builder = builder.header(header.name.as_str(), header.value.as_str());
            }

            if let Some(body) = &body {
                if !headers.contains(CONTENT_TYPE.as_str()) {
                    builder = builder.header(CONTENT_TYPE, body.content_type());
                }
                builder = builder.body(Self::encode_body(body)?);
            }

            debug!(timeout_ms, "sending request");
            let start = Instant::now();

            let exchange = async {
                let response = builder
                    .send()
                    .await
                    .map_err(|e| Self::map_error(&e, timeout_ms))?;

                let status = response.status().as_u16();
                let response_headers: Vec<(String, String)> = response
                    .headers()
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.to_string(),
                            String::from_utf8_lossy(value.as_bytes()).into_owned(),
                        )
                    })
                    .collect();

                let body_bytes = response
                    .bytes()
                    .await
                    .map_err(|e| Self::map_error(&e, timeout_ms))?
                    .to_vec();

                Ok::<_, HttpClientError>((status, response_headers, body_bytes))
            };

            let (status, response_headers, body_bytes) =
                tokio::time::timeout(Duration::from_millis(timeout_ms), exchange)
                    .await
                    .map_err(|_| HttpClientError::Timeout { timeout_ms })??;

            let elapsed = start.elapsed();
            debug!(
                status,
                bytes = body_bytes.len(),
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "response buffered"
            );

            Ok(CapturedResponse::new(
                status,
                response_headers,
                body_bytes,
                elapsed,
            ))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use assay_domain::{DefaultConfig, SpecBuilder};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_json_body_is_serialized() {
        let body = RequestBody::json(json!({"name": "morpheus", "job": "leader"}));
        let bytes = ReqwestHttpClient::encode_body(&body).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, json!({"name": "morpheus", "job": "leader"}));
    }

    #[test]
    fn test_raw_body_is_sent_verbatim() {
        let body = RequestBody::raw("text/csv", b"a,b\n1,2".to_vec());
        assert_eq!(
            ReqwestHttpClient::encode_body(&body).unwrap(),
            b"a,b\n1,2".to_vec()
        );
    }

    #[test]
    fn test_builder_error_is_invalid_request() {
        let error = Client::new()
            .get("http://127.0.0.1:9/users")
            .header("bad header", "v")
            .build()
            .unwrap_err();

        assert!(matches!(
            ReqwestHttpClient::map_error(&error, 1000),
            HttpClientError::InvalidRequest(_)
        ));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let spec = SpecBuilder::new(&DefaultConfig::new())
            .get(format!("http://127.0.0.1:{port}/users"))
            .with_timeout(2000)
            .build()
            .unwrap();

        let client = ReqwestHttpClient::new().unwrap();
        let result = client.execute(spec.request()).await;

        assert!(
            matches!(result, Err(HttpClientError::Network { .. })),
            "{result:?}"
        );
    }
}
