//! Upstream employee API client with rate-limit retries and error classification.
//!
//! # Responsibilities
//! - Issue GET/POST/DELETE against the configured upstream endpoint
//! - Bound each attempt with connect and request timeouts
//! - Retry HTTP 429 through the fixed-delay [`RetryPolicy`]
//! - Classify every other failure into an [`EmployeeError`]
//! - Decode response envelopes

use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::GatewayConfig;
use crate::employee::envelope::Envelope;
use crate::employee::error::{EmployeeError, EmployeeResult};
use crate::employee::model::{DeleteRequest, EmployeeInput};
use crate::observability::metrics;
use crate::resilience::{AttemptError, RetryPolicy};

const FETCH: &str = "fetch employees";
const CREATE: &str = "create employee";
const DELETE: &str = "delete employee";

/// Errors raised while constructing the client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid upstream base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("upstream base URL '{0}' cannot carry path segments")]
    NotHierarchical(String),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the upstream employee API.
///
/// Holds only immutable configuration, so it is cheap to share behind an `Arc`
/// and needs no locking.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl UpstreamClient {
    /// Build a client from the gateway configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ClientBuildError> {
        let base_url =
            Url::parse(&config.upstream.base_url).map_err(|source| ClientBuildError::InvalidUrl {
                url: config.upstream.base_url.clone(),
                source,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientBuildError::NotHierarchical(config.upstream.base_url.clone()));
        }

        let http = Client::builder()
            .connect_timeout(config.timeouts.connect())
            .timeout(config.timeouts.request())
            .build()?;

        tracing::info!(
            base_url = %base_url,
            connect_timeout = ?config.timeouts.connect(),
            request_timeout = ?config.timeouts.request(),
            max_retries = config.retries.max_retries,
            retry_delay = ?config.retries.delay(),
            "Upstream client initialized"
        );

        Ok(Self {
            http,
            base_url,
            retry: RetryPolicy::from_config(&config.retries),
        })
    }

    /// URL of the employee collection.
    pub fn collection_url(&self) -> Url {
        self.base_url.clone()
    }

    /// URL of a single employee record. The id is percent-encoded as one segment.
    pub fn record_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// GET `url` and return the raw body.
    ///
    /// 5xx fails with `ServiceError`; any other 4xx fails with `NotFound`.
    pub async fn fetch(&self, url: &Url) -> EmployeeResult<String> {
        self.retry.run(FETCH, move || self.fetch_once(url)).await
    }

    /// GET `url` and decode the response envelope.
    pub async fn fetch_envelope(&self, url: &Url) -> EmployeeResult<Envelope> {
        let body = self.fetch(url).await?;
        Envelope::decode(&body).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to decode upstream envelope");
            EmployeeError::service_error(FETCH, format!("invalid upstream response: {e}"))
        })
    }

    /// POST a new employee. The response body is ignored; callers re-read to
    /// learn server-assigned fields.
    pub async fn create(&self, input: &EmployeeInput) -> EmployeeResult<()> {
        self.retry.run(CREATE, move || self.create_once(input)).await
    }

    /// DELETE the employee with the given name. The name travels in the body.
    pub async fn delete(&self, name: &str) -> EmployeeResult<()> {
        self.retry.run(DELETE, move || self.delete_once(name)).await
    }

    async fn fetch_once(&self, url: &Url) -> Result<String, AttemptError> {
        let response = self.send_once(Method::GET, url, None::<&()>, FETCH).await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(EmployeeError::service_error(FETCH, "Error in getting employees").into());
        }
        if status.is_client_error() {
            return Err(EmployeeError::not_found(
                FETCH,
                "Error in getting employees, please try again after sometime",
            )
            .into());
        }
        let body = response.text().await.map_err(|e| {
            EmployeeError::service_error(FETCH, format!("failed to read upstream body: {e}"))
        })?;
        Ok(body)
    }

    async fn create_once(&self, input: &EmployeeInput) -> Result<(), AttemptError> {
        let response = self
            .send_once(Method::POST, &self.base_url, Some(input), CREATE)
            .await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(EmployeeError::creation_failed(CREATE, "Failed to create employee").into());
        }
        if status.is_client_error() {
            tracing::warn!(status = %status, "Upstream answered create with a client error");
        }
        Ok(())
    }

    async fn delete_once(&self, name: &str) -> Result<(), AttemptError> {
        let body = DeleteRequest { name };
        let response = self
            .send_once(Method::DELETE, &self.base_url, Some(&body), DELETE)
            .await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(EmployeeError::deletion_failed(DELETE, "Failed to delete employee").into());
        }
        if status.is_client_error() {
            tracing::warn!(status = %status, "Upstream answered delete with a client error");
        }
        Ok(())
    }

    /// One HTTP attempt. Transport failures become `ServiceError`, 429 becomes
    /// a retryable `RateLimited`, every other response is handed back.
    async fn send_once<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
        operation: &str,
    ) -> Result<Response, AttemptError> {
        tracing::info!(method = %method, url = %url, "Upstream request");

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream(method.as_str(), "error");
                tracing::error!(method = %method, url = %url, error = %e, "Upstream request failed");
                let reason = if e.is_timeout() {
                    format!("upstream timed out: {e}")
                } else {
                    format!("upstream unreachable: {e}")
                };
                return Err(EmployeeError::service_error(operation, reason).into());
            }
        };

        let status = response.status();
        metrics::record_upstream(method.as_str(), status.as_str());
        tracing::info!(method = %method, url = %url, status = %status, "Upstream response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptError::RateLimited(format!("{status} from {method} {url}")));
        }
        Ok(response)
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .finish()
    }
}
