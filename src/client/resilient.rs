//! Breaker-guarded retrying HTTP client.
//!
//! # Responsibilities
//! - Run the acquire → call → classify → report cycle per attempt
//! - Retry transient failures with exponential backoff
//! - Surface circuit rejections immediately, with zero network I/O

use std::sync::Arc;

use reqwest::Method;
use url::Url;

use crate::breaker::registry::BreakerRegistry;
use crate::client::backoff;
use crate::client::transport::{
    HttpResponse, ReqwestTransport, Transport, TransportRequest,
};
use crate::config::{ResilienceConfig, RetryConfig};
use crate::error::{ClientError, TransportError};
use crate::observability::metrics;

/// HTTP client wrapper applying per-service circuit breaking and
/// bounded retries around an abstract [`Transport`].
#[derive(Debug, Clone)]
pub struct ResilientHttpClient<T: Transport> {
    transport: T,
    registry: Arc<BreakerRegistry>,
    retries: RetryConfig,
    request_timeout: std::time::Duration,
}

impl ResilientHttpClient<ReqwestTransport> {
    /// Client with the production reqwest transport.
    pub fn new(
        registry: Arc<BreakerRegistry>,
        config: &ResilienceConfig,
    ) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config.client)?;
        Ok(Self::with_transport(transport, registry, config))
    }
}

impl<T: Transport> ResilientHttpClient<T> {
    /// Client over a caller-supplied transport.
    pub fn with_transport(
        transport: T,
        registry: Arc<BreakerRegistry>,
        config: &ResilienceConfig,
    ) -> Self {
        Self {
            transport,
            registry,
            retries: config.retries.clone(),
            request_timeout: config.client.request_timeout(),
        }
    }

    /// GET with the client's default retry bounds.
    pub async fn get(&self, service: &str, url: &str) -> Result<HttpResponse, ClientError> {
        self.request(service, Method::GET, url, None).await
    }

    /// POST with the client's default retry bounds.
    pub async fn post(
        &self,
        service: &str,
        url: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, ClientError> {
        self.request(service, Method::POST, url, Some(body)).await
    }

    /// Issue a request with the client's default retry bounds.
    pub async fn request(
        &self,
        service: &str,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, ClientError> {
        let retries = self.retries.clone();
        self.request_with(service, method, url, body, &retries).await
    }

    /// Issue a request with explicit retry bounds.
    ///
    /// Each attempt independently feeds the service's breaker, so
    /// `max_retries = 2` can contribute up to three outcomes to the
    /// rolling window. A [`ClientError::CircuitOpen`] rejection is
    /// returned as-is: no network I/O happened for that attempt and it
    /// is never retried here.
    pub async fn request_with(
        &self,
        service: &str,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        retries: &RetryConfig,
    ) -> Result<HttpResponse, ClientError> {
        let parsed = Url::parse(url).map_err(|source| ClientError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let breaker = self.registry.get_or_create(service);

        let mut attempt: u32 = 0;
        loop {
            // Fresh breaker decision per attempt. A breaker that opened
            // mid-loop rejects here and ends the loop.
            let permit = breaker.before_call()?;

            let request = TransportRequest {
                method: method.clone(),
                url: parsed.clone(),
                body: body.clone(),
                timeout: self.request_timeout,
            };

            let error = match self.transport.send(request).await {
                Ok(response) if response.status.is_server_error() => {
                    breaker.after_call(permit, false);
                    tracing::warn!(
                        service = %service,
                        status = %response.status,
                        attempt,
                        "Server error from upstream"
                    );
                    ClientError::ServerError {
                        service: service.to_string(),
                        status: response.status,
                    }
                }
                Ok(response) => {
                    // Includes 4xx: client errors are not health signals.
                    breaker.after_call(permit, true);
                    metrics::record_request(service, "success");
                    return Ok(response);
                }
                Err(source) => {
                    breaker.after_call(permit, false);
                    tracing::warn!(
                        service = %service,
                        error = %source,
                        attempt,
                        "Transport error calling upstream"
                    );
                    ClientError::Transport {
                        service: service.to_string(),
                        source,
                    }
                }
            };
            metrics::record_request(service, "failure");

            if attempt >= retries.max_retries {
                return Err(error);
            }

            let delay =
                backoff::delay_for_attempt(attempt, retries.base_delay_ms, retries.max_delay_ms);
            tracing::debug!(
                service = %service,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Retrying after backoff"
            );
            metrics::record_retry(service);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
