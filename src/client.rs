//! HTTP client whose failures always come back classified.

use crate::classifier::{ErrorClassifier, HttpExchange};
use crate::config::NetworkConfig;
use crate::error::{AppError, FrameworkError, StructuredError};
use crate::logging::{log_debug, log_error, ErrorLogger};
use crate::transport::{TransportFailure, TransportOutcome};
use async_trait::async_trait;
use reqwest::{Method, Request, Url};
use std::sync::Arc;

/// Executes requests and reports what happened, without interpreting it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> TransportOutcome;
}

/// [`Transport`] backed by a `reqwest::Client` configured from [`NetworkConfig`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &NetworkConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> TransportOutcome {
        let url = request.url().to_string();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                log_debug!(url = %url, error = %e, "HTTP request failed");
                return TransportOutcome::Failed(e.into());
            }
        };

        let status = response.status();
        match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => TransportOutcome::Completed { status, body: None },
            Ok(bytes) => TransportOutcome::Completed {
                status,
                body: Some(bytes.to_vec()),
            },
            // The status arrived, so this is never a connectivity failure.
            Err(e) => {
                log_debug!(url = %url, status = %status, error = %e, "Failed to read response body");
                TransportOutcome::Failed(TransportFailure::Other(Box::new(e)))
            }
        }
    }
}

/// Runs requests through a [`Transport`] and classifies every failure.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    classifier: ErrorClassifier,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(config: &NetworkConfig, logger: Arc<dyn ErrorLogger>) -> Result<Self, AppError> {
        let transport = HttpTransport::new(config).map_err(|e| {
            log_error!(error = %e, "Failed to build HTTP transport");
            AppError::Framework(FrameworkError::from_error(&e))
        })?;
        Ok(Self::with_transport(
            Arc::new(transport),
            ErrorClassifier::new(config, logger),
        ))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, classifier: ErrorClassifier) -> Self {
        Self {
            transport,
            classifier,
        }
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// GET `url`. A URL that does not parse is a `NetworkRequestFailed`.
    pub async fn get(&self, url: &str) -> Result<HttpExchange, AppError> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                let error = StructuredError::network_request_failed().with_request_url(url);
                self.classifier
                    .report(&format!("Invalid request URL: {e}"), &error);
                return Err(error.into());
            }
        };
        self.execute(Request::new(Method::GET, parsed)).await
    }

    pub async fn execute(&self, request: Request) -> Result<HttpExchange, AppError> {
        let url = request.url().to_string();
        let outcome = self.transport.send(request).await;
        self.classifier.resolve(outcome, Some(&url))
    }
}
