//! Single entry point combining both classifiers.

use crate::config::NetworkConfig;
use crate::error::{AppError, StructuredError};
use crate::logging::{log_debug, ErrorLogger, TracingLogger};
use crate::response::HttpResponseClassifier;
use crate::transport::{TransportErrorClassifier, TransportFailure, TransportOutcome};
use reqwest::StatusCode;
use std::sync::Arc;

/// A completed exchange with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpExchange {
    pub status: StatusCode,
    pub body: Option<Vec<u8>>,
}

/// Routes transport outcomes to the matching classifier.
///
/// Holds no mutable state, so one instance can be shared across threads and
/// tasks.
#[derive(Clone)]
pub struct ErrorClassifier {
    transport: TransportErrorClassifier,
    response: HttpResponseClassifier,
    logger: Arc<dyn ErrorLogger>,
}

impl std::fmt::Debug for ErrorClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorClassifier")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl ErrorClassifier {
    pub fn new(config: &NetworkConfig, logger: Arc<dyn ErrorLogger>) -> Self {
        Self {
            transport: TransportErrorClassifier::new(config.request_timeout()),
            response: HttpResponseClassifier::new(Arc::clone(&logger)),
            logger,
        }
    }

    /// Classifier that reports to `tracing`.
    pub fn with_tracing(config: &NetworkConfig) -> Self {
        Self::new(config, Arc::new(TracingLogger))
    }

    pub fn classify_transport_failure(&self, failure: TransportFailure) -> AppError {
        self.transport.classify(failure)
    }

    /// # Panics
    ///
    /// Panics if `status` is 2xx.
    pub fn classify_http_response(
        &self,
        status: StatusCode,
        body: Option<&[u8]>,
        request_url: Option<&str>,
    ) -> StructuredError {
        self.response.classify(status, body, request_url)
    }

    /// Pass 2xx exchanges through and classify everything else.
    pub fn resolve(
        &self,
        outcome: TransportOutcome,
        request_url: Option<&str>,
    ) -> Result<HttpExchange, AppError> {
        match outcome {
            TransportOutcome::Completed { status, body } if status.is_success() => {
                Ok(HttpExchange { status, body })
            }
            TransportOutcome::Completed { status, body } => Err(AppError::Structured(
                self.response.classify(status, body.as_deref(), request_url),
            )),
            TransportOutcome::Failed(failure) => Err(match self.transport.classify(failure) {
                AppError::Structured(err) => AppError::Structured(match request_url {
                    Some(url) => err.with_request_url(url),
                    None => err,
                }),
                unclassified => unclassified,
            }),
        }
    }

    /// Send `error` to the logging sink if it is loggable. Returns whether
    /// it was sent.
    pub fn report(&self, message: &str, error: &StructuredError) -> bool {
        if !error.loggable() {
            log_debug!(
                code = error.code(),
                "Error not loggable, skipping sink"
            );
            return false;
        }
        self.logger.log(message, error);
        true
    }
}
