//! Test helper utilities shared by the unit test modules
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

use crate::classifier::ErrorClassifier;
use crate::config::NetworkConfig;
use crate::logging::{MockErrorLogger, RecordingLogger};
use crate::response::HttpResponseClassifier;
use std::sync::Arc;

/// Configuration with a timeout that is easy to spot in reason text.
pub fn create_test_config() -> NetworkConfig {
    NetworkConfig {
        request_timeout_secs: 42,
        ..NetworkConfig::default()
    }
}

/// Classifier paired with the logger it reports to.
pub fn create_recording_classifier() -> (ErrorClassifier, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::new());
    let classifier = ErrorClassifier::new(&create_test_config(), logger.clone());
    (classifier, logger)
}

/// Response classifier whose logger must never be called.
pub fn create_silent_response_classifier() -> HttpResponseClassifier {
    let mut logger = MockErrorLogger::new();
    logger.expect_log().never();
    HttpResponseClassifier::new(Arc::new(logger))
}

/// Response classifier whose logger must be called exactly once with a
/// message starting with `prefix`.
pub fn create_logging_once_response_classifier(prefix: &'static str) -> HttpResponseClassifier {
    let mut logger = MockErrorLogger::new();
    logger
        .expect_log()
        .withf(move |message, error| message.starts_with(prefix) && error.loggable())
        .times(1)
        .return_const(());
    HttpResponseClassifier::new(Arc::new(logger))
}
