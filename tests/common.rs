//! Test helper utilities for multisig-errors integration tests
//!
//! This module provides reusable test fixtures and helper functions
//! that are shared across multiple test modules.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use multisig_errors::{ErrorClassifier, HttpClient, NetworkConfig, RecordingLogger};
use std::sync::Arc;

/// Configuration with the shortest timeout the client accepts.
pub fn create_test_config() -> NetworkConfig {
    NetworkConfig {
        request_timeout_secs: 1,
        user_agent: "multisig-errors-tests".to_string(),
    }
}

/// Classifier paired with the logger it reports to.
pub fn create_test_classifier() -> (ErrorClassifier, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::new());
    let classifier = ErrorClassifier::new(&create_test_config(), logger.clone());
    (classifier, logger)
}

/// Real reqwest-backed client paired with the logger it reports to.
pub fn create_test_client() -> (HttpClient, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::new());
    let client = HttpClient::new(&create_test_config(), logger.clone())
        .expect("test client should build");
    (client, logger)
}

/// Backend error envelope as the API sends it.
pub fn backend_error_body(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({ "code": code, "message": message })
}
