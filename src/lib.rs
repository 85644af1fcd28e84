//! # multisig-errors
//!
//! Error classification and translation layer for a multisig wallet client.
//!
//! ## Key Features
//!
//! - **Closed catalog**: every failure becomes a [`StructuredError`] with a
//!   domain, a stable numeric code and user-facing remediation text
//! - **Transport classification**: offline, TLS, timeout and DNS failures
//!   map to connectivity errors that are never logged
//! - **HTTP classification**: status codes and the backend's 422 error
//!   envelope map to entity, validation and server errors
//! - **Logging policy**: only errors that hint at a bug or at client/backend
//!   drift reach the injected [`ErrorLogger`]
//!
//! ## Example
//!
//! ```rust
//! use multisig_errors::{ErrorClassifier, NetworkConfig, RecordingLogger, StatusCode};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(RecordingLogger::new());
//! let classifier = ErrorClassifier::new(&NetworkConfig::default(), logger.clone());
//!
//! let err = classifier.classify_http_response(
//!     StatusCode::UNPROCESSABLE_ENTITY,
//!     Some(br#"{"code": 50, "message": "Safe not found"}"#),
//!     Some("https://backend.example/v1/safes/0x1"),
//! );
//! assert_eq!(err.code(), 42250);
//! assert!(!err.loggable());
//! assert!(logger.is_empty());
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) and the error sink
pub mod logging;

pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod transport;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use classifier::{ErrorClassifier, HttpExchange};
pub use client::{HttpClient, HttpTransport, Transport};
pub use config::NetworkConfig;
pub use core_types::ErrorDomain;
pub use error::{
    wrap, AppError, ConfigError, ErrorKind, FrameworkError, StructuredError, UnexpectedErrorCode,
};
pub use logging::{ErrorLogger, RecordingLogger, TracingLogger};
pub use response::HttpResponseClassifier;
pub use transport::{TransportErrorClassifier, TransportFailure, TransportOutcome};

pub use reqwest::StatusCode;
