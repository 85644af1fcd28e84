//! Logging utilities for multisig-errors
//!
//! Re-exports tracing macros with log_* naming convention for consistency,
//! and defines the sink that loggable errors are reported to.

use crate::error::StructuredError;
use std::sync::Mutex;

// Re-export tracing macros with log_* naming
#[allow(unused_imports)]
pub(crate) use tracing::{
    debug as log_debug,
    error as log_error,
    info as log_info,
    trace as log_trace,
    warn as log_warn,
};

/// Sink for errors that need engineering attention.
///
/// Implementations must be safe to call from several threads at once; the
/// classifiers never order or batch their calls.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorLogger: Send + Sync {
    /// Record `message` together with the error it describes.
    fn log(&self, message: &str, error: &StructuredError);
}

/// Default sink: one ERROR-level `tracing` event per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ErrorLogger for TracingLogger {
    fn log(&self, message: &str, error: &StructuredError) {
        log_error!(
            domain = error.domain().as_str(),
            code = error.code(),
            loggable = error.loggable(),
            request_url = error.request_url().unwrap_or("<no url>"),
            diagnostic = %error.diagnostic(),
            "{message}"
        );
    }
}

/// Sink that keeps every call in memory, for tests.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(String, StructuredError)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded `(message, error)` pairs, oldest first.
    pub fn entries(&self) -> Vec<(String, StructuredError)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorLogger for RecordingLogger {
    fn log(&self, message: &str, error: &StructuredError) {
        let entry = (message.to_string(), error.clone());
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
