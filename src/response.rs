//! Classification of completed HTTP exchanges with a non-2xx status.
//!
//! Decision table, evaluated in order:
//!
//! | Status | Result | Logged |
//! |--------|--------|--------|
//! | 404 | `EntityNotFound` | No |
//! | 422 | see below | depends |
//! | 300..=599 | `ServerSideError` with the status as code | No |
//! | anything else | `UnknownNetworkError` with the status as code | Yes, with the raw body |
//!
//! A 422 carries the backend error envelope `{"code": int, "message": str}`:
//!
//! | Body | Result | Logged |
//! |------|--------|--------|
//! | missing or empty | `UnexpectedError` (missing data) | Yes |
//! | not an envelope | `UnexpectedError` (undecodable) | Yes, with the raw body |
//! | code 1 | `InvalidChecksum` | No |
//! | code 50 | `SafeInfoNotFound` | No |
//! | other code | `UnexpectedError` (unrecognised) | Yes, with code and message |

use crate::error::{StructuredError, UnexpectedErrorCode};
use crate::logging::{log_debug, ErrorLogger};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;

const INVALID_CHECKSUM_CODE: i64 = 1;
const SAFE_INFO_NOT_FOUND_CODE: i64 = 50;

/// Error payload the backend sends with 422 responses.
#[derive(Debug, Deserialize)]
struct BackendError {
    code: i64,
    message: String,
}

/// Maps non-2xx responses to catalog errors, logging the ones that point at
/// a contract mismatch between client and backend.
#[derive(Clone)]
pub struct HttpResponseClassifier {
    logger: Arc<dyn ErrorLogger>,
}

impl std::fmt::Debug for HttpResponseClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponseClassifier").finish_non_exhaustive()
    }
}

impl HttpResponseClassifier {
    pub fn new(logger: Arc<dyn ErrorLogger>) -> Self {
        Self { logger }
    }

    /// Classify a response to the request at `request_url`.
    ///
    /// # Panics
    ///
    /// Panics if `status` is 2xx: callers must only hand over failures.
    pub fn classify(
        &self,
        status: StatusCode,
        body: Option<&[u8]>,
        request_url: Option<&str>,
    ) -> StructuredError {
        assert!(
            !status.is_success(),
            "HTTP {status} is not an error, please check the calling code"
        );

        let error = match status.as_u16() {
            404 => StructuredError::entity_not_found(),
            422 => return self.unprocessable_entity(body, request_url),
            300..=599 => StructuredError::server_side_error(status),
            _ => {
                let error = attach_url(StructuredError::unknown_network_error(status), request_url);
                let data = body.map_or_else(|| "<no data>".to_string(), printable_body);
                self.logger.log(
                    &format!(
                        "Unknown error with status code: {}; Data: {data}",
                        status.as_u16()
                    ),
                    &error,
                );
                return error;
            }
        };

        log_debug!(
            status = status.as_u16(),
            kind = error.kind().name(),
            "HTTP response classified"
        );
        attach_url(error, request_url)
    }

    /// Classify a response when the originating request is not known.
    ///
    /// # Panics
    ///
    /// Panics if `status` is 2xx.
    pub fn classify_without_context(
        &self,
        status: StatusCode,
        body: Option<&[u8]>,
    ) -> StructuredError {
        self.classify(status, body, None)
    }

    fn unprocessable_entity(&self, body: Option<&[u8]>, request_url: Option<&str>) -> StructuredError {
        let Some(body) = body.filter(|body| !body.is_empty()) else {
            let error = attach_url(
                StructuredError::unexpected(UnexpectedErrorCode::MissingResponseData),
                request_url,
            );
            self.logger
                .log("Missing data in unprocessableEntity error", &error);
            return error;
        };

        match serde_json::from_slice::<BackendError>(body) {
            Ok(BackendError {
                code: INVALID_CHECKSUM_CODE,
                ..
            }) => attach_url(StructuredError::invalid_checksum(), request_url),
            Ok(BackendError {
                code: SAFE_INFO_NOT_FOUND_CODE,
                ..
            }) => attach_url(StructuredError::safe_info_not_found(), request_url),
            Ok(BackendError { code, message }) => {
                let error = attach_url(
                    StructuredError::unexpected(UnexpectedErrorCode::UnrecognisedBackendCode),
                    request_url,
                );
                self.logger.log(
                    &format!("Unrecognised error with code: {code}; message: {message}"),
                    &error,
                );
                error
            }
            Err(decode_error) => {
                log_debug!(error = %decode_error, "Backend error envelope did not decode");
                let error = attach_url(
                    StructuredError::unexpected(UnexpectedErrorCode::UndecodableErrorDetails),
                    request_url,
                );
                self.logger.log(
                    &format!(
                        "Could not decode error details from the data: {}",
                        printable_body(body)
                    ),
                    &error,
                );
                error
            }
        }
    }
}

fn attach_url(error: StructuredError, request_url: Option<&str>) -> StructuredError {
    match request_url {
        Some(url) => error.with_request_url(url),
        None => error,
    }
}

/// UTF-8 text when the body is text, base64 otherwise.
fn printable_body(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => STANDARD.encode(body),
    }
}
