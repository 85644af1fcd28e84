//! Transport outcomes and the classifier for failed connections.
//!
//! A request either completes with an HTTP status (successful or not) or
//! fails before any response arrives. [`TransportOutcome`] makes that split
//! explicit; [`TransportErrorClassifier`] turns the connection failures users
//! commonly hit into catalog errors and passes everything else through.

use crate::error::{AppError, FrameworkError, StructuredError};
use crate::logging::log_debug;
use reqwest::StatusCode;
use std::time::Duration;

/// Platform URL-loading codes understood by [`TransportFailure::from_platform_code`].
pub mod platform_codes {
    pub const TIMED_OUT: i64 = -1001;
    pub const CANNOT_FIND_HOST: i64 = -1003;
    pub const NOT_CONNECTED_TO_INTERNET: i64 = -1009;
    pub const SECURE_CONNECTION_FAILED: i64 = -1200;
}

/// Why a request produced no HTTP response.
#[derive(Debug)]
pub enum TransportFailure {
    NotConnected,
    SecureConnectionFailed,
    TimedOut,
    CannotFindHost,
    /// Anything else; carried through classification untouched.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportFailure {
    /// Map a platform URL-loading error code. Unknown codes become
    /// [`TransportFailure::Other`] wrapping `source`, or a generic error
    /// naming the code when there is no source.
    pub fn from_platform_code(
        code: i64,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match code {
            platform_codes::NOT_CONNECTED_TO_INTERNET => Self::NotConnected,
            platform_codes::SECURE_CONNECTION_FAILED => Self::SecureConnectionFailed,
            platform_codes::TIMED_OUT => Self::TimedOut,
            platform_codes::CANNOT_FIND_HOST => Self::CannotFindHost,
            _ => match source {
                Some(source) => Self::Other(source),
                None => Self::Other(Box::new(FrameworkError::new(format!(
                    "The operation couldn’t be completed. (URL error {code})"
                )))),
            },
        }
    }
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConnected => f.write_str("not connected to the network"),
            Self::SecureConnectionFailed => f.write_str("secure connection failed"),
            Self::TimedOut => f.write_str("request timed out"),
            Self::CannotFindHost => f.write_str("cannot find host"),
            Self::Other(err) => write!(f, "{err}"),
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::TimedOut;
        }
        if err.is_connect() {
            if let Some(failure) = classify_connect_chain(&err) {
                return failure;
            }
        }
        Self::Other(Box::new(err))
    }
}

/// Find a connectivity condition in the source chain of a connect error.
///
/// `std::io::Error` kinds are checked first; the chain text is the fallback
/// for causes the resolver and TLS stack only describe in words.
pub(crate) fn classify_connect_chain(
    err: &(dyn std::error::Error + 'static),
) -> Option<TransportFailure> {
    let mut cause = Some(err);
    while let Some(current) = cause {
        if let Some(io) = current.downcast_ref::<std::io::Error>() {
            match io.kind() {
                std::io::ErrorKind::TimedOut => return Some(TransportFailure::TimedOut),
                std::io::ErrorKind::NotConnected | std::io::ErrorKind::AddrNotAvailable => {
                    return Some(TransportFailure::NotConnected)
                }
                // rustls surfaces handshake failures as InvalidData
                std::io::ErrorKind::InvalidData => {
                    return Some(TransportFailure::SecureConnectionFailed)
                }
                _ => {}
            }
        }
        cause = current.source();
    }

    let chain = error_chain_text(err).to_lowercase();
    if chain.contains("dns error") || chain.contains("failed to lookup address") {
        return Some(TransportFailure::CannotFindHost);
    }
    if chain.contains("certificate") || chain.contains("tls") || chain.contains("handshake") {
        return Some(TransportFailure::SecureConnectionFailed);
    }
    if chain.contains("network is unreachable") || chain.contains("network is down") {
        return Some(TransportFailure::NotConnected);
    }
    None
}

fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// What the transport layer produced for one request.
#[derive(Debug)]
pub enum TransportOutcome {
    /// An HTTP exchange completed, with any status.
    Completed {
        status: StatusCode,
        body: Option<Vec<u8>>,
    },
    /// No response was obtained.
    Failed(TransportFailure),
}

/// Maps connection failures to connectivity errors.
///
/// None of these are logged: they describe the user's environment, not a bug.
#[derive(Debug, Clone, Copy)]
pub struct TransportErrorClassifier {
    request_timeout: Duration,
}

impl TransportErrorClassifier {
    /// `request_timeout` is only used to word the `TimeOut` reason.
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn classify(&self, failure: TransportFailure) -> AppError {
        let classified = match failure {
            TransportFailure::NotConnected => StructuredError::no_internet(),
            TransportFailure::SecureConnectionFailed => StructuredError::secure_connection_failed(),
            TransportFailure::TimedOut => StructuredError::time_out(self.request_timeout),
            TransportFailure::CannotFindHost => StructuredError::unknown_host(),
            TransportFailure::Other(err) => {
                log_debug!(error = %err, "Transport failure left unclassified");
                return AppError::Framework(FrameworkError::from_error(err.as_ref()));
            }
        };

        log_debug!(
            kind = classified.kind().name(),
            code = classified.code(),
            "Transport failure classified"
        );
        AppError::Structured(classified)
    }
}
