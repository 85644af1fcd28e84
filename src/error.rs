//! Structured errors and the closed error catalog.
//!
//! Every failure that reaches the UI is a [`StructuredError`]: a value with a
//! domain, a stable numeric code, a short description, the reason it happened,
//! a remediation hint and a `loggable` flag. The set of kinds is closed and
//! enumerated by [`ErrorKind`]; no two kinds share a code.
//!
//! # Rendering
//!
//! ```rust
//! use multisig_errors::StructuredError;
//!
//! let err = StructuredError::no_internet();
//! assert_eq!(
//!     err.to_string(),
//!     "No Internet: Device is not connected to the Internet. \
//!      Please try again when Internet is available (Error 1001)"
//! );
//! ```
//!
//! # Wrapping
//!
//! Screens attach their own description while keeping the classification:
//!
//! ```rust
//! use multisig_errors::{wrap, StructuredError};
//!
//! let err = wrap("Failed to load Safe", StructuredError::entity_not_found());
//! assert_eq!(err.description(), "Failed to load Safe");
//! assert_eq!(err.code(), 404);
//! ```

use crate::core_types::ErrorDomain;
use reqwest::StatusCode;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::time::Duration;
use thiserror::Error;

const SUPPORT_HINT: &str = "Please reach out to the Safe support";
const REINSTALL_HINT: &str = "Please reinstall the Safe app";
const UNPROCESSABLE_ENTITY: &str = "HTTP 422 Unprocessable Entity";

// ============================================================================
// Catalog
// ============================================================================

/// Reserved codes of the generic [`ErrorKind::UnexpectedError`] bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnexpectedErrorCode {
    /// The backend envelope decoded but its code is not one we know.
    UnrecognisedBackendCode,
    /// A 422 response arrived without a body.
    MissingResponseData,
    /// A 422 body could not be decoded as the backend envelope.
    UndecodableErrorDetails,
}

impl UnexpectedErrorCode {
    pub const ALL: [UnexpectedErrorCode; 3] = [
        UnexpectedErrorCode::UnrecognisedBackendCode,
        UnexpectedErrorCode::MissingResponseData,
        UnexpectedErrorCode::UndecodableErrorDetails,
    ];

    pub fn code(&self) -> i64 {
        match self {
            Self::UnrecognisedBackendCode => 1320,
            Self::MissingResponseData => 1321,
            Self::UndecodableErrorDetails => 1322,
        }
    }
}

/// Every kind of error the client knows about.
///
/// | Kind | Domain | Code | Loggable |
/// |------|--------|------|----------|
/// | `NoInternet` | Network | 1001 | No |
/// | `SecureConnectionFailed` | Network | 1002 | No |
/// | `TimeOut` | Network | 1003 | No |
/// | `UnknownHost` | Network | 1004 | No |
/// | `EntityNotFound` | Network | 404 | No |
/// | `InvalidChecksum` | Network | 42201 | No |
/// | `SafeInfoNotFound` | Network | 42250 | No |
/// | `ServerSideError` | Network | HTTP status | No |
/// | `UnknownNetworkError` | Network | HTTP status | Yes |
/// | `WrongSeedPhrase` | ClientValidation | 1103 | No |
/// | `TransactionSigningError` | ClientValidation | 1104 | No |
/// | `InvalidSafeName` | ClientValidation | 1110 | No |
/// | `UnknownAppError` | Application | 1300 | Yes |
/// | `PreconditionsForSigningNotSatisfied` | Application | 1304 | Yes |
/// | `KeychainError` | Application | 1305 | Yes |
/// | `DatabaseError` | Application | 1306 | Yes |
/// | `UnexpectedError` | Application | 1320..=1322 | Yes |
/// | `NetworkRequestFailed` | TransportWrapper | -80001 | Yes |
///
/// Builds before the connectivity kinds moved out of the informational
/// status range reported `NoInternet`, `SecureConnectionFailed`, `TimeOut`
/// and `UnknownHost` as 101, 102, 103 and 104.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoInternet,
    SecureConnectionFailed,
    TimeOut,
    UnknownHost,
    EntityNotFound,
    InvalidChecksum,
    SafeInfoNotFound,
    /// Any 3xx, 4xx or 5xx other than 404 and 422.
    ServerSideError { status: StatusCode },
    /// A status the classifier has no rule for.
    UnknownNetworkError { status: StatusCode },

    WrongSeedPhrase,
    TransactionSigningError,
    InvalidSafeName,

    UnknownAppError,
    PreconditionsForSigningNotSatisfied,
    KeychainError,
    DatabaseError,
    UnexpectedError(UnexpectedErrorCode),

    NetworkRequestFailed,
}

impl ErrorKind {
    /// Stable code used for support and analytics correlation.
    pub fn code(&self) -> i64 {
        match self {
            Self::NoInternet => 1001,
            Self::SecureConnectionFailed => 1002,
            Self::TimeOut => 1003,
            Self::UnknownHost => 1004,
            Self::EntityNotFound => 404,
            Self::InvalidChecksum => 42201,
            Self::SafeInfoNotFound => 42250,
            Self::ServerSideError { status } | Self::UnknownNetworkError { status } => {
                i64::from(status.as_u16())
            }
            Self::WrongSeedPhrase => 1103,
            Self::TransactionSigningError => 1104,
            Self::InvalidSafeName => 1110,
            Self::UnknownAppError => 1300,
            Self::PreconditionsForSigningNotSatisfied => 1304,
            Self::KeychainError => 1305,
            Self::DatabaseError => 1306,
            Self::UnexpectedError(code) => code.code(),
            Self::NetworkRequestFailed => -80001,
        }
    }

    pub fn domain(&self) -> ErrorDomain {
        match self {
            Self::NoInternet
            | Self::SecureConnectionFailed
            | Self::TimeOut
            | Self::UnknownHost
            | Self::EntityNotFound
            | Self::InvalidChecksum
            | Self::SafeInfoNotFound
            | Self::ServerSideError { .. }
            | Self::UnknownNetworkError { .. } => ErrorDomain::Network,
            Self::WrongSeedPhrase | Self::TransactionSigningError | Self::InvalidSafeName => {
                ErrorDomain::ClientValidation
            }
            Self::UnknownAppError
            | Self::PreconditionsForSigningNotSatisfied
            | Self::KeychainError
            | Self::DatabaseError
            | Self::UnexpectedError(_) => ErrorDomain::Application,
            Self::NetworkRequestFailed => ErrorDomain::TransportWrapper,
        }
    }

    /// Whether occurrences should reach the logging sink.
    ///
    /// Conditions caused by the user's environment or by well-understood
    /// validation outcomes are not logged; anything hinting at a bug or at
    /// drift between client and backend is.
    pub fn loggable(&self) -> bool {
        match self {
            Self::NoInternet
            | Self::SecureConnectionFailed
            | Self::TimeOut
            | Self::UnknownHost
            | Self::EntityNotFound
            | Self::InvalidChecksum
            | Self::SafeInfoNotFound
            | Self::ServerSideError { .. }
            | Self::WrongSeedPhrase
            | Self::TransactionSigningError
            | Self::InvalidSafeName => false,
            Self::UnknownNetworkError { .. }
            | Self::UnknownAppError
            | Self::PreconditionsForSigningNotSatisfied
            | Self::KeychainError
            | Self::DatabaseError
            | Self::UnexpectedError(_)
            | Self::NetworkRequestFailed => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NoInternet => "NoInternet",
            Self::SecureConnectionFailed => "SecureConnectionFailed",
            Self::TimeOut => "TimeOut",
            Self::UnknownHost => "UnknownHost",
            Self::EntityNotFound => "EntityNotFound",
            Self::InvalidChecksum => "InvalidChecksum",
            Self::SafeInfoNotFound => "SafeInfoNotFound",
            Self::ServerSideError { .. } => "ServerSideError",
            Self::UnknownNetworkError { .. } => "UnknownNetworkError",
            Self::WrongSeedPhrase => "WrongSeedPhrase",
            Self::TransactionSigningError => "TransactionSigningError",
            Self::InvalidSafeName => "InvalidSafeName",
            Self::UnknownAppError => "UnknownAppError",
            Self::PreconditionsForSigningNotSatisfied => "PreconditionsForSigningNotSatisfied",
            Self::KeychainError => "KeychainError",
            Self::DatabaseError => "DatabaseError",
            Self::UnexpectedError(_) => "UnexpectedError",
            Self::NetworkRequestFailed => "NetworkRequestFailed",
        }
    }

    /// Every concrete kind, including one entry per status code a
    /// status-carrying kind can hold.
    pub fn catalog() -> &'static [ErrorKind] {
        &CATALOG
    }
}

static CATALOG: once_cell::sync::Lazy<Vec<ErrorKind>> = once_cell::sync::Lazy::new(|| {
    let mut kinds = vec![
        ErrorKind::NoInternet,
        ErrorKind::SecureConnectionFailed,
        ErrorKind::TimeOut,
        ErrorKind::UnknownHost,
        ErrorKind::EntityNotFound,
        ErrorKind::InvalidChecksum,
        ErrorKind::SafeInfoNotFound,
        ErrorKind::WrongSeedPhrase,
        ErrorKind::TransactionSigningError,
        ErrorKind::InvalidSafeName,
        ErrorKind::UnknownAppError,
        ErrorKind::PreconditionsForSigningNotSatisfied,
        ErrorKind::KeychainError,
        ErrorKind::DatabaseError,
        ErrorKind::NetworkRequestFailed,
    ];
    kinds.extend(
        UnexpectedErrorCode::ALL
            .into_iter()
            .map(ErrorKind::UnexpectedError),
    );
    for raw in 100u16..=999 {
        let Ok(status) = StatusCode::from_u16(raw) else {
            continue;
        };
        match raw {
            200..=299 | 404 | 422 => {}
            300..=599 => kinds.push(ErrorKind::ServerSideError { status }),
            _ => kinds.push(ErrorKind::UnknownNetworkError { status }),
        }
    }
    kinds
});

// ============================================================================
// Structured error
// ============================================================================

/// The canonical error value shown to users and sent to the logging sink.
///
/// `domain`, `code` and `loggable` come from the [`ErrorKind`]; the three
/// text fields are filled from the catalog and may be replaced by [`wrap`].
/// `request_url` is diagnostic only and never part of the rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}: {reason} {how_to_fix} (Error {code})", code = .kind.code())]
pub struct StructuredError {
    kind: ErrorKind,
    description: String,
    reason: String,
    how_to_fix: String,
    request_url: Option<String>,
}

/// Serialized for analytics and crash-report payloads:
/// `{"domain", "kind", "code", "description", "reason", "how_to_fix", "loggable", "request_url"}`.
impl Serialize for StructuredError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StructuredError", 8)?;
        state.serialize_field("domain", &self.domain())?;
        state.serialize_field("kind", self.kind.name())?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("reason", &self.reason)?;
        state.serialize_field("how_to_fix", &self.how_to_fix)?;
        state.serialize_field("loggable", &self.loggable())?;
        state.serialize_field("request_url", &self.request_url)?;
        state.end()
    }
}

impl StructuredError {
    fn from_parts(
        kind: ErrorKind,
        description: impl Into<String>,
        reason: impl Into<String>,
        how_to_fix: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            reason: reason.into(),
            how_to_fix: how_to_fix.into(),
            request_url: None,
        }
    }

    /// Attach the URL of the request that failed.
    pub fn with_request_url(mut self, url: impl Into<String>) -> Self {
        self.request_url = Some(url.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn domain(&self) -> ErrorDomain {
        self.kind.domain()
    }

    pub fn code(&self) -> i64 {
        self.kind.code()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn how_to_fix(&self) -> &str {
        &self.how_to_fix
    }

    pub fn loggable(&self) -> bool {
        self.kind.loggable()
    }

    pub fn request_url(&self) -> Option<&str> {
        self.request_url.as_deref()
    }

    /// One-line description for log output, e.g.
    /// `[EntityNotFound]: Request failed: https://host/safes/0x1`.
    pub fn diagnostic(&self) -> String {
        format!(
            "[{}]: Request failed: {}",
            self.kind.name(),
            self.request_url.as_deref().unwrap_or("<no url>")
        )
    }

    // =========================================================================
    // Network errors
    // =========================================================================

    pub fn no_internet() -> Self {
        Self::from_parts(
            ErrorKind::NoInternet,
            "No Internet",
            "Device is not connected to the Internet.",
            "Please try again when Internet is available",
        )
    }

    pub fn secure_connection_failed() -> Self {
        Self::from_parts(
            ErrorKind::SecureConnectionFailed,
            "SSL connection failed",
            "SSL connection failed.",
            "Please try again later",
        )
    }

    /// `timeout` is the configured request timeout, rendered in whole seconds.
    pub fn time_out(timeout: Duration) -> Self {
        Self::from_parts(
            ErrorKind::TimeOut,
            "Request timed out",
            format!("Request timed out after {:.0}s.", timeout.as_secs_f64()),
            "Please refresh the screen",
        )
    }

    pub fn unknown_host() -> Self {
        Self::from_parts(
            ErrorKind::UnknownHost,
            "Unknown host, connection error",
            "Server not reachable.",
            "Please try again when Internet is available",
        )
    }

    pub fn entity_not_found() -> Self {
        Self::from_parts(
            ErrorKind::EntityNotFound,
            "HTTP 404 Not Found",
            "Safe not found.",
            "Please check that the Safe exists on the blockchain",
        )
    }

    pub fn invalid_checksum() -> Self {
        Self::from_parts(
            ErrorKind::InvalidChecksum,
            UNPROCESSABLE_ENTITY,
            "Address format is not valid.",
            SUPPORT_HINT,
        )
    }

    pub fn safe_info_not_found() -> Self {
        Self::from_parts(
            ErrorKind::SafeInfoNotFound,
            UNPROCESSABLE_ENTITY,
            "Safe info is not found.",
            SUPPORT_HINT,
        )
    }

    pub fn server_side_error(status: StatusCode) -> Self {
        Self::from_parts(
            ErrorKind::ServerSideError { status },
            "HTTP 3xx, 4xx, 5xx",
            "Server-side error.",
            "Please try again later or contact Safe support if the issue persists",
        )
    }

    pub fn unknown_network_error(status: StatusCode) -> Self {
        Self::from_parts(
            ErrorKind::UnknownNetworkError { status },
            "Unknown error",
            "Unexpected network error.",
            SUPPORT_HINT,
        )
    }

    // =========================================================================
    // Client validation errors
    // =========================================================================

    pub fn wrong_seed_phrase() -> Self {
        Self::from_parts(
            ErrorKind::WrongSeedPhrase,
            "Can’t use this seed phrase",
            "This is not a valid seed phrase for an Ethereum account.",
            "Please correct the error or use another seed phrase",
        )
    }

    pub fn transaction_signing_error() -> Self {
        Self::from_parts(
            ErrorKind::TransactionSigningError,
            "Failed to confirm transaction",
            "Computed safeTxHash of a transaction to confirm does not match server-returned value.",
            "Please reload the data or check that your network is secure.",
        )
    }

    pub fn invalid_safe_name() -> Self {
        Self::from_parts(
            ErrorKind::InvalidSafeName,
            "Can’t use this name",
            "This value is not a valid name.",
            "Name should not be empty",
        )
    }

    // =========================================================================
    // Application errors
    // =========================================================================

    pub fn unknown_app_error(
        description: impl Into<String>,
        reason: impl Into<String>,
        how_to_fix: impl Into<String>,
    ) -> Self {
        Self::from_parts(ErrorKind::UnknownAppError, description, reason, how_to_fix)
    }

    pub fn preconditions_for_signing_not_satisfied(description: impl Into<String>) -> Self {
        Self::from_parts(
            ErrorKind::PreconditionsForSigningNotSatisfied,
            description,
            "Something is wrong either with the transaction data or with the application state (database, selected Safe, etc.)",
            REINSTALL_HINT,
        )
    }

    pub fn keychain_error(reason: impl Into<String>) -> Self {
        Self::from_parts(ErrorKind::KeychainError, "Keychain error", reason, REINSTALL_HINT)
    }

    pub fn database_error(reason: impl Into<String>) -> Self {
        Self::from_parts(ErrorKind::DatabaseError, "Database error", reason, REINSTALL_HINT)
    }

    /// Generic fallback for backend responses we cannot interpret.
    pub fn unexpected(code: UnexpectedErrorCode) -> Self {
        Self::from_parts(
            ErrorKind::UnexpectedError(code),
            UNPROCESSABLE_ENTITY,
            "Network request failed with an unexpected error.",
            SUPPORT_HINT,
        )
    }

    // =========================================================================
    // Transport wrapper errors
    // =========================================================================

    pub fn network_request_failed() -> Self {
        Self::from_parts(
            ErrorKind::NetworkRequestFailed,
            "Network request failed",
            "The network request failed.",
            "Please try again later",
        )
    }
}

// ============================================================================
// Unclassified errors and normalization
// ============================================================================

/// Text of an error that has not been classified, as reported by whatever
/// library produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct FrameworkError {
    pub description: String,
    pub failure_reason: Option<String>,
    pub recovery_suggestion: Option<String>,
}

impl FrameworkError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            failure_reason: None,
            recovery_suggestion: None,
        }
    }

    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }

    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Capture the text of any error; its direct source becomes the failure reason.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            description: err.to_string(),
            failure_reason: err.source().map(|source| source.to_string()),
            recovery_suggestion: None,
        }
    }
}

/// Result of any classification: either a catalog error or an error that
/// was passed through unclassified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Structured(StructuredError),

    #[error(transparent)]
    Framework(FrameworkError),
}

impl AppError {
    pub fn as_structured(&self) -> Option<&StructuredError> {
        match self {
            Self::Structured(err) => Some(err),
            Self::Framework(_) => None,
        }
    }

    /// Unclassified errors are treated as loggable.
    pub fn loggable(&self) -> bool {
        match self {
            Self::Structured(err) => err.loggable(),
            Self::Framework(_) => true,
        }
    }
}

impl From<StructuredError> for AppError {
    fn from(err: StructuredError) -> Self {
        Self::Structured(err)
    }
}

impl From<FrameworkError> for AppError {
    fn from(err: FrameworkError) -> Self {
        Self::Framework(err)
    }
}

/// Give `error` a screen-specific `description`, guaranteeing the result is
/// a [`StructuredError`].
///
/// Structured input keeps its kind, reason, remediation and request URL.
/// Unclassified input becomes an `UnknownAppError` built from whatever text
/// it carries.
pub fn wrap(description: impl Into<String>, error: impl Into<AppError>) -> StructuredError {
    let description = description.into();
    match error.into() {
        AppError::Structured(inner) => StructuredError {
            description,
            ..inner
        },
        AppError::Framework(inner) => StructuredError::unknown_app_error(
            description,
            inner.failure_reason.unwrap_or(inner.description),
            inner.recovery_suggestion.unwrap_or_default(),
        ),
    }
}

// ============================================================================
// Configuration errors
// ============================================================================

/// Invalid or unreadable [`NetworkConfig`](crate::config::NetworkConfig).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("User agent must not be empty")]
    EmptyUserAgent,

    #[error("Invalid value for {variable}: {value}")]
    InvalidEnvValue { variable: String, value: String },
}
