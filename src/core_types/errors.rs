//! Error domains and their numeric code ranges.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Group of related error kinds.
///
/// Every domain owns disjoint code ranges, so support and backend analytics
/// can recover the domain from a bare code with [`ErrorDomain::from_code`].
///
/// | Domain | Tag | Codes |
/// |--------|-----|-------|
/// | `Network` | `NetworkError` | `100..=1099`, `42200..=42299` |
/// | `ClientValidation` | `CommonClientError` | `1100..=1199` |
/// | `Application` | `ApplicationError` | `1300..=1399` |
/// | `TransportWrapper` | `HTTPClientError` | `-99_999_999..=-1` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorDomain {
    /// Connectivity failures and HTTP-derived errors.
    #[serde(rename = "NetworkError")]
    Network,

    /// Input the user can correct (names, seed phrases, signatures).
    #[serde(rename = "CommonClientError")]
    ClientValidation,

    /// Bugs and inconsistent application state.
    #[serde(rename = "ApplicationError")]
    Application,

    /// Failures of the request plumbing itself.
    #[serde(rename = "HTTPClientError")]
    TransportWrapper,
}

impl ErrorDomain {
    pub const ALL: [ErrorDomain; 4] = [
        ErrorDomain::Network,
        ErrorDomain::ClientValidation,
        ErrorDomain::Application,
        ErrorDomain::TransportWrapper,
    ];

    /// Stable string tag reported alongside the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "NetworkError",
            Self::ClientValidation => "CommonClientError",
            Self::Application => "ApplicationError",
            Self::TransportWrapper => "HTTPClientError",
        }
    }

    /// Code ranges reserved for this domain.
    pub fn code_ranges(&self) -> &'static [RangeInclusive<i64>] {
        const NETWORK: [RangeInclusive<i64>; 2] = [100..=1099, 42200..=42299];
        const CLIENT: [RangeInclusive<i64>; 1] = [1100..=1199];
        const APPLICATION: [RangeInclusive<i64>; 1] = [1300..=1399];
        const TRANSPORT: [RangeInclusive<i64>; 1] = [-99_999_999..=-1];

        match self {
            Self::Network => &NETWORK,
            Self::ClientValidation => &CLIENT,
            Self::Application => &APPLICATION,
            Self::TransportWrapper => &TRANSPORT,
        }
    }

    pub fn contains(&self, code: i64) -> bool {
        self.code_ranges().iter().any(|range| range.contains(&code))
    }

    /// Domain owning `code`, if any.
    pub fn from_code(code: i64) -> Option<ErrorDomain> {
        Self::ALL.into_iter().find(|domain| domain.contains(code))
    }
}

impl std::fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
