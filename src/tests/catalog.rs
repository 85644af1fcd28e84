// Unit Tests for the Error Catalog
//
// UNIT UNDER TEST: ErrorKind::catalog, ErrorDomain
//
// BUSINESS RESPONSIBILITY:
//   - Every kind owns codes no other kind uses
//   - Every code lies in its domain's reserved range
//   - Backend analytics can recover the domain from a bare code
//
// TEST COVERAGE:
//   - Code uniqueness across the whole catalog
//   - Domain range membership and disjointness
//   - Stable domain tags

use crate::core_types::ErrorDomain;
use crate::error::{ErrorKind, UnexpectedErrorCode};
use reqwest::StatusCode;
use std::collections::HashMap;

#[cfg(test)]
mod catalog_invariant_tests {
    use super::*;

    #[test]
    fn test_no_code_is_shared_by_two_kinds() {
        // Test verifies codes are unique across the closed catalog
        // Ensures a support code always identifies exactly one failure

        // Arrange
        let mut seen: HashMap<i64, ErrorKind> = HashMap::new();

        // Act & Assert
        for kind in ErrorKind::catalog() {
            if let Some(previous) = seen.insert(kind.code(), *kind) {
                panic!(
                    "code {} used by both {} and {}",
                    kind.code(),
                    previous.name(),
                    kind.name()
                );
            }
        }
        assert_eq!(seen.len(), ErrorKind::catalog().len());
    }

    #[test]
    fn test_domain_is_recoverable_from_every_code() {
        // Test verifies code ranges partition the catalog by domain

        for kind in ErrorKind::catalog() {
            assert_eq!(
                ErrorDomain::from_code(kind.code()),
                Some(kind.domain()),
                "{} ({}) is outside its domain range",
                kind.name(),
                kind.code()
            );
        }
    }

    #[test]
    fn test_domain_ranges_are_disjoint() {
        // Test verifies no code can belong to two domains

        for (i, a) in ErrorDomain::ALL.iter().enumerate() {
            for b in ErrorDomain::ALL.iter().skip(i + 1) {
                for range_a in a.code_ranges() {
                    for range_b in b.code_ranges() {
                        let overlaps = range_a.start() <= range_b.end()
                            && range_b.start() <= range_a.end();
                        assert!(!overlaps, "{a} and {b} overlap");
                    }
                }
            }
        }
    }

    #[test]
    fn test_catalog_covers_status_carrying_kinds() {
        // Test verifies enumeration includes one entry per possible status

        // Arrange
        let catalog = ErrorKind::catalog();

        // Act & Assert
        assert!(catalog.contains(&ErrorKind::ServerSideError {
            status: StatusCode::INTERNAL_SERVER_ERROR
        }));
        assert!(catalog.contains(&ErrorKind::UnknownNetworkError {
            status: StatusCode::CONTINUE
        }));
        assert!(!catalog.contains(&ErrorKind::ServerSideError {
            status: StatusCode::NOT_FOUND
        }));
        for code in UnexpectedErrorCode::ALL {
            assert!(catalog.contains(&ErrorKind::UnexpectedError(code)));
        }
    }

    #[test]
    fn test_domain_tags_are_stable() {
        assert_eq!(ErrorDomain::Network.as_str(), "NetworkError");
        assert_eq!(ErrorDomain::ClientValidation.as_str(), "CommonClientError");
        assert_eq!(ErrorDomain::Application.as_str(), "ApplicationError");
        assert_eq!(ErrorDomain::TransportWrapper.as_str(), "HTTPClientError");
        assert_eq!(ErrorDomain::from_code(1200), None);
    }
}

#[cfg(test)]
mod connectivity_code_history_tests {
    use super::*;

    #[test]
    fn test_connectivity_kinds_moved_from_101_104_to_1001_1004() {
        // Test verifies the renumbering documented on ErrorKind for support

        // Arrange
        let moved = [
            (ErrorKind::NoInternet, 101, 1001),
            (ErrorKind::SecureConnectionFailed, 102, 1002),
            (ErrorKind::TimeOut, 103, 1003),
            (ErrorKind::UnknownHost, 104, 1004),
        ];

        // Act & Assert
        for (kind, old_code, new_code) in moved {
            assert_eq!(kind.code(), new_code);
            assert_eq!(ErrorDomain::from_code(new_code), Some(ErrorDomain::Network));
            let holder = ErrorKind::catalog()
                .iter()
                .find(|k| k.code() == old_code)
                .map(|k| k.name());
            assert_ne!(holder, Some(kind.name()), "{old_code} still names {}", kind.name());
        }
    }
}
