// Test modules for multisig-errors crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities
pub mod helpers;

// Core unit tests (template compliant)
pub mod catalog;
