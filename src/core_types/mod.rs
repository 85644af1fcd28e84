//! Core types shared by the error model and the classifiers
//!
//! ## Organization
//! - `errors` - Error domains and their code ranges

pub mod errors;

// Re-export commonly used types
pub use errors::ErrorDomain;
