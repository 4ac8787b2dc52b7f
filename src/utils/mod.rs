//! Utility functions for code generation and URL validation.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Pluggable target URL validation

pub mod code_generator;
pub mod url_validator;
