//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while routing and evaluating
//! salary calculations. Formulas themselves are total functions; errors only
//! arise from lookups in closed sets (countries, US states, regional codes)
//! and from configuration loading.

use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedCountry {
///     code: "BR".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported country: BR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The country code is outside the supported set of jurisdictions.
    #[error("Unsupported country: {code}")]
    UnsupportedCountry {
        /// The code that was requested.
        code: String,
    },

    /// A US state code was not found in the state tax table.
    #[error("Unknown US state code: {code}")]
    UnknownStateCode {
        /// The code that was requested.
        code: String,
    },

    /// A generic option could not be narrowed to a country-specific value.
    #[error("Invalid option '{field}': {message}")]
    InvalidOption {
        /// The option field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A bracket table was not contiguous, did not start at zero, or was not progressive.
    #[error("Invalid bracket table: {message}")]
    InvalidBracketTable {
        /// A description of the defect.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
