#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `SuiteError` enum used across the workspace.
//!
//! Contract-shape problems (`ConfigError`) are programmer errors: they abort
//! suite construction. Failures of individual checks are not errors at this
//! level; they are recorded as outcomes in a [`crate::report::RunReport`].

use derive_more::{Display, From};

use crate::validation::{ConfigError, ValidationReport};

/// The Global Error Enum.
///
/// Only the variants marked `#[from]` get a `From` conversion.
#[derive(Debug, Display, From)]
pub enum SuiteError {
    /// The validation pass found one or more configuration errors.
    #[from]
    #[display("Invalid contract surface:\n{_0}")]
    Invalid(ValidationReport),

    /// A configuration error detected while registering (factory changed between passes).
    #[from]
    #[display("Invalid contract surface: {_0}")]
    Config(ConfigError),

    /// An HTTP verb outside the supported set.
    #[display("Unknown HTTP method: {_0}")]
    UnknownMethod(String),

    /// A suite run finished with failing entries.
    #[display("{failed} of {total} test entries failed")]
    Failures {
        /// Number of failed entries.
        failed: usize,
        /// Total number of entries in the run.
        total: usize,
    },

    /// Report serialization failure.
    #[from]
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),
}

/// Manual implementation of the standard Error trait.
///
/// `UnknownMethod(String)` holds a type that does not implement `Error`, so
/// `source()` cannot be derived.
impl std::error::Error for SuiteError {}

/// Helper type alias for Result using SuiteError.
pub type SuiteResult<T> = Result<T, SuiteError>;
