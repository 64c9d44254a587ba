#![deny(missing_docs)]

//! # Todos Core
//!
//! Declarative endpoint test-suite generation.
//!
//! A [`ContractSurface`] declares, for each API path, which HTTP methods it
//! offers and the test cases of each method. [`generate`] validates the
//! surface and registers one test entry per case with a [`TestBackend`].
//! [`Harness`] is an in-process backend that runs the registered entries and
//! returns a [`RunReport`].

/// Shared error types.
pub mod error;

/// HTTP verbs.
pub mod method;

/// Contract surface declaration.
pub mod surface;

/// Configuration-shape validation.
pub mod validation;

/// Test backend interface.
pub mod backend;

/// Suite generation.
pub mod generator;

/// In-process backend.
pub mod harness;

/// Run outcomes.
pub mod report;

pub use backend::TestBackend;
pub use error::{SuiteError, SuiteResult};
pub use generator::generate;
pub use harness::{Harness, HarnessConfig};
pub use method::Method;
pub use report::{CaseOutcome, CaseStatus, RunReport};
pub use surface::{
    CaseFailure, Check, CheckResult, ContractSurface, Hook, MethodMap, MethodSpec, PathFactory,
    TestCase,
};
pub use validation::{validate, ConfigError, ValidationReport};
