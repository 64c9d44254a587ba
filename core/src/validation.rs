#![deny(missing_docs)]

//! # Contract Validation
//!
//! The pass that runs to completion before any test registration begins.
//! Every configuration error on the surface is collected, so an author sees
//! all of the missing coverage at once.

use std::fmt;

use derive_more::Display;

use crate::method::Method;
use crate::surface::{ContractSurface, MethodSpec};

/// A contract-shape error. Fatal at suite-construction time.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigError {
    /// A present method has an empty case sequence.
    #[display("No test cases for {method} {path}: add a test case or mark one as skipped")]
    MissingCases {
        /// Offending path.
        path: String,
        /// Offending method.
        method: Method,
    },

    /// A non-skipped case has no check.
    #[display(
        "Test case #{index} for {method} {path} has no check: supply a check or mark it as skipped"
    )]
    MissingCheck {
        /// Offending path.
        path: String,
        /// Offending method.
        method: Method,
        /// Zero-based position of the case in its method's sequence.
        index: usize,
    },

    /// The same path was declared twice.
    #[display("Path {path} is declared more than once")]
    DuplicatePath {
        /// Offending path.
        path: String,
    },
}

impl ConfigError {
    /// The path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            ConfigError::MissingCases { path, .. }
            | ConfigError::MissingCheck { path, .. }
            | ConfigError::DuplicatePath { path } => path,
        }
    }
}

/// Every configuration error found on a surface, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport(Vec<ConfigError>);

impl ValidationReport {
    /// The collected errors.
    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }

    /// Number of collected errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", err)?;
        }
        Ok(())
    }
}

/// Validates the whole surface, invoking each path factory once.
///
/// # Returns
///
/// * `Ok(())` if every present method has cases and every non-skipped case has a check.
/// * `Err(ValidationReport)` listing every violation otherwise.
pub fn validate(surface: &ContractSurface) -> Result<(), ValidationReport> {
    let mut errors = Vec::new();

    for (path, factory) in surface.entries() {
        let methods = factory();
        for method in methods.present() {
            if let Some(spec) = methods.get_spec(method) {
                errors.extend(method_errors(path, method, spec));
            }
        }
    }

    errors.extend(
        surface
            .duplicates()
            .iter()
            .map(|path| ConfigError::DuplicatePath { path: path.clone() }),
    );

    if errors.is_empty() {
        tracing::debug!(paths = surface.len(), "contract surface is valid");
        Ok(())
    } else {
        tracing::warn!(errors = errors.len(), "contract surface is invalid");
        Err(ValidationReport(errors))
    }
}

/// Configuration errors of a single (path, method) pair.
pub(crate) fn method_errors(path: &str, method: Method, spec: &MethodSpec) -> Vec<ConfigError> {
    if spec.cases.is_empty() {
        return vec![ConfigError::MissingCases {
            path: path.to_string(),
            method,
        }];
    }

    spec.cases
        .iter()
        .enumerate()
        .filter(|(_, case)| !case.skip && case.check.is_none())
        .map(|(index, _)| ConfigError::MissingCheck {
            path: path.to_string(),
            method,
            index,
        })
        .collect()
}
