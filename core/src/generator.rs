#![deny(missing_docs)]

//! # Suite Generator
//!
//! Translates a [`ContractSurface`] into nested backend registrations:
//!
//! ```text
//! <path>
//!   <METHOD>
//!     [METHOD] <title>   (one entry per case, in declaration order)
//! ```
//!
//! Generation happens in two passes over the surface:
//! 1. **Validation**: every factory is invoked once and all configuration
//!    errors are collected. Nothing is registered if any are found.
//! 2. **Registration**: every factory is invoked again and its cases are
//!    handed to the backend. Factories must be pure across the two calls; a
//!    method that lost its cases in between still aborts generation.

use crate::backend::TestBackend;
use crate::error::SuiteResult;
use crate::method::Method;
use crate::surface::{ContractSurface, MethodMap, MethodSpec};
use crate::validation::{method_errors, validate};

/// Generates the test suite for `surface` into `backend`.
///
/// # Arguments
///
/// * `surface` - The declared paths, methods and cases.
/// * `backend` - Where groups, hooks and entries are registered.
///
/// # Returns
///
/// * `SuiteResult<()>` - `SuiteError::Invalid` when the validation pass fails,
///   `SuiteError::Config` when a factory yields an invalid method on the second pass.
pub fn generate(surface: &ContractSurface, backend: &mut impl TestBackend) -> SuiteResult<()> {
    // 1. Validate the whole surface before registering anything
    validate(surface)?;

    // 2. Register, path by path
    let mut registered = 0;
    for (path, factory) in surface.entries() {
        let mut methods = factory();
        backend.open_group(path);
        let result = register_path(path, &mut methods, backend);
        backend.close_group();
        registered += result?;
    }

    tracing::info!(
        paths = surface.len(),
        entries = registered,
        "generated endpoint test suite"
    );
    Ok(())
}

fn register_path(
    path: &str,
    methods: &mut MethodMap,
    backend: &mut impl TestBackend,
) -> SuiteResult<usize> {
    let mut registered = 0;
    for method in Method::ALL {
        // Absent on this pass, even if present on the validation pass.
        let Some(spec) = methods.take(method) else {
            continue;
        };
        registered += register_method(path, method, spec, backend)?;
    }
    Ok(registered)
}

fn register_method(
    path: &str,
    method: Method,
    spec: MethodSpec,
    backend: &mut impl TestBackend,
) -> SuiteResult<usize> {
    // Re-check: the factory is only assumed to be pure.
    if let Some(err) = method_errors(path, method, &spec).into_iter().next() {
        return Err(err.into());
    }

    tracing::debug!(path, %method, cases = spec.cases.len(), "registering method");

    backend.open_group(method.as_str());
    if let Some(hook) = spec.setup {
        backend.before_each(hook);
    }

    let count = spec.cases.len();
    for case in spec.cases {
        let label = format!("[{}] {}", method, case.title);
        if case.skip {
            backend.skip(label);
        } else if let Some(check) = case.check {
            backend.test(label, check);
        }
    }
    backend.close_group();

    Ok(count)
}
