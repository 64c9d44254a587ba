#![deny(missing_docs)]

//! # Contract Surface
//!
//! Static declaration of API paths, the methods each path offers, and the
//! test cases attached to every offered method.
//!
//! A path maps to a *factory* rather than to a value. The factory is a pure
//! builder: the generator invokes it once per pass (validation, then
//! registration) and relies on it returning an equivalent [`MethodMap`] each
//! time. Fixtures captured by case checks are therefore built fresh on every
//! call instead of being shared across passes.
//!
//! ```
//! use todos_core::{ContractSurface, MethodMap, MethodSpec, TestCase};
//!
//! let surface = ContractSurface::new().path("/todos/", || {
//!     MethodMap::new().get(MethodSpec::new().case(TestCase::new("lists").check(|| async {
//!         Ok(())
//!     })))
//! });
//! assert_eq!(surface.len(), 1);
//! ```

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use derive_more::Display;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use indexmap::IndexMap;

use crate::method::Method;

/// Outcome of a case check or setup hook.
pub type CheckResult = Result<(), CaseFailure>;

/// A one-shot async check. Consumed when its test entry runs.
pub type Check = Box<dyn FnOnce() -> LocalBoxFuture<'static, CheckResult>>;

/// A setup hook, invoked before every case of the method it belongs to.
pub type Hook = Rc<dyn Fn() -> LocalBoxFuture<'static, CheckResult>>;

/// Builder invoked once per generation pass to produce a path's methods.
pub type PathFactory = Box<dyn Fn() -> MethodMap>;

/// Why a check (or the hook preceding it) failed.
///
/// Converts from any `std::error::Error`, so `?` works inside checks. It does
/// not implement `Error` itself, which keeps that blanket conversion coherent.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{message}")]
pub struct CaseFailure {
    message: String,
}

impl CaseFailure {
    /// Creates a failure from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: std::error::Error> From<E> for CaseFailure {
    fn from(err: E) -> Self {
        Self::msg(err.to_string())
    }
}

/// A single declared test case.
pub struct TestCase {
    /// Human-readable title. Empty by default.
    pub title: String,
    /// Skipped cases are registered but their check never runs.
    pub skip: bool,
    /// The executable check. May only be absent when `skip` is set.
    pub check: Option<Check>,
}

impl TestCase {
    /// Creates a case with the given title and no check yet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            skip: false,
            check: None,
        }
    }

    /// Creates a skipped case without a check.
    pub fn skipped(title: impl Into<String>) -> Self {
        Self::new(title).skip()
    }

    /// Attaches the async check.
    pub fn check<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = CheckResult> + 'static,
    {
        self.check = Some(Box::new(move || f().boxed_local()));
        self
    }

    /// Marks the case as skipped. Any attached check is kept but never invoked.
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }
}

impl Default for TestCase {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("title", &self.title)
            .field("skip", &self.skip)
            .field("check", &self.check.is_some())
            .finish()
    }
}

/// Test cases and optional setup hook for one (path, method) pair.
#[derive(Default)]
pub struct MethodSpec {
    /// Runs before each case of this method.
    pub setup: Option<Hook>,
    /// Cases, in execution order.
    pub cases: Vec<TestCase>,
}

impl MethodSpec {
    /// Creates an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the setup hook.
    pub fn setup<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = CheckResult> + 'static,
    {
        self.setup = Some(Rc::new(move || f().boxed_local()));
        self
    }

    /// Appends a case.
    pub fn case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }
}

impl fmt::Debug for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSpec")
            .field("setup", &self.setup.is_some())
            .field("cases", &self.cases)
            .finish()
    }
}

/// The methods a path offers: one slot per [`Method`], either absent or
/// present with its [`MethodSpec`].
#[derive(Debug, Default)]
pub struct MethodMap {
    slots: [Option<MethodSpec>; Method::COUNT],
}

impl MethodMap {
    /// Creates a map with every method absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `method` as present.
    pub fn with(mut self, method: Method, spec: MethodSpec) -> Self {
        self.slots[method.index()] = Some(spec);
        self
    }

    /// Declares `GET`.
    pub fn get(self, spec: MethodSpec) -> Self {
        self.with(Method::Get, spec)
    }

    /// Declares `POST`.
    pub fn post(self, spec: MethodSpec) -> Self {
        self.with(Method::Post, spec)
    }

    /// Declares `PUT`.
    pub fn put(self, spec: MethodSpec) -> Self {
        self.with(Method::Put, spec)
    }

    /// Declares `PATCH`.
    pub fn patch(self, spec: MethodSpec) -> Self {
        self.with(Method::Patch, spec)
    }

    /// Declares `DELETE`.
    pub fn delete(self, spec: MethodSpec) -> Self {
        self.with(Method::Delete, spec)
    }

    /// Present methods, in [`Method::ALL`] order.
    pub fn present(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.slots[m.index()].is_some())
            .collect()
    }

    /// The [`MethodSpec`] of `method`, if present.
    pub fn get_spec(&self, method: Method) -> Option<&MethodSpec> {
        self.slots[method.index()].as_ref()
    }

    /// Moves the [`MethodSpec`] of `method` out of the map.
    pub fn take(&mut self, method: Method) -> Option<MethodSpec> {
        self.slots[method.index()].take()
    }
}

/// Path -> factory mapping, in declaration order.
#[derive(Default)]
pub struct ContractSurface {
    paths: IndexMap<String, PathFactory>,
    duplicates: Vec<String>,
}

impl ContractSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a path.
    ///
    /// A path declared twice keeps its first factory; the repeat is reported
    /// by [`crate::validate`].
    pub fn path<F>(mut self, path: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> MethodMap + 'static,
    {
        let path = path.into();
        if self.paths.contains_key(&path) {
            self.duplicates.push(path);
        } else {
            self.paths.insert(path, Box::new(factory));
        }
        self
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no path is declared.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Declared paths, in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Invokes every factory once and lists the methods each path offers.
    ///
    /// Intended for tests that cross-check a surface against an API
    /// document; the generator does not use it.
    pub fn declared(&self) -> Vec<(String, Vec<Method>)> {
        self.paths
            .iter()
            .map(|(path, factory)| (path.clone(), factory().present()))
            .collect()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &PathFactory)> {
        self.paths.iter().map(|(p, f)| (p.as_str(), f))
    }

    pub(crate) fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

impl fmt::Debug for ContractSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractSurface")
            .field("paths", &self.paths.keys().collect::<Vec<_>>())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}
