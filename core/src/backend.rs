#![deny(missing_docs)]

//! # Test Backend Trait
//!
//! Defines the interface the suite generator registers entries with. How
//! entries are executed, reported, or parallelised is up to the implementor;
//! [`crate::Harness`] is the in-process implementation shipped with this crate.

use crate::surface::{Check, Hook};

/// A test-execution backend.
///
/// Calls arrive strictly nested: every `open_group` is matched by a
/// `close_group`, and entries belong to the innermost open group.
pub trait TestBackend {
    /// Opens a named group scope.
    fn open_group(&mut self, name: &str);

    /// Closes the innermost open group.
    fn close_group(&mut self);

    /// Registers a hook run before each test of the current group and its sub-groups.
    fn before_each(&mut self, hook: Hook);

    /// Registers an async test entry.
    fn test(&mut self, name: String, check: Check);

    /// Registers an explicitly skipped test entry.
    fn skip(&mut self, name: String);
}
