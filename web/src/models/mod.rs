//! Resource models.

/// Todo items.
pub mod todos;
/// Re-export todo models for convenient access.
pub use todos::*;
