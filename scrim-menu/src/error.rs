//! Error types for tree mutation and typed lookups.

use thiserror::Error;

use crate::values::ValueKind;

/// Errors raised by structural mutations and named lookups.
///
/// Structural errors (`DuplicateName`, `InvalidAttach`) are raised before any
/// mutation takes effect; the tree is never left partially modified.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Adding a child whose name collides with an existing sibling.
    #[error("'{parent}' already contains a child named '{name}'")]
    DuplicateName { parent: String, name: String },

    /// Looking up a named child that does not exist.
    #[error("no child named '{0}'")]
    NotFound(String),

    /// Typed value lookup against a child of a different declared kind.
    #[error("child '{name}' is not a {requested} control")]
    TypeMismatch { name: String, requested: ValueKind },

    /// Attaching a menu that is not a root, or whose identity is taken.
    #[error("cannot attach '{name}': {reason}")]
    InvalidAttach { name: String, reason: &'static str },
}
