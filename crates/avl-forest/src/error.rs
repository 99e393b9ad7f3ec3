use thiserror::Error;

/// Errors reported by the AVL containers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlError {
    /// Faulting lookup of a key the container does not hold.
    #[error("KEY_NOT_FOUND")]
    KeyNotFound,
    /// A structural check failed; the message names the broken property.
    #[error("invariant violated: {0}")]
    Invariant(String),
}
