//! Error taxonomy for UI manager operations.
//!
//! Every error is reported and non-fatal: the manager stays usable after any
//! of these. Nothing is retried here; retry policy belongs to the caller.

use thiserror::Error;

use crate::config::ConfigError;
use crate::types::Tag;

/// Errors reported by [`UiManager`](crate::manager::UiManager) operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UiError {
    #[error("unknown view {tag}")]
    UnknownView { tag: Tag },

    #[error("unknown view type {name:?}")]
    UnknownViewType { name: String },

    #[error("view manager {name:?} did not produce a view")]
    ViewCreationFailed { name: String },

    #[error("node without view metadata encountered during {context}")]
    UnmanagedNode { context: &'static str },

    #[error("view {tag} has no view manager to apply properties")]
    NoViewManager { tag: Tag },

    #[error("tag {tag} is already registered to a live view")]
    DuplicateTag { tag: Tag },

    #[error("no root tags left to allocate")]
    RootTagsExhausted,

    #[error("bridge already set, UI manager already initialised")]
    DoubleAttach,

    #[error("UI manager has no bridge attached")]
    NotAttached,

    #[error("index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("index {index} appears more than once in the batch")]
    DuplicateIndex { index: usize },

    #[error("{tags} child tags supplied for {indices} destination indices")]
    MismatchedBatch { tags: usize, indices: usize },

    #[error("view {tag} cannot be added under container {container}: it would contain itself")]
    CyclicHierarchy { tag: Tag, container: Tag },

    #[error("bad arguments for {method}: {reason}")]
    BadArguments { method: String, reason: String },

    #[error("unknown method {method:?}")]
    UnknownMethod { method: String },

    #[error("layout pass failed: {0}")]
    Layout(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl UiError {
    /// Errors logged at error level rather than as warnings.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::UnknownViewType { .. } | Self::UnmanagedNode { .. } | Self::DoubleAttach
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(UiError::UnknownView { tag: 7 }.to_string(), "unknown view 7");
        assert_eq!(
            UiError::IndexOutOfRange { index: 4, len: 2 }.to_string(),
            "index 4 out of range for 2 children"
        );
    }

    #[test]
    fn test_critical_classification() {
        assert!(UiError::DoubleAttach.is_critical());
        assert!(UiError::UnmanagedNode { context: "hit-test" }.is_critical());
        assert!(!UiError::UnknownView { tag: 1 }.is_critical());
    }
}
