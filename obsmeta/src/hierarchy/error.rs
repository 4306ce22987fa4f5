//! Error types for hierarchy-index operations.

use crate::models::SiteId;

/// Result type for hierarchy-index operations
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Error type for hierarchy-index operations.
///
/// All variants are local and recoverable; a failed operation leaves the
/// index exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// The requested adoption would make a site its own ancestor.
    #[error("adopting {id} would make it its own ancestor")]
    CycleWouldForm { id: SiteId },

    /// A hint claimed a site that is already attached elsewhere.
    #[error("site {id} already has parent {parent}")]
    AlreadyHasParent { id: SiteId, parent: SiteId },

    /// Operation on an id that was never inserted.
    #[error("site {0} is not registered")]
    UnknownNode(SiteId),

    /// The id was already inserted; hints are write-once.
    #[error("site {0} is already registered")]
    DuplicateInsert(SiteId),

    /// A parent link points at an id missing from the registry. Carries the
    /// partial path collected before the walk broke, leaf-last.
    #[error("parent chain of {} references unknown site {missing}", path_tail(.path))]
    BrokenLink { missing: SiteId, path: Vec<SiteId> },

    /// The forest traversal and the flat registry disagree.
    #[error("forest does not match registry: {0}")]
    Inconsistent(String),
}

fn path_tail(path: &[SiteId]) -> String {
    path.last()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<empty path>".to_string())
}
