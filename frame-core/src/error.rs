//! Error types for frame tree operations.

use thiserror::Error;

use crate::FrameId;

/// Result type for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors that can occur in frame operations.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Frame not found in the tree.
    #[error("Frame not found: {0}")]
    FrameNotFound(FrameId),

    /// A container with no children reached layout or validation.
    #[error("Container frame has no children: {0}")]
    EmptyContainer(FrameId),

    /// Two frames in one tree share an id.
    #[error("Duplicate frame id: {0}")]
    DuplicateId(FrameId),

    /// A frame's raw size, or a container's combined raw size, is not positive.
    #[error("Frame has a non-positive size: {0}")]
    NonPositiveSize(FrameId),

    /// The operation needs a leaf frame.
    #[error("Frame is not a leaf: {0}")]
    NotALeaf(FrameId),

    /// The operation needs a container frame.
    #[error("Frame is not a container: {0}")]
    NotAContainer(FrameId),

    /// Divider index does not name a gap between two children.
    #[error("Divider {index} out of range for container {container} with {children} children")]
    DividerOutOfRange {
        /// The container frame.
        container: FrameId,
        /// Requested divider index.
        index: usize,
        /// Number of children in the container.
        children: usize,
    },

    /// The root frame has no parent to be removed from.
    #[error("The root frame cannot be erased")]
    CannotEraseRoot,

    /// A physical layout node no longer matches the frame tree.
    #[error("Layout is stale: expected frame {expected}, found {found}")]
    StaleLayout {
        /// Frame id recorded in the layout node.
        expected: FrameId,
        /// Frame id found at that position in the tree.
        found: FrameId,
    },

    /// The leaf has no bound image.
    #[error("Frame has no image: {0}")]
    NoImage(FrameId),

    /// Tree serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
