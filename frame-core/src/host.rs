//! The hosting editor as seen from the core.

use crate::{EditorConfig, Frame, ModeFlags, Size};

/// Callbacks and state the core needs from the editor that owns the tree.
///
/// Everything here is read or invoked synchronously from the same control
/// flow that delivers pointer input.
pub trait EditorHost {
    /// Target size for laying out the whole tree.
    fn canvas_size(&self) -> Size;

    /// Current modifier/tool state.
    fn modes(&self) -> ModeFlags {
        ModeFlags::default()
    }

    /// Tunables for hit testing and gestures.
    fn config(&self) -> &EditorConfig;

    /// The tree changed and should be repainted.
    fn request_redraw(&mut self) {}

    /// A finished edit was accepted; the host may persist or snapshot `tree`.
    fn on_commit(&mut self, tree: &Frame);

    /// A gesture was cancelled and its edits restored.
    fn on_revert(&mut self);
}
