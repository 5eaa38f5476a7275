//! One-shot edits triggered by keys or toolbar buttons.
//!
//! Unlike a [`crate::Gesture`] these finish immediately: each validates its
//! target, applies the change, re-fits images where geometry moved, asks the
//! host for a redraw and commits.

use tracing::debug;

use crate::constraint::constrain_all;
use crate::{
    compute_layout, Axis, EditorHost, Frame, FrameError, FrameId, FrameResult, ImageBinding, Point,
};

/// Split leaf `id` into two halves along `axis`; returns the new children.
///
/// # Errors
///
/// Returns an error if `id` is missing or not a leaf.
pub fn split<H: EditorHost>(
    tree: &mut Frame,
    host: &mut H,
    id: FrameId,
    axis: Axis,
) -> FrameResult<(FrameId, FrameId)> {
    let ids = tree.split(id, axis)?;
    debug!(%id, ?axis, "Split frame");
    finish(tree, host, true)?;
    Ok(ids)
}

/// Remove frame `id`, collapsing its parent if needed.
///
/// # Errors
///
/// Returns an error if `id` is the root or not in the tree.
pub fn erase<H: EditorHost>(tree: &mut Frame, host: &mut H, id: FrameId) -> FrameResult<()> {
    tree.erase(id)?;
    debug!(%id, "Erased frame");
    finish(tree, host, true)
}

/// Bind `image` to leaf `id`, centered and scaled to just cover the cell.
///
/// Returns the binding it replaced, if any.
///
/// # Errors
///
/// Returns an error if `id` is missing or not a leaf.
pub fn import_image<H: EditorHost>(
    tree: &mut Frame,
    host: &mut H,
    id: FrameId,
    mut image: ImageBinding,
) -> FrameResult<Option<ImageBinding>> {
    let layout = compute_layout(tree, host.canvas_size(), Point::default())?;
    let cell = layout
        .find(id)
        .ok_or(FrameError::FrameNotFound(id))?
        .cell_bounds()
        .size();

    let fit = if image.width > 0.0 && image.height > 0.0 {
        (cell.width / image.width).max(cell.height / image.height)
    } else {
        1.0
    };
    image.scale = [fit, fit];
    image.translation = [0.0, 0.0];

    let frame = tree.find_mut(id).ok_or(FrameError::FrameNotFound(id))?;
    let previous = frame.set_image(Some(image))?;
    debug!(%id, scale = fit, "Imported image");
    finish(tree, host, false)?;
    Ok(previous)
}

/// Unbind the image of leaf `id` and return it.
///
/// # Errors
///
/// Returns an error if `id` is missing, not a leaf, or has no image.
pub fn drop_image<H: EditorHost>(
    tree: &mut Frame,
    host: &mut H,
    id: FrameId,
) -> FrameResult<ImageBinding> {
    let frame = tree.find_mut(id).ok_or(FrameError::FrameNotFound(id))?;
    let image = frame.set_image(None)?.ok_or(FrameError::NoImage(id))?;
    debug!(%id, source = %image.source, "Dropped image");
    finish(tree, host, false)?;
    Ok(image)
}

/// Mirror the image of leaf `id` along `axis`.
///
/// # Errors
///
/// Returns an error if `id` is missing or has no image.
pub fn flip<H: EditorHost>(tree: &mut Frame, host: &mut H, id: FrameId, axis: Axis) -> FrameResult<()> {
    let frame = tree.find_mut(id).ok_or(FrameError::FrameNotFound(id))?;
    frame.image_mut().ok_or(FrameError::NoImage(id))?.flip(axis);
    debug!(%id, ?axis, "Flipped image");
    finish(tree, host, false)
}

/// Move leaf `id` up or down in paint order; returns the new z.
///
/// # Errors
///
/// Returns an error if `id` is missing or not a leaf.
pub fn shift_z<H: EditorHost>(tree: &mut Frame, host: &mut H, id: FrameId, delta: i32) -> FrameResult<i32> {
    let frame = tree.find_mut(id).ok_or(FrameError::FrameNotFound(id))?;
    if !frame.is_leaf() {
        return Err(FrameError::NotALeaf(id));
    }
    frame.z = frame.z.saturating_add(delta);
    let z = frame.z;
    debug!(%id, z, "Shifted paint order");
    finish(tree, host, false)?;
    Ok(z)
}

fn finish<H: EditorHost>(tree: &mut Frame, host: &mut H, relayout: bool) -> FrameResult<()> {
    if relayout {
        constrain_all(tree, host.canvas_size())?;
    }
    host.request_redraw();
    host.on_commit(tree);
    Ok(())
}
