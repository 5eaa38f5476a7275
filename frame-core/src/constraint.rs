//! Keeps bound images covering their cells.
//!
//! Every geometry edit ends here: the affected leaves are re-fitted so that
//! no cell ever shows background around its image. Scale only grows (the
//! aspect ratio is preserved), and translation is clamped so the scaled
//! image still spans the cell on both axes.

use tracing::trace;

use crate::{
    compute_layout, layout_in_region, Frame, FrameContent, FrameError, FrameResult, ImageBinding,
    LayoutNode, Point, Size,
};

/// Fit `image` so it covers a cell of `cell` size.
///
/// Returns `true` if the binding changed.
pub fn cover_fit(image: &mut ImageBinding, cell: Size) -> bool {
    if image.width <= 0.0 || image.height <= 0.0 {
        return false;
    }
    let before = (image.scale, image.translation);
    for s in &mut image.scale {
        if !(s.is_finite() && *s > 0.0) {
            *s = 1.0;
        }
    }

    let grow = 1.0_f64
        .max(cell.width / (image.width * image.scale[0]))
        .max(cell.height / (image.height * image.scale[1]));
    if grow > 1.0 {
        image.scale[0] *= grow;
        image.scale[1] *= grow;
    }

    let scaled = image.scaled_size();
    let slack = [
        ((scaled.width - cell.width) * 0.5).max(0.0),
        ((scaled.height - cell.height) * 0.5).max(0.0),
    ];
    for (t, limit) in image.translation.iter_mut().zip(slack) {
        *t = if t.is_finite() { t.clamp(-limit, limit) } else { 0.0 };
    }

    (image.scale, image.translation) != before
}

/// Re-fit the image of the leaf computed as `layout`.
///
/// Containers and leaves without an image are left alone.
///
/// # Errors
///
/// Returns [`FrameError::FrameNotFound`] if `layout` names a frame that is
/// no longer in the tree.
pub fn constrain_leaf(root: &mut Frame, layout: &LayoutNode) -> FrameResult<()> {
    let frame = root
        .find_mut(layout.frame)
        .ok_or(FrameError::FrameNotFound(layout.frame))?;
    fit_frame(frame, layout);
    Ok(())
}

/// Re-fit every leaf under `layout`.
///
/// # Errors
///
/// Returns [`FrameError::FrameNotFound`] if the subtree root is missing and
/// [`FrameError::StaleLayout`] if the tree no longer has the shape the
/// layout was computed from.
pub fn constrain_recursive(root: &mut Frame, layout: &LayoutNode) -> FrameResult<()> {
    let frame = root
        .find_mut(layout.frame)
        .ok_or(FrameError::FrameNotFound(layout.frame))?;
    walk(frame, layout)
}

/// Re-lay-out the subtree of `layout` in its existing allotted box, then
/// re-fit every leaf in it. Returns the fresh subtree layout.
///
/// # Errors
///
/// Propagates lookup and layout errors.
pub fn constrain_tree(root: &mut Frame, layout: &LayoutNode) -> FrameResult<LayoutNode> {
    let frame = root
        .find(layout.frame)
        .ok_or(FrameError::FrameNotFound(layout.frame))?;
    let fresh = layout_in_region(frame, layout.raw_rect(), layout.region)?;
    constrain_recursive(root, &fresh)?;
    Ok(fresh)
}

/// Lay out the whole tree at `size` and re-fit every leaf.
///
/// # Errors
///
/// Propagates layout errors.
pub fn constrain_all(root: &mut Frame, size: Size) -> FrameResult<LayoutNode> {
    let layout = compute_layout(root, size, Point::default())?;
    walk(root, &layout)?;
    Ok(layout)
}

fn walk(frame: &mut Frame, layout: &LayoutNode) -> FrameResult<()> {
    if frame.id != layout.frame {
        return Err(FrameError::StaleLayout {
            expected: layout.frame,
            found: frame.id,
        });
    }
    if let FrameContent::Container { children, .. } = &mut frame.content {
        if children.len() != layout.children.len() {
            let i = children.len().min(layout.children.len());
            return Err(FrameError::StaleLayout {
                expected: layout.children.get(i).map_or(layout.frame, |n| n.frame),
                found: children.get(i).map_or(layout.frame, |f| f.id),
            });
        }
        for (child, node) in children.iter_mut().zip(&layout.children) {
            walk(child, node)?;
        }
        return Ok(());
    }
    if !layout.is_leaf() {
        return Err(FrameError::StaleLayout {
            expected: layout.children[0].frame,
            found: frame.id,
        });
    }
    fit_frame(frame, layout);
    Ok(())
}

fn fit_frame(frame: &mut Frame, layout: &LayoutNode) {
    let id = frame.id;
    if let Some(image) = frame.image_mut() {
        if cover_fit(image, layout.cell_bounds().size()) {
            trace!(frame = %id, scale = ?image.scale, translation = ?image.translation, "Image re-fitted");
        }
    }
}
