//! Physical layout: the frame tree resolved to canvas geometry.
//!
//! ```text
//!   allotted box (raw_origin/raw_size, region)
//!   ┌───────────────────────────┐
//!   │ margin                    │
//!   │  ┌─────────────────────┐  │  origin/size: children tile this box
//!   │  │ padding             │  │
//!   │  │  ┌───────────────┐  │  │
//!   │  │  │   corners     │  │  │  corners: this frame's own cell
//!   │  │  └───────────────┘  │  │
//!   │  └─────────────────────┘  │
//!   └───────────────────────────┘
//! ```
//!
//! A container divides its margin box along its axis in proportion to the
//! children's `raw_size`, after reserving the divider gaps. Boxes are
//! axis-aligned; corners are not. Each gap's center line runs between the
//! parent's two breadth edges and is tilted by the divider slant, and the
//! neighbouring children's facing edges are that line shifted by half the
//! gap. Corners are intersected back onto the parent's edges, so slant
//! inherited from ancestors carries into every descendant.

use serde::{Deserialize, Serialize};

use crate::geometry::line_intersection;
use crate::{
    Axis, Frame, FrameContent, FrameError, FrameId, FrameResult, Insets, Point, Quad, Rect, Size,
};

/// Resolved geometry of one frame. Recomputed after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    /// The frame this node was computed from.
    pub frame: FrameId,
    /// Split axis for containers, `None` for leaves.
    pub axis: Option<Axis>,
    /// Top-left of the allotted box.
    pub raw_origin: Point,
    /// Size of the allotted box.
    pub raw_size: Size,
    /// Allotted quad as handed down by the parent, already sheared.
    pub region: Quad,
    /// Top-left of the margin box.
    pub origin: Point,
    /// Size of the margin box.
    pub size: Size,
    /// Padding in pixels, as removed from the margin box.
    pub padding: Insets,
    /// This frame's own cell after margin, padding and slant.
    pub corners: Quad,
    /// Children in layout order; empty for leaves.
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// Check if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.axis.is_none()
    }

    /// The allotted box.
    #[must_use]
    pub fn raw_rect(&self) -> Rect {
        Rect::from_origin_size(self.raw_origin, self.raw_size)
    }

    /// The margin box.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// The margin box minus padding, before slant.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.rect().inset(&self.padding)
    }

    /// Bounding rectangle of the cell corners.
    #[must_use]
    pub fn cell_bounds(&self) -> Rect {
        self.corners.bounding_rect()
    }

    /// Find the node computed for `id` in this subtree.
    #[must_use]
    pub fn find(&self, id: FrameId) -> Option<&LayoutNode> {
        if self.frame == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Leaves of this subtree in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&LayoutNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a LayoutNode>) {
        if self.is_leaf() {
            out.push(self);
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }
}

/// Lay out `root` into the box at `origin` with `size`.
///
/// Pure: the tree is not modified and equal inputs give equal output.
///
/// # Errors
///
/// Returns [`FrameError::EmptyContainer`] if a container has no children
/// and [`FrameError::NonPositiveSize`] if a container's children have no
/// positive combined size.
pub fn compute_layout(root: &Frame, size: Size, origin: Point) -> FrameResult<LayoutNode> {
    let rect = Rect::from_origin_size(origin, size);
    layout_in_region(root, rect, rect.to_quad())
}

/// Lay out a subtree into an allotted box and quad, as its parent would.
///
/// # Errors
///
/// Same as [`compute_layout`].
pub fn layout_in_region(frame: &Frame, raw: Rect, region: Quad) -> FrameResult<LayoutNode> {
    let margin = frame.margin.non_negative().scaled(raw.size());
    let padding = frame.padding.non_negative().scaled(raw.size());
    let inner = raw.inset(&margin);
    let inner_quad = region.inset(&margin);

    let (axis, children) = match &frame.content {
        FrameContent::Leaf { .. } => (None, Vec::new()),
        FrameContent::Container { axis, children } => {
            if children.is_empty() {
                return Err(FrameError::EmptyContainer(frame.id));
            }
            let children = layout_children(frame.id, *axis, children, inner, inner_quad)?;
            (Some(*axis), children)
        }
    };

    Ok(LayoutNode {
        frame: frame.id,
        axis,
        raw_origin: raw.origin(),
        raw_size: raw.size(),
        region,
        origin: inner.origin(),
        size: inner.size(),
        padding,
        corners: inner_quad.inset(&padding),
        children,
    })
}

/// Axis-aligned span of one child, and the gap that follows it.
struct Slot {
    start: f64,
    length: f64,
    gap: f64,
    slant: f64,
}

fn layout_children(
    parent: FrameId,
    axis: Axis,
    children: &[Frame],
    rect: Rect,
    quad: Quad,
) -> FrameResult<Vec<LayoutNode>> {
    let slots = allot(parent, axis, children, rect)?;
    let length = rect.size().along(axis);
    let breadth = rect.size().along(axis.cross());
    let near = quad.leading_edge(axis.cross());
    let far = quad.trailing_edge(axis.cross());

    // Facing edges of every interior gap: (trailing edge of the child
    // before it, leading edge of the child after it).
    let gaps: Vec<((Point, Point), (Point, Point))> = slots[..slots.len() - 1]
        .iter()
        .map(|slot| {
            let center = slot.start + slot.length + slot.gap * 0.5;
            let f = if length > 0.0 {
                (center - rect.start(axis)) / length
            } else {
                0.0
            };
            let lean = slot.slant.to_radians().tan() * breadth * 0.5;
            let near_pt = near.0.lerp(near.1, f).shifted(axis, -lean);
            let far_pt = far.0.lerp(far.1, f).shifted(axis, lean);
            let half = slot.gap * 0.5;
            (
                clip_to(axis, near_pt, far_pt, -half, near, far),
                clip_to(axis, near_pt, far_pt, half, near, far),
            )
        })
        .collect();

    let last = children.len() - 1;
    children
        .iter()
        .zip(&slots)
        .enumerate()
        .map(|(i, (child, slot))| {
            let leading = if i == 0 {
                quad.leading_edge(axis)
            } else {
                gaps[i - 1].1
            };
            let trailing = if i == last {
                quad.trailing_edge(axis)
            } else {
                gaps[i].0
            };
            let raw = match axis {
                Axis::Row => Rect::new(slot.start, rect.y, slot.length, rect.height),
                Axis::Column => Rect::new(rect.x, slot.start, rect.width, slot.length),
            };
            layout_in_region(child, raw, Quad::from_edges(axis, leading, trailing))
        })
        .collect()
}

/// Split the axis extent of `rect` among `children`.
fn allot(
    parent: FrameId,
    axis: Axis,
    children: &[Frame],
    rect: Rect,
) -> FrameResult<Vec<Slot>> {
    let last = children.len() - 1;
    let raw_total: f64 = children.iter().map(|c| c.raw_size).sum();
    let spacing_total: f64 = children[..last]
        .iter()
        .map(|c| c.divider.effective_spacing())
        .sum();
    let combined = raw_total + spacing_total;
    if !(combined.is_finite() && combined > 0.0) {
        return Err(FrameError::NonPositiveSize(parent));
    }
    let k = rect.size().along(axis) / combined;

    let mut cursor = rect.start(axis);
    Ok(children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let length = child.raw_size * k;
            let gap = if i < last {
                child.divider.effective_spacing() * k
            } else {
                0.0
            };
            let slot = Slot {
                start: cursor,
                length,
                gap,
                slant: child.divider.effective_slant(),
            };
            cursor += length + gap;
            slot
        })
        .collect())
}

/// The line `a..b` moved `shift` along `axis`, with its ends snapped onto
/// the parent's near and far breadth edges.
fn clip_to(
    axis: Axis,
    a: Point,
    b: Point,
    shift: f64,
    near: (Point, Point),
    far: (Point, Point),
) -> (Point, Point) {
    let a = a.shifted(axis, shift);
    let b = b.shifted(axis, shift);
    (
        line_intersection(a, b, near.0, near.1).unwrap_or(a),
        line_intersection(a, b, far.0, far.1).unwrap_or(b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn close_pt(p: Point, x: f64, y: f64) -> bool {
        close(p.x, x) && close(p.y, y)
    }

    #[test]
    fn test_split_leaf_lays_out_evenly() {
        let mut root = Frame::leaf(100.0);
        let id = root.id;
        root.split(id, Axis::Row).expect("should split");

        let layout = compute_layout(&root, Size::new(200.0, 80.0), Point::default())
            .expect("should lay out");
        assert_eq!(layout.children.len(), 2);
        assert!(close(layout.children[0].size.width, 100.0));
        assert!(close(layout.children[1].size.width, 100.0));
        assert!(close(layout.children[1].origin.x, 100.0));
        assert!(close(layout.children[0].size.height, 80.0));
    }

    #[test]
    fn test_spacing_is_subtracted_before_sharing() {
        let root = Frame::row(
            1.0,
            vec![
                Frame::leaf(1.0).with_divider(2.0, 0.0),
                Frame::leaf(3.0).with_divider(2.0, 0.0),
                Frame::leaf(2.0),
            ],
        );
        // total raw 6 + spacing 4 over 200px: k = 20
        let layout = compute_layout(&root, Size::new(200.0, 50.0), Point::default())
            .expect("should lay out");
        let widths: Vec<f64> = layout.children.iter().map(|c| c.size.width).collect();
        assert!(close(widths[0], 20.0));
        assert!(close(widths[1], 60.0));
        assert!(close(widths[2], 40.0));
        assert!(close(layout.children[1].origin.x, 60.0));
        assert!(close(layout.children[2].origin.x, 160.0));
        // the last child's divider never reserves space
        assert!(close(widths.iter().sum::<f64>(), 200.0 - 80.0));
    }

    #[test]
    fn test_slant_shears_facing_edges() {
        let root = Frame::row(
            1.0,
            vec![Frame::leaf(1.0).with_divider(0.0, 45.0), Frame::leaf(1.0)],
        );
        let layout = compute_layout(&root, Size::new(200.0, 100.0), Point::default())
            .expect("should lay out");
        let (a, b) = (&layout.children[0].corners, &layout.children[1].corners);

        assert!(close_pt(a.top_left, 0.0, 0.0));
        assert!(close_pt(a.top_right, 50.0, 0.0));
        assert!(close_pt(a.bottom_right, 150.0, 100.0));
        assert!(close_pt(b.top_left, 50.0, 0.0));
        assert!(close_pt(b.bottom_left, 150.0, 100.0));
        assert!(close_pt(b.bottom_right, 200.0, 100.0));
        // boxes stay axis-aligned
        assert!(close(layout.children[0].size.width, 100.0));
    }

    #[test]
    fn test_nested_slant_stays_on_parent_edges() {
        let root = Frame::column(
            1.0,
            vec![
                Frame::leaf(1.0).with_divider(4.0, 20.0),
                Frame::row(
                    1.0,
                    vec![Frame::leaf(1.0).with_divider(2.0, -10.0), Frame::leaf(1.0)],
                ),
            ],
        );
        let layout = compute_layout(&root, Size::new(300.0, 200.0), Point::default())
            .expect("should lay out");
        let lower = &layout.children[1];
        let top = (lower.region.top_left, lower.region.top_right);

        for child in &lower.children {
            for p in [child.corners.top_left, child.corners.top_right] {
                // on the sheared top edge of the parent
                let cross = (top.1.x - top.0.x) * (p.y - top.0.y) - (top.1.y - top.0.y) * (p.x - top.0.x);
                assert!(cross.abs() < 1e-6, "corner {p:?} left the parent edge");
            }
        }
        assert!(!close(lower.region.top_left.y, lower.region.top_right.y));
    }

    #[test]
    fn test_margin_shrinks_children_padding_only_self() {
        let root = Frame::row(1.0, vec![Frame::leaf(1.0)])
            .with_margin(Insets::new(0.1, 0.0, 0.0, 0.25))
            .with_padding(Insets::new(0.0, 0.1, 0.0, 0.0));
        let layout = compute_layout(&root, Size::new(200.0, 100.0), Point::new(10.0, 20.0))
            .expect("should lay out");

        assert_eq!(layout.raw_origin, Point::new(10.0, 20.0));
        assert!(close_pt(layout.origin, 60.0, 30.0));
        assert!(close(layout.size.width, 150.0));
        assert!(close(layout.size.height, 90.0));
        assert!(close(layout.corners.top_right.x, 190.0));

        let child = &layout.children[0];
        assert_eq!(child.raw_size, layout.size);
        assert!(close(child.corners.top_right.x, 210.0));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let root = crate::templates::four_panel();
        let size = Size::new(840.0, 1188.0);
        let a = compute_layout(&root, size, Point::default()).expect("should lay out");
        let b = compute_layout(&root, size, Point::default()).expect("should lay out");
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_container_fails_loudly() {
        let root = Frame::row(1.0, vec![Frame::leaf(1.0), Frame::column(1.0, Vec::new())]);
        assert!(matches!(
            compute_layout(&root, Size::new(10.0, 10.0), Point::default()),
            Err(FrameError::EmptyContainer(_))
        ));
    }

    #[test]
    fn test_non_positive_combined_size_fails_loudly() {
        let root = Frame::row(1.0, vec![Frame::leaf(1.0), Frame::leaf(-1.0)]);
        assert!(matches!(
            compute_layout(&root, Size::new(10.0, 10.0), Point::default()),
            Err(FrameError::NonPositiveSize(id)) if id == root.id
        ));

        let inner = Frame::column(1.0, vec![Frame::leaf(f64::NAN)]);
        let inner_id = inner.id;
        let root = Frame::row(1.0, vec![Frame::leaf(1.0), inner]);
        assert!(matches!(
            compute_layout(&root, Size::new(10.0, 10.0), Point::default()),
            Err(FrameError::NonPositiveSize(id)) if id == inner_id
        ));
    }

    #[test]
    fn test_find_by_identity() {
        let leaf = Frame::leaf(1.0);
        let id = leaf.id;
        let root = Frame::column(1.0, vec![Frame::leaf(1.0), Frame::row(1.0, vec![leaf])]);
        let layout = compute_layout(&root, Size::new(10.0, 10.0), Point::default())
            .expect("should lay out");
        assert_eq!(layout.find(id).map(|n| n.frame), Some(id));
        assert!(layout.find(FrameId::new()).is_none());
        assert_eq!(layout.leaves().len(), 2);
    }
}
