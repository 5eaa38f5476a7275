//! Divider strips and margin/padding bands.
//!
//! Pure derivations from an already computed [`LayoutNode`]; nothing here
//! re-runs layout. The same quads serve highlight overlays, hit testing and
//! drag projections.

use crate::{Edge, LayoutNode, Quad, Rect};

/// The strip between `children[index - 1]` and `children[index]`.
///
/// The strip spans the gap between the two allotted regions, sheared with
/// the divider, and is widened by `margin` pixels on each side along the
/// container axis. Returns `None` for leaves and for indices that do not
/// name an interior gap.
#[must_use]
pub fn divider_quad(layout: &LayoutNode, index: usize, margin: f64) -> Option<Quad> {
    let axis = layout.axis?;
    if index == 0 || index >= layout.children.len() {
        return None;
    }
    let (b0, b1) = layout.children[index - 1].region.trailing_edge(axis);
    let (a0, a1) = layout.children[index].region.leading_edge(axis);
    Some(Quad::from_edges(
        axis,
        (b0.shifted(axis, -margin), b1.shifted(axis, -margin)),
        (a0.shifted(axis, margin), a1.shifted(axis, margin)),
    ))
}

/// The margin band on `edge`: between the allotted box and the margin box.
///
/// Bands thinner than `min_thickness` grow inward so a zero margin can
/// still be grabbed.
#[must_use]
pub fn margin_band(layout: &LayoutNode, edge: Edge, min_thickness: f64) -> Quad {
    band(layout.raw_rect(), layout.rect(), edge, min_thickness).to_quad()
}

/// The padding band on `edge`: between the margin box and the content box.
#[must_use]
pub fn padding_band(layout: &LayoutNode, edge: Edge, min_thickness: f64) -> Quad {
    band(layout.rect(), layout.content_rect(), edge, min_thickness).to_quad()
}

fn band(outer: Rect, inner: Rect, edge: Edge, min_thickness: f64) -> Rect {
    match edge {
        Edge::Top => {
            let y1 = inner.y.max(outer.y + min_thickness);
            Rect::new(outer.x, outer.y, outer.width, y1 - outer.y)
        }
        Edge::Bottom => {
            let y0 = inner.bottom().min(outer.bottom() - min_thickness);
            Rect::new(outer.x, y0, outer.width, outer.bottom() - y0)
        }
        Edge::Left => {
            let x1 = inner.x.max(outer.x + min_thickness);
            Rect::new(outer.x, outer.y, x1 - outer.x, outer.height)
        }
        Edge::Right => {
            let x0 = inner.right().min(outer.right() - min_thickness);
            Rect::new(x0, outer.y, outer.right() - x0, outer.height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_layout, Frame, Insets, Point, Size};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_divider_quad_spans_gap() {
        let root = Frame::row(
            1.0,
            vec![Frame::leaf(4.0).with_divider(2.0, 0.0), Frame::leaf(4.0)],
        );
        let layout = compute_layout(&root, Size::new(100.0, 50.0), Point::default())
            .expect("should lay out");

        let strip = divider_quad(&layout, 1, 0.0).expect("gap exists");
        let r = strip.bounding_rect();
        assert!(close(r.x, 40.0));
        assert!(close(r.width, 20.0));
        assert!(close(r.height, 50.0));

        let wide = divider_quad(&layout, 1, 5.0).expect("gap exists").bounding_rect();
        assert!(close(wide.x, 35.0));
        assert!(close(wide.width, 30.0));
    }

    #[test]
    fn test_divider_quad_follows_slant() {
        let root = Frame::column(
            1.0,
            vec![Frame::leaf(1.0).with_divider(0.0, 45.0), Frame::leaf(1.0)],
        );
        let layout = compute_layout(&root, Size::new(100.0, 200.0), Point::default())
            .expect("should lay out");
        let strip = divider_quad(&layout, 1, 0.0).expect("gap exists");
        assert!(close(strip.top_left.y, 50.0));
        assert!(close(strip.top_right.y, 150.0));
    }

    #[test]
    fn test_divider_quad_rejects_bad_index() {
        let root = Frame::row(1.0, vec![Frame::leaf(1.0), Frame::leaf(1.0)]);
        let layout = compute_layout(&root, Size::new(10.0, 10.0), Point::default())
            .expect("should lay out");
        assert!(divider_quad(&layout, 0, 0.0).is_none());
        assert!(divider_quad(&layout, 2, 0.0).is_none());
        assert!(divider_quad(&layout.children[0], 1, 0.0).is_none());
    }

    #[test]
    fn test_bands() {
        let root = Frame::leaf(1.0)
            .with_margin(Insets::new(0.1, 0.0, 0.0, 0.0))
            .with_padding(Insets::new(0.0, 0.0, 0.2, 0.0));
        let layout = compute_layout(&root, Size::new(100.0, 100.0), Point::default())
            .expect("should lay out");

        let top = margin_band(&layout, Edge::Top, 0.0).bounding_rect();
        assert_eq!(top, Rect::new(0.0, 0.0, 100.0, 10.0));

        let bottom = padding_band(&layout, Edge::Bottom, 0.0).bounding_rect();
        assert_eq!(bottom, Rect::new(0.0, 80.0, 100.0, 20.0));

        // zero margin still yields a grabbable band
        let left = margin_band(&layout, Edge::Left, 8.0).bounding_rect();
        assert_eq!(left, Rect::new(0.0, 0.0, 8.0, 100.0));
    }
}
