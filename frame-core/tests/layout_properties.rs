//! Layout Property Tests
//!
//! Laws the layout must hold for any tree shape:
//! - Children plus gaps exactly tile the parent's margin box, each child
//!   sized in proportion to its raw size
//! - Slanted edges stay on the parent's boundary
//! - Layout is a pure function of the tree and the target size

use frame_core::{compute_layout, templates, Frame, Point, Size};
use proptest::prelude::*;

fn row_of(sizes: &[(f64, f64, f64)]) -> Frame {
    Frame::row(
        1.0,
        sizes
            .iter()
            .map(|&(raw, spacing, slant)| Frame::leaf(raw).with_divider(spacing, slant))
            .collect(),
    )
}

// ============================================================================
// Conservation
// ============================================================================

proptest! {
    #[test]
    fn prop_children_and_gaps_tile_parent(
        sizes in prop::collection::vec((0.1f64..10.0, 0.0f64..3.0, Just(0.0)), 1..8),
        w in 10.0f64..2000.0,
        h in 10.0f64..2000.0,
    ) {
        let root = row_of(&sizes);
        let layout = compute_layout(&root, Size::new(w, h), Point::default()).expect("should lay out");

        let last = layout.children.len() - 1;
        let raw_total: f64 = sizes.iter().map(|s| s.0).sum();
        let spacing_total: f64 = sizes[..last].iter().map(|s| s.1).sum();
        let k = w / (raw_total + spacing_total);

        let mut cursor = 0.0;
        for (i, child) in layout.children.iter().enumerate() {
            prop_assert!((child.size.width - sizes[i].0 * k).abs() < 1e-6 * w);
            prop_assert!((child.origin.x - cursor).abs() < 1e-6);
            prop_assert!((child.size.height - h).abs() < 1e-6);
            cursor += child.size.width;
            if i < last {
                let gap = layout.children[i + 1].origin.x - (child.origin.x + child.size.width);
                prop_assert!(gap >= -1e-6);
                cursor += gap;
            }
        }
        prop_assert!((cursor - w).abs() < 1e-6 * w);
    }

    #[test]
    fn prop_slanted_corners_stay_on_parent_edges(
        sizes in prop::collection::vec((0.5f64..10.0, 0.0f64..2.0, -45.0f64..45.0), 2..6),
        w in 100.0f64..2000.0,
        h in 100.0f64..2000.0,
    ) {
        let root = row_of(&sizes);
        let layout = compute_layout(&root, Size::new(w, h), Point::default()).expect("should lay out");
        for child in &layout.children {
            let c = child.corners;
            prop_assert!(c.top_left.y.abs() < 1e-6);
            prop_assert!(c.top_right.y.abs() < 1e-6);
            prop_assert!((c.bottom_left.y - h).abs() < 1e-6);
            prop_assert!((c.bottom_right.y - h).abs() < 1e-6);
        }
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_every_template_lays_out_identically_twice() {
    for (name, frame) in templates::all() {
        let size = Size::new(840.0, 1188.0);
        let a = compute_layout(&frame, size, Point::default()).expect("should lay out");
        let b = compute_layout(&frame, size, Point::default()).expect("should lay out");
        assert_eq!(a, b, "{name}");
    }
}

#[test]
fn test_layout_scales_with_size() {
    let frame = templates::two_tier();
    let small = compute_layout(&frame, Size::new(420.0, 594.0), Point::default())
        .expect("should lay out");
    let large = compute_layout(&frame, Size::new(840.0, 1188.0), Point::default())
        .expect("should lay out");
    for (s, l) in small.leaves().into_iter().zip(large.leaves()) {
        assert_eq!(s.frame, l.frame);
        assert!((l.size.width - 2.0 * s.size.width).abs() < 1e-9);
        assert!((l.size.height - 2.0 * s.size.height).abs() < 1e-9);
    }
}
