//! Spatial queries over a computed layout.
//!
//! Probes return borrowed [`LayoutNode`]s, which keep the layout alive
//! only as long as the caller looks at it. Anything that outlives a
//! mutation should be turned into a value-only [`Target`] first.

use serde::{Deserialize, Serialize};

use crate::trapezoid::{divider_quad, margin_band, padding_band};
use crate::{Edge, EditorConfig, FrameId, LayoutNode, ModeFlags, Point, Quad};

/// A divider under the pointer.
#[derive(Debug, Clone, Copy)]
pub struct DividerHit<'a> {
    /// The container owning the divider.
    pub layout: &'a LayoutNode,
    /// Gap index: between `children[index - 1]` and `children[index]`.
    pub index: usize,
    /// The hit strip, including the hit margin.
    pub quad: Quad,
}

/// A margin or padding band under the pointer.
#[derive(Debug, Clone, Copy)]
pub struct BandHit<'a> {
    /// The frame owning the band.
    pub layout: &'a LayoutNode,
    /// Which side.
    pub edge: Edge,
    /// The hit band.
    pub quad: Quad,
}

/// What a pointer press resolved to, by identity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Target {
    /// A content cell.
    Leaf(FrameId),
    /// A gap between two children.
    Divider {
        /// The container.
        container: FrameId,
        /// Gap index.
        index: usize,
    },
    /// A margin band.
    Margin {
        /// The frame.
        frame: FrameId,
        /// Which side.
        edge: Edge,
    },
    /// A padding band.
    Padding {
        /// The frame.
        frame: FrameId,
        /// Which side.
        edge: Edge,
    },
}

impl DividerHit<'_> {
    /// Identity of the hit divider.
    #[must_use]
    pub fn target(&self) -> Target {
        Target::Divider {
            container: self.layout.frame,
            index: self.index,
        }
    }
}

/// Find the divider strip containing `point`; inner containers win.
///
/// Strips are widened by `config.divider_hit_margin` on both sides.
#[must_use]
pub fn find_divider_at<'a>(
    layout: &'a LayoutNode,
    point: Point,
    config: &EditorConfig,
) -> Option<DividerHit<'a>> {
    if let Some(hit) = layout
        .children
        .iter()
        .find_map(|c| find_divider_at(c, point, config))
    {
        return Some(hit);
    }
    (1..layout.children.len()).find_map(|index| {
        let quad = divider_quad(layout, index, config.divider_hit_margin)?;
        quad.contains(point).then_some(DividerHit {
            layout,
            index,
            quad,
        })
    })
}

/// Find the margin band containing `point`; descendants win over ancestors.
#[must_use]
pub fn find_margin_at<'a>(
    layout: &'a LayoutNode,
    point: Point,
    config: &EditorConfig,
) -> Option<BandHit<'a>> {
    find_band_at(layout, point, config.band_hit_thickness, margin_band)
}

/// Find the padding band containing `point`; descendants win over ancestors.
#[must_use]
pub fn find_padding_at<'a>(
    layout: &'a LayoutNode,
    point: Point,
    config: &EditorConfig,
) -> Option<BandHit<'a>> {
    find_band_at(layout, point, config.band_hit_thickness, padding_band)
}

fn find_band_at(
    layout: &LayoutNode,
    point: Point,
    min_thickness: f64,
    band: fn(&LayoutNode, Edge, f64) -> Quad,
) -> Option<BandHit<'_>> {
    if !layout.raw_rect().contains(point) {
        return None;
    }
    if let Some(hit) = layout
        .children
        .iter()
        .find_map(|c| find_band_at(c, point, min_thickness, band))
    {
        return Some(hit);
    }
    Edge::ALL.into_iter().find_map(|edge| {
        let quad = band(layout, edge, min_thickness);
        quad.contains(point)
            .then_some(BandHit { layout, edge, quad })
    })
}

/// Find the innermost leaf whose cell contains `point`.
#[must_use]
pub fn find_layout_at(layout: &LayoutNode, point: Point) -> Option<&LayoutNode> {
    if layout.is_leaf() {
        return layout.corners.contains(point).then_some(layout);
    }
    layout
        .children
        .iter()
        .find_map(|c| find_layout_at(c, point))
}

/// Find the node computed for `id`, e.g. to refresh a target after relayout.
#[must_use]
pub fn find_layout_of(layout: &LayoutNode, id: FrameId) -> Option<&LayoutNode> {
    layout.find(id)
}

/// Resolve a pointer press to a target.
///
/// Precedence: divider, then margin band (only with `margin_edit`), then
/// padding band (only with `padding_edit`), then leaf. Points outside the
/// root's allotted box resolve to nothing.
#[must_use]
pub fn resolve_target(
    layout: &LayoutNode,
    point: Point,
    modes: ModeFlags,
    config: &EditorConfig,
) -> Option<Target> {
    if !layout.raw_rect().contains(point) {
        return None;
    }
    if let Some(hit) = find_divider_at(layout, point, config) {
        return Some(hit.target());
    }
    if modes.margin_edit {
        if let Some(hit) = find_margin_at(layout, point, config) {
            return Some(Target::Margin {
                frame: hit.layout.frame,
                edge: hit.edge,
            });
        }
    }
    if modes.padding_edit {
        if let Some(hit) = find_padding_at(layout, point, config) {
            return Some(Target::Padding {
                frame: hit.layout.frame,
                edge: hit.edge,
            });
        }
    }
    find_layout_at(layout, point).map(|leaf| Target::Leaf(leaf.frame))
}
