//! Paint plan: what to draw, in what order.
//!
//! The core does not rasterize. [`paint_list`] flattens a tree and its
//! layout into [`PaintItem`]s that a host renderer draws in sequence.
//! Container backgrounds come first in tree order; leaves follow, sorted by
//! `z` (ties keep tree order). Border colour and width inherit down the
//! tree from the nearest ancestor that sets them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{
    EditorConfig, Frame, FrameContent, FrameError, FrameId, FrameResult, LayoutNode, Point, Quad,
    Rect, Size, Visibility,
};

/// A border stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// CSS colour string.
    pub color: String,
    /// Line width in pixels.
    pub width: f64,
}

/// Where and how to draw a bound image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    /// Host asset key.
    pub source: String,
    /// Canvas position of the image center.
    pub center: Point,
    /// Scale per axis, negative where flipped.
    pub scale: [f64; 2],
    /// Natural image size.
    pub size: Size,
}

/// One drawing step, clipped to `corners`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintItem {
    /// Frame being drawn.
    pub frame: FrameId,
    /// Outline to fill, clip and stroke.
    pub corners: Quad,
    /// Background fill.
    pub fill: Option<String>,
    /// Image drawn inside the outline.
    pub image: Option<ImagePlacement>,
    /// Border drawn over the outline.
    pub stroke: Option<Stroke>,
    /// Allotted box outline shown for leaves with padding.
    pub padding_guide: Option<Rect>,
}

#[derive(Clone)]
struct Inherited<'a> {
    color: Cow<'a, str>,
    width: f64,
}

impl<'a> Inherited<'a> {
    fn under(&self, frame: &'a Frame) -> Self {
        Self {
            color: frame
                .border_color
                .as_deref()
                .map_or_else(|| self.color.clone(), Cow::Borrowed),
            width: frame.border_width.unwrap_or(self.width),
        }
    }
}

/// Build the paint plan for `tree` laid out as `layout`.
///
/// # Errors
///
/// Returns [`FrameError::StaleLayout`] if `layout` was not computed from
/// this tree.
pub fn paint_list(
    tree: &Frame,
    layout: &LayoutNode,
    defaults: &EditorConfig,
) -> FrameResult<Vec<PaintItem>> {
    let root = Inherited {
        color: Cow::Borrowed(&defaults.default_border_color),
        width: defaults.default_border_width,
    };
    let mut items = Vec::new();
    let mut deferred = Vec::new();
    walk(tree, layout, &root, &mut items, &mut deferred)?;

    deferred.sort_by_key(|(frame, _, _)| frame.z);
    items.extend(
        deferred
            .into_iter()
            .filter_map(|(frame, node, ctx)| leaf_item(frame, node, &ctx)),
    );
    Ok(items)
}

type Deferred<'a> = (&'a Frame, &'a LayoutNode, Inherited<'a>);

fn walk<'a>(
    frame: &'a Frame,
    layout: &'a LayoutNode,
    parent: &Inherited<'a>,
    items: &mut Vec<PaintItem>,
    deferred: &mut Vec<Deferred<'a>>,
) -> FrameResult<()> {
    if frame.id != layout.frame {
        return Err(FrameError::StaleLayout {
            expected: layout.frame,
            found: frame.id,
        });
    }
    let ctx = parent.under(frame);
    match &frame.content {
        FrameContent::Leaf { .. } => deferred.push((frame, layout, ctx)),
        FrameContent::Container { children, .. } => {
            if children.len() != layout.children.len() {
                return Err(FrameError::StaleLayout {
                    expected: layout.frame,
                    found: frame.id,
                });
            }
            if frame.visibility != Visibility::Invisible {
                if let Some(fill) = &frame.bg_color {
                    items.push(PaintItem {
                        frame: frame.id,
                        corners: layout.corners,
                        fill: Some(fill.clone()),
                        image: None,
                        stroke: None,
                        padding_guide: None,
                    });
                }
            }
            for (child, node) in children.iter().zip(&layout.children) {
                walk(child, node, &ctx, items, deferred)?;
            }
        }
    }
    Ok(())
}

fn leaf_item(frame: &Frame, layout: &LayoutNode, ctx: &Inherited<'_>) -> Option<PaintItem> {
    if frame.visibility == Visibility::Invisible {
        return None;
    }
    let image = frame.image().map(|image| {
        let center = layout.cell_bounds().center();
        ImagePlacement {
            source: image.source.clone(),
            center: center.offset(image.translation[0], image.translation[1]),
            scale: [
                image.scale[0] * image.reverse[0],
                image.scale[1] * image.reverse[1],
            ],
            size: image.natural_size(),
        }
    });
    let stroke = (frame.visibility == Visibility::Full && ctx.width > 0.0).then(|| Stroke {
        color: ctx.color.clone().into_owned(),
        width: ctx.width,
    });
    let padding_guide = (!frame.padding.is_zero()).then(|| layout.raw_rect());

    Some(PaintItem {
        frame: frame.id,
        corners: layout.corners,
        fill: frame.bg_color.clone(),
        image,
        stroke,
        padding_guide,
    })
}
