//! Pointer-driven edits with commit and cancel.
//!
//! A [`Gesture`] is one press-drag-release interaction. It captures a value
//! copy of everything it may touch when it starts, recomputes the edit from
//! that baseline on every [`Gesture::step`], and ends with exactly one of
//! [`Gesture::commit`] or [`Gesture::cancel`]:
//!
//! ```text
//!   begin ──► step* ──┬──► commit   host.on_commit(tree)
//!                     ├──► cancel   baseline restored, host.on_revert()
//!                     └──► drop     same as cancel, logged as a warning
//! ```
//!
//! The gesture holds the tree and the host by exclusive borrow, so nothing
//! else can edit the tree while a drag is in flight.

use tracing::{debug, trace, warn};

use crate::constraint::{constrain_leaf, constrain_recursive, constrain_tree};
use crate::geometry::EPSILON;
use crate::query::Target;
use crate::{
    clamp_slant, compute_layout, Axis, Divider, Edge, EditorHost, Frame, FrameError, FrameId,
    FrameResult, ImageBinding, LayoutNode, Point,
};

/// What a divider drag changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerMode {
    /// Redistribute size between the two neighbours.
    Move,
    /// Widen or narrow the gap.
    Expand,
    /// Tilt the gap.
    Slant,
}

/// What an image drag changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// Move the image inside its cell.
    Pan,
    /// Zoom the image.
    Scale,
}

/// Which inset a band drag edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsetKind {
    Margin,
    Padding,
}

/// Values captured at gesture start.
#[derive(Debug, Clone)]
enum Baseline {
    Divider {
        container: FrameId,
        index: usize,
        mode: DividerMode,
        axis: Axis,
        /// Pixel start of `children[index - 1]` and end of `children[index]`.
        span: (f64, f64),
        /// Raw sizes of the two neighbours.
        sizes: (f64, f64),
        divider: Divider,
        raw_per_px: f64,
        raw_total: f64,
        snapshot: Frame,
    },
    Inset {
        kind: InsetKind,
        edge: Edge,
        layout: LayoutNode,
        snapshot: Frame,
    },
    Image {
        mode: ImageMode,
        image: ImageBinding,
        cell: LayoutNode,
    },
}

/// An in-flight edit of the frame tree.
pub struct Gesture<'a, H: EditorHost> {
    tree: &'a mut Frame,
    host: &'a mut H,
    start: Point,
    baseline: Baseline,
    finished: bool,
}

impl<'a, H: EditorHost> Gesture<'a, H> {
    /// Start a drag on divider `index` of `container`.
    ///
    /// # Errors
    ///
    /// Returns an error if `container` is missing or a leaf, if `index` does
    /// not name a gap between two children, or if the tree cannot be laid
    /// out.
    pub fn divider(
        tree: &'a mut Frame,
        host: &'a mut H,
        container: FrameId,
        index: usize,
        start: Point,
        mode: DividerMode,
    ) -> FrameResult<Self> {
        let frame = tree
            .find(container)
            .ok_or(FrameError::FrameNotFound(container))?;
        let axis = frame.axis().ok_or(FrameError::NotAContainer(container))?;
        let children = frame.children();
        if index == 0 || index >= children.len() {
            return Err(FrameError::DividerOutOfRange {
                container,
                index,
                children: children.len(),
            });
        }

        let layout = compute_layout(tree, host.canvas_size(), Point::default())?;
        let node = layout
            .find(container)
            .ok_or(FrameError::FrameNotFound(container))?;
        let span = (
            node.children[index - 1].raw_origin.along(axis),
            node.children[index].raw_rect().end(axis),
        );

        let raw_total: f64 = children.iter().map(|c| c.raw_size).sum();
        let spacing_total: f64 = children[..children.len() - 1]
            .iter()
            .map(|c| c.divider.effective_spacing())
            .sum();
        let length = node.size.along(axis);
        let raw_per_px = if length > EPSILON {
            (raw_total + spacing_total) / length
        } else {
            0.0
        };

        let baseline = Baseline::Divider {
            container,
            index,
            mode,
            axis,
            span,
            sizes: (children[index - 1].raw_size, children[index].raw_size),
            divider: children[index - 1].divider,
            raw_per_px,
            raw_total,
            snapshot: frame.clone(),
        };
        debug!(%container, index, ?mode, "Divider gesture started");
        Ok(Self::new(tree, host, start, baseline))
    }

    /// Start a drag on the image of `leaf`.
    ///
    /// # Errors
    ///
    /// Returns an error if `leaf` is missing, is a container or has no
    /// image, or if the tree cannot be laid out.
    pub fn image(
        tree: &'a mut Frame,
        host: &'a mut H,
        leaf: FrameId,
        start: Point,
        mode: ImageMode,
    ) -> FrameResult<Self> {
        let frame = tree.find(leaf).ok_or(FrameError::FrameNotFound(leaf))?;
        if !frame.is_leaf() {
            return Err(FrameError::NotALeaf(leaf));
        }
        let image = frame.image().cloned().ok_or(FrameError::NoImage(leaf))?;

        let layout = compute_layout(tree, host.canvas_size(), Point::default())?;
        let cell = layout
            .find(leaf)
            .cloned()
            .ok_or(FrameError::FrameNotFound(leaf))?;

        debug!(%leaf, ?mode, "Image gesture started");
        let baseline = Baseline::Image { mode, image, cell };
        Ok(Self::new(tree, host, start, baseline))
    }

    /// Start a drag on the `edge` margin band of `frame`.
    ///
    /// # Errors
    ///
    /// Returns an error if `frame` is missing or the tree cannot be laid out.
    pub fn margin(
        tree: &'a mut Frame,
        host: &'a mut H,
        frame: FrameId,
        edge: Edge,
        start: Point,
    ) -> FrameResult<Self> {
        Self::inset(tree, host, frame, edge, start, InsetKind::Margin)
    }

    /// Start a drag on the `edge` padding band of `frame`.
    ///
    /// # Errors
    ///
    /// Returns an error if `frame` is missing or the tree cannot be laid out.
    pub fn padding(
        tree: &'a mut Frame,
        host: &'a mut H,
        frame: FrameId,
        edge: Edge,
        start: Point,
    ) -> FrameResult<Self> {
        Self::inset(tree, host, frame, edge, start, InsetKind::Padding)
    }

    fn inset(
        tree: &'a mut Frame,
        host: &'a mut H,
        frame: FrameId,
        edge: Edge,
        start: Point,
        kind: InsetKind,
    ) -> FrameResult<Self> {
        let snapshot = tree
            .find(frame)
            .cloned()
            .ok_or(FrameError::FrameNotFound(frame))?;
        let layout = compute_layout(tree, host.canvas_size(), Point::default())?;
        let layout = layout
            .find(frame)
            .cloned()
            .ok_or(FrameError::FrameNotFound(frame))?;

        debug!(%frame, ?edge, ?kind, "Inset gesture started");
        let baseline = Baseline::Inset {
            kind,
            edge,
            layout,
            snapshot,
        };
        Ok(Self::new(tree, host, start, baseline))
    }

    /// Start whatever gesture `target` calls for under the host's modes.
    ///
    /// Dividers expand with the expand modifier, slant with the slant
    /// modifier and move otherwise; images scale with the expand modifier
    /// and pan otherwise.
    ///
    /// # Errors
    ///
    /// Same as the specific constructors.
    pub fn begin(
        tree: &'a mut Frame,
        host: &'a mut H,
        target: Target,
        start: Point,
    ) -> FrameResult<Self> {
        let modes = host.modes();
        match target {
            Target::Leaf(leaf) => {
                let mode = if modes.expand {
                    ImageMode::Scale
                } else {
                    ImageMode::Pan
                };
                Self::image(tree, host, leaf, start, mode)
            }
            Target::Divider { container, index } => {
                let mode = if modes.expand {
                    DividerMode::Expand
                } else if modes.slant {
                    DividerMode::Slant
                } else {
                    DividerMode::Move
                };
                Self::divider(tree, host, container, index, start, mode)
            }
            Target::Margin { frame, edge } => Self::margin(tree, host, frame, edge, start),
            Target::Padding { frame, edge } => Self::padding(tree, host, frame, edge, start),
        }
    }

    fn new(tree: &'a mut Frame, host: &'a mut H, start: Point, baseline: Baseline) -> Self {
        Self {
            tree,
            host,
            start,
            baseline,
            finished: false,
        }
    }

    /// Where the pointer went down.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The tree as currently edited.
    #[must_use]
    pub fn tree(&self) -> &Frame {
        self.tree
    }

    /// Apply the edit for the pointer at `point`.
    ///
    /// Every step is computed from the baseline, so steps do not accumulate
    /// error and any step can be followed by any other.
    ///
    /// # Errors
    ///
    /// Returns an error if the edited frames vanished from the tree or the
    /// tree cannot be laid out.
    #[allow(clippy::too_many_lines)]
    pub fn step(&mut self, point: Point) -> FrameResult<()> {
        let config = self.host.config().clone();
        let modes = self.host.modes();
        let canvas = self.host.canvas_size();
        let start = self.start;

        match &self.baseline {
            Baseline::Divider {
                container,
                index,
                mode,
                axis,
                span,
                sizes,
                divider,
                raw_per_px,
                raw_total,
                ..
            } => {
                let frame = self
                    .tree
                    .find_mut(*container)
                    .ok_or(FrameError::FrameNotFound(*container))?;
                let children = frame
                    .children_mut()
                    .ok_or(FrameError::NotAContainer(*container))?;
                if *index >= children.len() {
                    return Err(FrameError::DividerOutOfRange {
                        container: *container,
                        index: *index,
                        children: children.len(),
                    });
                }
                let d = point.along(*axis) - start.along(*axis);
                match mode {
                    DividerMode::Move => {
                        let total = sizes.0 + sizes.1;
                        let spacing = divider.effective_spacing();
                        let sum = total + spacing;
                        let length = span.1 - span.0;
                        let t = if length > EPSILON {
                            ((point.along(*axis) - span.0) / length).clamp(0.0, 1.0)
                        } else {
                            0.5
                        };
                        let min = config.effective_min_share() * total;
                        let c0 = clamp_to(t * sum - spacing * 0.5, min, total - min);
                        children[index - 1].raw_size = c0;
                        children[*index].raw_size = total - c0;
                        trace!(t, c0, c1 = total - c0, "Divider moved");
                    }
                    DividerMode::Expand => {
                        let limit = config.max_spacing_ratio * raw_total;
                        let spacing = clamp_to(
                            divider.spacing + d * raw_per_px * config.expand_damping,
                            0.0,
                            limit,
                        );
                        children[index - 1].divider.spacing = spacing;
                        trace!(spacing, "Divider expanded");
                    }
                    DividerMode::Slant => {
                        let slant = clamp_slant(divider.slant + d * config.slant_damping);
                        children[index - 1].divider.slant = slant;
                        trace!(slant, "Divider slanted");
                    }
                }

                let layout = compute_layout(self.tree, canvas, Point::default())?;
                let node = layout
                    .find(*container)
                    .ok_or(FrameError::FrameNotFound(*container))?;
                constrain_recursive(self.tree, node)?;
            }
            Baseline::Inset {
                kind,
                edge,
                layout,
                snapshot,
            } => {
                let axis = edge.axis();
                let extent = layout.raw_size.along(axis);
                let d = (point.along(axis) - start.along(axis)) * edge.sign();
                let (own, other) = match kind {
                    InsetKind::Margin => (snapshot.margin, snapshot.padding),
                    InsetKind::Padding => (snapshot.padding, snapshot.margin),
                };
                let base = own.get(*edge);
                let value = if extent > EPSILON {
                    base + d / extent
                } else {
                    base
                };
                let taken = own.get(edge.opposite()) + other.get(*edge) + other.get(edge.opposite());
                let value = clamp_to(value, 0.0, 1.0 - taken - config.effective_min_share());

                let frame = self
                    .tree
                    .find_mut(layout.frame)
                    .ok_or(FrameError::FrameNotFound(layout.frame))?;
                match kind {
                    InsetKind::Margin => frame.margin.set(*edge, value),
                    InsetKind::Padding => frame.padding.set(*edge, value),
                }
                trace!(?kind, ?edge, value, "Inset changed");
                constrain_tree(self.tree, layout)?;
            }
            Baseline::Image { mode, image, cell } => {
                let binding = self
                    .tree
                    .find_mut(cell.frame)
                    .ok_or(FrameError::FrameNotFound(cell.frame))?
                    .image_mut()
                    .ok_or(FrameError::NoImage(cell.frame))?;
                let (dx, dy) = (point.x - start.x, point.y - start.y);
                match mode {
                    ImageMode::Pan => {
                        binding.translation = [image.translation[0] + dx, image.translation[1] + dy];
                    }
                    ImageMode::Scale => {
                        let extent = cell.cell_bounds().size();
                        let zoom = |delta: f64, ext: f64| {
                            let q = if ext > EPSILON { 1.0 + delta / ext } else { 1.0 };
                            q.max(config.min_zoom)
                        };
                        let (mut qx, mut qy) = (zoom(dx, extent.width), zoom(dy, extent.height));
                        if modes.constrain_proportions {
                            qx = qx.max(qy);
                            qy = qx;
                        }
                        binding.scale = [image.scale[0] * qx, image.scale[1] * qy];
                    }
                }
                trace!(?mode, scale = ?binding.scale, translation = ?binding.translation, "Image moved");
                constrain_leaf(self.tree, cell)?;
            }
        }

        self.host.request_redraw();
        Ok(())
    }

    /// Accept the edit.
    pub fn commit(mut self) {
        self.finished = true;
        debug!("Gesture committed");
        self.host.on_commit(self.tree);
    }

    /// Abandon the edit and restore the baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if the edited frame vanished from the tree.
    pub fn cancel(mut self) -> FrameResult<()> {
        self.finished = true;
        debug!("Gesture cancelled");
        self.revert()
    }

    fn revert(&mut self) -> FrameResult<()> {
        restore(self.tree, &self.baseline)?;
        self.host.request_redraw();
        self.host.on_revert();
        Ok(())
    }
}

impl<H: EditorHost> Drop for Gesture<'_, H> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        warn!("Gesture dropped without commit or cancel; reverting");
        if let Err(e) = self.revert() {
            warn!(error = %e, "Failed to revert dropped gesture");
        }
    }
}

fn restore(tree: &mut Frame, baseline: &Baseline) -> FrameResult<()> {
    match baseline {
        Baseline::Divider { snapshot, .. } | Baseline::Inset { snapshot, .. } => {
            let frame = tree
                .find_mut(snapshot.id)
                .ok_or(FrameError::FrameNotFound(snapshot.id))?;
            *frame = snapshot.clone();
        }
        Baseline::Image { image, cell, .. } => {
            let binding = tree
                .find_mut(cell.frame)
                .ok_or(FrameError::FrameNotFound(cell.frame))?
                .image_mut()
                .ok_or(FrameError::NoImage(cell.frame))?;
            *binding = image.clone();
        }
    }
    Ok(())
}

/// Clamp that tolerates an inverted range by favouring the lower bound.
fn clamp_to(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}
