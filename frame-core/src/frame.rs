//! Frame tree - the panels of a page.
//!
//! A [`Frame`] is either a leaf cell, which may hold an image, or a
//! container splitting its area into a row or column of children. The tree
//! has a single owner (the hosting editor); everything else in this crate
//! either reads it ([`crate::layout`], [`crate::query`]) or mutates it in
//! place ([`crate::constraint`], [`crate::gesture`], [`crate::edit`]).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Axis, FrameError, FrameResult, Insets, Size};

/// Largest divider slant magnitude, in degrees.
pub const MAX_SLANT: f64 = 45.0;

/// Unique identifier for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(Uuid);

impl FrameId {
    /// Create a new unique frame ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much of a frame is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Nothing is painted; used for page gutters.
    Invisible,
    /// Background and image, no border.
    Background,
    /// Background, image and border.
    #[default]
    Full,
}

/// The gap following a frame inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Divider {
    /// Gap width, in the same raw units as [`Frame::raw_size`].
    #[serde(default)]
    pub spacing: f64,
    /// Slant in degrees, within `[-45, 45]`.
    #[serde(default)]
    pub slant: f64,
}

impl Divider {
    /// Create a divider; spacing and slant are clamped into range.
    #[must_use]
    pub fn new(spacing: f64, slant: f64) -> Self {
        Self {
            spacing: spacing.max(0.0),
            slant: clamp_slant(slant),
        }
    }

    /// Slant clamped into range, whatever was stored.
    #[must_use]
    pub fn effective_slant(&self) -> f64 {
        clamp_slant(self.slant)
    }

    /// Spacing clamped to be non-negative, whatever was stored.
    #[must_use]
    pub fn effective_spacing(&self) -> f64 {
        self.spacing.max(0.0)
    }
}

/// Clamp a slant angle into `[-45, 45]` degrees.
#[must_use]
pub fn clamp_slant(slant: f64) -> f64 {
    if slant.is_nan() {
        return 0.0;
    }
    slant.clamp(-MAX_SLANT, MAX_SLANT)
}

/// An image bound to a leaf frame.
///
/// The pixels live with the host; the core only needs the natural size and
/// the placement relative to the cell's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBinding {
    /// Host asset key.
    pub source: String,
    /// Natural width in pixels.
    pub width: f64,
    /// Natural height in pixels.
    pub height: f64,
    /// Pixel offset of the image center from the cell center.
    #[serde(default)]
    pub translation: [f64; 2],
    /// Zoom per axis.
    #[serde(default = "unit_pair")]
    pub scale: [f64; 2],
    /// Flip per axis, `1.0` or `-1.0`.
    #[serde(default = "unit_pair")]
    pub reverse: [f64; 2],
}

fn unit_pair() -> [f64; 2] {
    [1.0, 1.0]
}

impl ImageBinding {
    /// Bind an image of the given natural size, centered, unscaled.
    #[must_use]
    pub fn new(source: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            source: source.into(),
            width,
            height,
            translation: [0.0, 0.0],
            scale: unit_pair(),
            reverse: unit_pair(),
        }
    }

    /// Natural size.
    #[must_use]
    pub const fn natural_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Size after scaling.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        Size::new(self.width * self.scale[0], self.height * self.scale[1])
    }

    /// Mirror the image along `axis` (`Row` flips left/right).
    pub fn flip(&mut self, axis: Axis) {
        let i = axis_index(axis);
        self.reverse[i] = -self.reverse[i];
    }
}

pub(crate) const fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Row => 0,
        Axis::Column => 1,
    }
}

/// What a frame holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum FrameContent {
    /// A content cell.
    Leaf {
        /// Bound image, if any.
        #[serde(default)]
        image: Option<ImageBinding>,
    },
    /// A splitter laying children out along `axis`.
    Container {
        /// Split direction.
        axis: Axis,
        /// Children in layout order.
        children: Vec<Frame>,
    },
}

/// A node of the frame tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Structural identity.
    #[serde(default)]
    pub id: FrameId,
    /// Weight along the parent's split axis.
    #[serde(default = "default_raw_size")]
    pub raw_size: f64,
    /// Fractions of the allotted box removed before children are laid out.
    #[serde(default)]
    pub margin: Insets,
    /// Fractions of the allotted box removed from this frame's own corners.
    #[serde(default)]
    pub padding: Insets,
    /// The gap after this frame inside its parent.
    #[serde(default)]
    pub divider: Divider,
    /// Background fill.
    #[serde(default)]
    pub bg_color: Option<String>,
    /// Border colour; inherited from the nearest ancestor when unset.
    #[serde(default)]
    pub border_color: Option<String>,
    /// Border width; inherited from the nearest ancestor when unset.
    #[serde(default)]
    pub border_width: Option<f64>,
    /// What gets painted.
    #[serde(default)]
    pub visibility: Visibility,
    /// Paint order among leaves.
    #[serde(default)]
    pub z: i32,
    /// Leaf or container payload.
    pub content: FrameContent,
}

fn default_raw_size() -> f64 {
    1.0
}

impl Frame {
    /// Create an empty leaf.
    #[must_use]
    pub fn leaf(raw_size: f64) -> Self {
        Self::with_content(raw_size, FrameContent::Leaf { image: None })
    }

    /// Create a container.
    #[must_use]
    pub fn container(axis: Axis, raw_size: f64, children: Vec<Frame>) -> Self {
        Self::with_content(raw_size, FrameContent::Container { axis, children })
    }

    /// Create a row container.
    #[must_use]
    pub fn row(raw_size: f64, children: Vec<Frame>) -> Self {
        Self::container(Axis::Row, raw_size, children)
    }

    /// Create a column container.
    #[must_use]
    pub fn column(raw_size: f64, children: Vec<Frame>) -> Self {
        Self::container(Axis::Column, raw_size, children)
    }

    fn with_content(raw_size: f64, content: FrameContent) -> Self {
        Self {
            id: FrameId::new(),
            raw_size,
            margin: Insets::default(),
            padding: Insets::default(),
            divider: Divider::default(),
            bg_color: None,
            border_color: None,
            border_width: None,
            visibility: Visibility::Full,
            z: 0,
            content,
        }
    }

    /// Set the divider following this frame.
    #[must_use]
    pub fn with_divider(mut self, spacing: f64, slant: f64) -> Self {
        self.divider = Divider::new(spacing, slant);
        self
    }

    /// Set the margin fractions.
    #[must_use]
    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    /// Set the padding fractions.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the background colour.
    #[must_use]
    pub fn with_bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Set the border colour and width.
    #[must_use]
    pub fn with_border(mut self, color: impl Into<String>, width: f64) -> Self {
        self.border_color = Some(color.into());
        self.border_width = Some(width);
        self
    }

    /// Set visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set z order.
    #[must_use]
    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    /// Bind an image. Has no effect on containers.
    #[must_use]
    pub fn with_image(mut self, image: ImageBinding) -> Self {
        if let FrameContent::Leaf { image: slot } = &mut self.content {
            *slot = Some(image);
        }
        self
    }

    /// Check if this frame is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, FrameContent::Leaf { .. })
    }

    /// Split axis, for containers.
    #[must_use]
    pub fn axis(&self) -> Option<Axis> {
        match &self.content {
            FrameContent::Container { axis, .. } => Some(*axis),
            FrameContent::Leaf { .. } => None,
        }
    }

    /// Children in layout order; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Frame] {
        match &self.content {
            FrameContent::Container { children, .. } => children,
            FrameContent::Leaf { .. } => &[],
        }
    }

    /// Mutable children, for containers.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Frame>> {
        match &mut self.content {
            FrameContent::Container { children, .. } => Some(children),
            FrameContent::Leaf { .. } => None,
        }
    }

    /// Bound image, for leaves.
    #[must_use]
    pub fn image(&self) -> Option<&ImageBinding> {
        match &self.content {
            FrameContent::Leaf { image } => image.as_ref(),
            FrameContent::Container { .. } => None,
        }
    }

    /// Mutable bound image, for leaves.
    pub fn image_mut(&mut self) -> Option<&mut ImageBinding> {
        match &mut self.content {
            FrameContent::Leaf { image } => image.as_mut(),
            FrameContent::Container { .. } => None,
        }
    }

    /// Replace the bound image of a leaf, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if this frame is a container.
    pub fn set_image(&mut self, image: Option<ImageBinding>) -> FrameResult<Option<ImageBinding>> {
        match &mut self.content {
            FrameContent::Leaf { image: slot } => Ok(std::mem::replace(slot, image)),
            FrameContent::Container { .. } => Err(FrameError::NotALeaf(self.id)),
        }
    }

    /// Find a frame by ID anywhere in this subtree.
    #[must_use]
    pub fn find(&self, id: FrameId) -> Option<&Frame> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(id))
    }

    /// Find a frame by ID anywhere in this subtree, mutably.
    pub fn find_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        if self.id == id {
            return Some(self);
        }
        match &mut self.content {
            FrameContent::Container { children, .. } => {
                children.iter_mut().find_map(|c| c.find_mut(id))
            }
            FrameContent::Leaf { .. } => None,
        }
    }

    /// Find the container holding `id` and the child's index in it.
    pub fn find_parent_mut(&mut self, id: FrameId) -> Option<(&mut Frame, usize)> {
        if let Some(index) = self.children().iter().position(|c| c.id == id) {
            return Some((self, index));
        }
        match &mut self.content {
            FrameContent::Container { children, .. } => {
                children.iter_mut().find_map(|c| c.find_parent_mut(id))
            }
            FrameContent::Leaf { .. } => None,
        }
    }

    /// Leaves of this subtree in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Frame> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Frame>) {
        match &self.content {
            FrameContent::Leaf { .. } => out.push(self),
            FrameContent::Container { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of frames in this subtree, including itself.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        1 + self.children().iter().map(Frame::frame_count).sum::<usize>()
    }

    /// Check structural invariants of this subtree.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::EmptyContainer`] for a container without
    /// children, [`FrameError::NonPositiveSize`] for a `raw_size` that is not
    /// a positive finite number, and [`FrameError::DuplicateId`] when two
    /// frames share an id.
    pub fn validate(&self) -> FrameResult<()> {
        self.validate_into(&mut HashSet::new())
    }

    fn validate_into(&self, seen: &mut HashSet<FrameId>) -> FrameResult<()> {
        if !seen.insert(self.id) {
            return Err(FrameError::DuplicateId(self.id));
        }
        if !(self.raw_size.is_finite() && self.raw_size > 0.0) {
            return Err(FrameError::NonPositiveSize(self.id));
        }
        if let FrameContent::Container { children, .. } = &self.content {
            if children.is_empty() {
                return Err(FrameError::EmptyContainer(self.id));
            }
            for child in children {
                child.validate_into(seen)?;
            }
        }
        Ok(())
    }

    /// Turn the leaf `id` into a two-child container along `axis`.
    ///
    /// Each new child gets half the leaf's raw size and keeps its
    /// visibility and z; the first child takes over the bound image. The
    /// container keeps the leaf's id, slot fields and visual fields.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is missing or not a leaf.
    pub fn split(&mut self, id: FrameId, axis: Axis) -> FrameResult<(FrameId, FrameId)> {
        let target = self.find_mut(id).ok_or(FrameError::FrameNotFound(id))?;
        let FrameContent::Leaf { image } = &mut target.content else {
            return Err(FrameError::NotALeaf(id));
        };
        let image = image.take();

        let half = target.raw_size * 0.5;
        let mut first = Frame::leaf(half)
            .with_visibility(target.visibility)
            .with_z(target.z);
        first.content = FrameContent::Leaf { image };
        let second = Frame::leaf(half)
            .with_visibility(target.visibility)
            .with_z(target.z);

        let ids = (first.id, second.id);
        target.content = FrameContent::Container {
            axis,
            children: vec![first, second],
        };
        Ok(ids)
    }

    /// Remove `id` from its parent.
    ///
    /// A parent left with one child collapses into it: the parent keeps its
    /// own `raw_size` and `divider` (its slot in the grandparent) and adopts
    /// everything else from the survivor, id included. A parent left with no
    /// children becomes an empty leaf.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is the root or is not in the tree.
    pub fn erase(&mut self, id: FrameId) -> FrameResult<()> {
        if self.id == id {
            return Err(FrameError::CannotEraseRoot);
        }
        let (parent, index) = self
            .find_parent_mut(id)
            .ok_or(FrameError::FrameNotFound(id))?;
        let parent_id = parent.id;

        let survivor = match &mut parent.content {
            FrameContent::Container { children, .. } => {
                children.remove(index);
                match children.len() {
                    0 => Collapse::Empty,
                    1 => children.pop().map_or(Collapse::Keep, Collapse::Adopt),
                    _ => Collapse::Keep,
                }
            }
            FrameContent::Leaf { .. } => return Err(FrameError::NotAContainer(parent_id)),
        };

        match survivor {
            Collapse::Keep => {}
            Collapse::Empty => parent.content = FrameContent::Leaf { image: None },
            Collapse::Adopt(child) => parent.adopt(child),
        }
        Ok(())
    }

    fn adopt(&mut self, child: Frame) {
        let raw_size = self.raw_size;
        let divider = self.divider;
        *self = Frame {
            raw_size,
            divider,
            ..child
        };
    }

    /// Serialize the tree to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> FrameResult<String> {
        serde_json::to_string(self).map_err(FrameError::Serialization)
    }

    /// Deserialize and validate a tree from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tree fails
    /// [`Frame::validate`].
    pub fn from_json(json: &str) -> FrameResult<Self> {
        let frame: Self = serde_json::from_str(json)?;
        frame.validate()?;
        Ok(frame)
    }
}

enum Collapse {
    Keep,
    Empty,
    Adopt(Frame),
}
