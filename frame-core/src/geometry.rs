//! Planar geometry shared by layout, hit testing and gestures.
//!
//! Frames are general quadrilaterals once a divider is slanted, so besides
//! the usual point/size/rect types this module provides [`Quad`] with
//! point-in-polygon testing and the line intersection used to keep sheared
//! edges exactly on their parent's boundary.

use serde::{Deserialize, Serialize};

/// Tolerance used for degenerate-geometry checks.
pub const EPSILON: f64 = 1e-9;

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (pixels from left).
    pub x: f64,
    /// Y coordinate (pixels from top).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Translate by a delta.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Translate by `amount` along `axis`.
    #[must_use]
    pub fn shifted(self, axis: Axis, amount: f64) -> Self {
        match axis {
            Axis::Row => self.offset(amount, 0.0),
            Axis::Column => self.offset(0.0, amount),
        }
    }

    /// Component along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.x,
            Axis::Column => self.y,
        }
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.width,
            Axis::Column => self.height,
        }
    }
}

/// Direction in which a container lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Children side by side, left to right; dividers run top to bottom.
    Row,
    /// Children stacked top to bottom; dividers run left to right.
    Column,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }
}

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Top side.
    Top,
    /// Bottom side.
    Bottom,
    /// Left side.
    Left,
    /// Right side.
    Right,
}

impl Edge {
    /// All edges in probing order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Axis along which an inset on this edge is measured.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::Column,
            Self::Left | Self::Right => Axis::Row,
        }
    }

    /// `1.0` for leading edges (top/left), `-1.0` for trailing ones.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => 1.0,
            Self::Bottom | Self::Right => -1.0,
        }
    }

    /// The edge across the box.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Four edge insets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    /// Top inset.
    #[serde(default)]
    pub top: f64,
    /// Right inset.
    #[serde(default)]
    pub right: f64,
    /// Bottom inset.
    #[serde(default)]
    pub bottom: f64,
    /// Left inset.
    #[serde(default)]
    pub left: f64,
}

impl Insets {
    /// Create insets.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same inset on every edge.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Inset on `edge`.
    #[must_use]
    pub const fn get(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
            Edge::Right => self.right,
        }
    }

    /// Set the inset on `edge`, clamped to be non-negative.
    pub fn set(&mut self, edge: Edge, value: f64) {
        let value = value.max(0.0);
        match edge {
            Edge::Top => self.top = value,
            Edge::Bottom => self.bottom = value,
            Edge::Left => self.left = value,
            Edge::Right => self.right = value,
        }
    }

    /// Whether every inset is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    /// Copy with negative insets raised to zero.
    #[must_use]
    pub fn non_negative(&self) -> Self {
        Self::new(
            self.top.max(0.0),
            self.right.max(0.0),
            self.bottom.max(0.0),
            self.left.max(0.0),
        )
    }

    /// Fractional insets turned into pixels of `size`.
    #[must_use]
    pub fn scaled(&self, size: Size) -> Self {
        Self::new(
            self.top * size.height,
            self.right * size.width,
            self.bottom * size.height,
            self.left * size.width,
        )
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from an origin and a size.
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Build from two opposite corners.
    #[must_use]
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Start coordinate along `axis`.
    #[must_use]
    pub const fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.x,
            Axis::Column => self.y,
        }
    }

    /// End coordinate along `axis`.
    #[must_use]
    pub fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.right(),
            Axis::Column => self.bottom(),
        }
    }

    /// Whether the point lies inside (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shrink by pixel insets.
    #[must_use]
    pub fn inset(&self, insets: &Insets) -> Self {
        Self::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.left - insets.right,
            self.height - insets.top - insets.bottom,
        )
    }

    /// The rectangle as an unsheared quad.
    #[must_use]
    pub fn to_quad(&self) -> Quad {
        Quad {
            top_left: Point::new(self.x, self.y),
            top_right: Point::new(self.right(), self.y),
            bottom_left: Point::new(self.x, self.bottom()),
            bottom_right: Point::new(self.right(), self.bottom()),
        }
    }
}

/// A four-corner region; a trapezoid or general quadrilateral once slanted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quad {
    /// Top-left corner.
    pub top_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
}

impl Quad {
    /// Corners in winding order, starting top-left and going clockwise.
    #[must_use]
    pub const fn outline(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Smallest axis-aligned rectangle containing all four corners.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        let pts = self.outline();
        let (mut min, mut max) = (pts[0], pts[0]);
        for p in &pts[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Rect::from_corners(min, max)
    }

    /// Whether the point lies inside the quadrilateral.
    ///
    /// Even-odd crossing test over the outline, so any simple quad works,
    /// convex or not. Points exactly on the outline count as inside.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let pts = self.outline();
        if pts
            .iter()
            .zip(pts.iter().cycle().skip(1))
            .any(|(a, b)| on_segment(*a, *b, p))
        {
            return true;
        }

        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (a, b) = (pts[i], pts[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Move every corner inward by pixel insets.
    ///
    /// Top corners move down by `top`, left corners right by `left` and so
    /// on; for sheared quads this keeps each edge parallel to the original.
    #[must_use]
    pub fn inset(&self, insets: &Insets) -> Self {
        Self {
            top_left: self.top_left.offset(insets.left, insets.top),
            top_right: self.top_right.offset(-insets.right, insets.top),
            bottom_left: self.bottom_left.offset(insets.left, -insets.bottom),
            bottom_right: self.bottom_right.offset(-insets.right, -insets.bottom),
        }
    }

    /// The pair of corners forming the leading edge across `axis`.
    ///
    /// For a row this is the left edge (top-left, bottom-left); for a column
    /// the top edge (top-left, top-right).
    #[must_use]
    pub const fn leading_edge(&self, axis: Axis) -> (Point, Point) {
        match axis {
            Axis::Row => (self.top_left, self.bottom_left),
            Axis::Column => (self.top_left, self.top_right),
        }
    }

    /// The pair of corners forming the trailing edge across `axis`.
    #[must_use]
    pub const fn trailing_edge(&self, axis: Axis) -> (Point, Point) {
        match axis {
            Axis::Row => (self.top_right, self.bottom_right),
            Axis::Column => (self.bottom_left, self.bottom_right),
        }
    }

    /// Assemble a quad from its leading and trailing edges along `axis`.
    #[must_use]
    pub const fn from_edges(axis: Axis, leading: (Point, Point), trailing: (Point, Point)) -> Self {
        match axis {
            Axis::Row => Self {
                top_left: leading.0,
                bottom_left: leading.1,
                top_right: trailing.0,
                bottom_right: trailing.1,
            },
            Axis::Column => Self {
                top_left: leading.0,
                top_right: leading.1,
                bottom_left: trailing.0,
                bottom_right: trailing.1,
            },
        }
    }
}

/// Intersection of the infinite lines through `a0..a1` and `b0..b1`.
///
/// Returns `None` for parallel or degenerate lines.
#[must_use]
pub fn line_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let (dax, day) = (a1.x - a0.x, a1.y - a0.y);
    let (dbx, dby) = (b1.x - b0.x, b1.y - b0.y);
    let denom = dax * dby - day * dbx;
    if denom.abs() < EPSILON {
        return None;
    }
    let t = ((b0.x - a0.x) * dby - (b0.y - a0.y) * dbx) / denom;
    Some(Point::new(a0.x + dax * t, a0.y + day * t))
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let len = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
    if cross.abs() > 1e-6 * len.max(1.0) {
        return false;
    }
    p.x >= a.x.min(b.x) - 1e-6
        && p.x <= a.x.max(b.x) + 1e-6
        && p.y >= a.y.min(b.y) - 1e-6
        && p.y <= a.y.max(b.y) + 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed() -> Quad {
        Quad {
            top_left: Point::new(0.0, 0.0),
            top_right: Point::new(120.0, 0.0),
            bottom_left: Point::new(0.0, 100.0),
            bottom_right: Point::new(80.0, 100.0),
        }
    }

    #[test]
    fn test_quad_contains_respects_slant() {
        let q = skewed();
        assert!(q.contains(Point::new(110.0, 5.0)));
        assert!(!q.contains(Point::new(110.0, 95.0)));
        assert!(q.contains(Point::new(0.0, 50.0)));
        assert!(!q.contains(Point::new(-1.0, 50.0)));
    }

    #[test]
    fn test_bounding_rect() {
        let r = skewed().bounding_rect();
        assert_eq!(r, Rect::new(0.0, 0.0, 120.0, 100.0));
    }

    #[test]
    fn test_line_intersection() {
        let p = line_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        )
        .expect("lines cross");
        assert!((p.x - 5.0).abs() < 1e-12);
        assert!((p.y - 5.0).abs() < 1e-12);

        assert!(line_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_quad_edges_round_trip() {
        let q = skewed();
        for axis in [Axis::Row, Axis::Column] {
            let rebuilt = Quad::from_edges(axis, q.leading_edge(axis), q.trailing_edge(axis));
            assert_eq!(rebuilt, q);
        }
    }

    #[test]
    fn test_insets_set_clamps_negative() {
        let mut insets = Insets::default();
        insets.set(Edge::Left, -3.0);
        assert_eq!(insets.left, 0.0);
        insets.set(Edge::Bottom, 0.25);
        assert_eq!(insets.get(Edge::Bottom), 0.25);
    }
}
