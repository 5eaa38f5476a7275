//! # Frame Core
//!
//! Layout and editing core for paneled pages: a tree of frames resolved
//! into (possibly slanted) cells, with the pointer gestures that reshape it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 frame-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Frame Tree      │  Layout Engine           │
//! │  - Rows/columns  │  - Proportional sizing   │
//! │  - Dividers      │  - Slanted corners       │
//! │  - Images        │  - Divider strips/bands  │
//! ├─────────────────────────────────────────────┤
//! │  Hit Testing     │  Editing                 │
//! │  - Targets       │  - Gestures              │
//! │  - Precedence    │  - One-shot edits        │
//! │                  │  - Image cover-fit       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The host editor owns the [`Frame`] tree and implements [`EditorHost`].
//! Layout is recomputed from the tree whenever it is needed and never
//! stored inside it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constraint;
pub mod edit;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod layout;
pub mod paint;
pub mod query;
pub mod templates;
pub mod trapezoid;

#[cfg(test)]
mod testing;

pub use config::{EditorConfig, ModeFlags, MIN_SHARE_FLOOR};
pub use constraint::{constrain_all, constrain_leaf, constrain_recursive, constrain_tree, cover_fit};
pub use error::{FrameError, FrameResult};
pub use frame::{
    clamp_slant, Divider, Frame, FrameContent, FrameId, ImageBinding, Visibility, MAX_SLANT,
};
pub use geometry::{Axis, Edge, Insets, Point, Quad, Rect, Size};
pub use gesture::{DividerMode, Gesture, ImageMode};
pub use host::EditorHost;
pub use layout::{compute_layout, layout_in_region, LayoutNode};
pub use paint::{paint_list, ImagePlacement, PaintItem, Stroke};
pub use query::{
    find_divider_at, find_layout_at, find_layout_of, find_margin_at, find_padding_at,
    resolve_target, BandHit, DividerHit, Target,
};
pub use trapezoid::{divider_quad, margin_band, padding_band};

/// Frame core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
