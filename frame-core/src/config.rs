//! Tunables for hit testing and gesture response.

use serde::{Deserialize, Serialize};

use crate::FrameResult;

/// Smallest share an edit may squeeze a frame to, whatever is configured.
pub const MIN_SHARE_FLOOR: f64 = 0.001;

/// Configuration shared by the spatial queries and the gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Extra pixels on each side of a divider strip that still count as a hit.
    pub divider_hit_margin: f64,
    /// Minimum thickness, in pixels, of a grabbable margin or padding band.
    pub band_hit_thickness: f64,
    /// Fraction of pointer travel turned into divider spacing.
    pub expand_damping: f64,
    /// Degrees of slant per pixel of pointer travel.
    pub slant_damping: f64,
    /// Smallest share of its span a frame may be squeezed to by an edit.
    pub min_share: f64,
    /// Largest divider spacing as a multiple of the container's total raw size.
    pub max_spacing_ratio: f64,
    /// Lower bound for the per-step zoom factor of an image scale gesture.
    pub min_zoom: f64,
    /// Border colour used where no ancestor sets one.
    pub default_border_color: String,
    /// Border width used where no ancestor sets one.
    pub default_border_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            divider_hit_margin: 5.0,
            band_hit_thickness: 8.0,
            expand_damping: 0.1,
            slant_damping: 0.2,
            min_share: 0.05,
            max_spacing_ratio: 1.0,
            min_zoom: 0.05,
            default_border_color: "black".to_string(),
            default_border_width: 1.0,
        }
    }
}

impl EditorConfig {
    /// Load a configuration from JSON; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> FrameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `min_share` kept within `[MIN_SHARE_FLOOR, 0.5]`, so edits never
    /// drive a size to zero.
    #[must_use]
    pub fn effective_min_share(&self) -> f64 {
        if self.min_share.is_nan() {
            return MIN_SHARE_FLOOR;
        }
        self.min_share.clamp(MIN_SHARE_FLOOR, 0.5)
    }
}

/// Externally tracked modifier and tool state, read at query and step time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ModeFlags {
    /// Margin bands are probed before padding bands and leaves.
    pub margin_edit: bool,
    /// Padding bands are probed before leaves.
    pub padding_edit: bool,
    /// Image scaling keeps the aspect ratio.
    pub constrain_proportions: bool,
    /// Divider drags change spacing; image drags scale.
    pub expand: bool,
    /// Divider drags change slant.
    pub slant: bool,
}
