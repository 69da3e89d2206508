//! Translucent gradient wash drawn over the background.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// Axis along which the overlay alpha changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayOrientation {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

impl OverlayOrientation {
    pub fn name(self) -> &'static str {
        match self {
            OverlayOrientation::Vertical => "Vertical",
            OverlayOrientation::Horizontal => "Horizontal",
        }
    }

    /// Flip to the other axis.
    pub fn toggled(self) -> Self {
        match self {
            OverlayOrientation::Vertical => OverlayOrientation::Horizontal,
            OverlayOrientation::Horizontal => OverlayOrientation::Vertical,
        }
    }
}

/// Gradient overlay descriptor.
///
/// The overlay is `base_color` with alpha running linearly from
/// `start_alpha` at the top (or left) edge to `end_alpha` at the bottom (or
/// right) edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientOverlay {
    pub base_color: Rgba,
    pub orientation: OverlayOrientation,
    pub start_alpha: u8,
    pub end_alpha: u8,
}

impl GradientOverlay {
    pub const DEFAULT_START_ALPHA: u8 = 50;
    pub const DEFAULT_END_ALPHA: u8 = 200;

    /// Overlay of `base_color` with the default alpha ramp, vertical.
    pub fn new(base_color: Rgba) -> Self {
        Self {
            base_color,
            orientation: OverlayOrientation::Vertical,
            start_alpha: Self::DEFAULT_START_ALPHA,
            end_alpha: Self::DEFAULT_END_ALPHA,
        }
    }

    pub fn with_orientation(mut self, orientation: OverlayOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_alphas(mut self, start_alpha: u8, end_alpha: u8) -> Self {
        self.start_alpha = start_alpha;
        self.end_alpha = end_alpha;
        self
    }

    pub fn start_color(&self) -> Rgba {
        self.base_color.with_alpha(self.start_alpha)
    }

    pub fn end_color(&self) -> Rgba {
        self.base_color.with_alpha(self.end_alpha)
    }

    /// Color at parameter `t` along the gradient axis (clamped to `0..=1`).
    pub fn color_at(&self, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let start = self.start_alpha as f64;
        let end = self.end_alpha as f64;
        let alpha = (start + (end - start) * t).round() as u8;
        self.base_color.with_alpha(alpha)
    }
}

impl Default for GradientOverlay {
    fn default() -> Self {
        Self::new(Rgba::WHITE)
    }
}
