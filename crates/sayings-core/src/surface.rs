//! Drawing surface contract.
//!
//! A [`Surface`] is the only place the scene touches concrete pixels. The
//! scene issues fills, gradient washes, image blits and text runs; the
//! surface decides how to rasterize them.

use crate::color::Rgba;
use crate::overlay::GradientOverlay;
use crate::resources::ImageHandle;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Font attributes needed to measure and draw a text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    /// Size in points (pixels on a 1:1 surface).
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
}

/// Measurements for a block of lines in one font.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextMetrics {
    /// Advance width of each line, in the same order as the lines measured.
    pub widths: Vec<i32>,
    pub ascent: i32,
    pub descent: i32,
    /// Extra gap between lines.
    pub leading: i32,
}

impl TextMetrics {
    /// Baseline-to-baseline distance for single spacing.
    pub fn line_height(&self) -> i32 {
        self.ascent + self.descent + self.leading
    }

    /// Width of line `index`, zero when it was not measured.
    pub fn width(&self, index: usize) -> i32 {
        self.widths.get(index).copied().unwrap_or(0)
    }
}

/// A 2D raster canvas.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fill the whole surface with an opaque or translucent color.
    fn fill(&mut self, color: Rgba);

    /// Blend a gradient wash over the whole surface.
    fn fill_gradient(&mut self, overlay: &GradientOverlay);

    /// Draw `image` scaled to cover `dest`.
    fn draw_image_scaled(&mut self, image: &ImageHandle, dest: Rect);

    /// Draw `image` unscaled with its top-left corner at `(x, y)`.
    fn blit(&mut self, image: &ImageHandle, x: i32, y: i32);

    /// Measure `lines` in `font`.
    fn measure_text(&mut self, font: &FontSpec, lines: &[String]) -> TextMetrics;

    /// Draw a single line with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontSpec, color: Rgba);
}
