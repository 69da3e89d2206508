//! CPU raster surface.

use crate::fonts::FontBook;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, RgbaImage};
use kurbo::Rect;
use sayings_core::{
    Border, FontSpec, GradientOverlay, ImageHandle, OverlayOrientation, Rgba, Surface, TextMetrics,
};

/// An RGBA8 canvas implementing [`Surface`].
///
/// Without a [`FontBook`] text is measured with a rough per-glyph estimate
/// and not drawn.
pub struct RasterSurface<'a> {
    canvas: RgbaImage,
    fonts: Option<&'a mut FontBook>,
}

impl<'a> RasterSurface<'a> {
    /// A transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            fonts: None,
        }
    }

    /// Use `fonts` to measure and draw text.
    pub fn with_fonts(mut self, fonts: &'a mut FontBook) -> Self {
        self.fonts = Some(fonts);
        self
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.canvas
            .get_pixel_checked(x, y)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    /// Draw the cosmetic frame along the inside of the canvas edges.
    pub fn stroke_border(&mut self, border: Border) {
        let (w, h) = self.canvas.dimensions();
        let t = border.thickness.min(w / 2 + 1).min(h / 2 + 1);
        for y in 0..h {
            for x in 0..w {
                if x < t || y < t || x >= w.saturating_sub(t) || y >= h.saturating_sub(t) {
                    blend_pixel(&mut self.canvas, x as i32, y as i32, border.color, 1.0);
                }
            }
        }
    }
}

/// Source-over blend of `color` scaled by `coverage` into one pixel.
fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let Some(dst) = canvas.get_pixel_mut_checked(x as u32, y as u32) else {
        return;
    };
    let sa = color.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let src = [color.r, color.g, color.b];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

fn to_buffer(image: &ImageHandle) -> Option<RgbaImage> {
    ImageBuffer::from_raw(image.width(), image.height(), image.pixels().to_vec())
}

/// Rough metrics for when no font is available.
fn approximate_metrics(font: &FontSpec, lines: &[String]) -> TextMetrics {
    let size = font.size as f64;
    let char_width = if font.bold { 0.60 } else { 0.55 };
    TextMetrics {
        widths: lines
            .iter()
            .map(|l| (l.chars().count() as f64 * size * char_width) as i32)
            .collect(),
        ascent: (size * 0.8).round() as i32,
        descent: (size * 0.2).round() as i32,
        leading: 0,
    }
}

impl Surface for RasterSurface<'_> {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn fill(&mut self, color: Rgba) {
        if color.a == 255 {
            for p in self.canvas.pixels_mut() {
                *p = image::Rgba([color.r, color.g, color.b, 255]);
            }
            return;
        }
        let (w, h) = self.canvas.dimensions();
        for y in 0..h {
            for x in 0..w {
                blend_pixel(&mut self.canvas, x as i32, y as i32, color, 1.0);
            }
        }
    }

    fn fill_gradient(&mut self, overlay: &GradientOverlay) {
        let (w, h) = self.canvas.dimensions();
        let span = |n: u32| if n > 1 { (n - 1) as f64 } else { 1.0 };
        for y in 0..h {
            for x in 0..w {
                let t = match overlay.orientation {
                    OverlayOrientation::Vertical => y as f64 / span(h),
                    OverlayOrientation::Horizontal => x as f64 / span(w),
                };
                blend_pixel(&mut self.canvas, x as i32, y as i32, overlay.color_at(t), 1.0);
            }
        }
    }

    fn draw_image_scaled(&mut self, image: &ImageHandle, dest: Rect) {
        let width = dest.width().round().max(0.0) as u32;
        let height = dest.height().round().max(0.0) as u32;
        if width == 0 || height == 0 {
            return;
        }
        let Some(source) = to_buffer(image) else {
            log::warn!("Image buffer does not match its dimensions; skipped");
            return;
        };
        let scaled = if source.dimensions() == (width, height) {
            source
        } else {
            imageops::resize(&source, width, height, FilterType::Triangle)
        };
        imageops::overlay(
            &mut self.canvas,
            &scaled,
            dest.x0.round() as i64,
            dest.y0.round() as i64,
        );
    }

    fn blit(&mut self, image: &ImageHandle, x: i32, y: i32) {
        if let Some(source) = to_buffer(image) {
            imageops::overlay(&mut self.canvas, &source, x as i64, y as i64);
        }
    }

    fn measure_text(&mut self, font: &FontSpec, lines: &[String]) -> TextMetrics {
        let Some(face) = self.fonts.as_deref_mut().and_then(|book| book.font(font)) else {
            return approximate_metrics(font, lines);
        };
        let px = font.size as f32;
        let widths = lines
            .iter()
            .map(|line| {
                line.chars()
                    .map(|c| face.metrics(c, px).advance_width)
                    .sum::<f32>()
                    .round() as i32
            })
            .collect();
        match face.horizontal_line_metrics(px) {
            Some(m) => TextMetrics {
                widths,
                ascent: m.ascent.ceil() as i32,
                descent: (-m.descent).ceil() as i32,
                leading: m.line_gap.round() as i32,
            },
            None => TextMetrics {
                widths,
                ..approximate_metrics(font, &[])
            },
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &FontSpec, color: Rgba) {
        let Some(face) = self.fonts.as_deref_mut().and_then(|book| book.font(font)) else {
            return;
        };
        let px = font.size as f32;
        let mut pen = x as f32;
        for c in text.chars() {
            let (metrics, coverage) = face.rasterize(c, px);
            let left = pen.round() as i32 + metrics.xmin;
            let top = y - (metrics.height as i32 + metrics.ymin);
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + col];
                    if alpha > 0 {
                        blend_pixel(
                            &mut self.canvas,
                            left + col as i32,
                            top + row as i32,
                            color,
                            alpha as f32 / 255.0,
                        );
                    }
                }
            }
            pen += metrics.advance_width;
        }
    }
}
