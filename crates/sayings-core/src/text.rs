//! Multi-line caption with font attributes and justified layout.

use crate::color::Rgba;
use crate::error::{SceneError, SceneResult};
use crate::surface::{FontSpec, Surface, TextMetrics};
use serde::{Deserialize, Serialize};

/// Horizontal alignment of the caption lines relative to the layout center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Justification {
    /// All lines share the block's left edge.
    #[default]
    Left,
    /// Each line is centered on its own.
    Center,
    /// All lines share the block's right edge.
    Right,
}

impl Justification {
    /// Get display name for UI.
    pub fn name(self) -> &'static str {
        match self {
            Justification::Left => "Left",
            Justification::Center => "Center",
            Justification::Right => "Right",
        }
    }

    pub fn all() -> &'static [Justification] {
        &[Justification::Left, Justification::Center, Justification::Right]
    }

    /// Parse a command name (`left`, `center`, `right`; case-insensitive).
    pub fn from_name(name: &str) -> SceneResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "left" => Ok(Justification::Left),
            "center" => Ok(Justification::Center),
            "right" => Ok(Justification::Right),
            _ => Err(SceneError::invalid(format!(
                "Justification can only be Left, Center or Right, got {:?}",
                name
            ))),
        }
    }
}

/// A line positioned by [`TextBlock::layout`]. `(x, y)` is the start of the
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaidOutLine<'a> {
    pub text: &'a str,
    pub x: i32,
    pub y: i32,
}

/// The caption drawn in the middle of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    raw_text: String,
    /// Never empty.
    lines: Vec<String>,
    color: Rgba,
    font_family: String,
    font_size: i32,
    bold: bool,
    italic: bool,
    line_height_multiplier: f64,
    justification: Justification,
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBlock {
    pub const DEFAULT_TEXT: &'static str = "Hello\nWorld";
    pub const DEFAULT_FONT_FAMILY: &'static str = "Serif";
    pub const DEFAULT_FONT_SIZE: i32 = 30;

    /// The default two-line "Hello / World" caption.
    pub fn new() -> Self {
        Self {
            raw_text: Self::DEFAULT_TEXT.to_string(),
            lines: vec!["Hello".to_string(), "World".to_string()],
            color: Rgba::BLACK,
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
            font_size: Self::DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            line_height_multiplier: 1.0,
            justification: Justification::Left,
        }
    }

    /// The text exactly as last set.
    pub fn text(&self) -> &str {
        &self.raw_text
    }

    /// Lines derived from the text, without leading or trailing blank lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replace the caption. Fails if the text has no non-blank line.
    pub fn set_text(&mut self, text: impl Into<String>) -> SceneResult<()> {
        let text = text.into();
        let lines = normalize_lines(&text);
        if lines.is_empty() {
            return Err(SceneError::invalid("Text can't be empty"));
        }
        self.lines = lines;
        self.raw_text = text;
        Ok(())
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    pub fn font_size(&self) -> i32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: i32) -> SceneResult<()> {
        if size <= 0 {
            return Err(SceneError::invalid(format!(
                "Font size must be positive, got {}",
                size
            )));
        }
        self.font_size = size;
        Ok(())
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn line_height_multiplier(&self) -> f64 {
        self.line_height_multiplier
    }

    pub fn set_line_height_multiplier(&mut self, multiplier: f64) -> SceneResult<()> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(SceneError::invalid(format!(
                "Line height multiplier cannot be negative, got {}",
                multiplier
            )));
        }
        self.line_height_multiplier = multiplier;
        Ok(())
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    pub fn set_justification(&mut self, justification: Justification) {
        self.justification = justification;
    }

    /// Font attributes for measuring and drawing this block.
    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            family: self.font_family.clone(),
            size: self.font_size.max(1) as u32,
            bold: self.bold,
            italic: self.italic,
        }
    }

    /// Position every line so the block is centered on `(center_x, center_y)`.
    ///
    /// Centered lines are placed by their own width; left and right
    /// justified lines align to the width of the widest line.
    pub fn layout(&self, metrics: &TextMetrics, center_x: i32, center_y: i32) -> Vec<LaidOutLine<'_>> {
        // Kept in f64 with explicit truncation so large multipliers saturate
        // instead of overflowing.
        let line_height = metrics.line_height() as f64 * self.line_height_multiplier;
        let count = self.lines.len();
        let total_height = (line_height * count.saturating_sub(1) as f64).trunc()
            + metrics.ascent as f64
            + metrics.descent as f64;
        let total_width = (0..count).map(|i| metrics.width(i)).max().unwrap_or(0);
        let top = center_y as f64 - (total_height / 2.0).trunc() + metrics.ascent as f64;

        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let width = metrics.width(i);
                let x = match self.justification {
                    Justification::Center => center_x.saturating_sub(width / 2),
                    Justification::Left => center_x.saturating_sub(total_width / 2),
                    Justification::Right => {
                        center_x.saturating_add(total_width / 2).saturating_sub(width)
                    }
                };
                let y = (top + (i as f64 * line_height).trunc()) as i32;
                LaidOutLine { text: line, x, y }
            })
            .collect()
    }

    /// Measure, lay out and draw the block centered on `(center_x, center_y)`.
    pub fn draw(&self, surface: &mut dyn Surface, center_x: i32, center_y: i32) {
        let font = self.font_spec();
        let metrics = surface.measure_text(&font, &self.lines);
        for line in self.layout(&metrics, center_x, center_y) {
            surface.draw_text(line.text, line.x, line.y, &font, self.color);
        }
    }
}

/// Split on `\n`, `\r\n` or `\r`. A trailing terminator does not start a new line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(i) => {
                lines.push(&rest[..i]);
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Lines of `text` with the blank runs at both ends removed.
fn normalize_lines(text: &str) -> Vec<String> {
    let lines = split_lines(text);
    let is_blank = |line: &&str| line.trim_matches(|c: char| c <= ' ').is_empty();
    let Some(first) = lines.iter().position(|l| !is_blank(l)) else {
        return Vec::new();
    };
    let last = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(first);
    lines[first..=last].iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(widths: &[i32]) -> TextMetrics {
        TextMetrics {
            widths: widths.to_vec(),
            ascent: 20,
            descent: 5,
            leading: 5,
        }
    }

    fn block_with_lines(n: usize) -> TextBlock {
        let mut block = TextBlock::new();
        let text = (0..n).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        block.set_text(text).unwrap();
        block
    }

    #[test]
    fn test_defaults() {
        let block = TextBlock::new();
        assert_eq!(block.text(), "Hello\nWorld");
        assert_eq!(block.lines(), &["Hello", "World"]);
        assert_eq!(block.font_size(), 30);
        assert_eq!(block.font_family(), "Serif");
        assert_eq!(block.color(), Rgba::BLACK);
        assert_eq!(block.justification(), Justification::Left);
        assert!(!block.is_bold());
        assert!(!block.is_italic());
        assert!((block.line_height_multiplier() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_text_round_trip() {
        let mut block = TextBlock::new();
        let text = "\n  \nFirst line\n\n   \nSecond line\n\t\n";
        block.set_text(text).unwrap();
        assert_eq!(block.text(), text);
        assert_eq!(block.lines(), &["First line", "", "   ", "Second line"]);
    }

    #[test]
    fn test_set_text_handles_crlf() {
        let mut block = TextBlock::new();
        block.set_text("one\r\ntwo\rthree\n").unwrap();
        assert_eq!(block.lines(), &["one", "two", "three"]);
    }

    #[test]
    fn test_set_text_rejects_blank() {
        let mut block = TextBlock::new();
        block.set_text("Keep\nme").unwrap();

        assert!(matches!(block.set_text(""), Err(SceneError::InvalidArgument(_))));
        assert!(matches!(block.set_text("   \n   "), Err(SceneError::InvalidArgument(_))));

        assert_eq!(block.text(), "Keep\nme");
        assert_eq!(block.lines(), &["Keep", "me"]);
    }

    #[test]
    fn test_font_size_validation() {
        let mut block = TextBlock::new();
        assert!(block.set_font_size(0).is_err());
        assert!(block.set_font_size(-5).is_err());
        assert_eq!(block.font_size(), 30);

        block.set_font_size(24).unwrap();
        assert_eq!(block.font_size(), 24);
        assert_eq!(block.font_spec().size, 24);
    }

    #[test]
    fn test_line_height_validation() {
        let mut block = TextBlock::new();
        assert!(block.set_line_height_multiplier(-0.5).is_err());
        assert!(block.set_line_height_multiplier(f64::NAN).is_err());
        block.set_line_height_multiplier(0.0).unwrap();
        block.set_line_height_multiplier(1.5).unwrap();
        assert!((block.line_height_multiplier() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_justification_parsing() {
        assert_eq!(Justification::from_name("LEFT").unwrap(), Justification::Left);
        assert_eq!(Justification::from_name(" center ").unwrap(), Justification::Center);
        assert_eq!(Justification::from_name("right").unwrap(), Justification::Right);
        assert!(matches!(
            Justification::from_name("justify"),
            Err(SceneError::InvalidArgument(_))
        ));
        for justification in Justification::all() {
            assert_eq!(Justification::from_name(justification.name()).unwrap(), *justification);
        }
    }

    #[test]
    fn test_left_aligns_to_widest_line() {
        let mut block = block_with_lines(3);
        block.set_justification(Justification::Left);
        let laid = block.layout(&metrics(&[50, 30, 70]), 200, 100);
        assert!(laid.iter().all(|l| l.x == 200 - 35));
    }

    #[test]
    fn test_center_positions_each_line() {
        let mut block = block_with_lines(3);
        block.set_justification(Justification::Center);
        let laid = block.layout(&metrics(&[50, 30, 70]), 200, 100);
        let xs: Vec<i32> = laid.iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![175, 185, 165]);
    }

    #[test]
    fn test_right_aligns_to_block_edge() {
        let mut block = block_with_lines(3);
        block.set_justification(Justification::Right);
        let laid = block.layout(&metrics(&[50, 30, 70]), 200, 100);
        let ends: Vec<i32> = laid.iter().zip([50, 30, 70]).map(|(l, w)| l.x + w).collect();
        assert_eq!(ends, vec![235, 235, 235]);
    }

    #[test]
    fn test_vertical_layout() {
        let block = block_with_lines(3);
        // line height 30, total height 30 * 2 + 25 = 85
        let laid = block.layout(&metrics(&[10, 10, 10]), 0, 100);
        let ys: Vec<i32> = laid.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![100 - 42 + 20, 100 - 42 + 50, 100 - 42 + 80]);
    }

    #[test]
    fn test_line_height_multiplier_spreads_lines() {
        let mut block = block_with_lines(2);
        block.set_line_height_multiplier(1.5).unwrap();
        let laid = block.layout(&metrics(&[10, 10]), 0, 0);
        assert_eq!(laid[1].y - laid[0].y, 45);

        block.set_line_height_multiplier(0.0).unwrap();
        let laid = block.layout(&metrics(&[10, 10]), 0, 0);
        assert_eq!(laid[0].y, laid[1].y);
    }

    #[test]
    fn test_huge_line_height_saturates() {
        let mut block = block_with_lines(2);
        block.set_line_height_multiplier(1e10).unwrap();
        let laid = block.layout(&metrics(&[10, 10]), 0, 0);
        assert_eq!(laid.len(), 2);
        assert!(laid[0].y < 0);
        assert_eq!(laid[1].y, i32::MAX);
    }

    #[test]
    fn test_blank_lines_use_control_char_trim() {
        let mut block = TextBlock::new();
        block.set_text("\u{1}\nHello\n\t\u{7}").unwrap();
        assert_eq!(block.lines(), &["Hello"]);

        block.set_text("\u{a0}\nHello").unwrap();
        assert_eq!(block.lines(), &["\u{a0}", "Hello"]);

        assert!(block.set_text("\u{1}\u{2} \n\u{1f}").is_err());
    }

    #[test]
    fn test_font_size_reflected_in_layout() {
        use crate::surface::testing::{DrawOp, RecordingSurface};

        let drawn = |size: i32| {
            let mut block = TextBlock::new();
            block.set_font_size(size).unwrap();
            let mut surface = RecordingSurface::new(400, 300);
            block.draw(&mut surface, 200, 150);
            surface
                .ops
                .into_iter()
                .filter_map(|op| match op {
                    DrawOp::Text { text, x, y } => Some((text, x, y)),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };

        // Glyphs are size / 3 wide; ascent, descent and leading scale too.
        let at_30 = drawn(30);
        assert_eq!(
            at_30,
            vec![("Hello".to_string(), 175, 143), ("World".to_string(), 175, 176)]
        );

        let at_24 = drawn(24);
        assert_eq!(
            at_24,
            vec![("Hello".to_string(), 180, 145), ("World".to_string(), 180, 170)]
        );
    }
}
