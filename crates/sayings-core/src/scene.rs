//! Scene state and compositing order.

use crate::color::Rgba;
use crate::error::{SceneError, SceneResult};
use crate::overlay::{GradientOverlay, OverlayOrientation};
use crate::resources::ImageHandle;
use crate::stamp::StampItem;
use crate::surface::Surface;
use crate::text::TextBlock;
use kurbo::Rect;

/// Signals emitted by scene mutations, drained by the shell for feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// A stamp was added at the click point.
    StampPlaced { x: i32, y: i32 },
    /// The topmost stamp under the click point was removed.
    StampErased { x: i32, y: i32 },
    /// The scene went back to its defaults.
    Reset,
}

/// Compositing layers, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    GradientOverlay,
    Text,
    Stamps,
}

/// Cosmetic frame drawn around the view. Not part of the exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub color: Rgba,
    pub thickness: u32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: Rgba::DARK_GRAY,
            thickness: 3,
        }
    }
}

/// Everything needed to render one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    background_color: Rgba,
    background_image: Option<ImageHandle>,
    gradient_overlay: Option<GradientOverlay>,
    /// Remembered while the overlay is switched off.
    overlay_orientation: OverlayOrientation,
    border: Border,
    text: TextBlock,
    /// Back to front.
    stamps: Vec<StampItem>,
    current_stamp: Option<ImageHandle>,
    events: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub const DEFAULT_BACKGROUND: Rgba = Rgba::DARK_GRAY;

    /// A scene in its default state: dark gray background, white vertical
    /// overlay, "Hello / World" caption, no stamps.
    pub fn new() -> Self {
        Self {
            background_color: Self::DEFAULT_BACKGROUND,
            background_image: None,
            gradient_overlay: Some(GradientOverlay::default()),
            overlay_orientation: OverlayOrientation::Vertical,
            border: Border::default(),
            text: TextBlock::new(),
            stamps: Vec::new(),
            current_stamp: None,
            events: Vec::new(),
        }
    }

    pub fn text(&self) -> &TextBlock {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextBlock {
        &mut self.text
    }

    pub fn background_color(&self) -> Rgba {
        self.background_color
    }

    /// Set the solid background color.
    ///
    /// A background image that is already set keeps being drawn on top of
    /// this color until it is cleared with `set_background_image(None)`.
    pub fn set_background_color(&mut self, color: Rgba) {
        self.background_color = color;
    }

    pub fn background_image(&self) -> Option<&ImageHandle> {
        self.background_image.as_ref()
    }

    pub fn set_background_image(&mut self, image: Option<ImageHandle>) {
        self.background_image = image;
    }

    pub fn gradient_overlay(&self) -> Option<&GradientOverlay> {
        self.gradient_overlay.as_ref()
    }

    pub fn set_gradient_overlay(&mut self, overlay: Option<GradientOverlay>) {
        if let Some(overlay) = &overlay {
            self.overlay_orientation = overlay.orientation;
        }
        self.gradient_overlay = overlay;
    }

    pub fn overlay_orientation(&self) -> OverlayOrientation {
        self.overlay_orientation
    }

    /// Change the overlay axis; remembered if the overlay is currently off.
    pub fn set_overlay_orientation(&mut self, orientation: OverlayOrientation) {
        self.overlay_orientation = orientation;
        if let Some(overlay) = &mut self.gradient_overlay {
            overlay.orientation = orientation;
        }
    }

    pub fn border(&self) -> Border {
        self.border
    }

    pub fn set_border_color(&mut self, color: Rgba) {
        self.border.color = color;
    }

    pub fn set_border_thickness(&mut self, thickness: u32) -> SceneResult<()> {
        if thickness == 0 {
            return Err(SceneError::invalid("Border thickness must be positive"));
        }
        self.border.thickness = thickness;
        Ok(())
    }

    /// Stamps back to front.
    pub fn stamps(&self) -> &[StampItem] {
        &self.stamps
    }

    pub fn current_stamp_image(&self) -> Option<&ImageHandle> {
        self.current_stamp.as_ref()
    }

    /// Select the image placed by the next click; `None` switches to erasing.
    pub fn set_current_stamp_image(&mut self, image: Option<ImageHandle>) {
        self.current_stamp = image;
    }

    /// Place the current stamp at `(x, y)`, or erase the topmost stamp there
    /// when no stamp is selected. Returns true if the scene changed.
    pub fn place_or_erase(&mut self, x: i32, y: i32) -> bool {
        if let Some(image) = &self.current_stamp {
            self.stamps.push(StampItem::new(image.clone(), x, y));
            self.emit(SceneEvent::StampPlaced { x, y });
            return true;
        }
        match self.stamps.iter().rposition(|s| s.contains(x, y)) {
            Some(index) => {
                self.stamps.remove(index);
                self.emit(SceneEvent::StampErased { x, y });
                true
            }
            None => false,
        }
    }

    /// Restore defaults and drop all stamps. The stamp selection is kept.
    pub fn reset(&mut self) {
        self.text = TextBlock::new();
        self.background_image = None;
        self.background_color = Self::DEFAULT_BACKGROUND;
        self.gradient_overlay = Some(GradientOverlay::default());
        self.overlay_orientation = OverlayOrientation::Vertical;
        self.border = Border::default();
        self.stamps.clear();
        self.emit(SceneEvent::Reset);
    }

    /// Layers drawn by [`Scene::render`], bottom to top.
    pub fn render_order(&self) -> Vec<Layer> {
        let mut layers = vec![Layer::Background];
        if self.gradient_overlay.is_some() {
            layers.push(Layer::GradientOverlay);
        }
        layers.push(Layer::Text);
        layers.push(Layer::Stamps);
        layers
    }

    /// Draw the scene onto `surface`. The text is centered on the surface.
    pub fn render(&self, surface: &mut dyn Surface) {
        let (width, height) = (surface.width(), surface.height());
        for layer in self.render_order() {
            match layer {
                Layer::Background => {
                    surface.fill(self.background_color);
                    if let Some(image) = &self.background_image {
                        let dest = Rect::new(0.0, 0.0, width as f64, height as f64);
                        surface.draw_image_scaled(image, dest);
                    }
                }
                Layer::GradientOverlay => {
                    if let Some(overlay) = &self.gradient_overlay {
                        surface.fill_gradient(overlay);
                    }
                }
                Layer::Text => {
                    self.text.draw(surface, width as i32 / 2, height as i32 / 2);
                }
                Layer::Stamps => {
                    for stamp in &self.stamps {
                        stamp.draw(surface);
                    }
                }
            }
        }
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: SceneEvent) {
        log::debug!("Scene event: {:?}", event);
        self.events.push(event);
    }
}
