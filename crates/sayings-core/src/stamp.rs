//! Stamped icon placed by a mouse click.

use crate::error::{SceneError, SceneResult};
use crate::resources::ImageHandle;
use crate::surface::Surface;
use kurbo::Rect;

/// An image drawn centered on a point.
#[derive(Debug, Clone)]
pub struct StampItem {
    image: ImageHandle,
    center_x: i32,
    center_y: i32,
}

impl StampItem {
    pub fn new(image: ImageHandle, center_x: i32, center_y: i32) -> Self {
        Self {
            image,
            center_x,
            center_y,
        }
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    /// Replace the image. `None` is rejected and leaves the current image.
    pub fn set_image(&mut self, image: Option<ImageHandle>) -> SceneResult<()> {
        let image = image.ok_or_else(|| SceneError::invalid("Null image not allowed"))?;
        self.image = image;
        Ok(())
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.center_x = x;
        self.center_y = y;
    }

    fn half_extent(&self) -> (i32, i32) {
        (self.image.width() as i32 / 2, self.image.height() as i32 / 2)
    }

    /// Top-left corner of the drawn image.
    pub fn top_left(&self) -> (i32, i32) {
        let (hw, hh) = self.half_extent();
        (self.center_x - hw, self.center_y - hh)
    }

    /// Area covered by the image.
    pub fn bounds(&self) -> Rect {
        let (x, y) = self.top_left();
        Rect::new(
            x as f64,
            y as f64,
            (x + self.image.width() as i32) as f64,
            (y + self.image.height() as i32) as f64,
        )
    }

    /// True when `(x, y)` is strictly inside the image; edges do not count.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (hw, hh) = self.half_extent();
        x > self.center_x - hw
            && x < self.center_x + hw
            && y > self.center_y - hh
            && y < self.center_y + hh
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let (x, y) = self.top_left();
        surface.blit(&self.image, x, y);
    }
}
