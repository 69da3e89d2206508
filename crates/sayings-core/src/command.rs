//! User commands applied to a [`Scene`].
//!
//! Every menu item, toolbar button and mouse click in the shell is turned
//! into one of these and handed to [`Scene::apply`].

use crate::color::Rgba;
use crate::error::SceneResult;
use crate::overlay::{GradientOverlay, OverlayOrientation};
use crate::resources::ImageHandle;
use crate::scene::Scene;
use crate::text::Justification;

/// A scene mutation requested by the user.
#[derive(Debug, Clone)]
pub enum Command {
    /// Start over with the default picture.
    NewPicture,
    /// Replace the caption.
    SetText(String),
    SetFontSize(i32),
    SetLineHeight(f64),
    SetTextColor(Rgba),
    SetBold(bool),
    SetItalic(bool),
    SetJustification(Justification),
    SetFontFamily(String),
    /// Use a bundled or user-selected image as the background; `None` drops
    /// the current one.
    SetBackgroundImage(Option<ImageHandle>),
    /// Use a solid background color. Also drops any background image.
    SetBackgroundColor(Rgba),
    /// Switch the white gradient overlay on or off.
    SetGradientOverlay(bool),
    SetOverlayOrientation(OverlayOrientation),
    SetBorderColor(Rgba),
    SetBorderThickness(u32),
    /// Select the image placed by subsequent clicks.
    SelectStamp(ImageHandle),
    /// Make subsequent clicks erase stamps.
    Eraser,
    /// Mouse press on the scene.
    Click { x: i32, y: i32 },
}

impl Command {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::NewPicture => "New",
            Command::SetText(_) => "Change Text",
            Command::SetFontSize(_) => "Set Size",
            Command::SetLineHeight(_) => "Set Line Height",
            Command::SetTextColor(_) => "Set Color",
            Command::SetBold(_) => "Bold",
            Command::SetItalic(_) => "Italic",
            Command::SetJustification(_) => "Justify",
            Command::SetFontFamily(_) => "Font Name",
            Command::SetBackgroundImage(_) => "Background Image",
            Command::SetBackgroundColor(_) => "Background Color",
            Command::SetGradientOverlay(_) => "Gradient Overlay",
            Command::SetOverlayOrientation(_) => "Overlay Orientation",
            Command::SetBorderColor(_) => "Border Color",
            Command::SetBorderThickness(_) => "Border Thickness",
            Command::SelectStamp(_) => "Stamp",
            Command::Eraser => "Eraser",
            Command::Click { .. } => "Click",
        }
    }
}

impl Scene {
    /// Apply a command. Returns true when the scene needs repainting.
    ///
    /// Invalid arguments are rejected before anything changes.
    pub fn apply(&mut self, command: Command) -> SceneResult<bool> {
        log::trace!("Applying command: {}", command.name());
        match command {
            Command::NewPicture => self.reset(),
            Command::SetText(text) => self.text_mut().set_text(text)?,
            Command::SetFontSize(size) => self.text_mut().set_font_size(size)?,
            Command::SetLineHeight(multiplier) => {
                self.text_mut().set_line_height_multiplier(multiplier)?
            }
            Command::SetTextColor(color) => self.text_mut().set_color(color),
            Command::SetBold(bold) => self.text_mut().set_bold(bold),
            Command::SetItalic(italic) => self.text_mut().set_italic(italic),
            Command::SetJustification(justification) => {
                self.text_mut().set_justification(justification)
            }
            Command::SetFontFamily(family) => self.text_mut().set_font_family(family),
            Command::SetBackgroundImage(image) => self.set_background_image(image),
            Command::SetBackgroundColor(color) => {
                self.set_background_color(color);
                self.set_background_image(None);
            }
            Command::SetGradientOverlay(enabled) => {
                let overlay = enabled.then(|| {
                    GradientOverlay::new(Rgba::WHITE).with_orientation(self.overlay_orientation())
                });
                self.set_gradient_overlay(overlay);
            }
            Command::SetOverlayOrientation(orientation) => self.set_overlay_orientation(orientation),
            Command::SetBorderColor(color) => self.set_border_color(color),
            Command::SetBorderThickness(thickness) => self.set_border_thickness(thickness)?,
            Command::SelectStamp(image) => {
                self.set_current_stamp_image(Some(image));
                return Ok(false);
            }
            Command::Eraser => {
                self.set_current_stamp_image(None);
                return Ok(false);
            }
            Command::Click { x, y } => return Ok(self.place_or_erase(x, y)),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::scene::SceneEvent;

    #[test]
    fn test_text_commands() {
        let mut scene = Scene::new();
        assert!(scene.apply(Command::SetText("A\nB\nC".into())).unwrap());
        assert!(scene.apply(Command::SetFontSize(24)).unwrap());
        assert!(scene.apply(Command::SetBold(true)).unwrap());
        assert!(scene.apply(Command::SetItalic(true)).unwrap());
        assert!(scene.apply(Command::SetJustification(Justification::Right)).unwrap());
        assert!(scene.apply(Command::SetFontFamily("Monospace".into())).unwrap());
        assert!(scene.apply(Command::SetTextColor(Rgba::WHITE)).unwrap());
        assert!(scene.apply(Command::SetLineHeight(2.0)).unwrap());

        let text = scene.text();
        assert_eq!(text.lines().len(), 3);
        assert_eq!(text.font_size(), 24);
        assert!(text.is_bold() && text.is_italic());
        assert_eq!(text.justification(), Justification::Right);
        assert_eq!(text.font_family(), "Monospace");
        assert_eq!(text.color(), Rgba::WHITE);
    }

    #[test]
    fn test_invalid_commands_leave_state() {
        let mut scene = Scene::new();
        assert!(matches!(
            scene.apply(Command::SetFontSize(0)),
            Err(SceneError::InvalidArgument(_))
        ));
        assert!(scene.apply(Command::SetText("  \n ".into())).is_err());
        assert!(scene.apply(Command::SetLineHeight(-1.0)).is_err());
        assert!(scene.apply(Command::SetBorderThickness(0)).is_err());
        assert_eq!(scene.text().font_size(), 30);
        assert_eq!(scene.text().text(), "Hello\nWorld");
        assert_eq!(scene.border().thickness, 3);
    }

    #[test]
    fn test_background_color_command_clears_image() {
        let mut scene = Scene::new();
        let image = ImageHandle::solid(4, 4, Rgba::WHITE).unwrap();
        scene.apply(Command::SetBackgroundImage(Some(image.clone()))).unwrap();
        assert!(scene.background_image().is_some());
        scene.apply(Command::SetBackgroundImage(None)).unwrap();
        assert!(scene.background_image().is_none());
        scene.apply(Command::SetBackgroundImage(Some(image))).unwrap();

        scene.apply(Command::SetBackgroundColor(Rgba::rgb(1, 2, 3))).unwrap();
        assert!(scene.background_image().is_none());
        assert_eq!(scene.background_color(), Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn test_overlay_toggle_keeps_orientation() {
        let mut scene = Scene::new();
        scene
            .apply(Command::SetOverlayOrientation(OverlayOrientation::Horizontal))
            .unwrap();
        scene.apply(Command::SetGradientOverlay(false)).unwrap();
        assert!(scene.gradient_overlay().is_none());

        scene.apply(Command::SetGradientOverlay(true)).unwrap();
        let overlay = scene.gradient_overlay().unwrap();
        assert_eq!(overlay.orientation, OverlayOrientation::Horizontal);
        assert_eq!(overlay.base_color, Rgba::WHITE);
    }

    #[test]
    fn test_stamp_and_eraser_commands() {
        let mut scene = Scene::new();
        let star = ImageHandle::solid(10, 10, Rgba::BLACK).unwrap();

        assert!(!scene.apply(Command::SelectStamp(star)).unwrap());
        assert!(scene.apply(Command::Click { x: 30, y: 30 }).unwrap());
        assert!(!scene.apply(Command::Eraser).unwrap());
        assert!(!scene.apply(Command::Click { x: 0, y: 0 }).unwrap());
        assert!(scene.apply(Command::Click { x: 30, y: 30 }).unwrap());
        assert!(scene.stamps().is_empty());

        scene.apply(Command::NewPicture).unwrap();
        assert_eq!(
            scene.take_events(),
            vec![
                SceneEvent::StampPlaced { x: 30, y: 30 },
                SceneEvent::StampErased { x: 30, y: 30 },
                SceneEvent::Reset,
            ]
        );
    }
}
