//! Bundled asset names and the paths they resolve to.

use crate::error::{SceneError, SceneResult};
use crate::resources::{ImageHandle, ResourceProvider};
use crate::scene::SceneEvent;

/// Bundled background images, in menu order.
pub const BACKGROUNDS: &[&str] = &["Mandelbrot", "Earthrise", "Sunset", "Cloud", "Eagle_nebula"];

/// Bundled stamp icons, in toolbar order.
pub const STAMP_ICONS: &[&str] = &[
    "bell", "camera", "flower", "star", "check", "crossout", "tux", "bomb", "keyboard",
    "lightbulb", "tv",
];

/// Played when a stamp is placed.
pub const PLACE_SOUND: &str = "sounds/clink.wav";
/// Played when a stamp is erased.
pub const ERASE_SOUND: &str = "sounds/lase.wav";

pub fn background_path(name: &str) -> String {
    format!("images/{}.jpeg", name.to_lowercase())
}

pub fn icon_path(name: &str) -> String {
    format!("icons/{}.png", name)
}

/// Font files to try for a family and style, best match first.
pub fn font_paths(family: &str, bold: bool, italic: bool) -> Vec<String> {
    let suffix = match (bold, italic) {
        (true, true) => Some("-BoldItalic"),
        (true, false) => Some("-Bold"),
        (false, true) => Some("-Italic"),
        (false, false) => None,
    };
    let mut paths = Vec::with_capacity(2);
    if let Some(suffix) = suffix {
        paths.push(format!("fonts/{}{}.ttf", family, suffix));
    }
    paths.push(format!("fonts/{}.ttf", family));
    paths
}

/// Sound to play for a scene event, if any.
pub fn sound_for(event: &SceneEvent) -> Option<&'static str> {
    match event {
        SceneEvent::StampPlaced { .. } => Some(PLACE_SOUND),
        SceneEvent::StampErased { .. } => Some(ERASE_SOUND),
        SceneEvent::Reset => None,
    }
}

/// Load a bundled background by name.
pub fn load_background(provider: &dyn ResourceProvider, name: &str) -> SceneResult<ImageHandle> {
    if !BACKGROUNDS.iter().any(|b| b.eq_ignore_ascii_case(name)) {
        return Err(SceneError::invalid(format!("Unknown background: {}", name)));
    }
    let path = background_path(name);
    provider
        .load_image(&path)
        .ok_or(SceneError::ResourceUnavailable(path))
}

/// The stamp icons that could be loaded, in toolbar order.
#[derive(Debug, Clone, Default)]
pub struct StampPalette {
    entries: Vec<(String, ImageHandle)>,
}

impl StampPalette {
    /// Load every bundled icon; missing ones are left out.
    pub fn load(provider: &dyn ResourceProvider) -> Self {
        let mut entries = Vec::with_capacity(STAMP_ICONS.len());
        for name in STAMP_ICONS {
            match provider.load_image(&icon_path(name)) {
                Some(image) => entries.push((name.to_string(), image)),
                None => log::warn!("Stamp icon unavailable: {}", name),
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Icon at toolbar position `index`.
    pub fn nth(&self, index: usize) -> Option<(&str, &ImageHandle)> {
        self.entries.get(index).map(|(n, image)| (n.as_str(), image))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}
