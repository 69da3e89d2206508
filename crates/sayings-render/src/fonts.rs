//! Font lookup and caching.

use sayings_core::catalog::font_paths;
use sayings_core::{FontSpec, ResourceProvider, TextBlock};
use std::collections::HashMap;
use std::rc::Rc;

// Bundled DejaVu faces (see assets/DejaVu-LICENSE.txt).
static SERIF_REGULAR: &[u8] = include_bytes!("../assets/DejaVuSerif.ttf");
static SERIF_BOLD: &[u8] = include_bytes!("../assets/DejaVuSerif-Bold.ttf");
static SERIF_ITALIC: &[u8] = include_bytes!("../assets/DejaVuSerif-Italic.ttf");
static SERIF_BOLD_ITALIC: &[u8] = include_bytes!("../assets/DejaVuSerif-BoldItalic.ttf");
static SANS_REGULAR: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");
static MONO_REGULAR: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

type FontKey = (String, bool, bool);

/// The bundled face closest to a family and style.
fn bundled_face(family: &str, bold: bool, italic: bool) -> &'static [u8] {
    match family.to_ascii_lowercase().as_str() {
        "sansserif" | "sans-serif" | "sans" | "dialog" => {
            if bold {
                SANS_BOLD
            } else {
                SANS_REGULAR
            }
        }
        "monospaced" | "monospace" => MONO_REGULAR,
        _ => match (bold, italic) {
            (true, true) => SERIF_BOLD_ITALIC,
            (true, false) => SERIF_BOLD,
            (false, true) => SERIF_ITALIC,
            (false, false) => SERIF_REGULAR,
        },
    }
}

/// Fonts loaded on demand through a [`ResourceProvider`].
///
/// A family/style the provider cannot supply falls back to the default
/// family, then to a face bundled with this crate.
pub struct FontBook {
    provider: Rc<dyn ResourceProvider>,
    /// Failed lookups are cached as `None` so they are reported once.
    fonts: HashMap<FontKey, Option<Rc<fontdue::Font>>>,
}

impl FontBook {
    pub fn new(provider: Rc<dyn ResourceProvider>) -> Self {
        Self {
            provider,
            fonts: HashMap::new(),
        }
    }

    /// The font to use for `spec`, if any could be loaded.
    pub fn font(&mut self, spec: &FontSpec) -> Option<Rc<fontdue::Font>> {
        let key = (spec.family.clone(), spec.bold, spec.italic);
        if let Some(cached) = self.fonts.get(&key) {
            return cached.clone();
        }

        let mut candidates = font_paths(&spec.family, spec.bold, spec.italic);
        if spec.family != TextBlock::DEFAULT_FONT_FAMILY {
            candidates.extend(font_paths(TextBlock::DEFAULT_FONT_FAMILY, spec.bold, spec.italic));
        }
        let font = candidates
            .iter()
            .find_map(|path| self.parse(path))
            .or_else(|| {
                log::debug!("Using bundled face for {}", spec.family);
                parse_bytes(bundled_face(&spec.family, spec.bold, spec.italic), "bundled face")
            })
            .map(Rc::new);
        if font.is_none() {
            log::warn!(
                "No font available for {} (bold: {}, italic: {}); text will not be drawn",
                spec.family,
                spec.bold,
                spec.italic
            );
        }
        self.fonts.insert(key, font.clone());
        font
    }

    fn parse(&self, path: &str) -> Option<fontdue::Font> {
        let bytes = self.provider.load_font(path)?;
        parse_bytes(&bytes, path)
    }
}

fn parse_bytes(bytes: &[u8], name: &str) -> Option<fontdue::Font> {
    match fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()) {
        Ok(font) => {
            log::debug!("Loaded font {}", name);
            Some(font)
        }
        Err(e) => {
            log::warn!("Failed to parse font {}: {}", name, e);
            None
        }
    }
}
