//! Opaque resource handles and the provider that loads them.
//!
//! The scene never performs I/O itself. Images, sounds and font bytes are
//! handed to it by a [`ResourceProvider`]; a missing resource is reported as
//! `None` and the caller degrades the feature instead of failing.

use crate::color::Rgba;
use crate::error::{SceneError, SceneResult};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A decoded RGBA8 raster image. Cloning shares the pixel buffer.
#[derive(Clone)]
pub struct ImageHandle {
    data: ImageData,
}

impl ImageHandle {
    /// Wrap `width * height` RGBA8 pixels (row-major, 4 bytes per pixel).
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::invalid(format!(
                "Image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| SceneError::invalid("Image dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(SceneError::invalid(format!(
                "Expected {} bytes for a {}x{} image, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            data: ImageData {
                data: Blob::new(Arc::new(pixels)),
                format: ImageFormat::Rgba8,
                alpha_type: ImageAlphaType::Alpha,
                width,
                height,
            },
        })
    }

    /// A uniformly colored image.
    pub fn solid(width: u32, height: u32, color: Rgba) -> SceneResult<Self> {
        let pixel = [color.r, color.g, color.b, color.a];
        let count = (width as usize).saturating_mul(height as usize);
        Self::from_rgba8(width, height, pixel.repeat(count))
    }

    pub fn width(&self) -> u32 {
        self.data.width
    }

    pub fn height(&self) -> u32 {
        self.data.height
    }

    /// Raw RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        self.data.data.data()
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = ((y as usize) * (self.width() as usize) + x as usize) * 4;
        let p = &self.pixels()[i..i + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// The underlying peniko image.
    pub fn image_data(&self) -> &ImageData {
        &self.data
    }

    /// True when both handles share the same pixel buffer.
    pub fn same_image(&self, other: &ImageHandle) -> bool {
        self.data.data.id() == other.data.data.id()
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Encoded audio clip, played by the shell when the scene signals an event.
#[derive(Debug, Clone)]
pub struct SoundHandle {
    path: String,
    bytes: Arc<[u8]>,
}

impl SoundHandle {
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Loads bundled assets by relative path (e.g. `icons/star.png`).
pub trait ResourceProvider {
    /// Load and decode an image.
    fn load_image(&self, path: &str) -> Option<ImageHandle>;

    /// Load an audio clip.
    fn load_sound(&self, path: &str) -> Option<SoundHandle>;

    /// Load raw TrueType/OpenType font bytes.
    fn load_font(&self, path: &str) -> Option<Vec<u8>>;
}

/// In-memory provider for testing and embedded assets.
#[derive(Default)]
pub struct MemoryResources {
    images: HashMap<String, ImageHandle>,
    sounds: HashMap<String, SoundHandle>,
    fonts: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    /// Create an empty provider; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_image(&mut self, path: impl Into<String>, image: ImageHandle) {
        self.images.insert(path.into(), image);
    }

    pub fn insert_sound(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        let path = path.into();
        self.sounds.insert(path.clone(), SoundHandle::new(path, bytes));
    }

    pub fn insert_font(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.fonts.insert(path.into(), bytes);
    }
}

impl ResourceProvider for MemoryResources {
    fn load_image(&self, path: &str) -> Option<ImageHandle> {
        self.images.get(path).cloned()
    }

    fn load_sound(&self, path: &str) -> Option<SoundHandle> {
        self.sounds.get(path).cloned()
    }

    fn load_font(&self, path: &str) -> Option<Vec<u8>> {
        self.fonts.get(path).cloned()
    }
}
