//! Filesystem-backed resource loading.

use sayings_core::{ImageHandle, ResourceProvider, SceneError, SoundHandle};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a user-selected image file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<LoadError> for SceneError {
    fn from(err: LoadError) -> Self {
        SceneError::Io(err.to_string())
    }
}

/// Decode an image file (PNG or JPEG) into an [`ImageHandle`].
pub fn load_image_file(path: &Path) -> Result<ImageHandle, LoadError> {
    let decoded = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => {
            LoadError::Io(format!("Failed to read {}: {}", path.display(), io))
        }
        other => LoadError::Decode(format!("Failed to decode {}: {}", path.display(), other)),
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    ImageHandle::from_rgba8(width, height, rgba.into_raw())
        .map_err(|e| LoadError::Decode(e.to_string()))
}

/// Assets stored under a base directory, addressed by relative path.
pub struct AssetDirectory {
    base_path: PathBuf,
}

impl AssetDirectory {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        if !base_path.is_dir() {
            log::warn!("Asset directory {} does not exist", base_path.display());
        }
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }

    fn read(&self, path: &str) -> Option<Vec<u8>> {
        let full = self.resolve(path);
        match fs::read(&full) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::debug!("Asset {} unavailable: {}", full.display(), e);
                None
            }
        }
    }
}

impl ResourceProvider for AssetDirectory {
    fn load_image(&self, path: &str) -> Option<ImageHandle> {
        match load_image_file(&self.resolve(path)) {
            Ok(image) => Some(image),
            Err(e) => {
                log::debug!("Image asset {} unavailable: {}", path, e);
                None
            }
        }
    }

    fn load_sound(&self, path: &str) -> Option<SoundHandle> {
        self.read(path).map(|bytes| SoundHandle::new(path, bytes))
    }

    fn load_font(&self, path: &str) -> Option<Vec<u8>> {
        self.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use sayings_core::catalog::icon_path;
    use sayings_core::StampPalette;
    use tempfile::TempDir;

    fn write_png(dir: &Path, relative: &str, width: u32, height: u32) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
    }

    #[test]
    fn test_load_image_asset() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "icons/star.png", 24, 12);

        let assets = AssetDirectory::new(dir.path());
        let image = assets.load_image("icons/star.png").unwrap();
        assert_eq!((image.width(), image.height()), (24, 12));
        assert!(assets.load_image("icons/bell.png").is_none());
    }

    #[test]
    fn test_palette_from_directory() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), &icon_path("tux"), 32, 32);
        write_png(dir.path(), &icon_path("tv"), 32, 32);

        let palette = StampPalette::load(&AssetDirectory::new(dir.path()));
        assert_eq!(palette.names().collect::<Vec<_>>(), vec!["tux", "tv"]);
    }

    #[test]
    fn test_sounds_and_fonts_are_raw_bytes() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sounds")).unwrap();
        fs::write(dir.path().join("sounds/clink.wav"), b"RIFF").unwrap();

        let assets = AssetDirectory::new(dir.path());
        let sound = assets.load_sound("sounds/clink.wav").unwrap();
        assert_eq!(sound.bytes(), b"RIFF");
        assert!(assets.load_sound("sounds/lase.wav").is_none());
        assert!(assets.load_font("fonts/Serif.ttf").is_none());
    }

    #[test]
    fn test_load_image_file_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.png");
        assert!(matches!(load_image_file(&missing), Err(LoadError::Io(_))));

        let garbage = dir.path().join("garbage.png");
        fs::write(&garbage, b"definitely not a png").unwrap();
        assert!(load_image_file(&garbage).is_err());

        let err: SceneError = load_image_file(&missing).unwrap_err().into();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
