//! Saving the composed scene as an image file.

use crate::fonts::FontBook;
use crate::raster::RasterSurface;
use image::{DynamicImage, ImageError, RgbaImage};
use sayings_core::Scene;
use std::path::Path;
use thiserror::Error;

/// File name suggested by the save dialog.
pub const DEFAULT_OUTPUT_NAME: &str = "saying.jpeg";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("The output file name must end with .png or .jpeg, got {0:?}")]
    UnsupportedExtension(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Encodings the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from the file name's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.ends_with(".png") {
            Ok(OutputFormat::Png)
        } else if name.ends_with(".jpeg") || name.ends_with(".jpg") {
            Ok(OutputFormat::Jpeg)
        } else {
            Err(ExportError::UnsupportedExtension(name))
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// Render `scene` into a fresh `width × height` canvas.
pub fn render_scene(
    scene: &Scene,
    width: u32,
    height: u32,
    fonts: Option<&mut FontBook>,
) -> RgbaImage {
    let mut surface = RasterSurface::new(width, height);
    if let Some(fonts) = fonts {
        surface = surface.with_fonts(fonts);
    }
    scene.render(&mut surface);
    surface.into_image()
}

/// Render `scene` and write it to `path`, opaque, in the format named by the
/// extension. Unsupported extensions are rejected before anything is written.
pub fn save_scene(
    scene: &Scene,
    width: u32,
    height: u32,
    fonts: Option<&mut FontBook>,
    path: &Path,
) -> Result<OutputFormat, ExportError> {
    let format = OutputFormat::from_path(path)?;
    let rgba = render_scene(scene, width, height, fonts);
    let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
    rgb.save_with_format(path, format.image_format())
        .map_err(|e| match e {
            ImageError::IoError(io) => {
                ExportError::Io(format!("Failed to write {}: {}", path.display(), io))
            }
            other => ExportError::Encode(other.to_string()),
        })?;
    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sayings_core::{ImageHandle, MemoryResources, Rgba};
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("A.PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("b.jpeg")).unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("dir/c.JPG")).unwrap(), OutputFormat::Jpeg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("d.gif")),
            Err(ExportError::UnsupportedExtension(_))
        ));
        assert!(OutputFormat::from_path(Path::new("png")).is_err());
    }

    #[test]
    fn test_save_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.png");
        let mut scene = Scene::new();
        scene.set_gradient_overlay(None);
        scene.set_current_stamp_image(Some(ImageHandle::solid(6, 6, Rgba::rgb(255, 0, 0)).unwrap()));
        scene.place_or_erase(10, 10);

        assert_eq!(save_scene(&scene, 64, 48, None, &path).unwrap(), OutputFormat::Png);

        let saved = image::open(&path).unwrap().to_rgb8();
        assert_eq!(saved.dimensions(), (64, 48));
        assert_eq!(saved.get_pixel(10, 10).0, [255, 0, 0]);
        assert_eq!(saved.get_pixel(40, 2).0, [64, 64, 64]);
    }

    #[test]
    fn test_save_jpeg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT_NAME);
        save_scene(&Scene::new(), 32, 32, None, &path).unwrap();
        let saved = image::open(&path).unwrap();
        assert_eq!((saved.width(), saved.height()), (32, 32));
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.bmp");
        let result = save_scene(&Scene::new(), 16, 16, None, &path);
        assert!(matches!(result, Err(ExportError::UnsupportedExtension(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing_dir").join("out.png");
        assert!(save_scene(&Scene::new(), 8, 8, None, &path).is_err());
    }

    #[test]
    fn test_rendered_caption_reaches_output() {
        let mut scene = Scene::new();
        scene.set_gradient_overlay(None);
        scene.set_background_color(Rgba::WHITE);

        let blank = render_scene(&scene, 160, 90, None);
        let mut book = FontBook::new(Rc::new(MemoryResources::new()));
        let captioned = render_scene(&scene, 160, 90, Some(&mut book));

        assert!(blank.pixels().all(|p| p.0 == [255, 255, 255, 255]));
        let dark = captioned.pixels().filter(|p| p.0[0] < 128).count();
        assert!(dark > 20);
    }
}
