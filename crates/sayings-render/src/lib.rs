//! Sayings Render Library
//!
//! CPU implementation of the scene [`Surface`](sayings_core::Surface) backed
//! by the `image` crate, filesystem asset loading, and image export.

mod assets;
pub mod export;
mod fonts;
mod raster;

pub use assets::{load_image_file, AssetDirectory, LoadError};
pub use export::{render_scene, save_scene, ExportError, OutputFormat, DEFAULT_OUTPUT_NAME};
pub use fonts::FontBook;
pub use raster::RasterSurface;
