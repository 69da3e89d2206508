//! Sayings Core Library
//!
//! Platform-agnostic scene composition model for the Sayings image-annotation
//! demo: a background, an optional gradient overlay, a multi-line caption and
//! a stack of stamped icons, composed in a fixed order onto a [`Surface`].

pub mod catalog;
pub mod color;
pub mod command;
pub mod error;
pub mod overlay;
pub mod resources;
pub mod scene;
pub mod stamp;
pub mod surface;
pub mod text;

pub use catalog::{StampPalette, BACKGROUNDS, STAMP_ICONS};
pub use color::Rgba;
pub use command::Command;
pub use error::{SceneError, SceneResult};
pub use overlay::{GradientOverlay, OverlayOrientation};
pub use resources::{ImageHandle, MemoryResources, ResourceProvider, SoundHandle};
pub use scene::{Border, Layer, Scene, SceneEvent};
pub use stamp::StampItem;
pub use surface::{FontSpec, Surface, TextMetrics};
pub use text::{Justification, LaidOutLine, TextBlock};
