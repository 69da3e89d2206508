//! Application configuration.

use sayings_core::catalog::load_background;
use sayings_core::{Justification, ResourceProvider, Scene};
use sayings_render::DEFAULT_OUTPUT_NAME;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

const INITIAL_CAPTION: &str = "Too bad but it's the life you lead\n\
You're so ahead of yourself that you forgot what you need\n\
Though you can see when you're wrong, you know\n\
You can't always see when you're right. you're right";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Directory holding `images/`, `icons/`, `sounds/` and `fonts/`.
    pub asset_dir: PathBuf,
    /// File name suggested when saving.
    pub output_name: String,
    pub caption: Option<String>,
    pub font_size: Option<i32>,
    /// `left`, `center` or `right`, case-insensitive.
    pub justification: Option<String>,
    /// Name of a bundled background.
    pub background: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Sayings".to_string(),
            width: 800,
            height: 600,
            asset_dir: PathBuf::from("assets"),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            caption: Some(INITIAL_CAPTION.to_string()),
            font_size: Some(24),
            justification: Some(Justification::Left.name().to_string()),
            background: Some("Earthrise".to_string()),
        }
    }
}

impl AppConfig {
    /// `<config dir>/sayings/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sayings").join("config.json"))
    }

    /// Read a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        serde_json::from_str(&json)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Load from `explicit` or the default location, falling back to the
    /// defaults on any error.
    pub fn load_or_default(explicit: Option<PathBuf>) -> Self {
        let Some(path) = explicit.or_else(Self::default_path) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Using configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The scene shown at startup.
    pub fn initial_scene(&self, provider: &dyn ResourceProvider) -> Scene {
        let mut scene = Scene::new();
        let text = scene.text_mut();
        if let Some(caption) = &self.caption {
            if let Err(e) = text.set_text(caption.clone()) {
                log::warn!("Ignoring configured caption: {}", e);
            }
        }
        if let Some(size) = self.font_size {
            if let Err(e) = text.set_font_size(size) {
                log::warn!("Ignoring configured font size: {}", e);
            }
        }
        if let Some(name) = &self.justification {
            match Justification::from_name(name) {
                Ok(justification) => text.set_justification(justification),
                Err(e) => log::warn!("Ignoring configured justification: {}", e),
            }
        }
        if let Some(name) = &self.background {
            match load_background(provider, name) {
                Ok(image) => scene.set_background_image(Some(image)),
                Err(e) => log::warn!("Background {} unavailable: {}", name, e),
            }
        }
        scene
    }
}
