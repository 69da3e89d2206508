//! Sayings Application
//!
//! The native application shell: window and input handling, keyboard
//! shortcuts, file dialogs and configuration around a [`sayings_core::Scene`].

mod app;
mod audio;
mod config;
mod controller;
mod shortcuts;

pub use app::App;
pub use audio::SoundPlayer;
pub use config::{AppConfig, ConfigError};
pub use controller::{Controller, Dialogs, Outcome};
pub use shortcuts::{Action, Shortcut, ShortcutRegistry};
