//! Turns user actions into scene commands and file operations.

use crate::audio::SoundPlayer;
use crate::config::AppConfig;
use crate::shortcuts::Action;
use image::RgbaImage;
use sayings_core::catalog::{load_background, sound_for, BACKGROUNDS, ERASE_SOUND, PLACE_SOUND};
use sayings_core::{
    Command, Justification, ResourceProvider, Rgba, Scene, SceneError, SceneEvent, SoundHandle,
    StampPalette,
};
use sayings_render::{load_image_file, save_scene, ExportError, FontBook, RasterSurface};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

const READ_FAILED: &str = "Sorry, couldn't read the file.";
const SAVE_FAILED: &str = "Sorry, the image could not be saved.";
const BAD_EXTENSION: &str = "The output file name must end with .png or .jpeg.";

const FONT_SIZE_STEP: i32 = 2;
const LINE_HEIGHT_STEP: f64 = 0.5;

const TEXT_COLORS: &[Rgba] = &[
    Rgba::BLACK,
    Rgba::WHITE,
    Rgba::rgb(200, 30, 30),
    Rgba::rgb(250, 210, 40),
    Rgba::rgb(30, 60, 200),
    Rgba::DARK_GRAY,
];

const BACKGROUND_COLORS: &[Rgba] = &[
    Rgba::DARK_GRAY,
    Rgba::BLACK,
    Rgba::rgb(20, 30, 90),
    Rgba::rgb(110, 20, 30),
    Rgba::rgb(30, 90, 40),
    Rgba::LIGHT_GRAY,
];

const BORDER_COLORS: &[Rgba] = &[Rgba::DARK_GRAY, Rgba::BLACK, Rgba::WHITE, Rgba::LIGHT_GRAY];

const FONT_FAMILIES: &[&str] = &["Serif", "SansSerif", "Monospaced"];

/// File choosers and message boxes.
pub trait Dialogs {
    fn pick_image(&mut self) -> Option<PathBuf>;
    fn pick_caption(&mut self) -> Option<PathBuf>;
    fn pick_output(&mut self, default_name: &str) -> Option<PathBuf>;
    fn notify(&mut self, message: &str);
}

/// What the window should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Repaint,
    Quit,
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed {
            Outcome::Repaint
        } else {
            Outcome::Unchanged
        }
    }
}

fn font_family_index(family: &str) -> usize {
    FONT_FAMILIES.iter().position(|f| *f == family).unwrap_or(0)
}

/// Picks the next entry of a fixed list, wrapping around.
fn cycle<T: Copy>(items: &[T], index: &mut usize) -> T {
    *index = (*index + 1) % items.len();
    items[*index]
}

/// Application state that outlives the window.
pub struct Controller {
    scene: Scene,
    palette: StampPalette,
    fonts: FontBook,
    resources: Rc<dyn ResourceProvider>,
    sounds: HashMap<&'static str, SoundHandle>,
    player: SoundPlayer,
    output_name: String,
    canvas_size: (u32, u32),
    text_color_index: usize,
    background_color_index: usize,
    border_color_index: usize,
    font_family_index: usize,
    stamp_index: Option<usize>,
}

impl Controller {
    pub fn new(config: &AppConfig, resources: Rc<dyn ResourceProvider>) -> Self {
        let palette = StampPalette::load(resources.as_ref());
        log::info!("Loaded {} stamp icons", palette.len());

        let mut sounds = HashMap::new();
        for path in [PLACE_SOUND, ERASE_SOUND] {
            match resources.load_sound(path) {
                Some(sound) => {
                    sounds.insert(path, sound);
                }
                None => log::warn!("Sound unavailable: {}", path),
            }
        }

        let scene = config.initial_scene(resources.as_ref());
        let font_family_index = font_family_index(scene.text().font_family());

        Self {
            scene,
            palette,
            fonts: FontBook::new(resources.clone()),
            resources,
            sounds,
            player: SoundPlayer::open(),
            output_name: config.output_name.clone(),
            canvas_size: (config.width, config.height),
            text_color_index: 0,
            background_color_index: 0,
            border_color_index: 0,
            font_family_index,
            stamp_index: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = (width, height);
    }

    /// Compose the scene and its border at the given size.
    pub fn render_frame(&mut self, width: u32, height: u32) -> RgbaImage {
        let mut surface = RasterSurface::new(width, height).with_fonts(&mut self.fonts);
        self.scene.render(&mut surface);
        surface.stroke_border(self.scene.border());
        surface.into_image()
    }

    /// Mouse press at `(x, y)`.
    pub fn click(&mut self, x: i32, y: i32) -> Outcome {
        self.apply(Command::Click { x, y }, None)
    }

    pub fn handle(&mut self, action: Action, dialogs: &mut dyn Dialogs) -> Outcome {
        log::debug!("Action: {:?}", action);
        let command = match action {
            Action::Quit => return Outcome::Quit,
            Action::SaveImage => {
                self.save(dialogs);
                return Outcome::Unchanged;
            }
            Action::NewPicture => {
                let outcome = self.apply(Command::NewPicture, Some(dialogs));
                self.reset_cycles();
                return outcome;
            }
            Action::CustomBackground => {
                let Some(path) = dialogs.pick_image() else {
                    return Outcome::Unchanged;
                };
                match load_image_file(&path) {
                    Ok(image) => {
                        log::info!("Loaded background {}", path.display());
                        Command::SetBackgroundImage(Some(image))
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        dialogs.notify(READ_FAILED);
                        return Outcome::Unchanged;
                    }
                }
            }
            Action::Background(index) => {
                let Some(name) = BACKGROUNDS.get(index) else {
                    return Outcome::Unchanged;
                };
                match load_background(self.resources.as_ref(), name) {
                    Ok(image) => Command::SetBackgroundImage(Some(image)),
                    Err(SceneError::ResourceUnavailable(path)) => {
                        log::warn!("Background {} not bundled ({}), clearing image", name, path);
                        Command::SetBackgroundImage(None)
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        return Outcome::Unchanged;
                    }
                }
            }
            Action::NextBackgroundColor => Command::SetBackgroundColor(cycle(
                BACKGROUND_COLORS,
                &mut self.background_color_index,
            )),
            Action::ToggleOverlay => {
                Command::SetGradientOverlay(self.scene.gradient_overlay().is_none())
            }
            Action::ToggleOverlayOrientation => {
                let orientation = self.scene.overlay_orientation().toggled();
                log::info!("Overlay orientation: {}", orientation.name());
                Command::SetOverlayOrientation(orientation)
            }
            Action::ChangeText => {
                let Some(path) = dialogs.pick_caption() else {
                    return Outcome::Unchanged;
                };
                match std::fs::read_to_string(&path) {
                    Ok(text) => Command::SetText(text),
                    Err(e) => {
                        log::error!("Failed to read {}: {}", path.display(), e);
                        dialogs.notify(READ_FAILED);
                        return Outcome::Unchanged;
                    }
                }
            }
            Action::FontSizeUp => Command::SetFontSize(self.scene.text().font_size() + FONT_SIZE_STEP),
            Action::FontSizeDown => {
                Command::SetFontSize((self.scene.text().font_size() - FONT_SIZE_STEP).max(1))
            }
            Action::LineHeightUp => Command::SetLineHeight(
                self.scene.text().line_height_multiplier() + LINE_HEIGHT_STEP,
            ),
            Action::LineHeightDown => Command::SetLineHeight(
                (self.scene.text().line_height_multiplier() - LINE_HEIGHT_STEP).max(0.0),
            ),
            Action::NextTextColor => {
                Command::SetTextColor(cycle(TEXT_COLORS, &mut self.text_color_index))
            }
            Action::ToggleBold => Command::SetBold(!self.scene.text().is_bold()),
            Action::ToggleItalic => Command::SetItalic(!self.scene.text().is_italic()),
            Action::Justify(justification) => Command::SetJustification(justification),
            Action::NextJustification => {
                let all = Justification::all();
                let current = self.scene.text().justification();
                let index = all.iter().position(|j| *j == current).unwrap_or(0);
                let next = all[(index + 1) % all.len()];
                log::info!("Justification: {}", next.name());
                Command::SetJustification(next)
            }
            Action::NextFontFamily => Command::SetFontFamily(
                cycle(FONT_FAMILIES, &mut self.font_family_index).to_string(),
            ),
            Action::NextBorderColor => {
                Command::SetBorderColor(cycle(BORDER_COLORS, &mut self.border_color_index))
            }
            Action::Stamp(index) => match self.palette.nth(index) {
                Some((name, image)) => {
                    log::debug!("Selected stamp {}", name);
                    self.stamp_index = Some(index);
                    Command::SelectStamp(image.clone())
                }
                None => return Outcome::Unchanged,
            },
            Action::NextStamp => {
                if self.palette.is_empty() {
                    return Outcome::Unchanged;
                }
                let index = self.stamp_index.map_or(0, |i| (i + 1) % self.palette.len());
                return self.handle(Action::Stamp(index), dialogs);
            }
            Action::Eraser => {
                self.stamp_index = None;
                Command::Eraser
            }
        };
        self.apply(command, Some(dialogs))
    }

    fn apply(&mut self, command: Command, dialogs: Option<&mut dyn Dialogs>) -> Outcome {
        let outcome = match self.scene.apply(command) {
            Ok(changed) => Outcome::from(changed),
            Err(e) => {
                log::warn!("{}", e);
                if let (SceneError::InvalidArgument(message), Some(dialogs)) = (&e, dialogs) {
                    dialogs.notify(message);
                }
                Outcome::Unchanged
            }
        };
        for event in self.scene.take_events() {
            self.feedback(&event);
        }
        outcome
    }

    /// Audible feedback for a scene event.
    fn feedback(&self, event: &SceneEvent) {
        let Some(path) = sound_for(event) else {
            return;
        };
        match self.sounds.get(path) {
            Some(sound) => {
                self.player.play(sound);
            }
            None => log::trace!("No sound for {:?}", event),
        }
    }

    /// Color and font cycles start over with a new picture.
    fn reset_cycles(&mut self) {
        self.text_color_index = 0;
        self.background_color_index = 0;
        self.border_color_index = 0;
        self.font_family_index = font_family_index(self.scene.text().font_family());
    }

    fn save(&mut self, dialogs: &mut dyn Dialogs) {
        let Some(path) = dialogs.pick_output(&self.output_name) else {
            return;
        };
        let (width, height) = self.canvas_size;
        match save_scene(&self.scene, width, height, Some(&mut self.fonts), &path) {
            Ok(_) => {}
            Err(ExportError::UnsupportedExtension(name)) => {
                log::warn!("Refusing to save {}", name);
                dialogs.notify(BAD_EXTENSION);
            }
            Err(e) => {
                log::error!("{}", e);
                dialogs.notify(SAVE_FAILED);
            }
        }
    }
}
