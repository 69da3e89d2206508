//! Main application state and event loop.

use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;

use sayings_core::Rgba;
use sayings_render::AssetDirectory;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::EventLoopError;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;
use crate::controller::{Controller, Dialogs, Outcome};
use crate::shortcuts::ShortcutRegistry;

#[cfg(feature = "native")]
mod file_ops {
    use crate::controller::Dialogs;
    use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
    use std::path::PathBuf;

    /// Native file choosers starting on the desktop when there is one.
    pub struct NativeDialogs;

    fn dialog(title: &str) -> FileDialog {
        let dialog = FileDialog::new().set_title(title);
        match dirs::desktop_dir().filter(|d| d.is_dir()) {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    impl Dialogs for NativeDialogs {
        fn pick_image(&mut self) -> Option<PathBuf> {
            dialog("Select Background Image")
                .add_filter("Images", &["png", "jpg", "jpeg"])
                .pick_file()
        }

        fn pick_caption(&mut self) -> Option<PathBuf> {
            dialog("Change Text")
                .add_filter("Text", &["txt"])
                .pick_file()
        }

        fn pick_output(&mut self, default_name: &str) -> Option<PathBuf> {
            dialog("Save Image")
                .set_file_name(default_name)
                .add_filter("JPEG Image", &["jpeg", "jpg"])
                .add_filter("PNG Image", &["png"])
                .save_file()
        }

        fn notify(&mut self, message: &str) {
            MessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title("Sayings")
                .set_description(message)
                .set_buttons(MessageButtons::Ok)
                .show();
        }
    }
}

#[cfg(not(feature = "native"))]
mod file_ops {
    use crate::controller::Dialogs;
    use std::path::PathBuf;

    /// No file dialogs without the native feature; messages go to the log.
    pub struct NativeDialogs;

    impl Dialogs for NativeDialogs {
        fn pick_image(&mut self) -> Option<PathBuf> {
            log::warn!("File dialogs require the native feature");
            None
        }

        fn pick_caption(&mut self) -> Option<PathBuf> {
            self.pick_image()
        }

        fn pick_output(&mut self, _default_name: &str) -> Option<PathBuf> {
            self.pick_image()
        }

        fn notify(&mut self, message: &str) {
            log::error!("{}", message);
        }
    }
}

/// Name of a key as written in the shortcut registry.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_uppercase()),
        Key::Named(named) => {
            let name = match named {
                NamedKey::Tab => "Tab",
                NamedKey::Delete => "Delete",
                NamedKey::Backspace => "Backspace",
                NamedKey::Escape => "Escape",
                NamedKey::F1 => "F1",
                NamedKey::F2 => "F2",
                NamedKey::F3 => "F3",
                NamedKey::F4 => "F4",
                NamedKey::F5 => "F5",
                _ => return None,
            };
            Some(name.to_string())
        }
        _ => None,
    }
}

/// Runtime state for the application window.
struct AppState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    _context: softbuffer::Context<Arc<Window>>,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    controller: Controller,
    dialogs: Box<dyn Dialogs>,
    state: Option<AppState>,
    cursor: Option<PhysicalPosition<f64>>,
    modifiers: ModifiersState,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let resources = Rc::new(AssetDirectory::new(config.asset_dir.clone()));
        let controller = Controller::new(&config, resources);
        Self {
            config,
            controller,
            dialogs: Box::new(file_ops::NativeDialogs),
            state: None,
            cursor: None,
            modifiers: ModifiersState::empty(),
        }
    }

    /// Run the event loop until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), EventLoopError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(config);
        ShortcutRegistry::log_all();
        event_loop.run_app(&mut app)
    }

    fn create_state(&self, event_loop: &ActiveEventLoop) -> Result<AppState, String> {
        let attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| format!("Failed to create window: {}", e))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| format!("Failed to create display context: {}", e))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| format!("Failed to create surface: {}", e))?;
        Ok(AppState {
            window,
            surface,
            _context: context,
        })
    }

    fn redraw(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let size = state.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        if let Err(e) = state.surface.resize(width, height) {
            log::error!("Failed to resize surface: {}", e);
            return;
        }

        let frame = self.controller.render_frame(size.width, size.height);
        let mut buffer = match state.surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(e) => {
                log::error!("Failed to get frame buffer: {}", e);
                return;
            }
        };
        for (dst, px) in buffer.iter_mut().zip(frame.pixels()) {
            *dst = Rgba::new(px[0], px[1], px[2], px[3]).to_rgb_u32();
        }
        if let Err(e) = buffer.present() {
            log::error!("Failed to present frame: {}", e);
        }
    }

    fn finish(&mut self, outcome: Outcome, event_loop: &ActiveEventLoop) {
        match outcome {
            Outcome::Unchanged => {}
            Outcome::Repaint => {
                if let Some(state) = &self.state {
                    state.window.request_redraw();
                }
            }
            Outcome::Quit => event_loop.exit(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.create_state(event_loop) {
            Ok(state) => {
                let size = state.window.inner_size();
                self.controller.set_canvas_size(size.width, size.height);
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.controller.set_canvas_size(size.width, size.height);
                self.finish(Outcome::Repaint, event_loop);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(position) = self.cursor {
                    let outcome = self.controller.click(position.x as i32, position.y as i32);
                    self.finish(outcome, event_loop);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let Some(name) = key_name(&event.logical_key) else {
                    return;
                };
                let ctrl = self.modifiers.control_key() || self.modifiers.super_key();
                let shift = self.modifiers.shift_key();
                if let Some(action) = ShortcutRegistry::lookup(&name, ctrl, shift) {
                    let outcome = self.controller.handle(action, self.dialogs.as_mut());
                    self.finish(outcome, event_loop);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::SmolStr;

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(&Key::Character(SmolStr::new("s"))).as_deref(), Some("S"));
        assert_eq!(key_name(&Key::Character(SmolStr::new("+"))).as_deref(), Some("+"));
        assert_eq!(key_name(&Key::Named(NamedKey::F3)).as_deref(), Some("F3"));
        assert_eq!(key_name(&Key::Named(NamedKey::Escape)).as_deref(), Some("Escape"));
        assert_eq!(key_name(&Key::Named(NamedKey::Enter)), None);
    }
}
