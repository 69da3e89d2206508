//! Keyboard shortcut registry and documentation.
//!
//! The window has no menu bar, so every menu and toolbar item of the
//! picture editor is reachable from the keyboard.

use sayings_core::Justification;

/// Something the user asked the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NewPicture,
    SaveImage,
    /// Pick an image file to use as the background.
    CustomBackground,
    /// Bundled background at this index.
    Background(usize),
    NextBackgroundColor,
    ToggleOverlay,
    ToggleOverlayOrientation,
    /// Read the caption from a text file.
    ChangeText,
    FontSizeUp,
    FontSizeDown,
    LineHeightUp,
    LineHeightDown,
    NextTextColor,
    ToggleBold,
    ToggleItalic,
    Justify(Justification),
    NextJustification,
    NextFontFamily,
    NextBorderColor,
    /// Stamp icon at this palette index.
    Stamp(usize),
    NextStamp,
    Eraser,
    Quit,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: Action,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: Action,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.ctrl == ctrl && self.shift == shift && self.key.eq_ignore_ascii_case(key)
    }
}

const STAMP_KEYS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"];
const BACKGROUND_KEYS: [&str; 5] = ["F1", "F2", "F3", "F4", "F5"];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts = vec![
            Shortcut::new("N", true, false, "New picture", Action::NewPicture),
            Shortcut::new("S", true, false, "Save image...", Action::SaveImage),
            Shortcut::new("O", true, false, "Custom background...", Action::CustomBackground),
            Shortcut::new("B", false, false, "Next background color", Action::NextBackgroundColor),
            Shortcut::new("G", false, false, "Toggle gradient overlay", Action::ToggleOverlay),
            Shortcut::new(
                "G",
                false,
                true,
                "Toggle overlay orientation",
                Action::ToggleOverlayOrientation,
            ),
            Shortcut::new("T", false, false, "Change text...", Action::ChangeText),
            Shortcut::new("=", false, false, "Larger text", Action::FontSizeUp),
            Shortcut::new("+", false, true, "Larger text", Action::FontSizeUp),
            Shortcut::new("-", false, false, "Smaller text", Action::FontSizeDown),
            Shortcut::new("]", false, false, "Increase line height", Action::LineHeightUp),
            Shortcut::new("[", false, false, "Decrease line height", Action::LineHeightDown),
            Shortcut::new("C", false, false, "Next text color", Action::NextTextColor),
            Shortcut::new("B", true, false, "Bold", Action::ToggleBold),
            Shortcut::new("I", true, false, "Italic", Action::ToggleItalic),
            Shortcut::new("L", true, false, "Justify left", Action::Justify(Justification::Left)),
            Shortcut::new("E", true, false, "Justify center", Action::Justify(Justification::Center)),
            Shortcut::new("R", true, false, "Justify right", Action::Justify(Justification::Right)),
            Shortcut::new("J", false, false, "Next justification", Action::NextJustification),
            Shortcut::new("F", false, false, "Next font family", Action::NextFontFamily),
            Shortcut::new("K", false, false, "Next border color", Action::NextBorderColor),
            Shortcut::new("Tab", false, false, "Next stamp", Action::NextStamp),
            Shortcut::new("Delete", false, false, "Eraser", Action::Eraser),
            Shortcut::new("Backspace", false, false, "Eraser", Action::Eraser),
            Shortcut::new("Q", true, false, "Quit", Action::Quit),
            Shortcut::new("Escape", false, false, "Quit", Action::Quit),
        ];
        for (i, key) in BACKGROUND_KEYS.iter().enumerate() {
            shortcuts.push(Shortcut::new(key, false, false, "Bundled background", Action::Background(i)));
        }
        for (i, key) in STAMP_KEYS.iter().enumerate() {
            shortcuts.push(Shortcut::new(key, false, false, "Select stamp", Action::Stamp(i)));
        }
        shortcuts
    }

    /// The action bound to a key with the given modifiers.
    pub fn lookup(key: &str, ctrl: bool, shift: bool) -> Option<Action> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.action)
    }

    /// Log all shortcuts.
    pub fn log_all() {
        log::info!("=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            log::info!("  {:20} {}", shortcut.format(), shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_format() {
        let s = Shortcut::new("S", true, false, "Save", Action::SaveImage);
        assert_eq!(s.format(), "Ctrl+S");

        let s = Shortcut::new("G", false, true, "Orientation", Action::ToggleOverlayOrientation);
        assert_eq!(s.format(), "Shift+G");
    }

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup("s", true, false), Some(Action::SaveImage));
        assert_eq!(ShortcutRegistry::lookup("S", false, false), None);
        assert_eq!(ShortcutRegistry::lookup("g", false, false), Some(Action::ToggleOverlay));
        assert_eq!(
            ShortcutRegistry::lookup("G", false, true),
            Some(Action::ToggleOverlayOrientation)
        );
        assert_eq!(ShortcutRegistry::lookup("3", false, false), Some(Action::Stamp(2)));
        assert_eq!(ShortcutRegistry::lookup("0", false, false), Some(Action::Stamp(9)));
        assert_eq!(ShortcutRegistry::lookup("F5", false, false), Some(Action::Background(4)));
        assert_eq!(ShortcutRegistry::lookup("j", false, false), Some(Action::NextJustification));
        assert_eq!(
            ShortcutRegistry::lookup("e", true, false),
            Some(Action::Justify(Justification::Center))
        );
    }

    #[test]
    fn test_no_duplicate_bindings() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(
                    !a.matches(b.key, b.ctrl, b.shift),
                    "{} is bound twice",
                    a.format()
                );
            }
        }
    }
}
