//! Keyboard shortcuts.

use crate::gui::actions::Action;
use eframe::egui;
use egui::{Key, Modifiers};

/// Check if a keyboard shortcut was consumed.
/// `COMMAND` maps to Ctrl on Windows/Linux and Cmd on macOS.
pub fn consume_shortcut(ctx: &egui::Context, key: Key) -> bool {
    ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(Modifiers::COMMAND, key)))
}

/// Form shortcuts work even while a field has focus.
pub fn handle_keyboard_input(ctx: &egui::Context) -> Option<Action> {
    if consume_shortcut(ctx, Key::S) {
        return Some(Action::Submit);
    }
    if consume_shortcut(ctx, Key::N) {
        return Some(Action::AddRow);
    }
    None
}
