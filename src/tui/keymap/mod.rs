//! Keymap translation layer.
//!
//! This keeps key handling separate from app behavior.
//! - Vim keymap uses letter keys and `:` commands.
//! - Emacs keymap is "strict": vim-style letter keys are not active.

mod defaults;
mod parse;
mod types;

pub use parse::load_keymap;
pub(crate) use parse::action_name;
pub use types::{Action, Binding, Keymap};
#[cfg(test)]
pub(crate) use types::{CustomKeymap, KeyCombo, KeymapBindings};

use crate::tui::app::Mode;
use crossterm::event::KeyEvent;

/// Translate a key event to an action based on the current keymap and mode.
///
/// Returns `None` if the key has no binding in the current context.
pub fn translate(keymap: &Keymap, mode: Mode, key: KeyEvent) -> Option<Action> {
    match keymap {
        Keymap::Vim => defaults::translate_vim(mode, key),
        Keymap::Emacs => defaults::translate_emacs(mode, key),
        Keymap::Custom(custom) => custom.translate(mode, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn custom(normal: Vec<Binding>) -> Keymap {
        Keymap::Custom(CustomKeymap {
            name: "mine".to_string(),
            description: None,
            bindings: KeymapBindings {
                normal,
                ..KeymapBindings::default()
            },
        })
    }

    #[test]
    fn test_custom_hint_names_the_bound_help_key() {
        let bound = custom(vec![Binding {
            combo: KeyCombo {
                code: KeyCode::F(2),
                modifiers: KeyModifiers::NONE,
            },
            action: Action::Help,
        }]);
        assert_eq!(bound.status_hint(), "custom keymap: mine  F2 for bindings");

        let unbound = custom(Vec::new());
        assert_eq!(
            unbound.status_hint(),
            "custom keymap: mine  :help for bindings"
        );
    }

    #[test]
    fn test_ctrl_s_submits_in_both_builtins() {
        let ctrl_s = key(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            translate(&Keymap::Vim, Mode::Normal, ctrl_s),
            Some(Action::Submit)
        );
        assert_eq!(
            translate(&Keymap::Emacs, Mode::Normal, ctrl_s),
            Some(Action::Submit)
        );
    }

    #[test]
    fn test_emacs_ignores_vim_letters() {
        let j = key(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(translate(&Keymap::Vim, Mode::Normal, j), Some(Action::Move(0, 1)));
        assert_eq!(translate(&Keymap::Emacs, Mode::Normal, j), None);
    }

    #[test]
    fn test_edit_mode_enter_commits() {
        let enter = key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(
            translate(&Keymap::Vim, Mode::Edit, enter),
            Some(Action::CommitEdit)
        );
        assert_eq!(
            translate(&Keymap::Emacs, Mode::Edit, enter),
            Some(Action::CommitEdit)
        );
    }
}
