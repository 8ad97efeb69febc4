use crate::tui::app::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Available keybinding schemes.
///
/// - [`Vim`](Keymap::Vim): hjkl navigation, `:` commands, modal editing
/// - [`Emacs`](Keymap::Emacs): C-n/p/f/b navigation, M-x commands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Keymap {
    /// Vim-style keybindings (hjkl, :commands, modal editing).
    Vim,
    /// Emacs-style keybindings (C-n/p/f/b, M-x commands).
    Emacs,
    /// Custom keymap loaded from user config.
    Custom(CustomKeymap),
}

impl Keymap {
    pub fn name(&self) -> &str {
        match self {
            Keymap::Vim => "vim",
            Keymap::Emacs => "emacs",
            Keymap::Custom(custom) => &custom.name,
        }
    }

    pub fn status_hint(&self) -> String {
        match self {
            Keymap::Vim => {
                "hjkl:move  i:edit  x:clear  o:add row  dd:delete row  :w/C-s:submit  U:discard  ?:help  :q:quit".to_string()
            }
            Keymap::Emacs => {
                "C-n/p/f/b:move  Enter:edit  C-d:clear  C-o:add row  C-k:delete row  C-s:submit  M-r:discard  F1:help  C-q:quit".to_string()
            }
            Keymap::Custom(custom) => {
                let help_key = custom
                    .bindings
                    .normal
                    .iter()
                    .find(|binding| binding.action == Action::Help)
                    .map(|binding| binding.combo.display())
                    .unwrap_or_else(|| ":help".to_string());
                format!("custom keymap: {}  {} for bindings", custom.name, help_key)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomKeymap {
    pub name: String,
    pub description: Option<String>,
    pub bindings: KeymapBindings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeymapBindings {
    pub normal: Vec<Binding>,
    pub edit: Vec<Binding>,
    pub command: Vec<Binding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub combo: KeyCombo,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Named keys accepted in `keymaps.toml` and shown in help listings.
pub(crate) const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Backspace", KeyCode::Backspace),
    ("Delete", KeyCode::Delete),
    ("Tab", KeyCode::Tab),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Space", KeyCode::Char(' ')),
];

impl KeyCombo {
    fn matches(&self, key: KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers.is_empty() || key.modifiers.contains(self.modifiers))
    }

    /// Emacs-style rendering: `C-s`, `M-Left`, `F1`.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for (flag, prefix) in [
            (KeyModifiers::CONTROL, "C-"),
            (KeyModifiers::ALT, "M-"),
            (KeyModifiers::SHIFT, "S-"),
        ] {
            if self.modifiers.contains(flag) {
                out.push_str(prefix);
            }
        }
        match KEY_NAMES.iter().find(|(_, code)| *code == self.code) {
            Some((name, _)) => out.push_str(name),
            None => match self.code {
                KeyCode::Char(c) => out.push(c),
                KeyCode::F(n) => out.push_str(&format!("F{}", n)),
                _ => out.push('?'),
            },
        }
        out
    }
}

impl CustomKeymap {
    pub(crate) fn translate(&self, mode: Mode, key: KeyEvent) -> Option<Action> {
        let bindings = self.bindings.for_mode(mode);
        bindings
            .iter()
            .filter(|binding| !binding.combo.modifiers.is_empty())
            .find(|binding| binding.combo.matches(key))
            .or_else(|| {
                bindings
                    .iter()
                    .filter(|binding| binding.combo.modifiers.is_empty())
                    .find(|binding| binding.combo.matches(key))
            })
            .map(|binding| binding.action.clone())
    }
}

impl KeymapBindings {
    fn for_mode(&self, mode: Mode) -> &Vec<Binding> {
        match mode {
            Mode::Normal => &self.normal,
            Mode::Edit => &self.edit,
            Mode::Command => &self.command,
        }
    }
}

/// Actions that can be triggered by key presses.
///
/// The keymap translates key events into actions, which are then applied
/// to the application state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Cancel current operation and return to Normal mode.
    Cancel,
    /// Enter Edit mode for the current cell.
    EnterEdit,
    /// Write the edit buffer into the draft and return to Normal mode.
    CommitEdit,
    /// Enter Command mode (`:` prompt).
    EnterCommand,
    /// Execute the command in the command buffer.
    ExecuteCommand,
    /// Clear the current cell and start editing it.
    ChangeCell,
    /// Clear the current cell.
    ClearCell,

    /// Insert a blank row below the cursor.
    InsertRow,
    /// Insert a blank row above the cursor.
    InsertRowAbove,
    /// Delete the row under the cursor.
    DeleteRow,

    /// Submit all buffered edits.
    Submit,
    /// Throw away buffered edits and reload the stored table.
    Discard,
    /// Open the help modal.
    Help,
    /// Quit (asks again when there are unsubmitted edits).
    Quit,

    /// Move cursor by (dx, dy).
    Move(i32, i32),
    /// Page up (-1) or down (+1).
    Page(i32),
    /// Jump to first column.
    HomeCol,
    /// Jump to last column.
    EndCol,
    /// Jump to first row.
    GotoFirst,
    /// Jump to last row.
    GotoLast,
}
