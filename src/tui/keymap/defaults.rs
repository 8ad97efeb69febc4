use crate::tui::app::Mode;
use crate::tui::keymap::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn translate_vim(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match mode {
        Mode::Normal => match key.code {
            KeyCode::Char('s') if ctrl => Some(Action::Submit),

            KeyCode::Up | KeyCode::Char('k') => Some(Action::Move(0, -1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::Move(0, 1)),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::Move(-1, 0)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::Move(1, 0)),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(Action::Move(-1, 0)),
            KeyCode::Tab => Some(Action::Move(1, 0)),
            KeyCode::BackTab => Some(Action::Move(-1, 0)),

            KeyCode::PageUp => Some(Action::Page(-1)),
            KeyCode::PageDown => Some(Action::Page(1)),
            KeyCode::Home if ctrl => Some(Action::GotoFirst),
            KeyCode::End if ctrl => Some(Action::GotoLast),
            KeyCode::Home | KeyCode::Char('0') => Some(Action::HomeCol),
            KeyCode::End | KeyCode::Char('$') => Some(Action::EndCol),
            KeyCode::Char('G') => Some(Action::GotoLast),
            // 'g' and 'd' are handled in input.rs for the gg / dd sequences

            KeyCode::Enter | KeyCode::Char('i') | KeyCode::Char('a') => Some(Action::EnterEdit),
            KeyCode::Char('x') | KeyCode::Delete => Some(Action::ClearCell),
            KeyCode::Char('S') => Some(Action::ChangeCell),
            KeyCode::Char('o') => Some(Action::InsertRow),
            KeyCode::Char('O') => Some(Action::InsertRowAbove),
            KeyCode::Char('U') => Some(Action::Discard),
            KeyCode::Char(':') => Some(Action::EnterCommand),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Action::Help),
            _ => None,
        },

        Mode::Edit => match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::CommitEdit),
            _ => None,
        },

        Mode::Command => match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::ExecuteCommand),
            _ => None,
        },
    }
}

pub(crate) fn translate_emacs(mode: Mode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match mode {
        Mode::Normal => match key.code {
            // Cancel
            KeyCode::Char('g') if ctrl => Some(Action::Cancel),

            // Movement
            KeyCode::Up => Some(Action::Move(0, -1)),
            KeyCode::Down => Some(Action::Move(0, 1)),
            KeyCode::Left => Some(Action::Move(-1, 0)),
            KeyCode::Right => Some(Action::Move(1, 0)),
            KeyCode::Char('p') if ctrl => Some(Action::Move(0, -1)),
            KeyCode::Char('n') if ctrl => Some(Action::Move(0, 1)),
            KeyCode::Char('b') if ctrl => Some(Action::Move(-1, 0)),
            KeyCode::Char('f') if ctrl => Some(Action::Move(1, 0)),
            KeyCode::PageUp => Some(Action::Page(-1)),
            KeyCode::PageDown => Some(Action::Page(1)),
            KeyCode::Char('v') if ctrl => Some(Action::Page(1)),
            KeyCode::Char('v') if alt => Some(Action::Page(-1)),

            // Tab navigation
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(Action::Move(-1, 0)),
            KeyCode::Tab => Some(Action::Move(1, 0)),
            KeyCode::BackTab => Some(Action::Move(-1, 0)),

            // Home/End column
            KeyCode::Char('a') if ctrl => Some(Action::HomeCol),
            KeyCode::Char('e') if ctrl => Some(Action::EndCol),
            KeyCode::Home if ctrl => Some(Action::GotoFirst),
            KeyCode::End if ctrl => Some(Action::GotoLast),
            KeyCode::Home => Some(Action::HomeCol),
            KeyCode::End => Some(Action::EndCol),
            KeyCode::Char('<') if alt => Some(Action::GotoFirst),
            KeyCode::Char('>') if alt => Some(Action::GotoLast),

            // Edit
            KeyCode::Enter => Some(Action::EnterEdit),
            KeyCode::Char('d') if ctrl => Some(Action::ClearCell),
            KeyCode::Delete => Some(Action::ClearCell),

            // Rows
            KeyCode::Char('o') if ctrl => Some(Action::InsertRow),
            KeyCode::Char('o') if alt => Some(Action::InsertRowAbove),
            KeyCode::Char('k') if ctrl => Some(Action::DeleteRow),

            // Command prompt
            KeyCode::Char('x') if alt => Some(Action::EnterCommand),
            KeyCode::Char(':') => None, // strict

            // Form
            KeyCode::Char('s') if ctrl => Some(Action::Submit),
            KeyCode::Char('r') if alt => Some(Action::Discard),
            KeyCode::Char('q') if ctrl => Some(Action::Quit),
            KeyCode::F(1) => Some(Action::Help),

            _ => None,
        },

        Mode::Edit => match key.code {
            KeyCode::Char('g') if ctrl => Some(Action::Cancel),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::CommitEdit),
            _ => None,
        },

        Mode::Command => match key.code {
            KeyCode::Char('g') if ctrl => Some(Action::Cancel),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::ExecuteCommand),
            _ => None,
        },
    }
}
