use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::prelude::*;
use std::io;

use super::actions::{ApplyResult, apply_action, handle_command_text, handle_edit_text};
use super::app::{App, Mode};
use super::keymap::{Action, Keymap, translate};
use super::ui;

fn clear_pending_vim_state(app: &mut App) {
    app.pending_g = false;
    app.pending_d = false;
}

fn handle_mouse_event(app: &mut App, terminal_area: Rect, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.help_modal || app.mode != Mode::Normal {
        return;
    }

    let [_header, table_area, _input, _status] = ui::split_main_chunks(terminal_area);
    if let Some((col, row)) = ui::table_cell_at(app, table_area, mouse.column, mouse.row) {
        app.cursor_col = col;
        app.cursor_row = row;
        app.update_viewport();
        clear_pending_vim_state(app);
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) | KeyCode::Char('?') => {
            app.close_help_modal();
        }
        KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.close_help_modal();
        }
        KeyCode::Down | KeyCode::Char('j') => app.scroll_help_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_help_by(-1),
        KeyCode::PageDown => app.scroll_help_by(12),
        KeyCode::PageUp => app.scroll_help_by(-12),
        KeyCode::Home => app.help_scroll = 0,
        _ => {}
    }
}

/// Vim `gg` and `dd`. Returns true when the key was consumed.
fn handle_vim_sequence(app: &mut App, key: KeyEvent) -> bool {
    let plain = key.modifiers.is_empty();

    if key.code == KeyCode::Char('g') && plain {
        if app.pending_g {
            app.pending_g = false;
            app.goto_first();
        } else {
            app.pending_g = true;
            app.pending_d = false;
        }
        return true;
    }
    app.pending_g = false;

    if key.code == KeyCode::Char('d') && plain {
        if app.pending_d {
            app.pending_d = false;
            app.delete_current_row();
        } else {
            app.pending_d = true;
        }
        return true;
    }
    app.pending_d = false;

    false
}

/// Route one key press. Returns `ApplyResult::Quit` when the app should exit.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> ApplyResult {
    if app.help_modal {
        handle_help_key(app, key);
        return ApplyResult::Continue;
    }

    if matches!(app.keymap, Keymap::Vim)
        && app.mode == Mode::Normal
        && handle_vim_sequence(app, key)
    {
        return ApplyResult::Continue;
    }

    if let Some(action) = translate(&app.keymap, app.mode, key) {
        return apply_action(app, action);
    }

    // Text entry fallbacks (not bound in keymaps).
    match app.mode {
        Mode::Edit => handle_edit_text(app, key),
        Mode::Command => handle_command_text(app, key),
        Mode::Normal => {}
    }
    ApplyResult::Continue
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                // Only process key press events (Windows reports Press + Release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key) == ApplyResult::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let terminal_area = Rect::new(0, 0, size.width, size.height);
                handle_mouse_event(app, terminal_area, mouse);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcalc_core::{Column, Session};

    fn press(app: &mut App, code: KeyCode) -> ApplyResult {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn left_click(col: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn first_body_cell_point(table_area: Rect) -> (u16, u16) {
        (
            table_area.x + 1 + ui::ROW_HEADER_WIDTH + ui::COLUMN_SPACING,
            table_area.y + 2,
        )
    }

    #[test]
    fn test_vim_dd_deletes_row_from_draft() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.pending_d);
        assert_eq!(app.draft.len(), 4);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.draft.len(), 3);
        assert_eq!(app.session.table().len(), 4);
    }

    #[test]
    fn test_vim_gg_goes_to_first_row() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor_row, 3);
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor_row, 0);
    }

    #[test]
    fn test_d_then_other_key_is_not_delete() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('j'));
        assert!(!app.pending_d);
        assert_eq!(app.draft.len(), 4);
        assert_eq!(app.cursor_row, 1);
    }

    #[test]
    fn test_typing_edit_and_submit() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        press(&mut app, KeyCode::Char('S'));
        for c in "7".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cell_display(0, Column::A), "7");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.session.table().rows()[0].c, Some(70.0));
    }

    #[test]
    fn test_help_modal_swallows_keys() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_modal);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor_row, 0);
        assert_eq!(app.help_scroll, 1);
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_modal);
    }

    #[test]
    fn test_command_mode_quit() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(press(&mut app, KeyCode::Enter), ApplyResult::Quit);
    }

    #[test]
    fn handle_mouse_event_moves_cursor_in_normal_mode_and_clears_pending_state() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        app.pending_g = true;
        app.pending_d = true;

        let terminal_area = Rect::new(0, 0, 100, 24);
        let [_header, table_area, _input, _status] = ui::split_main_chunks(terminal_area);
        let (x, y) = first_body_cell_point(table_area);

        handle_mouse_event(&mut app, terminal_area, left_click(x, y + 2));

        assert_eq!((app.cursor_col, app.cursor_row), (0, 2));
        assert!(!app.pending_g);
        assert!(!app.pending_d);
    }

    #[test]
    fn handle_mouse_event_ignores_clicks_outside_normal_mode() {
        let mut app = App::new(Session::new(), Keymap::Vim);
        app.mode = Mode::Edit;
        app.cursor_col = 1;
        app.cursor_row = 3;

        let terminal_area = Rect::new(0, 0, 100, 24);
        let [_header, table_area, _input, _status] = ui::split_main_chunks(terminal_area);
        let (x, y) = first_body_cell_point(table_area);

        handle_mouse_event(&mut app, terminal_area, left_click(x, y));

        assert_eq!((app.cursor_col, app.cursor_row), (1, 3));
    }
}
