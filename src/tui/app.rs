//! Application state and logic.
//!
//! [`App`] holds the session, the draft being edited, the cursor, and the
//! modal editing state. Edits only touch the draft; the session's table
//! changes on [`App::submit`].

use formcalc_core::{Draft, FormcalcError, SUBMIT_CONFIRMATION, Session, ValidationReport};
use formcalc_engine::engine::{Column, Table, is_consistent};

use super::keymap::Keymap;

/// Modal editing state for the application.
///
/// - [`Normal`](Mode::Normal): Navigate and execute commands
/// - [`Edit`](Mode::Edit): Edit the current input cell
/// - [`Command`](Mode::Command): Enter ex-style commands (`:w`, `:q`, etc.)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the table, execute single-key commands.
    Normal,
    /// Edit the contents of the current cell.
    Edit,
    /// Enter ex-style commands.
    Command,
}

/// Main application state container.
pub struct App {
    /// The user's session; holds the submitted table
    pub session: Session,
    /// Buffered edits not yet submitted
    pub draft: Draft,
    /// Field errors from the last rejected submit
    pub validation: Option<ValidationReport>,
    /// Current cursor position (row)
    pub cursor_row: usize,
    /// Current cursor position (column index into [`Column::ALL`])
    pub cursor_col: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Current mode
    pub mode: Mode,
    /// Edit buffer for cell editing
    pub edit_buffer: String,
    /// Cursor position within edit buffer (byte offset)
    pub edit_cursor: usize,
    /// Command buffer for command mode
    pub command_buffer: String,
    /// Cursor position within command buffer (byte offset)
    pub command_cursor: usize,
    /// Status message to display
    pub status_message: String,
    /// Confirm quit flag
    pub confirm_quit: bool,
    /// Help modal state
    pub help_modal: bool,
    /// Help modal scroll offset
    pub help_scroll: usize,
    /// Active keymap
    pub keymap: Keymap,
    /// Vim `g` prefix pending
    pub pending_g: bool,
    /// Vim `d` prefix pending
    pub pending_d: bool,
}

impl App {
    pub fn new(session: Session, keymap: Keymap) -> Self {
        let draft = session.draft();
        App {
            session,
            draft,
            validation: None,
            cursor_row: 0,
            cursor_col: 0,
            viewport_row: 0,
            visible_rows: 20,
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            command_buffer: String::new(),
            command_cursor: 0,
            status_message: String::new(),
            confirm_quit: false,
            help_modal: false,
            help_scroll: 0,
            keymap,
            pending_g: false,
            pending_d: false,
        }
    }

    pub fn current_column(&self) -> Column {
        Column::from_index(self.cursor_col).unwrap_or(Column::A)
    }

    /// True when the draft holds edits that have not been submitted.
    pub fn is_dirty(&self) -> bool {
        self.draft.differs_from(&self.session.table())
    }

    /// Display text for a cell of the draft.
    pub fn cell_display(&self, row: usize, column: Column) -> String {
        self.draft
            .rows
            .get(row)
            .map(|r| r.display(column))
            .unwrap_or_default()
    }

    /// True when a row's derived cells no longer match its typed inputs.
    pub fn is_row_stale(&self, row: usize) -> bool {
        self.draft.rows.get(row).is_some_and(|r| match r.to_row() {
            Some(typed) => !is_consistent(&Table::from_rows(vec![typed])),
            None => true,
        })
    }

    /// Whether the last rejected submit flagged this cell.
    pub fn has_error(&self, row: usize, column: Column) -> bool {
        self.validation
            .as_ref()
            .is_some_and(|report| report.contains(row, column))
    }

    fn clamp_cursor(&mut self) {
        let last = self.draft.len().saturating_sub(1);
        self.cursor_row = self.cursor_row.min(last);
        self.cursor_col = self.cursor_col.min(Column::ALL.len() - 1);
        self.update_viewport();
    }

    /// Keep the cursor row inside the viewport.
    pub fn update_viewport(&mut self) {
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + self.visible_rows {
            self.viewport_row = self.cursor_row + 1 - self.visible_rows.max(1);
        }
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let new_col = (self.cursor_col as i64 + dx as i64).max(0) as usize;
        let new_row = (self.cursor_row as i64 + dy as i64).max(0) as usize;
        self.cursor_col = new_col;
        self.cursor_row = new_row;
        self.clamp_cursor();
    }

    pub fn goto_first(&mut self) {
        self.cursor_row = 0;
        self.update_viewport();
    }

    pub fn goto_last(&mut self) {
        self.cursor_row = self.draft.len().saturating_sub(1);
        self.update_viewport();
    }

    pub fn enter_edit_mode(&mut self) {
        let column = self.current_column();
        if !column.is_editable() {
            self.status_message = format!("Error: '{}' is read-only", column.label());
            return;
        }
        let Some(text) = self.draft.field_text(self.cursor_row, column) else {
            self.status_message = "Error: No row to edit (o adds one)".to_string();
            return;
        };
        self.edit_buffer = text.to_string();
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::Edit;
        self.status_message.clear();
    }

    /// Clear the current cell and start editing it.
    pub fn change_cell(&mut self) {
        self.enter_edit_mode();
        if self.mode == Mode::Edit {
            self.edit_buffer.clear();
            self.edit_cursor = 0;
        }
    }

    fn forget_error(&mut self, row: usize, column: Column) {
        if let Some(report) = self.validation.as_mut() {
            report
                .errors
                .retain(|e| !(e.row == row && e.column == column));
            if report.is_empty() {
                self.validation = None;
            }
        }
    }

    fn set_current_field(&mut self, text: &str) -> bool {
        let row = self.cursor_row;
        let column = self.current_column();
        match self.draft.set_field(row, column, text) {
            Ok(()) => {
                self.forget_error(row, column);
                self.confirm_quit = false;
                true
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
                false
            }
        }
    }

    /// Write the edit buffer into the draft. Nothing is recomputed yet.
    pub fn commit_edit(&mut self) {
        let input = std::mem::take(&mut self.edit_buffer);
        self.edit_cursor = 0;
        self.mode = Mode::Normal;
        if self.set_current_field(&input) {
            self.status_message = format!(
                "Edited row {} {} (not submitted)",
                self.cursor_row + 1,
                self.current_column().label()
            );
        }
    }

    pub fn clear_current_cell(&mut self) {
        if self.set_current_field("") {
            self.status_message = format!(
                "Cleared row {} {} (not submitted)",
                self.cursor_row + 1,
                self.current_column().label()
            );
        }
    }

    /// Insert a blank row below (or above) the cursor and move onto it.
    pub fn insert_row(&mut self, above: bool) {
        let at = if self.draft.is_empty() || above {
            self.cursor_row
        } else {
            self.cursor_row + 1
        };
        self.draft.insert_row(at);
        // Row positions shifted.
        self.validation = None;
        self.confirm_quit = false;
        self.cursor_row = at;
        self.cursor_col = 0;
        self.clamp_cursor();
        self.status_message = format!("Added row {} (not submitted)", at + 1);
    }

    pub fn delete_current_row(&mut self) {
        let row = self.cursor_row;
        match self.draft.delete_row(row) {
            Ok(()) => {
                self.validation = None;
                self.confirm_quit = false;
                self.clamp_cursor();
                self.status_message = format!("Deleted row {} (not submitted)", row + 1);
            }
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    /// Hand the whole draft to the session.
    ///
    /// On success the draft is rebuilt from the stored table; on a
    /// validation failure the draft is kept so the user can fix it.
    pub fn submit(&mut self) -> bool {
        match self.session.submit(&self.draft) {
            Ok(_) => {
                self.draft = self.session.draft();
                self.validation = None;
                self.confirm_quit = false;
                self.clamp_cursor();
                self.status_message = format!("✓ {}", SUBMIT_CONFIRMATION);
                true
            }
            Err(FormcalcError::Validation(report)) => {
                self.status_message = format!("✗ {}", report);
                if let Some(first) = report.errors.first() {
                    self.cursor_row = first.row;
                    self.cursor_col = first.column.index();
                    self.update_viewport();
                }
                self.validation = Some(report);
                false
            }
            Err(e) => {
                self.status_message = format!("✗ {}", e);
                false
            }
        }
    }

    /// Throw away buffered edits and show the stored table again.
    pub fn discard(&mut self) {
        self.draft = self.session.draft();
        self.validation = None;
        self.confirm_quit = false;
        self.clamp_cursor();
        self.status_message = "Discarded unsubmitted edits".to_string();
    }

    /// Returns true when the app may exit now.
    pub fn request_quit(&mut self) -> bool {
        if !self.is_dirty() || self.confirm_quit {
            return true;
        }
        self.confirm_quit = true;
        self.status_message =
            "Unsubmitted edits will be lost. Quit again to confirm (or :w to submit)".to_string();
        false
    }

    pub fn open_help(&mut self) {
        self.help_modal = true;
        self.help_scroll = 0;
    }

    pub fn close_help_modal(&mut self) {
        self.help_modal = false;
    }

    pub fn scroll_help_by(&mut self, delta: i32) {
        let next = self.help_scroll as i64 + delta as i64;
        self.help_scroll = next.max(0) as usize;
    }

    /// Execute the command buffer. Returns true if the app should quit.
    pub fn execute_command(&mut self) -> bool {
        let cmd = self.command_buffer.trim().to_string();
        self.command_buffer.clear();
        self.command_cursor = 0;
        self.mode = Mode::Normal;

        let (name, rest) = match cmd.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (cmd.as_str(), ""),
        };

        match name {
            "" => false,
            "w" | "submit" => {
                self.submit();
                false
            }
            "wq" | "x" => self.submit(),
            "q" | "quit" => self.request_quit(),
            "q!" => true,
            "e!" | "discard" => {
                self.discard();
                false
            }
            "help" | "h" => {
                self.open_help();
                false
            }
            "row" => {
                self.append_row_from_command(rest);
                false
            }
            "d" | "delete" => {
                self.delete_current_row();
                false
            }
            _ => {
                self.status_message = format!("Unknown command: {}", cmd);
                false
            }
        }
    }

    /// `:row A,B` appends a row with both inputs filled in.
    fn append_row_from_command(&mut self, args: &str) {
        let Some((a, b)) = args.split_once(',') else {
            self.status_message = "Usage: :row A,B".to_string();
            return;
        };
        self.draft.push_row();
        let last = self.draft.len() - 1;
        let filled = self
            .draft
            .set_field(last, Column::A, a.trim())
            .and_then(|_| self.draft.set_field(last, Column::B, b.trim()));
        if let Err(e) = filled {
            self.status_message = format!("Error: {}", e);
            return;
        }
        self.validation = None;
        self.confirm_quit = false;
        self.cursor_row = last;
        self.update_viewport();
        self.status_message = format!("Added row {} (not submitted)", last + 1);
    }
}
