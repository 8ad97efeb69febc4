//! Action types and dispatch logic.
//!
//! Widgets collect actions while the form is drawn; they are applied
//! once the frame is laid out.

use crate::gui::app::GuiApp;

/// User operations that change the form beyond typing into a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append a blank row.
    AddRow,

    /// Remove the row at this index.
    DeleteRow(usize),

    /// Validate, recompute, and save the buffered edits.
    Submit,

    /// Drop buffered edits and reload the saved table.
    Discard,
}

pub fn apply_action(app: &mut GuiApp, action: Action) {
    match action {
        Action::AddRow => app.add_row(),
        Action::DeleteRow(row) => app.delete_row(row),
        Action::Submit => {
            app.submit();
        }
        Action::Discard => app.discard(),
    }
}
