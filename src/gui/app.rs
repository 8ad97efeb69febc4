//! Form state and submit logic (UI-agnostic).

use formcalc_core::{Draft, FormcalcError, SUBMIT_CONFIRMATION, Session, ValidationReport};
use formcalc_engine::engine::{Column, Table, is_consistent};

/// Core application state: the session plus the edits buffered in the form.
/// This is independent of the UI framework and can be tested in isolation.
pub struct GuiApp {
    pub session: Session,
    pub draft: Draft,
    pub validation: Option<ValidationReport>,
    pub status: String,
}

impl GuiApp {
    pub fn new(session: Session) -> Self {
        let draft = session.draft();
        Self {
            session,
            draft,
            validation: None,
            status: String::new(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.differs_from(&self.session.table())
    }

    pub fn cell_display(&self, row: usize, column: Column) -> String {
        self.draft
            .rows
            .get(row)
            .map(|r| r.display(column))
            .unwrap_or_default()
    }

    /// Derived cells on this row were computed from different inputs.
    pub fn is_row_stale(&self, row: usize) -> bool {
        self.draft.rows.get(row).is_some_and(|r| match r.to_row() {
            Some(typed) => !is_consistent(&Table::from_rows(vec![typed])),
            None => true,
        })
    }

    /// Message for a flagged cell, if the last submit rejected it.
    pub fn field_error(&self, row: usize, column: Column) -> Option<String> {
        self.validation.as_ref().and_then(|report| {
            report
                .errors
                .iter()
                .find(|e| e.row == row && e.column == column)
                .map(|e| e.to_string())
        })
    }

    /// The user touched a field; its old error no longer applies.
    pub fn field_changed(&mut self, row: usize, column: Column) {
        if let Some(report) = self.validation.as_mut() {
            report
                .errors
                .retain(|e| !(e.row == row && e.column == column));
            if report.is_empty() {
                self.validation = None;
            }
        }
    }

    pub fn add_row(&mut self) {
        self.draft.push_row();
        self.validation = None;
        self.status = format!("Added row {} (not submitted)", self.draft.len());
    }

    pub fn delete_row(&mut self, row: usize) {
        match self.draft.delete_row(row) {
            Ok(()) => {
                self.validation = None;
                self.status = format!("Deleted row {} (not submitted)", row + 1);
            }
            Err(e) => self.status = format!("✗ {}", e),
        }
    }

    /// Submit every buffered edit. Returns true when the table was saved.
    pub fn submit(&mut self) -> bool {
        match self.session.submit(&self.draft) {
            Ok(_) => {
                self.draft = self.session.draft();
                self.validation = None;
                self.status = format!("✓ {}", SUBMIT_CONFIRMATION);
                true
            }
            Err(FormcalcError::Validation(report)) => {
                self.status = format!("✗ {}", report);
                self.validation = Some(report);
                false
            }
            Err(e) => {
                self.status = format!("✗ {}", e);
                false
            }
        }
    }

    pub fn discard(&mut self) {
        self.draft = self.session.draft();
        self.validation = None;
        self.status = "Discarded unsubmitted edits".to_string();
    }
}
