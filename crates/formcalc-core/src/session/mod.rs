//! Session state and the submit cycle (UI-agnostic).
//!
//! A [`Session`] owns one [`SessionStore`]. Hosts read the stored table,
//! buffer edits in a [`Draft`], and hand the whole draft to
//! [`Session::submit`], which validates, recomputes and replaces the
//! stored table in one step.

mod draft;
mod registry;
mod store;
mod validate;

pub use draft::{Draft, DraftRow};
pub use registry::{SessionId, SessionRegistry};
pub use store::{MemoryStore, SessionStore, seed_table};
pub use validate::{FieldError, FieldErrorKind, ValidationReport, validate};

use crate::error::{FormcalcError, Result};
use formcalc_engine::engine::{Table, recompute};

/// Message hosts show after a successful submit.
pub const SUBMIT_CONFIRMATION: &str = "Changes saved and calculations updated successfully!";

/// Summary of an accepted submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Row count of the new table.
    pub rows: usize,
    /// Rows gained relative to the previous table.
    pub added: usize,
    /// Rows lost relative to the previous table.
    pub removed: usize,
}

/// One user's isolated interaction context.
pub struct Session<S: SessionStore = MemoryStore> {
    store: S,
}

impl Session<MemoryStore> {
    /// A session seeded with the default table.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::seeded())
    }
}

impl Default for Session<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SessionStore> Session<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// The current stored table.
    pub fn table(&self) -> Table {
        self.store.get()
    }

    /// A fresh edit buffer mirroring the stored table.
    pub fn draft(&self) -> Draft {
        Draft::from_table(&self.store.get())
    }

    /// Validate, recompute and store a submitted draft.
    ///
    /// On a validation failure the stored table is left untouched.
    pub fn submit(&mut self, draft: &Draft) -> Result<SubmitOutcome> {
        let edited = match validate(draft) {
            Ok(table) => table,
            Err(report) => {
                log::warn!("submit rejected: {}", report);
                return Err(FormcalcError::Validation(report));
            }
        };

        let previous = self.store.get().len();
        let updated = recompute(&edited);
        let outcome = SubmitOutcome {
            rows: updated.len(),
            added: updated.len().saturating_sub(previous),
            removed: previous.saturating_sub(updated.len()),
        };
        self.store.replace(updated);

        log::info!(
            "submit accepted: {} rows (+{} -{})",
            outcome.rows,
            outcome.added,
            outcome.removed
        );
        Ok(outcome)
    }
}
