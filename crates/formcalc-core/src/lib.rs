//! formcalc-core - UI-agnostic session model + export.

pub mod error;
pub mod session;
pub mod storage;

pub use error::{FormcalcError, Result};
pub use session::{
    Draft, DraftRow, FieldError, FieldErrorKind, MemoryStore, SUBMIT_CONFIRMATION, Session,
    SessionId, SessionRegistry, SessionStore, SubmitOutcome, ValidationReport, seed_table,
    validate,
};

pub use formcalc_engine::engine::{Column, Row, Table};
