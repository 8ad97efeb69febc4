//! Error types for Formcalc core.

use thiserror::Error;

use crate::session::{SessionId, ValidationReport};
use formcalc_engine::engine::Column;

/// Errors that can occur in the Formcalc application
#[derive(Error, Debug)]
pub enum FormcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(ValidationReport),

    #[error("Column '{0}' is read-only")]
    ReadOnlyColumn(Column),

    #[error("Row {} is out of range ({len} rows)", .row + 1)]
    RowOutOfRange { row: usize, len: usize },

    #[error("Unknown session {0}")]
    UnknownSession(SessionId),
}

pub type Result<T> = std::result::Result<T, FormcalcError>;
