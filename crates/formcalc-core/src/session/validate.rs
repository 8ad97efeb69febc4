//! Submit-time validation of buffered edits.
//!
//! Every editable field must hold a finite real number before a draft can
//! reach the recompute engine. Validation collects all offending fields
//! instead of stopping at the first one, so a host can mark them together.

use std::fmt;

use super::draft::Draft;
use formcalc_engine::engine::{Column, Row, Table};

/// Why a field was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field is empty.
    Missing,
    /// The field does not parse as a number; carries the offending text.
    NotNumeric(String),
    /// The field parsed to NaN or infinity.
    NotFinite,
}

/// A single rejected field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Zero-based row index.
    pub row: usize,
    pub column: Column,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.row + 1;
        let label = self.column.label();
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "row {} {} is required", row, label),
            FieldErrorKind::NotNumeric(text) => {
                write!(f, "row {} {} is not a number: '{}'", row, label, text)
            }
            FieldErrorKind::NotFinite => write!(f, "row {} {} must be finite", row, label),
        }
    }
}

/// All field errors found in one draft, row-major with A before B.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the field at `(row, column)` was rejected.
    pub fn contains(&self, row: usize, column: Column) -> bool {
        self.errors
            .iter()
            .any(|e| e.row == row && e.column == column)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "No invalid fields"),
            1 => write!(f, "1 invalid field: {}", self.errors[0]),
            n => {
                write!(f, "{} invalid fields: ", n)?;
                for (i, err) in self.errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationReport {}

pub(super) fn parse_field(text: &str) -> Result<f64, FieldErrorKind> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldErrorKind::Missing);
    }
    let n = trimmed
        .parse::<f64>()
        .map_err(|_| FieldErrorKind::NotNumeric(trimmed.to_string()))?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FieldErrorKind::NotFinite)
    }
}

/// Turn a draft into a table the engine can accept.
///
/// Derived values are carried over as-is; recompute replaces them.
pub fn validate(draft: &Draft) -> Result<Table, ValidationReport> {
    let mut report = ValidationReport::default();
    let mut rows = Vec::with_capacity(draft.len());

    for (index, draft_row) in draft.rows.iter().enumerate() {
        let mut parsed = [0.0f64; 2];
        for (slot, (column, text)) in [(Column::A, &draft_row.a), (Column::B, &draft_row.b)]
            .into_iter()
            .enumerate()
        {
            match parse_field(text) {
                Ok(n) => parsed[slot] = n,
                Err(kind) => report.errors.push(FieldError {
                    row: index,
                    column,
                    kind,
                }),
            }
        }
        rows.push(Row {
            a: parsed[0],
            b: parsed[1],
            c: draft_row.c,
            d: draft_row.d,
        });
    }

    if report.is_empty() {
        Ok(Table::from_rows(rows))
    } else {
        Err(report)
    }
}
