use super::validate::parse_field;
use crate::error::{FormcalcError, Result};
use formcalc_engine::engine::{Column, Row, Table, format_cell, format_number};

/// A row as the user is editing it.
///
/// Inputs are kept as raw text until submit; derived values are whatever
/// the last recompute produced and may be stale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftRow {
    pub a: String,
    pub b: String,
    pub c: Option<f64>,
    pub d: Option<f64>,
}

impl DraftRow {
    /// Editable text for A or B; `None` for the derived columns.
    pub fn text_mut(&mut self, column: Column) -> Option<&mut String> {
        match column {
            Column::A => Some(&mut self.a),
            Column::B => Some(&mut self.b),
            Column::C | Column::D => None,
        }
    }

    /// Display text for `column`: raw input for A/B, formatted value for C/D.
    pub fn display(&self, column: Column) -> String {
        match column {
            Column::A => self.a.clone(),
            Column::B => self.b.clone(),
            Column::C => format_cell(Column::C, self.c),
            Column::D => format_cell(Column::D, self.d),
        }
    }

    /// The row as currently typed, carrying the last derived values.
    ///
    /// `None` while either input does not parse.
    pub fn to_row(&self) -> Option<Row> {
        Some(Row {
            a: parse_field(&self.a).ok()?,
            b: parse_field(&self.b).ok()?,
            c: self.c,
            d: self.d,
        })
    }
}

/// Edits buffered by a presentation host between submits.
///
/// Nothing here touches the session store; the whole draft is handed over
/// in one piece on submit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    pub rows: Vec<DraftRow>,
}

impl Draft {
    pub fn from_table(table: &Table) -> Self {
        let rows = table
            .iter()
            .map(|row| DraftRow {
                a: format_number(row.a),
                b: format_number(row.b),
                c: row.c,
                d: row.d,
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row < self.rows.len() {
            Ok(())
        } else {
            Err(FormcalcError::RowOutOfRange {
                row,
                len: self.rows.len(),
            })
        }
    }

    /// Raw text of an editable field.
    pub fn field_text(&self, row: usize, column: Column) -> Option<&str> {
        let r = self.rows.get(row)?;
        match column {
            Column::A => Some(r.a.as_str()),
            Column::B => Some(r.b.as_str()),
            Column::C | Column::D => None,
        }
    }

    /// Overwrite the text of an editable field.
    pub fn set_field(&mut self, row: usize, column: Column, text: &str) -> Result<()> {
        self.check_row(row)?;
        let slot = self.rows[row]
            .text_mut(column)
            .ok_or(FormcalcError::ReadOnlyColumn(column))?;
        slot.clear();
        slot.push_str(text);
        Ok(())
    }

    /// Insert a blank row before `at`. Positions past the end append.
    pub fn insert_row(&mut self, at: usize) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, DraftRow::default());
    }

    pub fn push_row(&mut self) {
        self.rows.push(DraftRow::default());
    }

    pub fn delete_row(&mut self, at: usize) -> Result<()> {
        self.check_row(at)?;
        self.rows.remove(at);
        Ok(())
    }

    /// True if submitting this draft could change `table`.
    pub fn differs_from(&self, table: &Table) -> bool {
        *self != Draft::from_table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::seed_table;

    #[test]
    fn test_from_table_formats_inputs_as_text() {
        let draft = Draft::from_table(&seed_table());
        assert_eq!(draft.len(), 4);
        assert_eq!(draft.field_text(0, Column::A), Some("100"));
        assert_eq!(draft.field_text(3, Column::B), Some("80"));
        assert_eq!(draft.rows[0].display(Column::C), "1000.00");
        assert_eq!(draft.rows[0].display(Column::D), "0.10%");
    }

    #[test]
    fn test_to_row_carries_stale_derived_values() {
        let mut draft = Draft::from_table(&seed_table());
        assert_eq!(draft.rows[0].to_row(), Some(seed_table().rows()[0].clone()));

        draft.set_field(0, Column::A, " 7 ").unwrap();
        let row = draft.rows[0].to_row().unwrap();
        assert_eq!((row.a, row.b), (7.0, 10.0));
        assert_eq!(row.c, Some(1000.0));

        draft.set_field(0, Column::B, "x").unwrap();
        assert!(draft.rows[0].to_row().is_none());
        draft.push_row();
        assert!(draft.rows[4].to_row().is_none());
    }

    #[test]
    fn test_text_mut_only_reaches_inputs() {
        let mut row = DraftRow::default();
        row.text_mut(Column::B).unwrap().push('4');
        assert_eq!(row.b, "4");
        assert!(row.a.is_empty());
        assert!(row.text_mut(Column::C).is_none());
        assert!(row.text_mut(Column::D).is_none());
    }

    #[test]
    fn test_set_field_rejects_read_only_columns() {
        let mut draft = Draft::from_table(&seed_table());
        let err = draft.set_field(0, Column::C, "5").unwrap_err();
        assert!(matches!(err, FormcalcError::ReadOnlyColumn(Column::C)));
        assert_eq!(draft.rows[0].display(Column::C), "1000.00");
    }

    #[test]
    fn test_set_field_rejects_missing_rows() {
        let mut draft = Draft::from_table(&seed_table());
        let err = draft.set_field(4, Column::A, "1").unwrap_err();
        assert!(matches!(err, FormcalcError::RowOutOfRange { row: 4, len: 4 }));
    }

    #[test]
    fn test_edits_leave_derived_values_stale() {
        let mut draft = Draft::from_table(&seed_table());
        draft.set_field(0, Column::A, "1").unwrap();
        assert_eq!(draft.rows[0].c, Some(1000.0));
    }

    #[test]
    fn test_inserted_row_is_blank() {
        let mut draft = Draft::from_table(&seed_table());
        draft.insert_row(1);
        assert_eq!(draft.len(), 5);
        assert_eq!(draft.rows[1], DraftRow::default());
        assert_eq!(draft.field_text(2, Column::A), Some("200"));
    }

    #[test]
    fn test_differs_from_tracks_buffered_changes() {
        let table = seed_table();
        let mut draft = Draft::from_table(&table);
        assert!(!draft.differs_from(&table));

        draft.delete_row(0).unwrap();
        assert!(draft.differs_from(&table));
        assert!(draft.delete_row(10).is_err());
    }
}
