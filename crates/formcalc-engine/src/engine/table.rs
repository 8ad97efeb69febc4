//! Table data structures.
//!
//! - [`Row`] - One record: inputs `a`, `b` and derived `c`, `d`
//! - [`Table`] - Ordered rows; identity is positional

use serde::{Deserialize, Serialize};

use super::column::Column;

/// A single table row.
///
/// `c` and `d` are `None` until the row has been through the recompute
/// engine (for example a row the user just inserted).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub a: f64,
    pub b: f64,
    pub c: Option<f64>,
    pub d: Option<f64>,
}

impl Row {
    /// Create a row with missing derived values.
    pub fn new(a: f64, b: f64) -> Row {
        Row {
            a,
            b,
            c: None,
            d: None,
        }
    }

    /// Value stored under `column`, if any.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::A => Some(self.a),
            Column::B => Some(self.b),
            Column::C => self.c,
            Column::D => self.d,
        }
    }
}

/// An ordered sequence of rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Table {
        Table { rows: Vec::new() }
    }

    /// Build a table of `(a, b)` pairs with no derived values yet.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Table {
        Table {
            rows: pairs.iter().map(|&(a, b)| Row::new(a, b)).collect(),
        }
    }

    pub fn from_rows(rows: Vec<Row>) -> Table {
        Table { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Table {
            rows: iter.into_iter().collect(),
        }
    }
}
