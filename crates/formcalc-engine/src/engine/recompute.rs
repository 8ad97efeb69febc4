//! Recompute engine.
//!
//! Derives the read-only columns from the inputs of the same row:
//!
//! ```text
//! C = A * B
//! D = B / A   (0 when A == 0)
//! ```
//!
//! Rows are independent, so recompute is a plain map over the table. The
//! input is borrowed and a new table is returned.

use super::table::{Row, Table};

/// `b / a`, or `0.0` when `a` is zero.
pub fn ratio(a: f64, b: f64) -> f64 {
    if a != 0.0 { b / a } else { 0.0 }
}

/// Recompute the derived values of a single row.
pub fn recompute_row(row: &Row) -> Row {
    Row {
        a: row.a,
        b: row.b,
        c: Some(row.a * row.b),
        d: Some(ratio(row.a, row.b)),
    }
}

/// Produce a new table with `C` and `D` recalculated for every row.
pub fn recompute(table: &Table) -> Table {
    table.iter().map(recompute_row).collect()
}

/// True when every row's derived values match what [`recompute`] would give.
pub fn is_consistent(table: &Table) -> bool {
    table.iter().all(|row| recompute_row(row) == *row)
}
