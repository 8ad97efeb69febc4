//! Table engine API.
//!
//! - [`Row`], [`Table`] - Data structures for the two-input, two-derived table
//! - [`Column`] - Column metadata (labels, editability)
//! - [`recompute`] - Derive `C` and `D` for every row
//! - [`format_cell`] - Format values for display

mod column;
mod format;
mod recompute;
mod table;

pub use column::Column;
pub use format::{format_cell, format_number};
pub use recompute::{is_consistent, ratio, recompute, recompute_row};
pub use table::{Row, Table};
