//! Column metadata.
//!
//! The table has a fixed layout: two editable inputs followed by two
//! read-only derived columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed table columns.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// Editable input `A`.
    A,
    /// Editable input `B`.
    B,
    /// Derived product `A * B`.
    C,
    /// Derived ratio `B / A` (zero when `A` is zero).
    D,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 4] = [Column::A, Column::B, Column::C, Column::D];

    /// Header label shown by presentation hosts.
    pub fn label(self) -> &'static str {
        match self {
            Column::A => "Value A",
            Column::B => "Value B",
            Column::C => "A * B",
            Column::D => "B as % of A",
        }
    }

    /// Whether users may edit this column directly.
    pub fn is_editable(self) -> bool {
        matches!(self, Column::A | Column::B)
    }

    pub fn index(self) -> usize {
        match self {
            Column::A => 0,
            Column::B => 1,
            Column::C => 2,
            Column::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
