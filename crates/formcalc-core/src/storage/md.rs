//! Markdown export functionality

use crate::error::Result;
use formcalc_engine::engine::{Column, Table, format_cell};
use std::io::Write;
use std::path::Path;

/// Write the table to a markdown file
pub fn write_markdown(path: &Path, table: &Table) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_markdown_to(&mut file, table)?;
    Ok(())
}

/// Write the table as markdown to any writer
pub fn write_markdown_to<W: Write>(w: &mut W, table: &Table) -> std::io::Result<()> {
    writeln!(w, "# Table")?;
    writeln!(w)?;

    if table.is_empty() {
        writeln!(w, "*Empty table*")?;
        return Ok(());
    }

    // Header row with column labels
    write!(w, "|   |")?;
    for col in Column::ALL {
        write!(w, " {} |", escape_markdown(col.label()))?;
    }
    writeln!(w)?;

    // Numbers are right-aligned
    write!(w, "|---|")?;
    for _ in Column::ALL {
        write!(w, "---:|")?;
    }
    writeln!(w)?;

    for (index, row) in table.iter().enumerate() {
        write!(w, "| {} |", index + 1)?; // 1-based row numbers
        for col in Column::ALL {
            write!(w, " {} |", escape_markdown(&format_cell(col, row.value(col))))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
