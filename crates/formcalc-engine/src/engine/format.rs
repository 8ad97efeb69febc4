use super::column::Column;

/// Format a cell value for display in `column`.
///
/// `A * B` uses two decimals and `B as % of A` appends a percent sign to the
/// two-decimal raw ratio (`0.1` shows as `0.10%`). Missing values render empty.
pub fn format_cell(column: Column, value: Option<f64>) -> String {
    let Some(n) = value else {
        return String::new();
    };
    if !n.is_finite() {
        return format_number(n);
    }
    match column {
        Column::A | Column::B => format_number(n),
        Column::C => format!("{:.2}", n),
        Column::D => format!("{:.2}%", n),
    }
}

/// Format an input number for display and for seeding edit buffers.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}
