//! UI rendering

use super::app::{App, Mode};
use super::help::get_help_text;
use formcalc_engine::engine::Column;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub(crate) const HEADER_HEIGHT: u16 = 3;
pub(crate) const TABLE_MIN_HEIGHT: u16 = 6;
pub(crate) const INPUT_BAR_HEIGHT: u16 = 3;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const COLUMN_WIDTH: u16 = 16;
pub(crate) const COLUMN_SPACING: u16 = 1;

const TITLE: &str = " Robust DataFrame Calculator with a Form ";
const INFO: &str = "ℹ Make any changes you want in the table below. Your edits will only be saved and calculated when you submit.";

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(TABLE_MIN_HEIGHT),
            Constraint::Length(INPUT_BAR_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Map a terminal position inside the table block to a `(column, row)` cell.
pub(crate) fn table_cell_at(
    app: &App,
    table_area: Rect,
    mouse_col: u16,
    mouse_row: u16,
) -> Option<(usize, usize)> {
    if table_area.width < 3 || table_area.height < 4 {
        return None;
    }

    let inner_x = table_area.x.saturating_add(1);
    let inner_y = table_area.y.saturating_add(1);
    let inner_right = inner_x.saturating_add(table_area.width.saturating_sub(2));
    let inner_bottom = inner_y.saturating_add(table_area.height.saturating_sub(2));
    if mouse_col < inner_x
        || mouse_col >= inner_right
        || mouse_row < inner_y
        || mouse_row >= inner_bottom
    {
        return None;
    }

    // Header row holds column labels.
    if mouse_row == inner_y {
        return None;
    }

    let rel_row = (mouse_row - inner_y - 1) as usize;
    if rel_row >= app.visible_rows {
        return None;
    }
    let row = app.viewport_row + rel_row;
    if row >= app.draft.len() {
        return None;
    }

    let mut x = inner_x
        .saturating_add(ROW_HEADER_WIDTH)
        .saturating_add(COLUMN_SPACING);
    for column in Column::ALL {
        let cell_end = x.saturating_add(COLUMN_WIDTH);
        if mouse_col >= x && mouse_col < cell_end {
            return Some((column.index(), row));
        }
        x = cell_end.saturating_add(COLUMN_SPACING);
    }
    None
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let [header, table, input, status] = split_main_chunks(f.area());

    // borders + header row
    app.visible_rows = (table.height.saturating_sub(3) as usize).max(1);
    app.update_viewport();

    draw_header(f, header);
    draw_table(f, app, table);
    draw_input_bar(f, app, input);
    draw_status_bar(f, app, status);

    if app.help_modal {
        draw_help_modal(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::Blue));
    let paragraph = Paragraph::new(INFO)
        .style(Style::default().fg(Color::Cyan))
        .block(block);
    f.render_widget(paragraph, area);
}

fn cell_style(app: &App, row: usize, column: Column) -> Style {
    let is_cursor = row == app.cursor_row && column.index() == app.cursor_col;
    if is_cursor {
        let bg = if app.has_error(row, column) {
            Color::Red
        } else {
            Color::Cyan
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if app.has_error(row, column) {
        Style::default().fg(Color::White).bg(Color::Red)
    } else if !column.is_editable() && app.is_row_stale(row) {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else if !column.is_editable() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    // Build header row
    let mut header_cells = vec![Cell::from(" ")]; // Corner
    for column in Column::ALL {
        let style = if column.index() == app.cursor_col {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else if column.is_editable() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        header_cells.push(Cell::from(column.label()).style(style));
    }
    let header = Row::new(header_cells).height(1);

    // Build data rows
    let mut rows = Vec::new();
    let end = (app.viewport_row + app.visible_rows).min(app.draft.len());
    for row in app.viewport_row..end {
        let mut cells = Vec::new();

        let row_style = if row == app.cursor_row {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cells.push(Cell::from(format!("{}", row + 1)).style(row_style));

        for column in Column::ALL {
            let display = app.cell_display(row, column);
            let display = if display.is_empty() && column.is_editable() {
                "—".to_string()
            } else {
                display
            };
            cells.push(Cell::from(display).style(cell_style(app, row, column)));
        }

        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)];
    widths.extend(Column::ALL.iter().map(|_| Constraint::Length(COLUMN_WIDTH)));

    let title = if app.is_dirty() {
        " Editable Data Table ● unsubmitted edits "
    } else {
        " Editable Data Table "
    };
    let mut table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(COLUMN_SPACING);
    if app.draft.is_empty() {
        table = table.footer(Row::new(vec![
            Cell::from(""),
            Cell::from("(no rows)").style(Style::default().fg(Color::DarkGray)),
        ]));
    }

    f.render_widget(table, area);
}

fn draw_input_bar(f: &mut Frame, app: &App, area: Rect) {
    let column = app.current_column();
    let cell_name = format!("Row {} {}", app.cursor_row + 1, column.label());

    let content = match app.mode {
        Mode::Edit => {
            // Insert cursor marker at cursor position
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            format!("{}: {}│{}", cell_name, before, after)
        }
        Mode::Command => {
            let (before, after) = app.command_buffer.split_at(app.command_cursor);
            format!(":{}│{}", before, after)
        }
        Mode::Normal => {
            if app.draft.is_empty() {
                "(empty table)".to_string()
            } else if column.is_editable() {
                format!("{}: {}", cell_name, app.cell_display(app.cursor_row, column))
            } else {
                format!(
                    "{}: {} (read-only, updated on submit)",
                    cell_name,
                    app.cell_display(app.cursor_row, column)
                )
            }
        }
    };

    let title = match app.mode {
        Mode::Edit => " Edit ",
        Mode::Command => " Command ",
        Mode::Normal => " Cell ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(match app.mode {
            Mode::Edit => Color::Yellow,
            Mode::Command => Color::Cyan,
            Mode::Normal => Color::White,
        }));

    let paragraph = Paragraph::new(content).block(block);
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.status_message.is_empty() {
        (
            format!("[{}] {}", app.keymap.name(), app.keymap.status_hint()),
            Style::default().fg(Color::DarkGray),
        )
    } else if app.status_message.starts_with('✓') {
        (app.status_message.clone(), Style::default().fg(Color::Green))
    } else if app.status_message.starts_with('✗') || app.status_message.starts_with("Error") {
        (app.status_message.clone(), Style::default().fg(Color::Red))
    } else {
        (app.status_message.clone(), Style::default().fg(Color::Yellow))
    };
    f.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_help_modal(f: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 80, f.area());
    let lines = get_help_text(&app.keymap);

    let inner_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(inner_height);
    app.help_scroll = app.help_scroll.min(max_scroll);

    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help (Esc/q to close, j/k to scroll) ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll as u16, 0));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
