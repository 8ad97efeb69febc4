//! UI rendering and layout using egui.

use crate::gui::actions::Action;
use crate::gui::app::GuiApp;
use eframe::egui;
use formcalc_engine::engine::Column;

const TITLE: &str = "Robust DataFrame Calculator with a Form";
const INFO: &str = "ℹ Make any changes you want in the table below. Your edits will only be saved and calculated when you click the 'Save' button.";
const SUBMIT_LABEL: &str = "✅ Save and Update Calculations";

/// Cell rendering dimensions.
pub struct CellRenderer {
    pub cell_width: f32,
    pub cell_height: f32,
    pub row_header_width: f32,
}

impl CellRenderer {
    pub fn new() -> Self {
        Self {
            cell_width: 130.0,
            cell_height: 22.0,
            row_header_width: 36.0,
        }
    }
}

fn header_color() -> egui::Color32 {
    egui::Color32::from_rgb(180, 180, 180)
}

/// Apply dark theme and style configuration.
pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::dark());

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(4.0, 4.0);
        style.spacing.button_padding = egui::vec2(6.0, 3.0);
        style.spacing.interact_size.y = 22.0;

        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(13.0));
        style
            .text_styles
            .insert(egui::TextStyle::Monospace, egui::FontId::monospace(12.0));
        style
            .text_styles
            .insert(egui::TextStyle::Heading, egui::FontId::proportional(18.0));

        style.visuals.selection.bg_fill = egui::Color32::from_rgb(80, 130, 180);
    });
}

/// Title and the note that edits wait for submit.
pub fn draw_header(ui: &mut egui::Ui, app: &GuiApp) {
    ui.horizontal(|ui| {
        ui.heading(TITLE);
        if app.is_dirty() {
            ui.label(egui::RichText::new("●").color(egui::Color32::from_rgb(255, 165, 0)))
                .on_hover_text("Unsubmitted edits");
        }
    });
    ui.label(egui::RichText::new(INFO).color(egui::Color32::from_rgb(120, 180, 230)));
}

/// Status line: last outcome, or the shortcuts.
pub fn draw_status_bar(ui: &mut egui::Ui, app: &GuiApp) {
    let (text, color) = if app.status.is_empty() {
        (
            "Ctrl+S Save  |  Ctrl+N Add row  |  Ctrl+W Close".to_string(),
            egui::Color32::from_rgb(150, 150, 150),
        )
    } else if app.status.starts_with('✓') {
        (app.status.clone(), egui::Color32::from_rgb(110, 200, 110))
    } else if app.status.starts_with('✗') {
        (app.status.clone(), egui::Color32::from_rgb(230, 90, 90))
    } else {
        (app.status.clone(), egui::Color32::from_rgb(220, 190, 90))
    };

    ui.label(egui::RichText::new(text).monospace().size(11.0).color(color));
}

/// Draw the editable table plus the row and submit buttons.
///
/// Typing goes straight into the draft; buttons are returned as actions.
pub fn draw_form(ui: &mut egui::Ui, app: &mut GuiApp, renderer: &CellRenderer) -> Vec<Action> {
    let mut actions = Vec::new();
    let cell_w = renderer.cell_width;
    let cell_h = renderer.cell_height;
    let row_header_w = renderer.row_header_width;

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Editable Data Table").strong());

    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .max_height((ui.available_height() - 80.0).max(60.0))
        .show(ui, |ui| {
            egui::Grid::new("form_table")
                .striped(true)
                .spacing(egui::vec2(6.0, 2.0))
                .show(ui, |ui| {
                    ui.add_sized([row_header_w, cell_h], egui::Label::new(""));
                    for column in Column::ALL {
                        ui.add_sized(
                            [cell_w, cell_h],
                            egui::Label::new(
                                egui::RichText::new(column.label())
                                    .strong()
                                    .color(header_color()),
                            ),
                        );
                    }
                    ui.label("");
                    ui.end_row();

                    for row in 0..app.draft.len() {
                        ui.add_sized(
                            [row_header_w, cell_h],
                            egui::Label::new(
                                egui::RichText::new(format!("{}", row + 1))
                                    .monospace()
                                    .color(header_color()),
                            ),
                        );

                        for column in [Column::A, Column::B] {
                            draw_input_cell(ui, app, row, column, [cell_w, cell_h]);
                        }

                        let stale = app.is_row_stale(row);
                        for column in [Column::C, Column::D] {
                            let mut text = egui::RichText::new(app.cell_display(row, column))
                                .monospace()
                                .color(header_color());
                            if stale {
                                text = text.italics();
                            }
                            let resp = ui.add_sized([cell_w, cell_h], egui::Label::new(text));
                            if stale {
                                resp.on_hover_text("Out of date until saved");
                            }
                        }

                        if ui
                            .small_button("🗑")
                            .on_hover_text("Delete row")
                            .clicked()
                        {
                            actions.push(Action::DeleteRow(row));
                        }
                        ui.end_row();
                    }
                });

            if app.draft.is_empty() {
                ui.label(egui::RichText::new("(no rows)").color(header_color()));
            }
        });

    ui.horizontal(|ui| {
        if ui.button("➕ Add row").clicked() {
            actions.push(Action::AddRow);
        }
        if ui
            .add_enabled(app.is_dirty(), egui::Button::new("↺ Discard edits"))
            .clicked()
        {
            actions.push(Action::Discard);
        }
    });

    ui.add_space(6.0);
    if ui
        .add(egui::Button::new(egui::RichText::new(SUBMIT_LABEL).strong()))
        .clicked()
    {
        actions.push(Action::Submit);
    }

    actions
}

fn draw_input_cell(ui: &mut egui::Ui, app: &mut GuiApp, row: usize, column: Column, size: [f32; 2]) {
    let error = app.field_error(row, column);
    let Some(draft_row) = app.draft.rows.get_mut(row) else {
        return;
    };
    let Some(text) = draft_row.text_mut(column) else {
        return;
    };

    let mut edit = egui::TextEdit::singleline(text)
        .hint_text("required")
        .font(egui::TextStyle::Monospace);
    if error.is_some() {
        edit = edit.text_color(egui::Color32::from_rgb(230, 90, 90));
    }

    let mut resp = ui.add_sized(size, edit);
    if let Some(message) = error {
        resp = resp.on_hover_text(message);
    }
    if resp.changed() {
        app.field_changed(row, column);
    }
}
