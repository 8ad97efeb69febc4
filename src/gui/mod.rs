//! Formcalc GUI - egui-based desktop application.
//!
//! - app.rs: Form state and submit logic
//! - actions.rs: Action types and dispatch
//! - input.rs: Keyboard shortcuts
//! - ui.rs: egui rendering

pub mod actions;
pub mod app;
pub mod input;
pub mod ui;

use eframe::egui;
use formcalc_core::Session;

use self::actions::apply_action;
use self::app::GuiApp;
use self::input::handle_keyboard_input;
use self::ui::{CellRenderer, apply_theme, draw_form, draw_header, draw_status_bar};

/// Main GUI application wrapper implementing eframe::App trait.
pub struct FormcalcGuiApp {
    app: GuiApp,
    renderer: CellRenderer,
}

impl FormcalcGuiApp {
    pub fn new(session: Session) -> Self {
        Self {
            app: GuiApp::new(session),
            renderer: CellRenderer::new(),
        }
    }
}

impl eframe::App for FormcalcGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        apply_theme(ctx);

        let ctrl_w = ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::W));
        if ctrl_w {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        if let Some(action) = handle_keyboard_input(ctx) {
            apply_action(&mut self.app, action);
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            draw_header(ui, &self.app);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            draw_status_bar(ui, &self.app);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let actions = draw_form(ui, &mut self.app, &self.renderer);
            if !actions.is_empty() {
                for action in actions {
                    apply_action(&mut self.app, action);
                }
                ctx.request_repaint();
            }
        });
    }
}
