//! Formcalc GUI - Desktop application entry point.

use eframe::egui;
use formcalc_core::Session;
use std::path::PathBuf;

#[path = "../gui/mod.rs"]
mod gui;

#[allow(dead_code)]
#[path = "../logging.rs"]
mod logging;

fn main() -> eframe::Result<()> {
    let mut log_file: Option<PathBuf> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--log-file" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --log-file requires a file path");
                    std::process::exit(1);
                }
                log_file = Some(PathBuf::from(&args[i]));
            }
            "-h" | "--help" => {
                println!("Usage: formcalc-gui [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --log-file <path>         Write logs to this file");
                println!("  -h, --help                Print help");
                return Ok(());
            }
            arg => {
                eprintln!("Error: unknown option: {}", arg);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    match log_file {
        Some(path) => {
            if let Some(warning) = logging::init_file(&path) {
                eprintln!("Warning: {}", warning);
            }
        }
        None => logging::init_stderr(),
    }

    let mut options = eframe::NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default()
        .with_title("Formcalc")
        .with_inner_size([760.0, 480.0]);

    eframe::run_native(
        "Formcalc",
        options,
        Box::new(|_cc| Ok(Box::new(gui::FormcalcGuiApp::new(Session::new())))),
    )
}
