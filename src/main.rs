//! Formcalc - a two-column calculator table with a TUI

mod cli;
mod logging;
mod tui;

use anyhow::{Context, Result};
use formcalc_core::storage::write_markdown;
use formcalc_core::{Column, Session};

use cli::{Command, Options};

/// Append the `--row` values to the session's table and submit them as one batch.
fn submit_initial_rows(session: &mut Session, rows: &[(String, String)]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut draft = session.draft();
    for (a, b) in rows {
        draft.push_row();
        let last = draft.len() - 1;
        draft.set_field(last, Column::A, a)?;
        draft.set_field(last, Column::B, b)?;
    }
    session
        .submit(&draft)
        .context("rows given with --row were rejected")?;
    Ok(())
}

fn run(opts: Options) -> Result<()> {
    let interactive = opts.output_file.is_none();
    if interactive {
        let log_path = opts.log_file.clone().or_else(logging::default_log_path);
        if let Some(path) = log_path
            && let Some(warning) = logging::init_file(&path)
        {
            eprintln!("Warning: {}", warning);
        }
    } else if let Some(path) = opts.log_file.as_ref() {
        if let Some(warning) = logging::init_file(path) {
            eprintln!("Warning: {}", warning);
        }
    } else {
        logging::init_stderr();
    }

    let mut session = Session::new();
    submit_initial_rows(&mut session, &opts.rows)?;

    if let Some(output_path) = opts.output_file {
        write_markdown(&output_path, &session.table())
            .with_context(|| format!("failed to export {}", output_path.display()))?;
        log::info!(
            "exported {} rows to {}",
            session.table().len(),
            output_path.display()
        );
        println!("Exported to {}", output_path.display());
        return Ok(());
    }

    let (keymap, warnings) =
        tui::load_keymap(opts.keymap_name.as_deref(), opts.keymap_file.as_ref());
    for warning in warnings {
        log::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }
    log::debug!("starting terminal UI with {} keymap", keymap.name());

    let mut app = tui::App::new(session, keymap);
    tui::run(&mut app).context("terminal error")?;
    Ok(())
}

fn main() {
    let opts = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            cli::print_usage();
            return;
        }
        Ok(Command::Run(opts)) => opts,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            cli::print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
