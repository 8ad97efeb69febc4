//! Command-line parsing for the terminal frontend.

use std::path::PathBuf;

pub fn print_usage() {
    eprintln!("Usage: formcalc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -r, --row <A,B>           Append a row before starting (repeatable, submitted together)");
    eprintln!("  -o, --output <FILE>       Export the table to markdown (non-interactive)");
    eprintln!("  --keymap <name>           Select keybindings (default: vim)");
    eprintln!("  --keymap-file <path>      Load keybindings from TOML file");
    eprintln!("  --log-file <path>         Write logs to this file");
    eprintln!("  -h, --help                Print help");
}

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq)]
pub struct Options {
    /// Raw `(A, B)` texts; validated on submit like any other edit.
    pub rows: Vec<(String, String)>,
    pub output_file: Option<PathBuf>,
    pub keymap_name: Option<String>,
    pub keymap_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// What the process should do.
#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    Run(Options),
}

fn parse_row(value: &str) -> Result<(String, String), String> {
    let (a, b) = value
        .split_once(',')
        .ok_or_else(|| format!("--row expects A,B but got '{}'", value))?;
    Ok((a.trim().to_string(), b.trim().to_string()))
}

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut opts = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-r" | "--row" => {
                i += 1;
                let value = args.get(i).ok_or("--row requires a value")?;
                opts.rows.push(parse_row(value)?);
            }
            "-o" | "--output" => {
                i += 1;
                let value = args.get(i).ok_or("--output requires a file path")?;
                opts.output_file = Some(PathBuf::from(value));
            }
            "--keymap" => {
                i += 1;
                let value = args.get(i).ok_or("--keymap requires a value")?;
                opts.keymap_name = Some(value.to_string());
            }
            "--keymap-file" => {
                i += 1;
                let value = args.get(i).ok_or("--keymap-file requires a file path")?;
                opts.keymap_file = Some(PathBuf::from(value));
            }
            "--log-file" => {
                i += 1;
                let value = args.get(i).ok_or("--log-file requires a file path")?;
                opts.log_file = Some(PathBuf::from(value));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                return Err(format!("Unexpected argument: {}", arg));
            }
        }
        i += 1;
    }

    Ok(Command::Run(opts))
}
