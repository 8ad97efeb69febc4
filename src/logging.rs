//! Logging setup shared by the frontends.
//!
//! Interactive frontends own the terminal, so their logs go to a file.

use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Default log file location (`<data dir>/formcalc.log`).
pub fn default_log_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "formcalc")?;
    let mut path = proj.data_dir().to_path_buf();
    path.push("formcalc.log");
    Some(path)
}

/// Send log output to `path`, creating parent directories as needed.
///
/// Returns a warning instead of failing if the file cannot be opened.
pub fn init_file(path: &Path) -> Option<String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && let Err(err) = std::fs::create_dir_all(parent)
    {
        return Some(format!("Logging disabled: {}: {}", parent.display(), err));
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => return Some(format!("Logging disabled: {}: {}", path.display(), err)),
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    None
}

/// Send warnings and errors to stderr (non-interactive runs).
pub fn init_stderr() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}
