//! `keymaps.toml` loading.
//!
//! ```toml
//! [meta]
//! default = "mine"
//!
//! [keymaps.mine.normal]
//! "C-w" = "submit"
//! "n" = "insert_row"
//! ```
//!
//! Problems never abort startup: they come back as warnings and the
//! built-in vim keymap is used instead.

use super::types::{Action, Binding, CustomKeymap, KEY_NAMES, KeyCombo, Keymap, KeymapBindings};
use crossterm::event::{KeyCode, KeyModifiers};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const MAX_KEYMAP_FILE_BYTES: u64 = 256 * 1024;
const MAX_BINDINGS_PER_MODE: usize = 256;

const ACTION_NAMES: &[(&str, Action)] = &[
    ("cancel", Action::Cancel),
    ("enter_edit", Action::EnterEdit),
    ("commit_edit", Action::CommitEdit),
    ("enter_command", Action::EnterCommand),
    ("execute_command", Action::ExecuteCommand),
    ("change_cell", Action::ChangeCell),
    ("clear_cell", Action::ClearCell),
    ("insert_row", Action::InsertRow),
    ("insert_row_above", Action::InsertRowAbove),
    ("delete_row", Action::DeleteRow),
    ("submit", Action::Submit),
    ("discard", Action::Discard),
    ("help", Action::Help),
    ("quit", Action::Quit),
    ("move_left", Action::Move(-1, 0)),
    ("move_right", Action::Move(1, 0)),
    ("move_up", Action::Move(0, -1)),
    ("move_down", Action::Move(0, 1)),
    ("page_up", Action::Page(-1)),
    ("page_down", Action::Page(1)),
    ("home_col", Action::HomeCol),
    ("end_col", Action::EndCol),
    ("goto_first", Action::GotoFirst),
    ("goto_last", Action::GotoLast),
];

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapsFile {
    #[serde(default)]
    meta: KeymapsMeta,
    #[serde(default)]
    keymaps: HashMap<String, KeymapEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapsMeta {
    default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeymapEntry {
    description: Option<String>,
    #[serde(default)]
    normal: HashMap<String, String>,
    #[serde(default)]
    edit: HashMap<String, String>,
    #[serde(default)]
    command: HashMap<String, String>,
}

/// Resolve the keymap to use.
///
/// `requested` (from `--keymap`) wins over the file's `meta.default`; both
/// fall back to vim. `keymap_file` replaces the per-user config path.
pub fn load_keymap(
    requested: Option<&str>,
    keymap_file: Option<&PathBuf>,
) -> (Keymap, Vec<String>) {
    let mut warnings = Vec::new();

    let path = keymap_file.cloned().or_else(user_keymaps_path);
    let file = match path.as_deref() {
        Some(path) if path.exists() => read_keymaps_file(path).unwrap_or_else(|warning| {
            warnings.push(warning);
            KeymapsFile::default()
        }),
        Some(path) => {
            if keymap_file.is_some() {
                warnings.push(format!("Keymap file not found: {}", path.display()));
            }
            KeymapsFile::default()
        }
        None => KeymapsFile::default(),
    };

    let requested = requested.map(str::trim).filter(|name| !name.is_empty());
    let target = requested
        .or(file.meta.default.as_deref())
        .unwrap_or("vim");

    if let Some(entry) = file.keymaps.get(target) {
        match build_custom_keymap(target, entry) {
            Ok(custom) => return (Keymap::Custom(custom), warnings),
            Err(errors) => warnings.extend(errors),
        }
    } else if !is_builtin(target) {
        let source = path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "keymaps.toml".to_string());
        warnings.push(format!(
            "Keymap '{}' not found in {}; using built-in 'vim'",
            target, source
        ));
    }

    if target.eq_ignore_ascii_case("emacs") {
        (Keymap::Emacs, warnings)
    } else {
        (Keymap::Vim, warnings)
    }
}

fn user_keymaps_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "formcalc")?;
    Some(proj.config_dir().join("keymaps.toml"))
}

fn is_builtin(name: &str) -> bool {
    name.eq_ignore_ascii_case("vim") || name.eq_ignore_ascii_case("emacs")
}

fn read_keymaps_file(path: &Path) -> Result<KeymapsFile, String> {
    let size = std::fs::metadata(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?
        .len();
    if size > MAX_KEYMAP_FILE_BYTES {
        return Err(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            size,
            MAX_KEYMAP_FILE_BYTES
        ));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    toml::from_str(&content).map_err(|err| format!("Failed to parse {}: {}", path.display(), err))
}

fn build_custom_keymap(name: &str, entry: &KeymapEntry) -> Result<CustomKeymap, Vec<String>> {
    let mut errors = Vec::new();
    let bindings = KeymapBindings {
        normal: parse_bindings("normal", &entry.normal, &mut errors),
        edit: parse_bindings("edit", &entry.edit, &mut errors),
        command: parse_bindings("command", &entry.command, &mut errors),
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(CustomKeymap {
        name: name.to_string(),
        description: entry.description.clone(),
        bindings,
    })
}

fn parse_bindings(
    mode: &str,
    raw: &HashMap<String, String>,
    errors: &mut Vec<String>,
) -> Vec<Binding> {
    if raw.len() > MAX_BINDINGS_PER_MODE {
        errors.push(format!(
            "Too many {} bindings: {} (max {})",
            mode,
            raw.len(),
            MAX_BINDINGS_PER_MODE
        ));
        return Vec::new();
    }

    // Sorted so duplicate reports are stable.
    let mut entries: Vec<(&String, &String)> = raw.iter().collect();
    entries.sort();

    let mut bindings: Vec<Binding> = Vec::with_capacity(entries.len());
    for (key, action_str) in entries {
        let combo = match parse_key_combo(key) {
            Ok(combo) => combo,
            Err(err) => {
                errors.push(format!("Invalid key '{}' in {} bindings: {}", key, mode, err));
                continue;
            }
        };
        let Some(action) = parse_action(action_str) else {
            errors.push(format!(
                "Invalid action '{}' in {} bindings",
                action_str, mode
            ));
            continue;
        };
        if bindings.iter().any(|b| b.combo == combo) {
            errors.push(format!(
                "Duplicate key '{}' in {} bindings",
                combo.display(),
                mode
            ));
            continue;
        }
        bindings.push(Binding { combo, action });
    }
    bindings
}

fn parse_action(name: &str) -> Option<Action> {
    let name = name.trim().to_ascii_lowercase();
    ACTION_NAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, action)| action.clone())
}

/// Parse `"x"`, `"Enter"`, `"C-s"`, `"ctrl-alt-Left"` or `"C--"`.
fn parse_key_combo(input: &str) -> Result<KeyCombo, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty key".to_string());
    }

    // The key is whatever follows the last separator; "C--" names the '-' key.
    let (mods, key) = if input.len() > 1 && input.ends_with("--") {
        (&input[..input.len() - 2], "-")
    } else {
        match input.rsplit_once('-') {
            Some((mods, key)) if !key.is_empty() => (mods, key),
            Some(_) if input == "-" => ("", "-"),
            Some(_) => return Err("missing key after '-'".to_string()),
            None => ("", input),
        }
    };

    let modifiers = if mods.is_empty() {
        if input.len() > 1 && input.starts_with('-') && key == "-" {
            return Err("missing modifier before '-'".to_string());
        }
        KeyModifiers::empty()
    } else {
        parse_modifiers(mods)?
    };

    Ok(KeyCombo {
        code: parse_key_code(key)?,
        modifiers,
    })
}

fn parse_modifiers(input: &str) -> Result<KeyModifiers, String> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split('-') {
        let flag = match part.trim().to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
            "m" | "alt" | "meta" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            "" => return Err("missing modifier before '-'".to_string()),
            _ => return Err(format!("unknown modifier '{}'", part)),
        };
        if modifiers.contains(flag) {
            return Err(format!("duplicate modifier '{}'", part));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn parse_key_code(input: &str) -> Result<KeyCode, String> {
    let mut chars = input.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(ch));
    }

    let lower = input.to_ascii_lowercase();
    if let Some(&(_, code)) = KEY_NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(&lower))
    {
        return Ok(code);
    }
    match lower.as_str() {
        "escape" => return Ok(KeyCode::Esc),
        "spc" => return Ok(KeyCode::Char(' ')),
        "minus" | "dash" => return Ok(KeyCode::Char('-')),
        "comma" => return Ok(KeyCode::Char(',')),
        _ => {}
    }
    lower
        .strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=12).contains(n))
        .map(KeyCode::F)
        .ok_or_else(|| format!("unknown key '{}'", input))
}

/// Inverse of [`parse_action`], for help listings.
pub(crate) fn action_name(action: &Action) -> Option<&'static str> {
    ACTION_NAMES
        .iter()
        .find(|(_, known)| known == action)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempKeymaps(PathBuf);

    impl TempKeymaps {
        fn new(name: &str, content: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "formcalc_keymaps_{}_{}.toml",
                name,
                std::process::id()
            ));
            std::fs::write(&path, content).expect("write keymaps file");
            TempKeymaps(path)
        }
    }

    impl Drop for TempKeymaps {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn parses_plain_and_modified_keys() {
        let combo = parse_key_combo("C-s").unwrap();
        assert_eq!(combo.code, KeyCode::Char('s'));
        assert_eq!(combo.modifiers, KeyModifiers::CONTROL);

        let combo = parse_key_combo("ctrl-alt-Left").unwrap();
        assert_eq!(combo.code, KeyCode::Left);
        assert_eq!(combo.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);

        assert_eq!(parse_key_combo("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_combo("F1").unwrap().code, KeyCode::F(1));
        assert_eq!(parse_key_combo("é").unwrap().code, KeyCode::Char('é'));
    }

    #[test]
    fn parses_dash_key() {
        let plain = parse_key_combo("-").unwrap();
        assert_eq!(plain.code, KeyCode::Char('-'));
        assert!(plain.modifiers.is_empty());

        let ctrl = parse_key_combo("C--").unwrap();
        assert_eq!(ctrl.code, KeyCode::Char('-'));
        assert_eq!(ctrl.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(parse_key_combo("--").unwrap_err().contains("missing modifier"));
        assert!(parse_key_combo("C-").unwrap_err().contains("missing key"));
        assert!(parse_key_combo("C-C-s").unwrap_err().contains("duplicate modifier"));
        assert!(parse_key_combo("hyper-s").unwrap_err().contains("unknown modifier"));
        assert!(parse_key_combo("C-NotAKey").unwrap_err().contains("unknown key"));
        assert!(parse_key_combo("F13").is_err());
    }

    #[test]
    fn action_names_round_trip() {
        for (name, action) in ACTION_NAMES {
            assert_eq!(parse_action(name).as_ref(), Some(action));
            assert_eq!(action_name(action), Some(*name));
        }
        assert_eq!(parse_action(" Submit "), Some(Action::Submit));
        assert_eq!(parse_action("save"), None);
    }

    #[test]
    fn loads_custom_keymap_from_meta_default() {
        let file = TempKeymaps::new(
            "custom",
            r#"
[meta]
default = "mine"

[keymaps.mine]
description = "my bindings"

[keymaps.mine.normal]
"C-w" = "submit"
"n" = "insert_row"

[keymaps.mine.edit]
"Enter" = "commit_edit"
"Esc" = "cancel"
"#,
        );

        let (keymap, warnings) = load_keymap(None, Some(&file.0));
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
        let Keymap::Custom(custom) = keymap else {
            panic!("expected custom keymap");
        };
        assert_eq!(custom.name, "mine");
        assert_eq!(custom.description.as_deref(), Some("my bindings"));
        assert_eq!(custom.bindings.normal.len(), 2);
        assert_eq!(custom.bindings.edit.len(), 2);
        assert!(custom.bindings.command.is_empty());
    }

    #[test]
    fn requested_builtin_wins_over_file_default() {
        let file = TempKeymaps::new(
            "builtin",
            r#"
[meta]
default = "mine"

[keymaps.mine.normal]
"n" = "insert_row"
"#,
        );

        let (keymap, warnings) = load_keymap(Some("emacs"), Some(&file.0));
        assert_eq!(keymap, Keymap::Emacs);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_keymap_falls_back_to_vim() {
        let file = TempKeymaps::new("unknown", "[meta]\ndefault = \"nope\"\n");
        let (keymap, warnings) = load_keymap(None, Some(&file.0));
        assert_eq!(keymap, Keymap::Vim);
        assert!(warnings.iter().any(|w| w.contains("Keymap 'nope' not found")));
    }

    #[test]
    fn invalid_bindings_reject_the_whole_keymap() {
        let file = TempKeymaps::new(
            "invalid",
            r#"
[keymaps.bad.normal]
"C-s" = "submit"
"ctrl-s" = "discard"
"x" = "explode"
"#,
        );

        let (keymap, warnings) = load_keymap(Some("bad"), Some(&file.0));
        assert_eq!(keymap, Keymap::Vim);
        assert!(warnings.iter().any(|w| w.contains("Duplicate key 'C-s'")));
        assert!(warnings.iter().any(|w| w.contains("Invalid action 'explode'")));
    }

    #[test]
    fn unreadable_files_become_warnings() {
        let unknown_field = TempKeymaps::new("field", "[meta]\nextra = 1\n");
        let (keymap, warnings) = load_keymap(None, Some(&unknown_field.0));
        assert_eq!(keymap, Keymap::Vim);
        assert!(warnings.iter().any(|w| w.contains("Failed to parse")));

        let oversized = TempKeymaps::new(
            "large",
            &"#".repeat(MAX_KEYMAP_FILE_BYTES as usize + 1),
        );
        let (_, warnings) = load_keymap(None, Some(&oversized.0));
        assert!(warnings.iter().any(|w| w.contains("file too large")));

        let missing = std::env::temp_dir().join("formcalc_keymaps_does_not_exist.toml");
        let (_, warnings) = load_keymap(None, Some(&missing));
        assert!(warnings.iter().any(|w| w.contains("Keymap file not found")));
    }
}
