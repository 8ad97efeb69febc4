//! Help text content for the help modal

use super::keymap::{Binding, Keymap, action_name};

/// How the submit workflow behaves, shown under the bindings.
const FORM_HELP: [&str; 9] = [
    "How the form works:",
    "  1. Edit Value A / Value B cells, add or delete rows.",
    "     Edits stay in this screen's buffer; nothing is calculated yet.",
    "  2. Submit sends every buffered edit at once.",
    "  3. Each row is checked: Value A and Value B must be numbers.",
    "     Invalid cells turn red and nothing is saved.",
    "  4. A * B and B as % of A are recalculated for every row,",
    "     the table is saved, and the view refreshes.",
    "  Rows where Value A is 0 get a ratio of 0.",
];

/// Get keybinding help text for the current keymap
pub fn get_help_text(keymap: &Keymap) -> Vec<String> {
    let mut lines: Vec<String> = match keymap {
        Keymap::Vim => vec![
            "Navigation:",
            "  h/j/k/l      Move left/down/up/right",
            "  Arrow keys   Move cursor",
            "  PageUp/Down  Scroll by page",
            "  0/$          First/last column",
            "  gg / G       First/last row",
            "",
            "Editing (buffered):",
            "  i / Enter    Edit cell",
            "  S            Replace cell",
            "  x / Delete   Clear cell",
            "  o / O        Add row below/above",
            "  dd           Delete row",
            "  Esc          Cancel edit",
            "",
            "Form:",
            "  Ctrl+s / :w  Submit all edits",
            "  U / :e!      Discard unsubmitted edits",
            "  :row A,B     Add a filled row",
            "  :q / :wq     Quit / submit and quit",
            "  ?            This help",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        Keymap::Emacs => vec![
            "Navigation:",
            "  C-n/C-p      Move down/up",
            "  C-f/C-b      Move right/left",
            "  Arrow keys   Move cursor",
            "  C-v/M-v      Page down/up",
            "  C-a/C-e      First/last column",
            "  M-< / M->    First/last row",
            "",
            "Editing (buffered):",
            "  Enter        Edit cell",
            "  C-d/Delete   Clear cell",
            "  C-o / M-o    Add row below/above",
            "  C-k          Delete row",
            "  C-g / Esc    Cancel",
            "",
            "Form:",
            "  C-s          Submit all edits",
            "  M-r          Discard unsubmitted edits",
            "  M-x          Command prompt (row A,B / submit / quit)",
            "  C-q          Quit",
            "  F1           This help",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        Keymap::Custom(custom) => {
            let mut lines = vec![format!("Custom keymap: {}", custom.name)];
            if let Some(desc) = &custom.description {
                lines.push(desc.clone());
            }
            lines.push(String::new());
            push_bindings(&mut lines, "Normal", &custom.bindings.normal);
            push_bindings(&mut lines, "Edit", &custom.bindings.edit);
            push_bindings(&mut lines, "Command", &custom.bindings.command);
            lines
        }
    };

    lines.push(String::new());
    lines.extend(FORM_HELP.iter().map(|s| s.to_string()));
    lines
}

fn push_bindings(lines: &mut Vec<String>, title: &str, bindings: &[Binding]) {
    if bindings.is_empty() {
        return;
    }
    lines.push(format!("{}:", title));
    let mut sorted: Vec<&Binding> = bindings.iter().collect();
    sorted.sort_by_key(|b| b.combo.display());
    for binding in sorted {
        lines.push(format!(
            "  {:<12} {}",
            binding.combo.display(),
            action_name(&binding.action).unwrap_or("?")
        ));
    }
    lines.push(String::new());
}
