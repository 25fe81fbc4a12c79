//! Default keybindings for the sheet
//!
//! The defaults ship as keymap.yaml at the crate root, embedded at compile
//! time, with a hardcoded fallback if it ever fails to parse.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Raw text of the embedded default keymap
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. User config at ~/.config/itemsheet/keymap.yaml
///
/// User bindings with `command: Unbound` remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    match crate::config_paths::keymap_file() {
        Some(user_path) if user_path.exists() => merge_user_keymap(bindings, &user_path),
        _ => bindings,
    }
}

/// Merge the keymap file at `path` over `bindings`, keeping `bindings` on error
pub fn merge_user_keymap(bindings: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(bindings, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            bindings
        }
    }
}

/// Merge user bindings into base bindings
///
/// - Same keystrokes as a base binding → replaces it
/// - Command `Unbound` → removes matching base bindings
/// - Otherwise → appended
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystrokes != user_binding.keystrokes);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystrokes == user_binding.keystrokes)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded defaults for the current platform
///
/// Uses Cmd on macOS, Ctrl on Windows/Linux for the "command" modifier.
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let bind = |key: KeyCode, mods: Modifiers, command: Command| {
        Keybinding::new(Keystroke::new(key, mods), command)
    };

    vec![
        bind(KeyCode::Delete, Modifiers::NONE, Command::DeleteSelection),
        bind(KeyCode::Backspace, Modifiers::NONE, Command::DeleteSelection),
        bind(KeyCode::Char('z'), cmd, Command::Undo),
        bind(KeyCode::Char('y'), cmd, Command::Redo),
        bind(KeyCode::Char('z'), cmd | Modifiers::SHIFT, Command::Redo),
        bind(KeyCode::Char('c'), cmd, Command::Copy),
        bind(KeyCode::Char('v'), cmd, Command::Paste),
        bind(KeyCode::Escape, Modifiers::NONE, Command::ClearSelection),
        bind(KeyCode::F(5), Modifiers::NONE, Command::Reload),
        bind(KeyCode::Char('q'), cmd, Command::Quit),
    ]
}
