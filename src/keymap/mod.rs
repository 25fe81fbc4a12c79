//! Configurable keyboard mapping system
//!
//! This module provides a data-driven keybinding system that:
//! - Maps keystrokes to sheet commands
//! - Supports platform-specific modifier handling (Cmd on macOS, Ctrl elsewhere)
//! - Enables user customization via YAML config files
//! - Supports multi-key sequences/chords
//!
//! # Architecture
//!
//! ```text
//! "ctrl+z" → Keystroke → Keymap::handle_keystroke() → Command → Vec<Msg>
//! ```

mod binding;
mod command;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{
    load_keymap_file, parse_key_sequence, parse_key_string, parse_keymap_yaml, KeymapError,
};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, merge_bindings,
    merge_user_keymap,
};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
