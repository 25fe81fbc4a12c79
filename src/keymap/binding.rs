//! Keybinding struct representing a mapping from keystroke(s) to command

use super::command::Command;
use super::types::Keystroke;

/// A single keybinding mapping one or more keystrokes to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    /// The keystroke sequence (usually 1, sometimes 2 for chords)
    pub keystrokes: Vec<Keystroke>,
    pub command: Command,
}

impl Keybinding {
    /// Create a single-keystroke binding
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystrokes: vec![keystroke],
            command,
        }
    }

    /// Create a chord binding (multi-keystroke sequence)
    pub fn chord(keystrokes: Vec<Keystroke>, command: Command) -> Self {
        Self {
            keystrokes,
            command,
        }
    }

    pub fn is_chord(&self) -> bool {
        self.keystrokes.len() > 1
    }

    /// Check if this binding starts with the given keystroke
    pub fn starts_with(&self, keystroke: &Keystroke) -> bool {
        self.keystrokes.first() == Some(keystroke)
    }

    pub fn display_string(&self) -> String {
        self.keystrokes
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
