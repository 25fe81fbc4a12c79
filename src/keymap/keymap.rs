//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::types::Keystroke;

/// Result of handling a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command
    Execute(Command),
    /// Keystroke is part of a chord, await more input
    AwaitMore,
    /// No binding matches this keystroke
    NoMatch,
}

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Single-keystroke bindings (indices into bindings, last one wins)
    single_lookup: HashMap<Keystroke, usize>,
    /// Keystrokes that start a chord sequence
    chord_prefixes: HashMap<Keystroke, Vec<usize>>,
    pending_chord: Vec<Keystroke>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let Some(&first_stroke) = binding.keystrokes.first() else {
            return;
        };
        let idx = self.bindings.len();

        if binding.is_chord() {
            self.chord_prefixes.entry(first_stroke).or_default().push(idx);
        } else {
            self.single_lookup.insert(first_stroke, idx);
        }

        self.bindings.push(binding);
    }

    /// Clear pending chord state
    pub fn reset(&mut self) {
        self.pending_chord.clear();
    }

    /// Handle a keystroke and return the action to take
    pub fn handle_keystroke(&mut self, keystroke: Keystroke) -> KeyAction {
        if !self.pending_chord.is_empty() {
            self.pending_chord.push(keystroke);
            return self.try_complete_chord();
        }

        if let Some(command) = self.lookup(&keystroke) {
            return KeyAction::Execute(command);
        }

        if self.chord_prefixes.contains_key(&keystroke) {
            self.pending_chord.push(keystroke);
            return KeyAction::AwaitMore;
        }

        KeyAction::NoMatch
    }

    fn try_complete_chord(&mut self) -> KeyAction {
        let first = self.pending_chord[0];
        let Some(indices) = self.chord_prefixes.get(&first) else {
            self.reset();
            return KeyAction::NoMatch;
        };

        if let Some(&idx) = indices
            .iter()
            .find(|&&idx| self.bindings[idx].keystrokes == self.pending_chord)
        {
            let command = self.bindings[idx].command;
            self.reset();
            return KeyAction::Execute(command);
        }

        let could_match = indices.iter().any(|&idx| {
            let keystrokes = &self.bindings[idx].keystrokes;
            keystrokes.len() > self.pending_chord.len()
                && keystrokes[..self.pending_chord.len()] == self.pending_chord
        });

        if could_match {
            KeyAction::AwaitMore
        } else {
            self.reset();
            KeyAction::NoMatch
        }
    }

    /// Look up a single keystroke without chord handling
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.single_lookup
            .get(keystroke)
            .map(|&idx| self.bindings[idx].command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Get display string for a command's keybinding (first match)
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.bindings
            .iter()
            .find(|b| b.command == command)
            .map(|b| b.display_string())
    }

    pub fn has_pending_chord(&self) -> bool {
        !self.pending_chord.is_empty()
    }

    /// Pending chord keystrokes, for the prompt
    pub fn pending_chord_display(&self) -> Option<String> {
        if self.pending_chord.is_empty() {
            return None;
        }
        Some(
            self.pending_chord
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}
