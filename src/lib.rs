//! itemsheet - Elm-style name/value sheet
//!
//! This crate provides the core types and logic for a table of name/value
//! rows with selection, undo/redo and copy/paste, where every change goes
//! through a persistence backend, implementing the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod history;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod persistence;
pub mod repl;
pub mod runtime;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::SheetConfig;
pub use error::SheetError;
pub use messages::Msg;
pub use model::SheetModel;
pub use runtime::Runtime;
