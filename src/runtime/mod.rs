//! Runtime module - command execution and front-end integration
//!
//! This module drives the update loop for any front end:
//! - `app` - message dispatch, side effects and backend worker threads
//! - `input` - keystroke to message mapping
//! - `confirm` - yes/no prompts for destructive actions

pub mod app;
pub mod confirm;
pub mod input;

pub use app::Runtime;
pub use confirm::{AlwaysConfirm, Confirm};
