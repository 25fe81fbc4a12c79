//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! history, selection, and in-flight request transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=history=debug,message=debug` - scoped filtering
//! - `RUST_LOG=itemsheet::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/itemsheet/logs/itemsheet.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::{PendingOp, SheetModel};

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so it never interleaves with the table.
/// It respects RUST_LOG and defaults to `warn`.
///
/// File logging writes to `~/.config/itemsheet/logs/itemsheet.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "itemsheet.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of sheet state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub rows: usize,
    pub selection: String,
    pub undo: usize,
    pub redo: usize,
    pub clipboard: Option<&'static str>,
    pub in_flight: Option<&'static str>,
}

impl StateSnapshot {
    pub fn from_model(model: &SheetModel) -> Self {
        Self {
            rows: model.store.len(),
            selection: model.selection.current().describe(),
            undo: model.history.undo_count(),
            redo: model.history.redo_count(),
            clipboard: model.clipboard.payload().map(|p| p.shape()),
            in_flight: model.in_flight.as_ref().map(|f| op_name(&f.op)),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StateSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.rows != other.rows {
            changes.push(format!("rows: {} → {}", self.rows, other.rows));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection: {} → {}",
                self.selection, other.selection
            ));
        }
        if (self.undo, self.redo) != (other.undo, other.redo) {
            changes.push(format!(
                "history: {}/{} → {}/{}",
                self.undo, self.redo, other.undo, other.redo
            ));
        }
        if self.clipboard != other.clipboard {
            changes.push(format!(
                "clipboard: {} → {}",
                self.clipboard.unwrap_or("empty"),
                other.clipboard.unwrap_or("empty")
            ));
        }
        if self.in_flight != other.in_flight {
            changes.push(format!(
                "in flight: {} → {}",
                self.in_flight.unwrap_or("none"),
                other.in_flight.unwrap_or("none")
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn op_name(op: &PendingOp) -> &'static str {
    match op {
        PendingOp::Load => "load",
        PendingOp::Add => "add",
        PendingOp::Update { .. } => "update",
        PendingOp::Delete { .. } => "delete",
        PendingOp::Replay { .. } => "replay",
    }
}
