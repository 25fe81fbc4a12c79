//! Command-line argument parsing for the sheet
//!
//! Supports:
//! - Choosing the backend (REST server, in-memory, JSON file)
//! - Skipping delete confirmation prompts
//! - Ignoring the config file

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Backend, SheetConfig};

/// A name/value sheet with undo, redo and copy/paste
#[derive(Parser, Debug, Default)]
#[command(
    name = "itemsheet",
    version,
    about = "A name/value sheet with undo, redo and copy/paste"
)]
pub struct CliArgs {
    /// Base URL of the items REST collection
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Keep rows in memory only (nothing is saved)
    #[arg(long, conflicts_with_all = ["server", "data_file"])]
    pub memory: bool,

    /// Store rows in a local JSON file
    #[arg(long, value_name = "PATH", conflicts_with = "server")]
    pub data_file: Option<PathBuf>,

    /// Delete rows without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Ignore ~/.config/itemsheet/config.yaml
    #[arg(long)]
    pub no_config: bool,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub config: SheetConfig,
    /// Answer every delete prompt with yes
    pub auto_confirm: bool,
}

impl CliArgs {
    /// Layer the CLI flags over `base`
    pub fn into_config(self, base: SheetConfig) -> Result<StartupConfig, String> {
        let mut config = base;

        if let Some(server) = self.server {
            if !(server.starts_with("http://") || server.starts_with("https://")) {
                return Err(format!("Server URL must start with http:// or https://: {}", server));
            }
            config.backend = Backend::Http;
            config.server_url = server;
        }

        if self.memory {
            config.backend = Backend::Memory;
        }

        if let Some(path) = self.data_file {
            config.backend = Backend::File;
            config.data_file = Some(path);
        }

        if self.yes {
            config.confirm_row_delete = false;
        }

        Ok(StartupConfig {
            auto_confirm: self.yes,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_base() {
        let base = SheetConfig {
            backend: Backend::Memory,
            ..SheetConfig::default()
        };
        let startup = CliArgs::default().into_config(base.clone()).unwrap();
        assert_eq!(startup.config, base);
        assert!(!startup.auto_confirm);
    }

    #[test]
    fn test_server_flag_selects_http() {
        let args = CliArgs {
            server: Some("http://example.test/api/items".into()),
            ..CliArgs::default()
        };
        let base = SheetConfig {
            backend: Backend::Memory,
            ..SheetConfig::default()
        };
        let startup = args.into_config(base).unwrap();
        assert_eq!(startup.config.backend, Backend::Http);
        assert_eq!(startup.config.server_url, "http://example.test/api/items");
    }

    #[test]
    fn test_server_flag_rejects_bad_scheme() {
        let args = CliArgs {
            server: Some("localhost:3001".into()),
            ..CliArgs::default()
        };
        assert!(args.into_config(SheetConfig::default()).is_err());
    }

    #[test]
    fn test_data_file_and_yes() {
        let args = CliArgs {
            data_file: Some(PathBuf::from("/tmp/rows.json")),
            yes: true,
            ..CliArgs::default()
        };
        let startup = args.into_config(SheetConfig::default()).unwrap();
        assert_eq!(startup.config.backend, Backend::File);
        assert_eq!(
            startup.config.data_file,
            Some(PathBuf::from("/tmp/rows.json"))
        );
        assert!(!startup.config.confirm_row_delete);
        assert!(startup.auto_confirm);
    }

    #[test]
    fn test_parse_from_argv() {
        let args = CliArgs::try_parse_from(["itemsheet", "--memory", "-y"]).unwrap();
        assert!(args.memory);
        assert!(args.yes);

        assert!(CliArgs::try_parse_from(["itemsheet", "--memory", "--server", "http://x"]).is_err());
    }
}
