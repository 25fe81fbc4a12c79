use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use itemsheet::cli::CliArgs;
use itemsheet::config::SheetConfig;
use itemsheet::keymap::{load_default_keymap, Keymap};
use itemsheet::model::SheetModel;
use itemsheet::persistence;
use itemsheet::repl::{self, Outcome};
use itemsheet::runtime::{AlwaysConfirm, Confirm, Runtime};

/// Ask on the terminal; anything but y/yes is a no
fn prompt_yes_no(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_sheet(runtime: &Runtime) {
    print!("{}", repl::render_table(runtime.model()));
    println!("{}", repl::render_status(runtime.model()));
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    itemsheet::tracing::init();

    let base = if args.no_config {
        SheetConfig::default()
    } else {
        SheetConfig::load()
    };
    let startup = args.into_config(base).map_err(anyhow::Error::msg)?;
    tracing::info!(backend = ?startup.config.backend, "Starting itemsheet");

    let store = persistence::from_config(&startup.config).context("Failed to open backend")?;
    let keymap = Keymap::with_bindings(load_default_keymap());
    let confirm: Box<dyn Confirm> = if startup.auto_confirm {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(prompt_yes_no)
    };
    let wait = startup.config.idle_wait();

    let mut runtime = Runtime::new(SheetModel::new(startup.config), keymap, store, confirm);
    runtime.on_reload();
    runtime.wait_idle(wait);
    print_sheet(&runtime);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to write prompt")?;

        line.clear();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }

        let input = match repl::parse_line(&line) {
            Ok(input) => input,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match repl::apply(&mut runtime, input) {
            Outcome::Refresh => {
                runtime.wait_idle(wait);
                print_sheet(&runtime);
            }
            Outcome::Print(text) => {
                if !text.is_empty() {
                    println!("{}", text.trim_end());
                }
            }
            Outcome::Quit => break,
        }
    }

    tracing::info!("Exiting");
    Ok(())
}
