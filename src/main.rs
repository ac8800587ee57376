use anyhow::Result;

use unsplash_browser::cli::Command;
use unsplash_browser::{handle_browse, handle_completions, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Browse(args) => handle_browse(args),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
