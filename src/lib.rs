pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod pagination;
pub mod rate_limiter;
pub mod render;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::{BrowseArgs, Cli};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::BrowseService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_browse(args: &BrowseArgs) -> Result<()> {
    let config = build_config(args);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = BrowseService::new(config);
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn build_config(args: &BrowseArgs) -> AppConfig {
    let mut config = AppConfig::from_env();
    config.api.query = args.query.clone();
    config.api.per_page = args.per_page;
    config.feed.max_pages = args.pages;
    config.feed.page_delay_ms = args.delay_ms;
    config.feed.stop_when_exhausted = args.until_exhausted;
    config.thumbnails.enabled = args.thumbnails;
    config.thumbnails.size = args.size;
    config
}
