use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::settings::{DEFAULT_PAGE_DELAY_MS, DEFAULT_PER_PAGE};
use crate::domain::PhotoSize;
use crate::pagination::DEFAULT_MAX_PAGES;

#[derive(Parser, Debug)]
#[command(name = "unsplash-browser", author, version, about = "Page through Unsplash photos from the terminal")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch pages of photos and print them as they arrive
    Browse(BrowseArgs),
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct BrowseArgs {
    /// Search query; lists the editorial feed when omitted
    #[arg(short, long)]
    pub query: Option<String>,

    /// Number of pages to fetch
    #[arg(short, long, default_value_t = DEFAULT_MAX_PAGES)]
    pub pages: usize,

    /// Photos per page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: usize,

    /// Pause between pages, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAGE_DELAY_MS)]
    pub delay_ms: u64,

    /// Stop once a page brings nothing new or the last page is reached
    #[arg(long)]
    pub until_exhausted: bool,

    /// Also download each photo's image
    #[arg(short, long)]
    pub thumbnails: bool,

    /// Image size to download with --thumbnails
    #[arg(long, default_value_t = PhotoSize::Regular)]
    pub size: PhotoSize,
}
