use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ScraperConfig;

pub mod commands;

#[derive(Parser)]
#[command(name = "discourse-scraper")]
#[command(version)]
#[command(about = "Download the topics of a Discourse category as JSON files")]
#[command(long_about = "Logs in to a Discourse forum with a saved session cookie, walks a category's \
                       topic index, and writes every topic created inside the date window to \
                       <output-dir>/<slug>_<id>.json with post bodies converted to plain text. \
                       Running without a subcommand is the same as 'discourse-scraper scrape'.")]
pub struct Cli {
    /// Additional configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Session cookie file to read and write
    #[arg(long, global = true, value_name = "FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download topics from the configured category (default)
    Scrape(ScrapeArgs),
    /// Log in again and save a fresh session cookie
    Login,
    /// Report whether the saved session is still accepted by the forum
    Check,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ScrapeArgs {
    /// Only topics created on or after this date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Only topics created on or before this date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Ignore any configured date window and download every topic
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub all_dates: bool,

    /// Directory for the downloaded topic files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Stop after this many index pages
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Fail instead of prompting when a login is needed
    #[arg(long)]
    pub no_login: bool,
}

impl Cli {
    /// Apply options shared by every subcommand
    pub fn apply_globals(&self, config: &mut ScraperConfig) {
        if let Some(path) = &self.session_file {
            config.session.state_file = path.clone();
        }
    }
}

impl ScrapeArgs {
    /// Layer command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut ScraperConfig) {
        if self.all_dates {
            config.window.date_from = None;
            config.window.date_to = None;
        }
        if let Some(from) = &self.from {
            config.window.date_from = Some(from.clone());
        }
        if let Some(to) = &self.to {
            config.window.date_to = Some(to.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if self.max_pages.is_some() {
            config.http.max_pages = self.max_pages;
        }
    }
}
