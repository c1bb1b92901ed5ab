use anyhow::Result;
use clap::Parser;

use discourse_scraper::cli::commands::check::CheckCommand;
use discourse_scraper::cli::commands::login::LoginCommand;
use discourse_scraper::cli::commands::scrape::ScrapeCommand;
use discourse_scraper::cli::commands::show_config::ShowConfigCommand;
use discourse_scraper::cli::commands::Command;
use discourse_scraper::cli::{Cli, Commands, ScrapeArgs};
use discourse_scraper::{init_telemetry, ScraperConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = ScraperConfig::load_env_file() {
        eprintln!("⚠️  Ignoring unreadable .env file: {e}");
    }
    let mut config = ScraperConfig::load(cli.config.as_deref())?;
    cli.apply_globals(&mut config);
    init_telemetry(&config.observability)?;

    // Requests are issued one after another; a single-threaded runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match cli.command {
            None => ScrapeCommand::new(config, &ScrapeArgs::default())?.execute().await,
            Some(Commands::Scrape(args)) => ScrapeCommand::new(config, &args)?.execute().await,
            Some(Commands::Login) => LoginCommand::new(config).execute().await,
            Some(Commands::Check) => CheckCommand::new(config).execute().await,
            Some(Commands::Config) => ShowConfigCommand::new(config).execute().await,
        }
    })
}
