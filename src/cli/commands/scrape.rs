use anyhow::Result;
use std::sync::Arc;
use tracing::Instrument;

use crate::archive::TopicArchive;
use crate::auth::authenticate;
use crate::cli::commands::Command;
use crate::cli::ScrapeArgs;
use crate::config::ScraperConfig;
use crate::fs::StandardFileSystem;
use crate::scraper::{ScrapeReport, Scraper};
use crate::session::{CookiePrompt, TerminalPrompt};
use crate::telemetry::{create_scrape_span, generate_correlation_id};

pub struct ScrapeCommand {
    config: ScraperConfig,
    interactive: bool,
}

impl ScrapeCommand {
    pub fn new(mut config: ScraperConfig, args: &ScrapeArgs) -> Result<Self> {
        args.apply(&mut config);
        config.validate()?;
        Ok(Self {
            config,
            interactive: !args.no_login,
        })
    }
}

impl Command for ScrapeCommand {
    async fn execute(&self) -> Result<()> {
        let window = self.config.window.to_window()?;
        let span = create_scrape_span(&self.config.forum.category_slug, &generate_correlation_id());

        let report = async {
            let mut terminal = self.interactive.then(TerminalPrompt::stdio);
            let prompt = terminal.as_mut().map(|t| t as &mut dyn CookiePrompt);
            let client = authenticate(&self.config, prompt).await?;

            let archive = TopicArchive::new(Arc::new(StandardFileSystem), self.config.output.directory.clone());
            Scraper::new(&client, archive, window)
                .with_max_pages(self.config.http.max_pages)
                .run()
                .await
        }
        .instrument(span)
        .await?;

        print_summary(&report, &self.config);
        Ok(())
    }
}

fn print_summary(report: &ScrapeReport, config: &ScraperConfig) {
    if report.failed > 0 {
        println!("⚠️  {} topics could not be downloaded", report.failed);
    }
    if report.bad_timestamps > 0 {
        println!("⚠️  {} topics had unreadable creation dates", report.bad_timestamps);
    }
    println!(
        "✅ Finished. Saved {} threads to '{}/'",
        report.saved,
        config.output.directory.display()
    );
}
