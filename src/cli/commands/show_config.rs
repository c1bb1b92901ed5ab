use anyhow::Result;

use crate::cli::commands::Command;
use crate::config::ScraperConfig;

pub struct ShowConfigCommand {
    config: ScraperConfig,
}

impl ShowConfigCommand {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }
}

impl Command for ShowConfigCommand {
    async fn execute(&self) -> Result<()> {
        print!("{}", self.config.to_toml()?);
        Ok(())
    }
}
