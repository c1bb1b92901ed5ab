use anyhow::Result;

use crate::auth::check_session;
use crate::cli::commands::Command;
use crate::config::ScraperConfig;
use crate::forum::ForumError;

pub struct CheckCommand {
    config: ScraperConfig,
}

impl CheckCommand {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }
}

impl Command for CheckCommand {
    async fn execute(&self) -> Result<()> {
        let state_file = self.config.session.state_file.display().to_string();
        if !self.config.session.state_file.exists() {
            return Err(ForumError::SessionMissing(format!("No session file at {state_file}")).into());
        }

        println!("🔍 Checking session in {state_file}...");
        if check_session(&self.config).await? {
            println!("✅ Session is valid for {}", self.config.forum.category_json_url());
            Ok(())
        } else {
            Err(ForumError::SessionInvalid(format!("The forum rejected the session in {state_file}")).into())
        }
    }
}
