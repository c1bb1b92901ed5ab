use anyhow::Result;

use crate::auth::login;
use crate::cli::commands::Command;
use crate::config::ScraperConfig;
use crate::forum::{ForumClient, ForumError};
use crate::session::TerminalPrompt;

pub struct LoginCommand {
    config: ScraperConfig,
}

impl LoginCommand {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }
}

impl Command for LoginCommand {
    async fn execute(&self) -> Result<()> {
        let mut terminal = TerminalPrompt::stdio();
        let reason = ForumError::SessionMissing("Login needs an interactive terminal".to_string());
        let session = login(&self.config, Some(&mut terminal), reason).await?;

        print!("🔄 Verifying session... ");
        std::io::Write::flush(&mut std::io::stdout())?;
        if !ForumClient::new(&self.config, &session)?.is_authenticated().await {
            println!("❌");
            return Err(ForumError::SessionInvalid(format!(
                "The forum did not return the category index with the '{}' cookie you pasted",
                self.config.session.cookie_name
            ))
            .into());
        }
        println!("✅");
        Ok(())
    }
}
