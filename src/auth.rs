//! Session bootstrap: reuse the saved login when the forum still accepts
//! it, otherwise ask for a fresh one.

use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::forum::{ForumClient, ForumError};
use crate::session::{CookiePrompt, SessionState};

/// Ask for a session cookie and save it to the configured state file.
///
/// `prompt` is `None` in non-interactive runs, which turns the login into
/// an error carrying `reason`.
pub async fn login(
    config: &ScraperConfig,
    prompt: Option<&mut dyn CookiePrompt>,
    reason: ForumError,
) -> Result<SessionState, ForumError> {
    let Some(prompt) = prompt else {
        return Err(reason);
    };

    let host = config
        .forum
        .host()
        .map_err(|e| ForumError::Config(e.to_string()))?;
    let answer = prompt.ask(&config.forum.login_url(), &config.session.cookie_name)?;
    let session = SessionState::from_login_cookie(&config.session.cookie_name, &answer, &host)?;
    session.save(&config.session.state_file).await?;
    println!("✅ Login session saved to {}", config.session.state_file.display());
    Ok(session)
}

/// Load the saved session without contacting the forum
pub async fn load_session(config: &ScraperConfig) -> Result<Option<SessionState>, ForumError> {
    let path = &config.session.state_file;
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(SessionState::load(path).await?))
}

/// Whether the saved session still opens the category index
pub async fn check_session(config: &ScraperConfig) -> Result<bool, ForumError> {
    match load_session(config).await? {
        Some(session) => Ok(ForumClient::new(config, &session)?.is_authenticated().await),
        None => Ok(false),
    }
}

/// Produce a client with a working session, prompting for a login when the
/// state file is missing or the forum rejects it.
pub async fn authenticate(
    config: &ScraperConfig,
    prompt: Option<&mut dyn CookiePrompt>,
) -> Result<ForumClient, ForumError> {
    let state_file = config.session.state_file.display().to_string();

    let existing = match load_session(config).await {
        Ok(existing) => existing,
        Err(e) => {
            warn!(error = %e, file = %state_file, "Saved session is unreadable");
            Some(SessionState::default())
        }
    };

    let session = match existing {
        None => {
            println!("🔐 No saved session found.");
            let reason = ForumError::SessionMissing(format!("No session file at {state_file}"));
            login(config, prompt, reason).await?
        }
        Some(session) => {
            let client = ForumClient::new(config, &session)?;
            if client.is_authenticated().await {
                println!("✅ Using existing authenticated session.");
                return Ok(client);
            }
            println!("⚠️  Session expired or invalid. Please log in again.");
            let reason = ForumError::SessionInvalid(format!(
                "The forum rejected the session in {state_file}"
            ));
            login(config, prompt, reason).await?
        }
    };

    let client = ForumClient::new(config, &session)?;
    if !client.is_authenticated().await {
        return Err(ForumError::SessionInvalid(
            "The forum did not accept the cookie that was just entered".to_string(),
        ));
    }
    info!("Forum session verified");
    Ok(client)
}
