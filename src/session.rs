//! Saved login session: the forum cookies that authenticate API requests.
//!
//! The file uses the browser storage-state layout (`{"cookies": [...],
//! "origins": [...]}`), so a state file exported from a browser automation
//! tool can be dropped in as-is.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while reading, writing or creating a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error on session file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No cookie value was entered")]
    EmptyCookie,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
    /// Per-origin local storage; carried through untouched
    #[serde(default)]
    pub origins: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    /// Unix seconds; -1 for a session cookie
    #[serde(default = "session_expiry")]
    pub expires: f64,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default = "default_same_site")]
    pub same_site: String,
}

fn default_path() -> String {
    "/".to_string()
}

fn session_expiry() -> f64 {
    -1.0
}

fn default_same_site() -> String {
    "Lax".to_string()
}

impl StoredCookie {
    /// Host-or-subdomain match, ignoring a leading dot on the cookie domain
    pub fn matches_host(&self, host: &str) -> bool {
        let domain = self.domain.trim_start_matches('.');
        if domain.is_empty() {
            return false;
        }
        host.eq_ignore_ascii_case(domain)
            || host
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", domain.to_ascii_lowercase()))
    }

    pub fn is_expired(&self, now_unix: f64) -> bool {
        self.expires > 0.0 && self.expires <= now_unix
    }
}

impl SessionState {
    /// Build a session holding a single cookie pasted by the user
    pub fn from_login_cookie(name: &str, value: &str, host: &str) -> Result<Self, SessionError> {
        let value = value.trim();
        let value = value
            .strip_prefix(&format!("{name}="))
            .unwrap_or(value)
            .trim();
        if value.is_empty() {
            return Err(SessionError::EmptyCookie);
        }

        Ok(Self {
            cookies: vec![StoredCookie {
                name: name.to_string(),
                value: value.to_string(),
                domain: host.to_string(),
                path: default_path(),
                expires: session_expiry(),
                http_only: true,
                secure: true,
                same_site: default_same_site(),
            }],
            origins: Vec::new(),
        })
    }

    pub async fn load(path: &Path) -> Result<Self, SessionError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let state: SessionState = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), cookies = state.cookies.len(), "Loaded session");
        Ok(state)
    }

    pub async fn save(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;
        info!(path = %path.display(), "Login session saved");
        Ok(())
    }

    /// `Cookie` header value for requests to `host`, or `None` when no
    /// live cookie applies.
    pub fn cookie_header(&self, host: &str) -> Option<String> {
        let now = chrono::Utc::now().timestamp() as f64;
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|c| c.matches_host(host))
            .filter(|c| {
                let expired = c.is_expired(now);
                if expired {
                    debug!(cookie = %c.name, "Skipping expired cookie");
                }
                !expired
            })
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

/// Source of the session cookie during login
pub trait CookiePrompt {
    fn ask(&mut self, login_url: &str, cookie_name: &str) -> Result<String, SessionError>;
}

/// Prompts on a terminal-like pair of streams
pub struct TerminalPrompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> CookiePrompt for TerminalPrompt<R, W> {
    fn ask(&mut self, login_url: &str, cookie_name: &str) -> Result<String, SessionError> {
        writeln!(self.writer, "🔐 Log in to the forum in your browser:")?;
        writeln!(self.writer, "   {login_url}")?;
        writeln!(
            self.writer,
            "🌐 Then copy the value of the '{cookie_name}' cookie (developer tools → Storage → Cookies)."
        )?;
        write!(self.writer, "📋 Paste it here and press Enter: ")?;
        self.writer.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        let answer = line.trim().to_string();
        if answer.is_empty() {
            return Err(SessionError::EmptyCookie);
        }
        Ok(answer)
    }
}
