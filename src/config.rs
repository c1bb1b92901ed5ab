use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::window::DateWindow;

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScraperConfig {
    /// Which forum and category to read
    pub forum: ForumConfig,
    /// Where the login session lives
    pub session: SessionConfig,
    /// Where downloaded topics are written
    pub output: OutputConfig,
    /// Optional creation-date filter
    pub window: WindowConfig,
    /// HTTP client behaviour
    pub http: HttpConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ForumConfig {
    /// Forum root, without trailing slash
    pub base_url: String,
    /// Parent path segment of the category (`/c/{category_path}/...`)
    pub category_path: String,
    /// Category slug
    pub category_slug: String,
    /// Numeric category id
    pub category_id: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionConfig {
    /// Cookie file written by `login`
    pub state_file: PathBuf,
    /// Name of the forum's session cookie
    pub cookie_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct WindowConfig {
    /// Inclusive lower bound, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
    pub date_from: Option<String>,
    /// Inclusive upper bound, same formats as `date_from`
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HttpConfig {
    pub request_timeout_seconds: u64,
    /// Timeout used only for the session probe
    pub auth_check_timeout_seconds: u64,
    /// Request pacing; every request waits for a permit
    pub requests_per_second: u32,
    pub user_agent: String,
    /// Stop paginating after this many pages
    pub max_pages: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Default filter when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            forum: ForumConfig {
                base_url: "https://discourse.onlinedegree.iitm.ac.in".to_string(),
                category_path: "courses".to_string(),
                category_slug: "tds-kb".to_string(),
                category_id: 34,
            },
            session: SessionConfig {
                state_file: PathBuf::from("auth.json"),
                cookie_name: "_t".to_string(),
            },
            output: OutputConfig {
                directory: PathBuf::from("downloaded_threads"),
            },
            window: WindowConfig::default(),
            http: HttpConfig {
                request_timeout_seconds: 30,
                auth_check_timeout_seconds: 10,
                requests_per_second: 4,
                user_agent: format!("discourse-scraper/{}", env!("CARGO_PKG_VERSION")),
                max_pages: None,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
            },
        }
    }
}

impl ForumConfig {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// `{base}/c/{path}/{slug}/{id}.json`
    pub fn category_json_url(&self) -> String {
        format!(
            "{}/c/{}/{}/{}.json",
            self.base(),
            self.category_path,
            self.category_slug,
            self.category_id
        )
    }

    pub fn category_page_url(&self, page: u32) -> String {
        format!("{}?page={}", self.category_json_url(), page)
    }

    pub fn topic_url(&self, slug: &str, id: u64) -> String {
        format!("{}/t/{}/{}.json", self.base(), slug, id)
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.base())
    }

    /// Host part of `base_url`, used to scope session cookies
    pub fn host(&self) -> Result<String> {
        let url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid forum base_url: {}", self.base_url))?;
        url.host_str()
            .map(str::to_string)
            .with_context(|| format!("Forum base_url has no host: {}", self.base_url))
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn auth_check_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_check_timeout_seconds)
    }
}

impl WindowConfig {
    pub fn to_window(&self) -> Result<DateWindow> {
        DateWindow::from_bounds(self.date_from.as_deref(), self.date_to.as_deref())
            .map_err(Into::into)
    }
}

impl ScraperConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (discourse-scraper.toml, .discourse-scraper-rc)
    /// 3. An explicit file passed on the command line
    /// 4. Environment variables (prefixed with DISCOURSE_SCRAPER__)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("discourse-scraper.toml").exists() {
            builder = builder.add_source(File::with_name("discourse-scraper"));
        }

        if Path::new(".discourse-scraper-rc").exists() {
            builder = builder.add_source(
                File::with_name(".discourse-scraper-rc").format(config::FileFormat::Toml),
            );
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("DISCOURSE_SCRAPER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let scraper_config: ScraperConfig = config.try_deserialize()?;
        scraper_config.validate()?;
        Ok(scraper_config)
    }

    /// Reject settings that would make every run fail later
    pub fn validate(&self) -> Result<()> {
        self.forum.host()?;
        self.window.to_window()?;
        if self.http.requests_per_second == 0 {
            anyhow::bail!("http.requests_per_second must be at least 1");
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
