// Discourse category scraper - library surface used by the binary and tests

pub mod archive;
pub mod auth;
pub mod cleaning;
pub mod cli;
pub mod config;
pub mod forum;
pub mod fs;
pub mod observability;
pub mod scraper;
pub mod session;
pub mod telemetry;
pub mod window;

// Re-export key types for easy access
pub use archive::TopicArchive;
pub use auth::authenticate;
pub use cleaning::{clean_topic, html_to_text};
pub use config::ScraperConfig;
pub use forum::{ForumClient, ForumError, TopicSummary};
pub use scraper::{ScrapeReport, Scraper};
pub use session::{CookiePrompt, SessionState, TerminalPrompt};
pub use telemetry::init_telemetry;
pub use window::DateWindow;
