use crate::session::SessionError;

#[derive(Debug)]
pub enum ForumError {
    SessionMissing(String),
    SessionInvalid(String),
    Session(SessionError),
    Http(reqwest::Error),
    Status {
        url: String,
        status: u16,
    },
    Json {
        url: String,
        source: serde_json::Error,
    },
    Io(std::io::Error),
    InvalidTimestamp(String),
    Config(String),
}

impl From<reqwest::Error> for ForumError {
    fn from(err: reqwest::Error) -> Self {
        ForumError::Http(err)
    }
}

impl From<std::io::Error> for ForumError {
    fn from(err: std::io::Error) -> Self {
        ForumError::Io(err)
    }
}

impl From<SessionError> for ForumError {
    fn from(err: SessionError) -> Self {
        ForumError::Session(err)
    }
}

impl std::fmt::Display for ForumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForumError::SessionMissing(msg) => {
                writeln!(f, "Forum Login Required")?;
                writeln!(f, "────────────────────")?;
                write!(f, "🔐 {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(f, "   → Run: discourse-scraper login")?;
                write!(f, "   → Or copy an existing auth.json into the working directory")
            }
            ForumError::SessionInvalid(msg) => {
                writeln!(f, "Forum Session Invalid")?;
                writeln!(f, "─────────────────────")?;
                write!(f, "⚠️  {msg}\n\n")?;
                writeln!(f, "🔧 QUICK FIXES:")?;
                writeln!(f, "   → Log in again: discourse-scraper login")?;
                writeln!(f, "   → Make sure you copied the '_t' cookie, not '_forum_session'")?;
                write!(f, "   → Check that your account can open the category in a browser")
            }
            ForumError::Session(err) => {
                writeln!(f, "Session File Error")?;
                writeln!(f, "──────────────────")?;
                write!(f, "📁 {err}")
            }
            ForumError::Http(err) => {
                writeln!(f, "Forum Network Error")?;
                writeln!(f, "───────────────────")?;
                write!(f, "🌐 {err}\n\n")?;
                writeln!(f, "🔧 TROUBLESHOOTING:")?;
                if err.is_timeout() {
                    writeln!(f, "   → The forum did not answer in time")?;
                    write!(f, "   → Raise http.request_timeout_seconds and try again")
                } else {
                    writeln!(f, "   → Check internet connectivity")?;
                    write!(f, "   → Verify forum.base_url in your configuration")
                }
            }
            ForumError::Status { url, status } => {
                writeln!(f, "Forum API Error")?;
                writeln!(f, "───────────────")?;
                writeln!(f, "🌐 HTTP {status} from {url}")?;
                writeln!(f)?;
                match status {
                    401 | 403 => {
                        writeln!(f, "🔧 ACCESS DENIED:")?;
                        writeln!(f, "   → Session expired or lacks access to this category")?;
                        write!(f, "   → Run: discourse-scraper login")
                    }
                    404 => {
                        writeln!(f, "🔧 NOT FOUND:")?;
                        writeln!(f, "   → Check forum.category_slug and forum.category_id")?;
                        write!(f, "   → Private categories also answer 404 when logged out")
                    }
                    429 => {
                        writeln!(f, "🔧 RATE LIMITED:")?;
                        write!(f, "   → Lower http.requests_per_second")
                    }
                    _ => write!(f, "🔧 Retry later or check the forum status"),
                }
            }
            ForumError::Json { url, source } => {
                writeln!(f, "Forum Response Not JSON")?;
                writeln!(f, "───────────────────────")?;
                write!(f, "❌ Could not parse JSON from {url}: {source}\n\n")?;
                write!(f, "🔧 Check login or access: discourse-scraper check")
            }
            ForumError::Io(err) => {
                writeln!(f, "File System Error")?;
                writeln!(f, "─────────────────")?;
                write!(f, "📁 {err}\n\n")?;
                writeln!(f, "🔧 POSSIBLE CAUSES:")?;
                writeln!(f, "   → File permissions issue")?;
                write!(f, "   → Disk space or I/O error")
            }
            ForumError::InvalidTimestamp(value) => {
                write!(f, "Unrecognised forum timestamp: '{value}'")
            }
            ForumError::Config(msg) => {
                writeln!(f, "Configuration Error")?;
                writeln!(f, "───────────────────")?;
                write!(f, "⚙️  {msg}")
            }
        }
    }
}

impl std::error::Error for ForumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForumError::Session(err) => Some(err),
            ForumError::Http(err) => Some(err),
            ForumError::Json { source, .. } => Some(source),
            ForumError::Io(err) => Some(err),
            _ => None,
        }
    }
}
