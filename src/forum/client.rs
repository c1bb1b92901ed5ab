use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{ForumConfig, ScraperConfig};
use crate::forum::{ForumError, TopicSummary};
use crate::observability::ForumApiMetrics;
use crate::session::SessionState;

/// Paced, cookie-authenticated client for a Discourse forum's JSON API
#[derive(Debug)]
pub struct ForumClient {
    http: reqwest::Client,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    metrics: Arc<ForumApiMetrics>,
    forum: ForumConfig,
    auth_check_timeout: Duration,
}

impl ForumClient {
    /// Build a client that sends the session's cookies on every request
    pub fn new(config: &ScraperConfig, session: &SessionState) -> Result<Self, ForumError> {
        let host = config
            .forum
            .host()
            .map_err(|e| ForumError::Config(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = session.cookie_header(&host) {
            let value = HeaderValue::from_str(&cookie).map_err(|_| {
                ForumError::SessionInvalid("Session cookie contains characters not allowed in a header".to_string())
            })?;
            headers.insert(COOKIE, value);
        } else {
            warn!(host = %host, "Session has no cookies for the forum host");
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.http.user_agent.clone())
            .timeout(config.http.request_timeout())
            .build()?;

        let per_second = NonZeroU32::new(config.http.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            http,
            rate_limiter,
            metrics: Arc::new(ForumApiMetrics::new()),
            forum: config.forum.clone(),
            auth_check_timeout: config.http.auth_check_timeout(),
        })
    }

    pub fn forum(&self) -> &ForumConfig {
        &self.forum
    }

    pub fn metrics(&self) -> &ForumApiMetrics {
        &self.metrics
    }

    /// Probe the category index; the session is good when the answer
    /// contains a topic list. Any failure counts as not authenticated.
    pub async fn is_authenticated(&self) -> bool {
        let url = self.forum.category_json_url();
        match self.get_text(&url, Some(self.auth_check_timeout)).await {
            Ok((_, body)) => body.contains("topic_list"),
            Err(e) => {
                debug!(error = %e, "Session probe failed");
                false
            }
        }
    }

    /// One page of the category's topic index
    pub async fn fetch_category_page(&self, page: u32) -> Result<Value, ForumError> {
        let url = self.forum.category_page_url(page);
        self.get_json(&url).await
    }

    /// Full topic document, including `post_stream`
    pub async fn fetch_topic(&self, topic: &TopicSummary) -> Result<Value, ForumError> {
        let url = self.forum.topic_url(&topic.slug, topic.id);
        self.get_json(&url).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, ForumError> {
        let (status, body) = self.get_text(url, None).await?;
        if !status.is_success() {
            self.metrics.record_failure();
            return Err(ForumError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        serde_json::from_str(&body).map_err(|source| {
            self.metrics.record_failure();
            ForumError::Json {
                url: url.to_string(),
                source,
            }
        })
    }

    async fn get_text(
        &self,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<(reqwest::StatusCode, String), ForumError> {
        self.rate_limiter.until_ready().await;
        self.metrics.record_request();
        debug!(url = %url, "GET");

        let mut request = self.http.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.inspect_err(|_| self.metrics.record_failure())?;
        let status = response.status();
        let body = response.text().await.inspect_err(|_| self.metrics.record_failure())?;
        self.metrics.record_bytes(body.len());
        Ok((status, body))
    }
}
