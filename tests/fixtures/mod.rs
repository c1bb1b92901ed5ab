//! Shared wiremock scaffolding for forum API tests
#![allow(dead_code)]

use discourse_scraper::ScraperConfig;
use serde_json::{json, Value};
use std::path::Path;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CATEGORY_PATH: &str = "/c/courses/tds-kb/34.json";
pub const SESSION_TOKEN: &str = "mock-token";

/// Discourse API mock server for deterministic testing
pub struct ForumApiMock {
    pub server: MockServer,
    pub base_url: String,
}

impl ForumApiMock {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Scraper config pointed at this server, writing under `workdir`
    pub fn config(&self, workdir: &Path) -> ScraperConfig {
        let mut config = ScraperConfig::default();
        config.forum.base_url = self.base_url.clone();
        config.session.state_file = workdir.join("auth.json");
        config.output.directory = workdir.join("downloaded_threads");
        config.http.requests_per_second = 1000;
        config.http.request_timeout_seconds = 5;
        config.http.auth_check_timeout_seconds = 5;
        config
    }

    /// Session probe (category JSON without `page`) succeeds for the
    /// expected cookie
    pub async fn mock_authenticated_probe(&self) {
        Mock::given(method("GET"))
            .and(path(CATEGORY_PATH))
            .and(header("cookie", format!("_t={SESSION_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "topic_list": {"topics": []}
            })))
            .with_priority(10)
            .mount(&self.server)
            .await;
    }

    /// Logged-out answer: Discourse's error body for a private category
    pub async fn mock_rejected_probe(&self) {
        Mock::given(method("GET"))
            .and(path(CATEGORY_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": ["The requested URL or resource could not be found."],
                "error_type": "not_found"
            })))
            .with_priority(20)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_category_page(&self, page: u32, topics: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(CATEGORY_PATH))
            .and(query_param("page", page.to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [],
                "topic_list": {"can_create_topic": false, "per_page": 30, "topics": topics}
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_raw_category_page(&self, page: u32, body: &str) {
        Mock::given(method("GET"))
            .and(path(CATEGORY_PATH))
            .and(query_param("page", page.to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_topic(&self, slug: &str, id: u64, cooked: &[&str]) {
        let posts: Vec<Value> = cooked
            .iter()
            .enumerate()
            .map(|(i, html)| json!({"id": id * 100 + i as u64, "post_number": i + 1, "cooked": html}))
            .collect();

        Mock::given(method("GET"))
            .and(path(format!("/t/{slug}/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "slug": slug,
                "title": format!("Topic {id}"),
                "post_stream": {"posts": posts, "stream": []}
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_topic_error(&self, slug: &str, id: u64, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/t/{slug}/{id}.json")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}

pub fn topic_entry(id: u64, slug: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": format!("Topic {id}"),
        "created_at": created_at,
        "posts_count": 1
    })
}
