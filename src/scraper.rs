use anyhow::Result;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::archive::TopicArchive;
use crate::cleaning::clean_topic;
use crate::forum::{ForumClient, TopicPage, TopicSummary};
use crate::observability::OperationTimer;
use crate::window::{parse_forum_timestamp, DateWindow};

/// Counts gathered over one scrape run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeReport {
    /// Pages that returned a topic list (including the final empty one)
    pub pages_fetched: u32,
    pub topics_listed: usize,
    /// Index entries lacking an id, slug or creation date
    pub malformed_entries: usize,
    /// Entries whose `created_at` could not be read
    pub bad_timestamps: usize,
    pub topics_in_window: usize,
    pub saved: usize,
    pub failed: usize,
}

/// Paginate → filter → fetch → clean → write, one request at a time
pub struct Scraper<'a> {
    client: &'a ForumClient,
    archive: TopicArchive,
    window: DateWindow,
    max_pages: Option<u32>,
}

impl<'a> Scraper<'a> {
    pub fn new(client: &'a ForumClient, archive: TopicArchive, window: DateWindow) -> Self {
        Self {
            client,
            archive,
            window,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn archive(&self) -> &TopicArchive {
        &self.archive
    }

    /// Walk the category index from page 0 until a page comes back empty
    /// or unreadable.
    pub async fn collect_topics(&self, report: &mut ScrapeReport) -> Vec<TopicSummary> {
        let mut topics = Vec::new();
        let mut page_num = 0u32;

        loop {
            if self.max_pages.is_some_and(|max| page_num >= max) {
                info!(pages = page_num, "Reached page limit");
                break;
            }

            println!("📦 Fetching page {page_num}...");
            let page = match self.client.fetch_category_page(page_num).await {
                Ok(page) => page,
                Err(e) => {
                    println!("❌ Could not parse JSON — check login or access.");
                    error!(page = page_num, error = %e, "Category page unreadable, stopping pagination");
                    break;
                }
            };
            report.pages_fetched += 1;

            let parsed = TopicPage::from_value(&page);
            if parsed.is_empty() {
                debug!(page = page_num, "Empty page, pagination complete");
                break;
            }

            report.malformed_entries += parsed.malformed;
            topics.extend(parsed.topics);
            page_num += 1;
        }

        report.topics_listed = topics.len();
        println!("📄 Found {} total topics.", topics.len());
        topics
    }

    /// Keep topics created inside the window; entries with unreadable
    /// timestamps are skipped.
    pub fn select_topics(&self, topics: Vec<TopicSummary>, report: &mut ScrapeReport) -> Vec<TopicSummary> {
        let selected: Vec<TopicSummary> = topics
            .into_iter()
            .filter(|topic| match parse_forum_timestamp(&topic.created_at) {
                Ok(created_at) => self.window.contains(created_at),
                Err(e) => {
                    warn!(topic.id = topic.id, error = %e, "Skipping topic with unreadable created_at");
                    report.bad_timestamps += 1;
                    false
                }
            })
            .collect();

        report.topics_in_window = selected.len();
        info!(window = %self.window, selected = selected.len(), "Topics selected");
        selected
    }

    /// Download, clean and save one topic
    async fn save_topic(&self, topic: &TopicSummary) -> Result<()> {
        let url = self.client.forum().topic_url(&topic.slug, topic.id);
        println!("🧵 Fetching topic: {url}");

        let mut document = match self.client.fetch_topic(topic).await {
            Ok(document) => document,
            Err(e) => {
                println!("⚠️  Failed to fetch topic: {url}");
                return Err(e.into());
            }
        };

        let cleaned = clean_topic(&mut document);
        debug!(topic.id = topic.id, posts = cleaned, "Post bodies converted to text");
        self.archive.write_topic(topic, &document).await?;
        Ok(())
    }

    pub async fn run(&self) -> Result<ScrapeReport> {
        let timer = OperationTimer::new("scrape");
        let mut report = ScrapeReport::default();

        println!("🔍 Scraping started using saved session...");
        let topics = self.collect_topics(&mut report).await;
        let selected = self.select_topics(topics, &mut report);

        self.archive.ensure_directory().await?;

        for topic in &selected {
            match self.save_topic(topic).await {
                Ok(()) => report.saved += 1,
                Err(e) => {
                    warn!(topic.id = topic.id, slug = %topic.slug, error = %e, "Topic skipped");
                    report.failed += 1;
                }
            }
        }

        self.client.metrics().log_stats();
        timer.finish();
        Ok(report)
    }
}
