use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a category page's `topic_list.topics`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicSummary {
    pub id: u64,
    pub slug: String,
    pub created_at: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Topic summaries of a category page, plus the entries that did not have
/// the fields we need.
#[derive(Debug, Default)]
pub struct TopicPage {
    pub topics: Vec<TopicSummary>,
    pub malformed: usize,
}

impl TopicPage {
    /// Read `topic_list.topics` from a category page; a missing list is empty.
    pub fn from_value(page: &Value) -> Self {
        let entries = page
            .get("topic_list")
            .and_then(|list| list.get("topics"))
            .and_then(Value::as_array);

        let mut result = TopicPage::default();
        for entry in entries.into_iter().flatten() {
            match TopicSummary::deserialize(entry) {
                Ok(summary) => result.topics.push(summary),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed topic entry");
                    result.malformed += 1;
                }
            }
        }
        result
    }

    /// True when the page carried no entries at all
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.malformed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_topics_from_page() {
        let page = json!({
            "users": [],
            "topic_list": {
                "topics": [
                    {"id": 1, "slug": "first", "created_at": "2025-01-02T03:04:05.000Z", "title": "First", "posts_count": 3},
                    {"id": 2, "slug": "second", "created_at": "2025-01-03T03:04:05Z"}
                ]
            }
        });
        let parsed = TopicPage::from_value(&page);
        assert_eq!(parsed.topics.len(), 2);
        assert_eq!(parsed.topics[0].title.as_deref(), Some("First"));
        assert_eq!(parsed.topics[1].title, None);
        assert_eq!(parsed.malformed, 0);
    }

    #[test]
    fn test_missing_topic_list_is_empty() {
        assert!(TopicPage::from_value(&json!({})).is_empty());
        assert!(TopicPage::from_value(&json!({"topic_list": {}})).is_empty());
        assert!(TopicPage::from_value(&json!({"topic_list": {"topics": []}})).is_empty());
    }

    #[test]
    fn test_malformed_entries_are_counted() {
        let page = json!({"topic_list": {"topics": [{"id": "x"}, {"id": 5, "slug": "ok", "created_at": "2025-01-01T00:00:00Z"}]}});
        let parsed = TopicPage::from_value(&page);
        assert_eq!(parsed.topics.len(), 1);
        assert_eq!(parsed.malformed, 1);
        assert!(!parsed.is_empty());
    }
}
