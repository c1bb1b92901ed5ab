use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::forum::TopicSummary;
use crate::fs::FileSystemOperations;

/// Writes one pretty-printed JSON file per topic into a directory
pub struct TopicArchive {
    fs: Arc<dyn FileSystemOperations>,
    directory: PathBuf,
}

/// `{slug}_{id}.json`. Characters other than alphanumerics, `-` and `_`
/// become `_`, so the name always stays inside the output directory.
pub fn topic_file_name(slug: &str, id: u64) -> String {
    let safe: String = slug
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let safe = if safe.trim_matches('_').is_empty() { "topic" } else { safe.as_str() };
    format!("{safe}_{id}.json")
}

impl TopicArchive {
    pub fn new(fs: Arc<dyn FileSystemOperations>, directory: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub async fn ensure_directory(&self) -> Result<()> {
        if !self.fs.exists(&self.directory) {
            debug!(dir = %self.directory.display(), "Creating output directory");
        }
        self.fs
            .create_dir_all(&self.directory)
            .await
            .with_context(|| format!("Failed to create {}", self.directory.display()))
    }

    pub fn path_for(&self, topic: &TopicSummary) -> PathBuf {
        self.directory.join(topic_file_name(&topic.slug, topic.id))
    }

    /// Write the document, replacing any earlier download of the same topic
    pub async fn write_topic(&self, topic: &TopicSummary, document: &Value) -> Result<PathBuf> {
        let path = self.path_for(topic);
        let contents = serde_json::to_vec_pretty(document)?;
        self.fs
            .write(&path, &contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), bytes = contents.len(), "Topic written");
        Ok(path)
    }
}
