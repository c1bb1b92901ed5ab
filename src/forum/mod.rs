pub mod client;
pub mod errors;
pub mod types;

pub use client::ForumClient;
pub use errors::ForumError;
pub use types::{TopicPage, TopicSummary};
