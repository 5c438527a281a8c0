//! Persistence adapters: session activity log and feed archive.

pub mod activity_json;
pub mod feed_jsonl;

pub use activity_json::ActivityJson;
pub use feed_jsonl::JsonlFeedArchive;
