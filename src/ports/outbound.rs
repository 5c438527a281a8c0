//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use std::path::Path;

use serde_json::Value;

use crate::domain::{
    AwemeId, BotActivityLog, CommentDiggResponse, CommentListResponse, CommentPublishResponse,
    DiggResponse, DomainError, FollowResponse, SearchResponse, TikTokParams, TrendingResponse,
    VideoDetailsResponse,
};

/// TikTok web API. Every call is signed and carries the session credentials.
///
/// Failures are `Transport`, `AuthRejected` (non-2xx or empty body) or
/// `Parse` (body does not match the response model).
#[async_trait::async_trait]
pub trait TikTokApi: Send + Sync {
    /// Fetch a page of the For You feed.
    async fn get_trending(&self, params: &TikTokParams)
    -> Result<TrendingResponse, DomainError>;

    /// Like a video.
    async fn digg_video(
        &self,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<DiggResponse, DomainError>;

    /// Load the comment section of a video. `params.count` is the page size.
    async fn list_comments(
        &self,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<CommentListResponse, DomainError>;

    async fn digg_comment(
        &self,
        comment_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<CommentDiggResponse, DomainError>;

    async fn publish_comment(
        &self,
        text: &str,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<CommentPublishResponse, DomainError>;

    async fn search(
        &self,
        keyword: &str,
        params: &TikTokParams,
    ) -> Result<SearchResponse, DomainError>;

    async fn follow_user(
        &self,
        user_id: &str,
        params: &TikTokParams,
    ) -> Result<FollowResponse, DomainError>;

    async fn get_video_details(
        &self,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<VideoDetailsResponse, DomainError>;
}

/// Bot session log store. Each save replaces the previous snapshot.
#[async_trait::async_trait]
pub trait ActivityLogPort: Send + Sync {
    async fn save(&self, log: &BotActivityLog) -> Result<(), DomainError>;
}

/// Append-only archive of raw feed payloads (one JSON document per record).
#[async_trait::async_trait]
pub trait FeedArchivePort: Send + Sync {
    /// Append one record to the archive file at `location`, creating it and
    /// its parent directories when missing.
    async fn append(&self, location: &Path, record: &Value) -> Result<(), DomainError>;

    /// All records at `location`, in append order.
    async fn read_all(&self, location: &Path) -> Result<Vec<Value>, DomainError>;
}

/// Structured decision provider (LLM agent or scripted stand-in).
#[async_trait::async_trait]
pub trait DecisionPort: Send + Sync {
    /// Answer `prompt` with a JSON document matching `schema`.
    async fn decide(&self, prompt: &str, schema: &Value) -> Result<Value, DomainError>;
}
