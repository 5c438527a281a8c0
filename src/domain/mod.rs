//! Core domain layer. No external I/O dependencies.
//!
//! Request parameters, response models and activity records live here.
//! Dependencies flow inward.

pub mod activity;
pub mod decision;
pub mod errors;
pub mod ids;
pub mod params;
pub mod presence;
pub mod responses;
pub mod video;

pub use activity::{ApiCallRecord, BotActivityLog, CycleStats, VideoActionLog};
pub use decision::{
    EndOfCycleAction, EndOfCycleDecision, VideoAction, VideoActionDecision, VideoDecision,
};
pub use errors::DomainError;
pub use ids::AwemeId;
pub use params::{
    CommentDiggParams, CommentParams, CommentPublishParams, DiggParams, FollowParams,
    SearchParams, TikTokParams, VideoDetailsParams, to_query_pairs,
};
pub use presence::Presence;
pub use responses::{
    Comment, CommentDiggResponse, CommentListResponse, CommentPublishResponse, DiggResponse,
    Extra, FollowResponse, LogPb, SearchResponse, SearchResult, SearchUser, TrendingResponse,
    VideoDetailsResponse, VideoInfo,
};
pub use video::{Author, Count, TikTokVideo, User, Video, VideoSummary};
