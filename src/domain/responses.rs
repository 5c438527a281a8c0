//! Endpoint response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::domain::{Presence, TikTokVideo, User};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extra {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub fatal_item_ids: Presence<Vec<String>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub logid: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub now: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub api_debug_info: Presence<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPb {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub impr_id: Presence<String>,
}

/// `/api/recommend/item_list/`. Both `statusCode` and `status_code` are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingResponse {
    #[serde(rename = "itemList", alias = "item_list")]
    pub item_list: Vec<TikTokVideo>,
    pub extra: Extra,
    #[serde(rename = "hasMore", alias = "has_more")]
    pub has_more: bool,
    #[serde(rename = "statusCode")]
    pub status_code_camel: i64,
    pub status_code: i64,
    pub status_msg: String,
    pub log_pb: LogPb,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiggResponse {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub extra: Presence<Extra>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub is_digg: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_code: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_msg: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub log_pb: Presence<LogPb>,
}

impl DiggResponse {
    /// Status code 0 means the like was accepted.
    pub fn is_success(&self) -> bool {
        self.status_code.value().copied().unwrap_or(0) == 0
    }
}

/// `/api/commit/follow/user/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowResponse {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub follow_status: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub watch_status: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub extra: Presence<Extra>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_code: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_msg: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub log_pb: Presence<LogPb>,
}

impl FollowResponse {
    pub fn is_following(&self) -> bool {
        self.follow_status.value() == Some(&1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(rename = "itemStruct", alias = "item_struct")]
    pub item_struct: TikTokVideo,
}

/// `/api/item/detail/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetailsResponse {
    #[serde(rename = "itemInfo", alias = "item_info")]
    pub item_info: VideoInfo,
    pub extra: Extra,
    #[serde(rename = "statusCode")]
    pub status_code_camel: i64,
    pub status_code: i64,
    pub status_msg: String,
    pub log_pb: LogPb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchUser {
    pub user_info: User,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub position: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub uniqid_position: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub effects: Presence<Value>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub musics: Presence<Value>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub items: Presence<Value>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub mix_list: Presence<Value>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub challenges: Presence<Value>,
}

/// One search hit: a video (`item`) or a block of users (`user_list`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub result_type: i64,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub item: Presence<TikTokVideo>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub user_list: Presence<Vec<SearchUser>>,
    pub common: Map<String, Value>,
}

/// `/api/search/general/full/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub qc: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub cursor: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub has_more: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub ad_info: Presence<Map<String, Value>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub extra: Presence<Extra>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub log_pb: Presence<LogPb>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_code: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub global_doodle_config: Presence<Map<String, Value>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub backtrace: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub data: Presence<Vec<SearchResult>>,
}

impl SearchResponse {
    pub fn videos(&self) -> impl Iterator<Item = &TikTokVideo> {
        self.data
            .value()
            .into_iter()
            .flatten()
            .filter_map(|r| r.item.value())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acl {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub code: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub extra: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareInfo {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub acl: Presence<Acl>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub desc: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub title: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub url: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortExtraScore {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub reply_score: Presence<Number>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub show_more_score: Presence<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarThumb {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub uri: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub url_list: Presence<Vec<String>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub url_prefix: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentUser {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub nickname: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub sec_uid: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub uid: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub unique_id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub avatar_thumb: Presence<AvatarThumb>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub accept_private_policy: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub account_region: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub aweme_count: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub comment_setting: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub create_time: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub custom_verify: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub follower_count: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub following_count: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub is_block: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub is_discipline_member: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub language: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub region: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub signature: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub unique_id_modify_time: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub user_mode: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub verification_type: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub verify_info: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub author_pin: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub aweme_id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub cid: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub collect_stat: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub comment_language: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub comment_post_item_ids: Presence<Vec<Value>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub create_time: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub digg_count: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub forbid_reply_with_video: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub image_list: Presence<Vec<Value>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub is_author_digged: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub is_comment_translatable: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub label_list: Presence<Vec<Value>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub no_show: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub reply_comment: Presence<Vec<Value>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub reply_comment_total: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub reply_id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub reply_to_reply_id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub share_info: Presence<ShareInfo>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub sort_extra_score: Presence<SortExtraScore>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub sort_tags: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub stick_position: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub text: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub text_extra: Presence<Vec<Value>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub trans_btn_style: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub user: Presence<CommentUser>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub user_buried: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub user_digged: Presence<i64>,
}

/// `/api/comment/list/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentListResponse {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub alias_comment_deleted: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub comments: Presence<Vec<Comment>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub cursor: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub extra: Presence<Extra>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub has_filtered_comments: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub has_more: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub log_pb: Presence<LogPb>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub reply_style: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_code: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_msg: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub top_gifts: Presence<Value>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub total: Presence<i64>,
}

impl CommentListResponse {
    pub fn comments(&self) -> &[Comment] {
        self.comments.value().map(Vec::as_slice).unwrap_or_default()
    }
}

/// `/api/comment/digg/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentDiggResponse {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub extra: Presence<Extra>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_code: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub status_msg: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub log_pb: Presence<LogPb>,
}

/// `/api/comment/publish/`. The created comment comes back in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPublishResponse {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub extra: Presence<Extra>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub status_code: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub status_msg: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub log_pb: Presence<LogPb>,
    pub comment: Comment,
    pub label_info: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TRENDING: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/trending_response.json"
    ));
    const COMMENTS: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/comment_list_response.json"
    ));
    const SEARCH: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/search_response.json"
    ));

    fn assert_round_trip<T>(raw: &str)
    where
        T: serde::de::DeserializeOwned + Serialize,
    {
        let original: Value = serde_json::from_str(raw).unwrap();
        let parsed: T = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), original);
    }

    #[test]
    fn test_trending_fixture_round_trip() {
        assert_round_trip::<TrendingResponse>(TRENDING);
        let parsed: TrendingResponse = serde_json::from_str(TRENDING).unwrap();
        assert_eq!(parsed.item_list.len(), 2);
        assert!(parsed.has_more);
        assert_eq!(parsed.item_list[0].summary().stats.unwrap().likes, Some(48211));
        assert_eq!(parsed.item_list[1].summary().stats.unwrap().plays, Some(90210));
    }

    #[test]
    fn test_comment_fixture_round_trip() {
        assert_round_trip::<CommentListResponse>(COMMENTS);
        let parsed: CommentListResponse = serde_json::from_str(COMMENTS).unwrap();
        assert_eq!(parsed.comments().len(), 2);
        assert_eq!(parsed.extra.value().unwrap().fatal_item_ids, Presence::Null);
    }

    #[test]
    fn test_search_fixture_round_trip() {
        assert_round_trip::<SearchResponse>(SEARCH);
        let parsed: SearchResponse = serde_json::from_str(SEARCH).unwrap();
        assert_eq!(parsed.videos().count(), 1);
    }

    #[test]
    fn test_trending_requires_item_list() {
        let raw = json!({
            "extra": {}, "hasMore": false, "statusCode": 0,
            "status_code": 0, "status_msg": "", "log_pb": {}
        });
        assert!(serde_json::from_value::<TrendingResponse>(raw).is_err());
    }

    #[test]
    fn test_follow_status() {
        let follow: FollowResponse =
            serde_json::from_value(json!({ "follow_status": 1, "status_code": 0 })).unwrap();
        assert!(follow.is_following());
        let pending: FollowResponse =
            serde_json::from_value(json!({ "follow_status": 4 })).unwrap();
        assert!(!pending.is_following());
    }

    #[test]
    fn test_digg_status() {
        let ok: DiggResponse =
            serde_json::from_value(json!({ "is_digg": 0, "status_code": 0 })).unwrap();
        assert!(ok.is_success());
        let raw = json!({ "status_code": 8, "status_msg": "login required" });
        let rejected: DiggResponse = serde_json::from_value(raw).unwrap();
        assert!(!rejected.is_success());
    }

    #[test]
    fn test_publish_response_requires_comment() {
        let raw = json!({ "status_code": 0, "label_info": "" });
        assert!(serde_json::from_value::<CommentPublishResponse>(raw).is_err());

        let raw = json!({
            "status_code": 0,
            "label_info": "",
            "comment": { "cid": "1", "text": "hi" }
        });
        let parsed: CommentPublishResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.comment.text, Presence::Value("hi".into()));
    }
}
