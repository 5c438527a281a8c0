//! Request parameter models.
//!
//! Field order is the order parameters appear on the wire. Wire names are the
//! field names unless a `rename` says otherwise; the snake_case name is always
//! accepted on input. Optional fields that were never assigned are omitted
//! from the query string entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AwemeId, DomainError, Presence};

/// Base query parameters shared by every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TikTokParams {
    // Device & browser
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub device_id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub device_platform: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub device_type: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub browser_name: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub browser_platform: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub browser_version: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub browser_online: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub os: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub screen_height: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub screen_width: Presence<i64>,

    // App & language
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub aid: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub app_name: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub app_language: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub browser_language: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub language: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub webcast_language: Presence<String>,

    // User context & state
    #[serde(
        rename = "WebIdLastTime",
        alias = "web_id_last_time",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub web_id_last_time: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub focus_state: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub is_fullscreen: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub is_page_visible: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub cookie_enabled: Presence<String>,
    /// Browsing history length within the session.
    pub history_len: u32,

    // Feed
    /// Source page, e.g. `fyp`.
    pub from_page: String,
    /// Number of items to return.
    pub count: u32,
    #[serde(
        rename = "pullType",
        alias = "pull_type",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub pull_type: Presence<i64>,
    #[serde(
        rename = "itemID",
        alias = "item_id",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub item_id: Presence<String>,
    #[serde(
        rename = "isNonPersonalized",
        alias = "is_non_personalized",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub is_non_personalized: Presence<String>,
    /// Items already seen on the For You page; acts as the pagination cursor.
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub vv_count_fyp: Presence<u32>,

    // Region
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub region: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub priority_region: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub tz_name: Presence<String>,

    // Tracking & features
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub data_collection_enabled: Presence<String>,
    #[serde(
        rename = "showAboutThisAd",
        alias = "show_about_this_ad",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub show_about_this_ad: Presence<String>,
    #[serde(
        rename = "showAds",
        alias = "show_ads",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub show_ads: Presence<String>,
    #[serde(
        rename = "clientABVersions",
        alias = "client_ab_versions",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub client_ab_versions: Presence<String>,

    // Authentication & security
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub user_is_login: Presence<String>,
    #[serde(
        rename = "odinId",
        alias = "odin_id",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub odin_id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub verify_fp: Presence<String>,
    #[serde(
        rename = "msToken",
        alias = "ms_token",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub ms_token: Presence<String>,
    #[serde(
        rename = "X-Bogus",
        alias = "x_bogus",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub x_bogus: Presence<String>,
    #[serde(
        rename = "_signature",
        alias = "signature",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub signature: Presence<String>,

    // Other
    #[serde(
        rename = "coverFormat",
        alias = "cover_format",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cover_format: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub referer: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub channel: Presence<String>,
    #[serde(
        rename = "watchLiveLastTime",
        alias = "watch_live_last_time",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub watch_live_last_time: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub app_version: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub effect_sdk_version: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub last_install_time: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub is_pad: Presence<String>,
}

fn text(value: &str) -> Presence<String> {
    Presence::Value(value.to_string())
}

impl TikTokParams {
    /// Desktop Chrome on macOS, as the web app sends them.
    pub fn default_web() -> Self {
        Self {
            aid: text("1988"),
            app_language: text("en"),
            app_name: text("tiktok_web"),
            browser_language: text("en-US"),
            browser_name: text("Mozilla"),
            browser_online: text("true"),
            browser_platform: text("MacIntel"),
            browser_version: text(
                "5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
            ),
            channel: text("tiktok_web"),
            cookie_enabled: text("true"),
            count: 10,
            device_id: text("7433893465412503072"),
            device_platform: text("web_pc"),
            focus_state: text("true"),
            from_page: "fyp".to_string(),
            history_len: 100,
            is_fullscreen: text("true"),
            is_page_visible: text("true"),
            language: text("en"),
            os: text("mac"),
            priority_region: text(""),
            referer: text(""),
            region: text("IT"),
            screen_height: Presence::Value(982),
            screen_width: Presence::Value(1512),
            tz_name: text("Europe/Rome"),
            webcast_language: text("en"),
            ..Self::default()
        }
    }

    /// Android app (musical_ly) parameters, from the app's common params.
    pub fn default_android() -> Self {
        Self {
            device_platform: text("android"),
            os: text("android"),
            app_name: text("musical_ly"),
            aid: text("1988"),
            app_language: text("en"),
            browser_language: text("en-US"),
            browser_name: text("com.zhiliaoapp.musically/2023700040 (Android 15)"),
            browser_online: text("true"),
            browser_platform: text("Android"),
            browser_version: text("37.0.4"),
            webcast_language: text("en"),
            priority_region: text(""),
            language: text("en"),
            region: text("US"),
            screen_width: Presence::Value(1440),
            screen_height: Presence::Value(3120),
            channel: text("googleplay"),
            device_type: text("sdk_gphone64_arm64"),
            device_id: text("7464203107687286318"),
            pull_type: Presence::Value(2),
            is_non_personalized: text("0"),
            last_install_time: Presence::Value(1_737_895_300),
            effect_sdk_version: text("17.6.0"),
            app_version: text("2023700040"),
            is_pad: text("0"),
            tz_name: text("Europe/Rome"),
            cookie_enabled: text("true"),
            focus_state: text("true"),
            from_page: "fyp".to_string(),
            history_len: 100,
            is_fullscreen: text("true"),
            is_page_visible: text("true"),
            count: 10,
            ..Self::default()
        }
    }
}

/// Like (`type=1`) or unlike (`type=0`) a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiggParams {
    #[serde(flatten)]
    pub base: TikTokParams,
    pub aweme_id: AwemeId,
    #[serde(rename = "type")]
    pub digg_type: u8,
}

impl DiggParams {
    pub fn with_video_id(video_id: &AwemeId, params: &TikTokParams, should_like: bool) -> Self {
        Self {
            base: params.clone(),
            aweme_id: video_id.clone(),
            digg_type: u8::from(should_like),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentParams {
    #[serde(flatten)]
    pub base: TikTokParams,
    pub aweme_id: AwemeId,
}

impl CommentParams {
    pub fn with_video_id(video_id: &AwemeId, params: &TikTokParams) -> Self {
        Self {
            base: params.clone(),
            aweme_id: video_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDiggParams {
    #[serde(flatten)]
    pub base: TikTokParams,
    pub cid: AwemeId,
    pub digg_type: u8,
}

impl CommentDiggParams {
    pub fn with_comment_id(
        comment_id: &AwemeId,
        params: &TikTokParams,
        should_like: bool,
    ) -> Self {
        Self {
            base: params.clone(),
            cid: comment_id.clone(),
            digg_type: u8::from(should_like),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPublishParams {
    #[serde(flatten)]
    pub base: TikTokParams,
    pub aweme_id: AwemeId,
    pub text: String,
}

impl CommentPublishParams {
    pub fn with_video_id(comment: &str, video_id: &AwemeId, params: &TikTokParams) -> Self {
        Self {
            base: params.clone(),
            aweme_id: video_id.clone(),
            text: comment.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(flatten)]
    pub base: TikTokParams,
    pub keyword: String,
}

impl SearchParams {
    pub fn with_keyword(keyword: &str, params: &TikTokParams) -> Self {
        Self {
            base: params.clone(),
            keyword: keyword.to_string(),
        }
    }
}

/// Follow (`type=1`) or unfollow (`type=0`) a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowParams {
    #[serde(flatten)]
    pub base: TikTokParams,
    pub user_id: String,
    #[serde(rename = "type")]
    pub follow_type: u8,
}

impl FollowParams {
    pub fn with_user_id(user_id: &str, params: &TikTokParams, should_follow: bool) -> Self {
        Self {
            base: params.clone(),
            user_id: user_id.to_string(),
            follow_type: u8::from(should_follow),
        }
    }
}

/// The details endpoint takes `itemId` (lower-case d) instead of `itemID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetailsParams {
    #[serde(flatten)]
    pub base: TikTokParams,
    #[serde(rename = "itemId")]
    pub item_id: AwemeId,
}

impl VideoDetailsParams {
    pub fn with_video_id(video_id: &AwemeId, params: &TikTokParams) -> Self {
        let mut base = params.clone();
        base.item_id = Presence::Absent;
        Self {
            base,
            item_id: video_id.clone(),
        }
    }
}

/// Flatten a parameter model into ordered `(wire name, value)` pairs.
///
/// Strings are taken verbatim, numbers in decimal, booleans as `true`/`false`,
/// `null` as an empty value.
pub fn to_query_pairs<T: Serialize>(params: &T) -> Result<Vec<(String, String)>, DomainError> {
    let value = serde_json::to_value(params)
        .map_err(|e| DomainError::Signing(format!("cannot serialize parameters: {e}")))?;
    let Value::Object(map) = value else {
        return Err(DomainError::Signing(
            "parameters must serialize to an object".into(),
        ));
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            (key, rendered)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(pairs: &[(String, String)]) -> Vec<&str> {
        pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let params = TikTokParams {
            history_len: 5,
            from_page: "fyp".into(),
            count: 3,
            ..TikTokParams::default()
        };
        let pairs = to_query_pairs(&params).unwrap();
        assert_eq!(keys(&pairs), vec!["history_len", "from_page", "count"]);
    }

    #[test]
    fn test_aliases_and_declaration_order() {
        let mut params = TikTokParams::default_android();
        params.ms_token = "tok".to_string().into();
        params.web_id_last_time = Presence::Value(1_700_000_000);
        let pairs = to_query_pairs(&params).unwrap();
        let names = keys(&pairs);

        assert_eq!(names[0], "device_id");
        assert_eq!(names[1], "device_platform");
        assert!(names.contains(&"pullType"));
        assert!(names.contains(&"isNonPersonalized"));
        assert!(names.contains(&"msToken"));
        assert!(!names.contains(&"ms_token"));
        let web_id = names.iter().position(|k| *k == "WebIdLastTime").unwrap();
        let history = names.iter().position(|k| *k == "history_len").unwrap();
        assert!(web_id < history);
    }

    #[test]
    fn test_value_rendering() {
        let mut params = TikTokParams::default_web();
        params.referer = Presence::Null;
        let pairs = to_query_pairs(&params).unwrap();
        let get = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("screen_height"), "982");
        assert_eq!(get("browser_online"), "true");
        assert_eq!(get("referer"), "");
        assert_eq!(get("priority_region"), "");
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let params = TikTokParams::default_web();
        let dumped = serde_json::to_value(&params).unwrap();
        let reparsed: TikTokParams = serde_json::from_value(dumped.clone()).unwrap();
        assert_eq!(reparsed, params);
        assert_eq!(serde_json::to_value(&reparsed).unwrap(), dumped);
    }

    #[test]
    fn test_snake_case_names_accepted_on_input() {
        let parsed: TikTokParams = serde_json::from_value(json!({
            "history_len": 1,
            "from_page": "fyp",
            "count": 2,
            "ms_token": "abc",
            "pullType": 1,
        }))
        .unwrap();
        assert_eq!(parsed.ms_token, Presence::Value("abc".into()));
        assert_eq!(parsed.pull_type, Presence::Value(1));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<TikTokParams, _> =
            serde_json::from_value(json!({ "from_page": "fyp", "count": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_digg_params_append_after_base() {
        let base = TikTokParams::default_web();
        let digg = DiggParams::with_video_id(&AwemeId::from("123"), &base, true);
        let pairs = to_query_pairs(&digg).unwrap();
        let n = pairs.len();
        assert_eq!(pairs[n - 2], ("aweme_id".to_string(), "123".to_string()));
        assert_eq!(pairs[n - 1], ("type".to_string(), "1".to_string()));
        assert_eq!(&pairs[..n - 2], to_query_pairs(&base).unwrap().as_slice());

        let undo = DiggParams::with_video_id(&AwemeId::from("123"), &base, false);
        assert_eq!(undo.digg_type, 0);
    }

    #[test]
    fn test_derivation_keeps_aliased_fields() {
        let mut base = TikTokParams::default_web();
        base.ms_token = "tok".to_string().into();
        base.pull_type = Presence::Value(1);
        let follow = FollowParams::with_user_id("42", &base, true);
        assert_eq!(follow.base, base);

        let value = serde_json::to_value(&follow).unwrap();
        assert_eq!(value["msToken"], "tok");
        assert_eq!(value["pullType"], 1);
        assert_eq!(value["user_id"], "42");
        assert_eq!(value["type"], 1);
    }

    #[test]
    fn test_video_details_replaces_item_id() {
        let mut base = TikTokParams::default_web();
        base.item_id = "old".to_string().into();
        let details = VideoDetailsParams::with_video_id(&AwemeId::from("777"), &base);
        let pairs = to_query_pairs(&details).unwrap();
        assert!(!keys(&pairs).contains(&"itemID"));
        assert_eq!(pairs.last().unwrap(), &("itemId".to_string(), "777".to_string()));
    }

    #[test]
    fn test_comment_variants() {
        let base = TikTokParams::default_web();
        let id = AwemeId::from("9");

        let list = to_query_pairs(&CommentParams::with_video_id(&id, &base)).unwrap();
        assert_eq!(list.last().unwrap().0, "aweme_id");

        let digg = to_query_pairs(&CommentDiggParams::with_comment_id(&id, &base, false)).unwrap();
        let n = digg.len();
        assert_eq!(digg[n - 2], ("cid".to_string(), "9".to_string()));
        assert_eq!(digg[n - 1], ("digg_type".to_string(), "0".to_string()));

        let publish =
            to_query_pairs(&CommentPublishParams::with_video_id("nice", &id, &base)).unwrap();
        assert_eq!(publish.last().unwrap(), &("text".to_string(), "nice".to_string()));

        let search = to_query_pairs(&SearchParams::with_keyword("cats", &base)).unwrap();
        assert_eq!(search.last().unwrap(), &("keyword".to_string(), "cats".to_string()));
    }
}
