//! Video item models shared by the trending, search and details endpoints.
//!
//! Every field carries its wire name explicitly. The web API mixes camelCase,
//! PascalCase and snake_case inside one payload, so the mapping lives on each
//! field instead of a container-wide rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::domain::Presence;

/// Engagement counter. The v1 stats block sends integers, `statsV2` sends
/// decimal strings; both are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Int(i64),
    Text(String),
}

impl Count {
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(
        rename = "avatarLarger",
        alias = "avatar_larger",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub avatar_larger: Presence<String>,
    #[serde(
        rename = "avatarMedium",
        alias = "avatar_medium",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub avatar_medium: Presence<String>,
    #[serde(
        rename = "avatarThumb",
        alias = "avatar_thumb",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub avatar_thumb: Presence<String>,
    #[serde(
        rename = "commentSetting",
        alias = "comment_setting",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub comment_setting: Presence<i64>,
    #[serde(
        rename = "downloadSetting",
        alias = "download_setting",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub download_setting: Presence<i64>,
    #[serde(
        rename = "duetSetting",
        alias = "duet_setting",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub duet_setting: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub ftc: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(
        rename = "isADVirtual",
        alias = "is_ad_virtual",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub is_ad_virtual: Presence<bool>,
    #[serde(
        rename = "isEmbedBanned",
        alias = "is_embed_banned",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub is_embed_banned: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub nickname: Presence<String>,
    #[serde(
        rename = "openFavorite",
        alias = "open_favorite",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub open_favorite: Presence<bool>,
    #[serde(
        rename = "privateAccount",
        alias = "private_account",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub private_account: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub relation: Presence<i64>,
    #[serde(rename = "secUid", alias = "sec_uid", skip_serializing_if = "Presence::is_absent")]
    pub sec_uid: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub secret: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub signature: Presence<String>,
    #[serde(
        rename = "stitchSetting",
        alias = "stitch_setting",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub stitch_setting: Presence<i64>,
    #[serde(rename = "uniqueId", alias = "unique_id", skip_serializing_if = "Presence::is_absent")]
    pub unique_id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub verified: Presence<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoStats {
    #[serde(
        rename = "collectCount",
        alias = "collect_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub collect_count: Presence<Count>,
    #[serde(
        rename = "commentCount",
        alias = "comment_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub comment_count: Presence<Count>,
    #[serde(
        rename = "diggCount",
        alias = "digg_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub digg_count: Presence<Count>,
    #[serde(
        rename = "playCount",
        alias = "play_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub play_count: Presence<Count>,
    #[serde(
        rename = "shareCount",
        alias = "share_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub share_count: Presence<Count>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoStatsV2 {
    #[serde(
        rename = "collectCount",
        alias = "collect_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub collect_count: Presence<Count>,
    #[serde(
        rename = "commentCount",
        alias = "comment_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub comment_count: Presence<Count>,
    #[serde(
        rename = "diggCount",
        alias = "digg_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub digg_count: Presence<Count>,
    #[serde(
        rename = "playCount",
        alias = "play_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub play_count: Presence<Count>,
    #[serde(
        rename = "repostCount",
        alias = "repost_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub repost_count: Presence<Count>,
    #[serde(
        rename = "shareCount",
        alias = "share_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub share_count: Presence<Count>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayAddress {
    #[serde(rename = "DataSize", alias = "data_size", skip_serializing_if = "Presence::is_absent")]
    pub data_size: Presence<i64>,
    #[serde(rename = "FileCs", alias = "file_cs", skip_serializing_if = "Presence::is_absent")]
    pub file_cs: Presence<String>,
    #[serde(rename = "FileHash", alias = "file_hash", skip_serializing_if = "Presence::is_absent")]
    pub file_hash: Presence<String>,
    #[serde(rename = "Height", alias = "height", skip_serializing_if = "Presence::is_absent")]
    pub height: Presence<i64>,
    #[serde(rename = "Uri", alias = "uri", skip_serializing_if = "Presence::is_absent")]
    pub uri: Presence<String>,
    #[serde(rename = "UrlKey", alias = "url_key", skip_serializing_if = "Presence::is_absent")]
    pub url_key: Presence<String>,
    #[serde(rename = "UrlList", alias = "url_list", skip_serializing_if = "Presence::is_absent")]
    pub url_list: Presence<Vec<String>>,
    #[serde(rename = "Width", alias = "width", skip_serializing_if = "Presence::is_absent")]
    pub width: Presence<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitrateInfo {
    #[serde(rename = "Bitrate", alias = "bitrate", skip_serializing_if = "Presence::is_absent")]
    pub bitrate: Presence<i64>,
    #[serde(
        rename = "CodecType",
        alias = "codec_type",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub codec_type: Presence<String>,
    #[serde(rename = "GearName", alias = "gear_name", skip_serializing_if = "Presence::is_absent")]
    pub gear_name: Presence<String>,
    #[serde(rename = "PlayAddr", alias = "play_addr", skip_serializing_if = "Presence::is_absent")]
    pub play_addr: Presence<PlayAddress>,
    #[serde(
        rename = "QualityType",
        alias = "quality_type",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub quality_type: Presence<i64>,
    #[serde(rename = "MVMAF", alias = "mvmaf", skip_serializing_if = "Presence::is_absent")]
    pub mvmaf: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginalLanguageInfo {
    #[serde(
        rename = "canTranslateRealTimeNoCheck",
        alias = "can_translate_real_time_no_check",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub can_translate_real_time_no_check: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub language: Presence<String>,
    #[serde(
        rename = "languageCode",
        alias = "language_code",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub language_code: Presence<String>,
    #[serde(
        rename = "languageID",
        alias = "language_id",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub language_id: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleInfo {
    #[serde(rename = "Format", alias = "format", skip_serializing_if = "Presence::is_absent")]
    pub format: Presence<String>,
    #[serde(
        rename = "LanguageCodeName",
        alias = "language_code_name",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub language_code_name: Presence<String>,
    #[serde(
        rename = "LanguageID",
        alias = "language_id",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub language_id: Presence<String>,
    #[serde(rename = "Size", alias = "size", skip_serializing_if = "Presence::is_absent")]
    pub size: Presence<i64>,
    #[serde(rename = "Source", alias = "source", skip_serializing_if = "Presence::is_absent")]
    pub source: Presence<String>,
    #[serde(rename = "Url", alias = "url", skip_serializing_if = "Presence::is_absent")]
    pub url: Presence<String>,
    #[serde(
        rename = "UrlExpire",
        alias = "url_expire",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub url_expire: Presence<i64>,
    #[serde(rename = "Version", alias = "version", skip_serializing_if = "Presence::is_absent")]
    pub version: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionInfo {
    #[serde(
        rename = "captionFormat",
        alias = "caption_format",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub caption_format: Presence<String>,
    #[serde(
        rename = "claSubtitleID",
        alias = "cla_subtitle_id",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cla_subtitle_id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub expire: Presence<String>,
    #[serde(
        rename = "isAutoGen",
        alias = "is_auto_gen",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub is_auto_gen: Presence<bool>,
    #[serde(
        rename = "isOriginalCaption",
        alias = "is_original_caption",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub is_original_caption: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub language: Presence<String>,
    #[serde(
        rename = "languageID",
        alias = "language_id",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub language_id: Presence<String>,
    #[serde(rename = "subID", alias = "sub_id", skip_serializing_if = "Presence::is_absent")]
    pub sub_id: Presence<String>,
    #[serde(
        rename = "languageCode",
        alias = "language_code",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub language_code: Presence<String>,
    #[serde(
        rename = "subtitleType",
        alias = "subtitle_type",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub subtitle_type: Presence<String>,
    #[serde(
        rename = "translationType",
        alias = "translation_type",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub translation_type: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub url: Presence<String>,
    #[serde(rename = "urlList", alias = "url_list", skip_serializing_if = "Presence::is_absent")]
    pub url_list: Presence<Vec<String>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub variant: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaInfo {
    #[serde(
        rename = "captionInfos",
        alias = "caption_infos",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub caption_infos: Presence<Vec<CaptionInfo>>,
    #[serde(
        rename = "captionsType",
        alias = "captions_type",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub captions_type: Presence<i64>,
    #[serde(
        rename = "enableAutoCaption",
        alias = "enable_auto_caption",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub enable_auto_caption: Presence<bool>,
    #[serde(
        rename = "originalLanguageInfo",
        alias = "original_language_info",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub original_language_info: Presence<OriginalLanguageInfo>,
    #[serde(
        rename = "hasOriginalAudio",
        alias = "has_original_audio",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub has_original_audio: Presence<bool>,
    #[serde(
        rename = "noCaptionReason",
        alias = "no_caption_reason",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub no_caption_reason: Presence<i64>,
}

/// Loudness metrics arrive as integers or floats; `Number` keeps whichever.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeInfo {
    #[serde(rename = "Loudness", alias = "loudness", skip_serializing_if = "Presence::is_absent")]
    pub loudness: Presence<Number>,
    #[serde(rename = "Peak", alias = "peak", skip_serializing_if = "Presence::is_absent")]
    pub peak: Presence<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    #[serde(rename = "VQScore", alias = "vq_score", skip_serializing_if = "Presence::is_absent")]
    pub vq_score: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub bitrate: Presence<i64>,
    #[serde(
        rename = "bitrateInfo",
        alias = "bitrate_info",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub bitrate_info: Presence<Vec<BitrateInfo>>,
    #[serde(rename = "claInfo", alias = "cla_info", skip_serializing_if = "Presence::is_absent")]
    pub cla_info: Presence<ClaInfo>,
    #[serde(
        rename = "codecType",
        alias = "codec_type",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub codec_type: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub cover: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub definition: Presence<String>,
    #[serde(
        rename = "downloadAddr",
        alias = "download_addr",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub download_addr: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub duration: Presence<i64>,
    #[serde(
        rename = "dynamicCover",
        alias = "dynamic_cover",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub dynamic_cover: Presence<String>,
    #[serde(
        rename = "encodeUserTag",
        alias = "encode_user_tag",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub encode_user_tag: Presence<String>,
    #[serde(
        rename = "encodedType",
        alias = "encoded_type",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub encoded_type: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub format: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub height: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(
        rename = "originCover",
        alias = "origin_cover",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub origin_cover: Presence<String>,
    #[serde(rename = "playAddr", alias = "play_addr", skip_serializing_if = "Presence::is_absent")]
    pub play_addr: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub ratio: Presence<String>,
    #[serde(
        rename = "subtitleInfos",
        alias = "subtitle_infos",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub subtitle_infos: Presence<Vec<SubtitleInfo>>,
    #[serde(
        rename = "videoQuality",
        alias = "video_quality",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub video_quality: Presence<String>,
    #[serde(
        rename = "volumeInfo",
        alias = "volume_info",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub volume_info: Presence<VolumeInfo>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub width: Presence<i64>,
    #[serde(
        rename = "zoomCover",
        alias = "zoom_cover",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub zoom_cover: Presence<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Music {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub album: Presence<String>,
    #[serde(
        rename = "authorName",
        alias = "author_name",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub author_name: Presence<String>,
    #[serde(
        rename = "coverLarge",
        alias = "cover_large",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cover_large: Presence<String>,
    #[serde(
        rename = "coverMedium",
        alias = "cover_medium",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cover_medium: Presence<String>,
    #[serde(
        rename = "coverThumb",
        alias = "cover_thumb",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cover_thumb: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub duration: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(
        rename = "isCopyrighted",
        alias = "is_copyrighted",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub is_copyrighted: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub original: Presence<bool>,
    #[serde(rename = "playUrl", alias = "play_url", skip_serializing_if = "Presence::is_absent")]
    pub play_url: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub title: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorExtra {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub subtype: Presence<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
    #[serde(rename = "urlList", alias = "url_list", skip_serializing_if = "Presence::is_absent")]
    pub url_list: Presence<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    #[serde(rename = "urlList", alias = "url_list", skip_serializing_if = "Presence::is_absent")]
    pub url_list: Presence<Vec<String>>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub height: Presence<i64>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub width: Presence<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Anchor {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub description: Presence<String>,
    #[serde(
        rename = "extraInfo",
        alias = "extra_info",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub extra_info: Presence<AnchorExtra>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub icon: Presence<Icon>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub keyword: Presence<String>,
    #[serde(rename = "logExtra", alias = "log_extra", skip_serializing_if = "Presence::is_absent")]
    pub log_extra: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub schema: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub thumbnail: Presence<Thumbnail>,
    #[serde(rename = "type", skip_serializing_if = "Presence::is_absent")]
    pub anchor_type: Presence<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextExtra {
    #[serde(rename = "awemeId", alias = "aweme_id", skip_serializing_if = "Presence::is_absent")]
    pub aweme_id: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub end: Presence<i64>,
    #[serde(
        rename = "hashtagName",
        alias = "hashtag_name",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub hashtag_name: Presence<String>,
    #[serde(
        rename = "isCommerce",
        alias = "is_commerce",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub is_commerce: Presence<bool>,
    #[serde(rename = "secUid", alias = "sec_uid", skip_serializing_if = "Presence::is_absent")]
    pub sec_uid: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub start: Presence<i64>,
    #[serde(rename = "type", skip_serializing_if = "Presence::is_absent")]
    pub extra_type: Presence<i64>,
    #[serde(rename = "userId", alias = "user_id", skip_serializing_if = "Presence::is_absent")]
    pub user_id: Presence<String>,
    #[serde(
        rename = "userUniqueId",
        alias = "user_unique_id",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub user_unique_id: Presence<String>,
    #[serde(rename = "subType", alias = "sub_type", skip_serializing_if = "Presence::is_absent")]
    pub sub_type: Presence<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub desc: Presence<String>,
    #[serde(
        rename = "textExtra",
        alias = "text_extra",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub text_extra: Presence<Vec<TextExtra>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Challenge {
    #[serde(
        rename = "coverLarger",
        alias = "cover_larger",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cover_larger: Presence<String>,
    #[serde(
        rename = "coverMedium",
        alias = "cover_medium",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cover_medium: Presence<String>,
    #[serde(
        rename = "coverThumb",
        alias = "cover_thumb",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub cover_thumb: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub desc: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(
        rename = "profileLarger",
        alias = "profile_larger",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub profile_larger: Presence<String>,
    #[serde(
        rename = "profileMedium",
        alias = "profile_medium",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub profile_medium: Presence<String>,
    #[serde(
        rename = "profileThumb",
        alias = "profile_thumb",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub profile_thumb: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub title: Presence<String>,
}

/// Sent in snake_case even inside camelCase items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemControl {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub can_repost: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub can_comment: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub can_creator_redirect: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub can_music_redirect: Presence<bool>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub can_share: Presence<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub address: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub category: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub city: Presence<String>,
    #[serde(
        rename = "cityCode",
        alias = "city_code",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub city_code: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub country: Presence<String>,
    #[serde(
        rename = "countryCode",
        alias = "country_code",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub country_code: Presence<String>,
    #[serde(
        rename = "fatherPoiId",
        alias = "father_poi_id",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub father_poi_id: Presence<String>,
    #[serde(
        rename = "fatherPoiName",
        alias = "father_poi_name",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub father_poi_name: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub name: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub province: Presence<String>,
    #[serde(
        rename = "ttTypeCode",
        alias = "tt_type_code",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub tt_type_code: Presence<String>,
    #[serde(
        rename = "ttTypeNameMedium",
        alias = "tt_type_name_medium",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub tt_type_name_medium: Presence<String>,
    #[serde(
        rename = "ttTypeNameSuper",
        alias = "tt_type_name_super",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub tt_type_name_super: Presence<String>,
    #[serde(
        rename = "ttTypeNameTiny",
        alias = "tt_type_name_tiny",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub tt_type_name_tiny: Presence<String>,
    #[serde(rename = "type")]
    pub poi_type: i64,
    #[serde(rename = "typeCode", alias = "type_code")]
    pub type_code: String,
}

/// One feed item. `id`, `author` and `video` are required; everything else
/// may be missing depending on the endpoint and the item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TikTokVideo {
    #[serde(
        rename = "AIGCDescription",
        alias = "aigc_description",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub aigc_description: Presence<String>,
    #[serde(
        rename = "BAInfo",
        alias = "ba_info",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub ba_info: Presence<String>,
    #[serde(
        rename = "CategoryType",
        alias = "category_type",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub category_type: Presence<i64>,
    #[serde(
        rename = "adAuthorization",
        alias = "ad_authorization",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub ad_authorization: Presence<bool>,
    #[serde(
        rename = "adLabelVersion",
        alias = "ad_label_version",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub ad_label_version: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub anchors: Presence<Vec<Anchor>>,
    pub author: Author,
    #[serde(
        rename = "backendSourceEventTracking",
        alias = "backend_source_event_tracking",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub backend_source_event_tracking: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub challenges: Presence<Vec<Challenge>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub collected: Presence<bool>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub contents: Presence<Vec<Content>>,
    #[serde(
        rename = "createTime",
        alias = "create_time",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub create_time: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub desc: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub digged: Presence<bool>,
    #[serde(
        rename = "diversificationId",
        alias = "diversification_id",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub diversification_id: Presence<i64>,
    #[serde(
        rename = "duetDisplay",
        alias = "duet_display",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub duet_display: Presence<i64>,
    #[serde(
        rename = "duetEnabled",
        alias = "duet_enabled",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub duet_enabled: Presence<bool>,
    #[serde(
        rename = "forFriend",
        alias = "for_friend",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub for_friend: Presence<bool>,
    pub id: String,
    #[serde(
        rename = "itemCommentStatus",
        alias = "item_comment_status",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub item_comment_status: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub item_control: Presence<ItemControl>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub music: Presence<Music>,
    #[serde(
        rename = "officalItem",
        alias = "offical_item",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub offical_item: Presence<bool>,
    #[serde(
        rename = "originalItem",
        alias = "original_item",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub original_item: Presence<bool>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub poi: Presence<PointOfInterest>,
    #[serde(
        rename = "privateItem",
        alias = "private_item",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub private_item: Presence<bool>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub secret: Presence<bool>,
    #[serde(
        rename = "shareEnabled",
        alias = "share_enabled",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub share_enabled: Presence<bool>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub stats: Presence<VideoStats>,
    #[serde(
        rename = "statsV2",
        alias = "stats_v2",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub stats_v2: Presence<VideoStatsV2>,
    #[serde(
        rename = "stitchDisplay",
        alias = "stitch_display",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub stitch_display: Presence<i64>,
    #[serde(
        rename = "stitchEnabled",
        alias = "stitch_enabled",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub stitch_enabled: Presence<bool>,
    #[serde(
        rename = "textExtra",
        alias = "text_extra",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub text_extra: Presence<Vec<TextExtra>>,
    #[serde(
        rename = "textLanguage",
        alias = "text_language",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub text_language: Presence<String>,
    #[serde(
        rename = "textTranslatable",
        alias = "text_translatable",
        default,
        skip_serializing_if = "Presence::is_absent"
    )]
    pub text_translatable: Presence<bool>,
    pub video: Video,
}

/// Compact view of a video handed to the decision agent and to logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub id: String,
    pub description: Option<String>,
    pub aigc_description: Option<String>,
    pub author_info: AuthorSummary,
    pub music_title: Option<String>,
    pub duration: Option<i64>,
    pub stats: Option<StatsSummary>,
    pub digged: Option<bool>,
    pub collected: Option<bool>,
    pub share_enabled: Option<bool>,
    pub backend_event: Option<String>,
    pub challenges: Vec<String>,
    pub poi: Option<String>,
    pub text_language: Option<String>,
    pub stitch_enabled: Option<bool>,
    pub hashtags: Vec<String>,
    pub create_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorSummary {
    pub id: Option<String>,
    pub nickname: Option<String>,
    pub unique_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub plays: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
}

fn counter(count: &Presence<Count>) -> Option<i64> {
    count.value().and_then(Count::value)
}

impl TikTokVideo {
    /// Author id, when the item carries one. Needed for follow actions.
    pub fn author_id(&self) -> Option<&str> {
        self.author.id.value().map(String::as_str)
    }

    /// Hashtags from the item and from every content block, first-seen order.
    pub fn hashtags(&self) -> Vec<String> {
        let top_level = self.text_extra.value().into_iter().flatten();
        let from_contents = self
            .contents
            .value()
            .into_iter()
            .flatten()
            .filter_map(|c| c.text_extra.value())
            .flatten();

        let mut tags: Vec<String> = Vec::new();
        for extra in top_level.chain(from_contents) {
            if let Some(tag) = extra.hashtag_name.value() {
                if !tag.is_empty() && !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }

    pub fn summary(&self) -> VideoSummary {
        let stats = self.stats.value().map(|s| StatsSummary {
            plays: counter(&s.play_count),
            likes: counter(&s.digg_count),
            comments: counter(&s.comment_count),
            shares: counter(&s.share_count),
        });

        VideoSummary {
            id: self.id.clone(),
            description: self.desc.value().cloned(),
            aigc_description: self.aigc_description.value().cloned(),
            author_info: AuthorSummary {
                id: self.author.id.value().cloned(),
                nickname: self.author.nickname.value().cloned(),
                unique_id: self.author.unique_id.value().cloned(),
            },
            music_title: self.music.value().and_then(|m| m.title.value().cloned()),
            duration: self.video.duration.value().copied(),
            stats,
            digged: self.digged.value().copied(),
            collected: self.collected.value().copied(),
            share_enabled: self.share_enabled.value().copied(),
            backend_event: self.backend_source_event_tracking.value().cloned(),
            challenges: self
                .challenges
                .value()
                .into_iter()
                .flatten()
                .filter_map(|c| c.title.value().cloned())
                .collect(),
            poi: self.poi.value().and_then(|p| p.name.value().cloned()),
            text_language: self.text_language.value().cloned(),
            stitch_enabled: self.stitch_enabled.value().copied(),
            hashtags: self.hashtags(),
            create_time: self.create_time.value().copied(),
        }
    }
}

/// Search user payload. Most of it is opaque to us and kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub uid: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub nickname: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub signature: Presence<String>,
    #[serde(
        rename = "avatarThumb",
        alias = "avatar_thumb",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub avatar_thumb: Presence<serde_json::Map<String, Value>>,
    #[serde(
        rename = "followStatus",
        alias = "follow_status",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub follow_status: Presence<i64>,
    #[serde(
        rename = "followerCount",
        alias = "follower_count",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub follower_count: Presence<i64>,
    #[serde(
        rename = "customVerify",
        alias = "custom_verify",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub custom_verify: Presence<String>,
    #[serde(rename = "uniqueId", alias = "unique_id", skip_serializing_if = "Presence::is_absent")]
    pub unique_id: Presence<String>,
    #[serde(rename = "roomId", alias = "room_id", skip_serializing_if = "Presence::is_absent")]
    pub room_id: Presence<i64>,
    #[serde(
        rename = "enterpriseVerifyReason",
        alias = "enterprise_verify_reason",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub enterprise_verify_reason: Presence<String>,
    #[serde(
        rename = "followersDetail",
        alias = "followers_detail",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub followers_detail: Presence<Value>,
    #[serde(
        rename = "platformSyncInfo",
        alias = "platform_sync_info",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub platform_sync_info: Presence<Value>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub geofencing: Presence<Value>,
    #[serde(rename = "coverUrl", alias = "cover_url", skip_serializing_if = "Presence::is_absent")]
    pub cover_url: Presence<Value>,
    #[serde(rename = "itemList", alias = "item_list", skip_serializing_if = "Presence::is_absent")]
    pub item_list: Presence<Value>,
    #[serde(
        rename = "typeLabel",
        alias = "type_label",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub type_label: Presence<Value>,
    #[serde(
        rename = "adCoverUrl",
        alias = "ad_cover_url",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub ad_cover_url: Presence<Value>,
    #[serde(
        rename = "relativeUsers",
        alias = "relative_users",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub relative_users: Presence<Value>,
    #[serde(rename = "chaList", alias = "cha_list", skip_serializing_if = "Presence::is_absent")]
    pub cha_list: Presence<Value>,
    #[serde(rename = "secUid", alias = "sec_uid", skip_serializing_if = "Presence::is_absent")]
    pub sec_uid: Presence<String>,
    #[serde(
        rename = "needPoints",
        alias = "need_points",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub need_points: Presence<Value>,
    #[serde(
        rename = "homepageBottomToast",
        alias = "homepage_bottom_toast",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub homepage_bottom_toast: Presence<Value>,
    #[serde(
        rename = "canSetGeofencing",
        alias = "can_set_geofencing",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub can_set_geofencing: Presence<Value>,
    #[serde(
        rename = "whiteCoverUrl",
        alias = "white_cover_url",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub white_cover_url: Presence<Value>,
    #[serde(rename = "userTags", alias = "user_tags", skip_serializing_if = "Presence::is_absent")]
    pub user_tags: Presence<Value>,
    #[serde(
        rename = "boldFields",
        alias = "bold_fields",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub bold_fields: Presence<Value>,
    #[serde(
        rename = "searchHighlight",
        alias = "search_highlight",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub search_highlight: Presence<Value>,
    #[serde(
        rename = "mutualRelationAvatars",
        alias = "mutual_relation_avatars",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub mutual_relation_avatars: Presence<Value>,
    #[serde(
        rename = "roomIdStr",
        alias = "room_id_str",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub room_id_str: Presence<String>,
    #[serde(skip_serializing_if = "Presence::is_absent")]
    pub events: Presence<Value>,
    #[serde(
        rename = "advanceFeatureItemOrder",
        alias = "advance_feature_item_order",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub advance_feature_item_order: Presence<Value>,
    #[serde(
        rename = "advancedFeatureInfo",
        alias = "advanced_feature_info",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub advanced_feature_info: Presence<Value>,
    #[serde(
        rename = "userProfileGuide",
        alias = "user_profile_guide",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub user_profile_guide: Presence<Value>,
    #[serde(
        rename = "shieldEditFieldInfo",
        alias = "shield_edit_field_info",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub shield_edit_field_info: Presence<Value>,
    #[serde(
        rename = "canMessageFollowStatusList",
        alias = "can_message_follow_status_list",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub can_message_follow_status_list: Presence<Value>,
    #[serde(
        rename = "accountLabels",
        alias = "account_labels",
        skip_serializing_if = "Presence::is_absent"
    )]
    pub account_labels: Presence<Value>,
}
