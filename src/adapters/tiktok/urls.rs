//! Endpoint table and the browser headers sent with every call.

use crate::ports::HttpMethod;

pub const BASE_URL: &str = "https://www.tiktok.com";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Trending,
    DiggVideo,
    ListComments,
    DiggComment,
    PublishComment,
    Search,
    FollowUser,
    VideoDetails,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Trending => "/api/recommend/item_list/",
            Self::DiggVideo => "/api/commit/item/digg/",
            Self::ListComments => "/api/comment/list/",
            Self::DiggComment => "/api/comment/digg/",
            Self::PublishComment => "/api/comment/publish/",
            Self::Search => "/api/search/general/full/",
            Self::FollowUser => "/api/commit/follow/user/",
            Self::VideoDetails => "/api/item/detail/",
        }
    }

    /// Mutations are POSTs with every argument in the query string.
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::DiggVideo | Self::DiggComment | Self::PublishComment | Self::FollowUser => {
                HttpMethod::Post
            }
            Self::Trending | Self::ListComments | Self::Search | Self::VideoDetails => {
                HttpMethod::Get
            }
        }
    }

    /// Short name used in logs and activity records.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Trending => "get_trending",
            Self::DiggVideo => "digg_video",
            Self::ListComments => "list_comments",
            Self::DiggComment => "digg_comment",
            Self::PublishComment => "publish_comment",
            Self::Search => "search",
            Self::FollowUser => "follow_user",
            Self::VideoDetails => "get_video_details",
        }
    }
}

/// Headers a desktop Chrome sends on same-site XHRs to the API.
pub fn standard_headers(user_agent: &str, csrf_token: &str) -> Vec<(String, String)> {
    [
        ("user-agent", user_agent),
        ("content-type", "application/x-www-form-urlencoded"),
        ("accept", "*/*"),
        ("origin", BASE_URL),
        ("sec-ch-ua", "\"Not A(Brand\";v=\"8\", \"Chromium\";v=\"132\""),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "macOS"),
        ("sec-fetch-site", "same-site"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-dest", "empty"),
        ("referer", "https://www.tiktok.com/"),
        ("accept-language", "en-US,en;q=0.9"),
        ("tt-csrf-token", csrf_token),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_are_posts() {
        assert_eq!(Endpoint::DiggVideo.method(), HttpMethod::Post);
        assert_eq!(Endpoint::FollowUser.method(), HttpMethod::Post);
        assert_eq!(Endpoint::Trending.method(), HttpMethod::Get);
        assert_eq!(Endpoint::VideoDetails.path(), "/api/item/detail/");
    }

    #[test]
    fn test_headers_carry_csrf_token() {
        let headers = standard_headers("UA", "csrf-123");
        assert!(headers.contains(&("tt-csrf-token".to_string(), "csrf-123".to_string())));
        assert!(headers.contains(&("user-agent".to_string(), "UA".to_string())));
    }
}
