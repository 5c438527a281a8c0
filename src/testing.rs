//! Test doubles for the ports.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::domain::{
    AwemeId, BotActivityLog, CommentDiggResponse, CommentListResponse, CommentPublishResponse,
    DiggResponse, DomainError, FollowResponse, Presence, SearchResponse, TikTokParams,
    TrendingResponse, VideoDetailsResponse,
};
use crate::ports::{ActivityLogPort, HttpRequest, HttpResponse, HttpTransport, TikTokApi};

pub(crate) const TRENDING_FIXTURE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/trending_response.json"));

pub(crate) fn http_ok(body: &str) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string(),
        set_cookies: vec![],
    })
}

pub(crate) fn http_ok_with_cookie(
    body: &str,
    name: &str,
    value: &str,
) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string(),
        set_cookies: vec![(name.to_string(), value.to_string())],
    })
}

/// Replays canned responses in order and records every request.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, DomainError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(responses: Vec<Result<HttpResponse, DomainError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DomainError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::Transport("script exhausted".into())))
    }
}

/// Trending page holding one minimal item per id; authors are `author-<id>`.
pub(crate) fn trending_page(ids: &[&str]) -> TrendingResponse {
    let items: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "desc": format!("video {id}"),
                "author": { "id": format!("author-{id}"), "uniqueId": format!("user{id}") },
                "video": { "duration": 12 }
            })
        })
        .collect();
    serde_json::from_value(json!({
        "itemList": items,
        "extra": { "now": 1736710341000u64 },
        "hasMore": true,
        "statusCode": 0,
        "status_code": 0,
        "status_msg": "",
        "log_pb": { "impr_id": "test" }
    }))
    .unwrap()
}

/// One call seen by [`FakeApi`]: endpoint name and its main argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiCall {
    pub endpoint: &'static str,
    pub arg: String,
}

type Hook = Box<dyn Fn() + Send + Sync>;

/// In-memory TikTokApi. Trending pages are served from a queue (a default
/// single-item page once it runs dry); endpoints can be made to fail.
#[derive(Default)]
pub(crate) struct FakeApi {
    pages: Mutex<VecDeque<Result<TrendingResponse, DomainError>>>,
    trending_hook: Mutex<Option<Hook>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<ApiCall>>,
    trending_params: Mutex<Vec<TikTokParams>>,
    comment_counts: Mutex<Vec<u32>>,
}

impl FakeApi {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_pages(pages: Vec<Result<TrendingResponse, DomainError>>) -> Arc<Self> {
        let api = Self::default();
        *api.pages.lock().unwrap() = pages.into();
        Arc::new(api)
    }

    pub(crate) fn fail(&self, endpoint: &'static str) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    /// Runs `hook` inside every trending call, before it resolves.
    pub(crate) fn on_trending(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.trending_hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    pub(crate) fn trending_params(&self) -> Vec<TikTokParams> {
        self.trending_params.lock().unwrap().clone()
    }

    pub(crate) fn comment_counts(&self) -> Vec<u32> {
        self.comment_counts.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str, arg: &str) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push(ApiCall {
            endpoint,
            arg: arg.to_string(),
        });
        if self.failing.lock().unwrap().contains(endpoint) {
            return Err(DomainError::Transport(format!("{endpoint} unavailable")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TikTokApi for FakeApi {
    async fn get_trending(&self, params: &TikTokParams) -> Result<TrendingResponse, DomainError> {
        self.trending_params.lock().unwrap().push(params.clone());
        if let Some(hook) = self.trending_hook.lock().unwrap().as_ref() {
            hook();
        }
        self.record("get_trending", &params.count.to_string())?;
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(trending_page(&["7400000000000000001"])))
    }

    async fn digg_video(
        &self,
        video_id: &AwemeId,
        _params: &TikTokParams,
    ) -> Result<DiggResponse, DomainError> {
        self.record("digg_video", video_id.as_str())?;
        Ok(DiggResponse {
            is_digg: Presence::Value(0),
            status_code: Presence::Value(0),
            ..Default::default()
        })
    }

    async fn list_comments(
        &self,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<CommentListResponse, DomainError> {
        self.comment_counts.lock().unwrap().push(params.count);
        self.record("list_comments", video_id.as_str())?;
        Ok(CommentListResponse {
            status_code: Presence::Value(0),
            ..Default::default()
        })
    }

    async fn digg_comment(
        &self,
        comment_id: &AwemeId,
        _params: &TikTokParams,
    ) -> Result<CommentDiggResponse, DomainError> {
        self.record("digg_comment", comment_id.as_str())?;
        Ok(CommentDiggResponse::default())
    }

    async fn publish_comment(
        &self,
        text: &str,
        _video_id: &AwemeId,
        _params: &TikTokParams,
    ) -> Result<CommentPublishResponse, DomainError> {
        self.record("publish_comment", text)?;
        serde_json::from_value(json!({ "comment": {}, "label_info": "" }))
            .map_err(|e| DomainError::Parse(e.to_string()))
    }

    async fn search(
        &self,
        keyword: &str,
        _params: &TikTokParams,
    ) -> Result<SearchResponse, DomainError> {
        self.record("search", keyword)?;
        Ok(SearchResponse::default())
    }

    async fn follow_user(
        &self,
        user_id: &str,
        _params: &TikTokParams,
    ) -> Result<FollowResponse, DomainError> {
        self.record("follow_user", user_id)?;
        Ok(FollowResponse {
            follow_status: Presence::Value(1),
            ..Default::default()
        })
    }

    async fn get_video_details(
        &self,
        video_id: &AwemeId,
        _params: &TikTokParams,
    ) -> Result<VideoDetailsResponse, DomainError> {
        self.record("get_video_details", video_id.as_str())?;
        Err(DomainError::Parse("no details in fake".into()))
    }
}

/// Keeps every saved snapshot of the activity log.
#[derive(Default)]
pub(crate) struct MemoryActivityLog {
    snapshots: Mutex<Vec<BotActivityLog>>,
}

impl MemoryActivityLog {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn saves(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub(crate) fn last(&self) -> Option<BotActivityLog> {
        self.snapshots.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ActivityLogPort for MemoryActivityLog {
    async fn save(&self, log: &BotActivityLog) -> Result<(), DomainError> {
        self.snapshots.lock().unwrap().push(log.clone());
        Ok(())
    }
}
