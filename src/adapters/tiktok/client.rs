//! Implements TikTokApi over an HttpTransport.
//!
//! Every call: serialize params, upsert the current msToken, sign the encoded
//! query string, send, validate status and body, pick up a rotated msToken
//! from `Set-Cookie`, parse the body into the endpoint's model.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::adapters::tiktok::bogus::XBogusSigner;
use crate::adapters::tiktok::urls::{Endpoint, standard_headers};
use crate::domain::{
    AwemeId, CommentDiggParams, CommentDiggResponse, CommentListResponse, CommentParams,
    CommentPublishParams, CommentPublishResponse, DiggParams, DiggResponse, DomainError,
    FollowParams, FollowResponse, SearchParams, SearchResponse, TikTokParams, TrendingResponse,
    VideoDetailsParams, VideoDetailsResponse, to_query_pairs,
};
use crate::ports::{HttpRequest, HttpTransport, TikTokApi};

const MS_TOKEN: &str = "msToken";
const X_BOGUS: &str = "X-Bogus";

/// Session credentials. `ms_token` rotates: the server hands out a fresh one
/// on most responses and the next request must use it.
#[derive(Clone)]
pub struct AuthContext {
    pub ms_token: String,
    pub session_id: String,
    pub csrf_token: String,
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("ms_token", &"***")
            .field("session_id", &"***")
            .field("csrf_token", &"***")
            .finish()
    }
}

impl AuthContext {
    fn cookies(&self) -> Vec<(String, String)> {
        vec![
            ("tt_csrf_token".to_string(), self.csrf_token.clone()),
            (MS_TOKEN.to_string(), self.ms_token.clone()),
            ("sessionid".to_string(), self.session_id.clone()),
        ]
    }
}

/// Signed TikTok web API client.
///
/// The auth context is locked for the whole call, so at most one request is
/// in flight per client and token rotation never races.
pub struct TikTokClient {
    transport: Arc<dyn HttpTransport>,
    signer: XBogusSigner,
    user_agent: String,
    auth: Mutex<AuthContext>,
}

impl TikTokClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth: AuthContext,
        user_agent: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            transport,
            signer: XBogusSigner::new(user_agent)?,
            user_agent: user_agent.to_string(),
            auth: Mutex::new(auth),
        })
    }

    /// Token the next request will carry.
    pub async fn current_ms_token(&self) -> String {
        self.auth.lock().await.ms_token.clone()
    }

    async fn execute<P, T>(&self, endpoint: Endpoint, params: &P) -> Result<T, DomainError>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let result = self.send_signed(endpoint, params).await;
        match &result {
            Ok(_) => debug!(endpoint = endpoint.name(), "API call succeeded"),
            Err(e) => warn!(endpoint = endpoint.name(), error = %e, "API call failed"),
        }
        result
    }

    async fn send_signed<P, T>(&self, endpoint: Endpoint, params: &P) -> Result<T, DomainError>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut query = to_query_pairs(params)?;
        query.retain(|(k, _)| k != X_BOGUS);

        let mut auth = self.auth.lock().await;
        upsert(&mut query, MS_TOKEN, &auth.ms_token);

        let signature = self.signer.sign_now(&encode_query(&query), b"")?;
        query.push((X_BOGUS.to_string(), signature));

        let request = HttpRequest {
            method: endpoint.method(),
            path: endpoint.path().to_string(),
            query,
            headers: standard_headers(&self.user_agent, &auth.csrf_token),
            cookies: auth.cookies(),
        };
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(DomainError::AuthRejected {
                status: response.status,
                detail: response.body.chars().take(200).collect(),
            });
        }
        if response.body.trim().is_empty() {
            return Err(DomainError::AuthRejected {
                status: response.status,
                detail: "empty response body".to_string(),
            });
        }

        if let Some(token) = response.cookie(MS_TOKEN) {
            if !token.is_empty() && token != auth.ms_token {
                auth.ms_token = token.to_string();
                debug!(endpoint = endpoint.name(), "msToken rotated");
            }
        }
        drop(auth);

        serde_json::from_str(&response.body).map_err(|e| {
            DomainError::Parse(format!("{} response: {}", endpoint.name(), e))
        })
    }
}

/// `application/x-www-form-urlencoded` encoding, identical to what the
/// transport puts on the wire.
pub fn encode_query(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn upsert(pairs: &mut Vec<(String, String)>, name: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k == name) {
        Some(pair) => pair.1 = value.to_string(),
        None => pairs.push((name.to_string(), value.to_string())),
    }
}

#[async_trait]
impl TikTokApi for TikTokClient {
    async fn get_trending(&self, params: &TikTokParams) -> Result<TrendingResponse, DomainError> {
        info!(
            count = params.count,
            history_len = params.history_len,
            vv_count_fyp = ?params.vv_count_fyp.value(),
            "[API Call] get_trending"
        );
        self.execute(Endpoint::Trending, params).await
    }

    async fn digg_video(
        &self,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<DiggResponse, DomainError> {
        info!(video_id = %video_id, "[API Call] digg_video");
        let params = DiggParams::with_video_id(video_id, params, true);
        self.execute(Endpoint::DiggVideo, &params).await
    }

    async fn list_comments(
        &self,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<CommentListResponse, DomainError> {
        info!(video_id = %video_id, count = params.count, "[API Call] list_comments");
        let params = CommentParams::with_video_id(video_id, params);
        self.execute(Endpoint::ListComments, &params).await
    }

    async fn digg_comment(
        &self,
        comment_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<CommentDiggResponse, DomainError> {
        info!(comment_id = %comment_id, "[API Call] digg_comment");
        let params = CommentDiggParams::with_comment_id(comment_id, params, true);
        self.execute(Endpoint::DiggComment, &params).await
    }

    async fn publish_comment(
        &self,
        text: &str,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<CommentPublishResponse, DomainError> {
        info!(video_id = %video_id, len = text.chars().count(), "[API Call] publish_comment");
        let params = CommentPublishParams::with_video_id(text, video_id, params);
        self.execute(Endpoint::PublishComment, &params).await
    }

    async fn search(
        &self,
        keyword: &str,
        params: &TikTokParams,
    ) -> Result<SearchResponse, DomainError> {
        info!(keyword, "[API Call] search");
        let params = SearchParams::with_keyword(keyword, params);
        self.execute(Endpoint::Search, &params).await
    }

    async fn follow_user(
        &self,
        user_id: &str,
        params: &TikTokParams,
    ) -> Result<FollowResponse, DomainError> {
        info!(user_id, "[API Call] follow_user");
        let params = FollowParams::with_user_id(user_id, params, true);
        self.execute(Endpoint::FollowUser, &params).await
    }

    async fn get_video_details(
        &self,
        video_id: &AwemeId,
        params: &TikTokParams,
    ) -> Result<VideoDetailsResponse, DomainError> {
        info!(video_id = %video_id, "[API Call] get_video_details");
        let params = VideoDetailsParams::with_video_id(video_id, params);
        self.execute(Endpoint::VideoDetails, &params).await
    }
}
