//! Engagement bot use case: cycles of trending fetch, per-video actions and
//! throttling sleeps.
//!
//! Without a decider the bot follows a probabilistic policy: one random draw
//! per batch, digg when it falls under the like probability, follow the
//! author when it also falls under the follow probability, and always load
//! the comment section. With a decider, each batch is handed to the agent and
//! its per-video actions are executed; at the end of a cycle the agent can
//! continue, search a keyword or quit.
//!
//! Every remote call is recorded in the session activity log; a failed call
//! is a failed record, never a reason to stop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{
    AwemeId, BotActivityLog, DomainError, EndOfCycleAction, EndOfCycleDecision, Presence,
    TikTokParams, TikTokVideo, VideoAction, VideoDecision,
};
use crate::ports::{ActivityLogPort, DecisionPort, TikTokApi};
use crate::shared::config::BotConfig;
use crate::usecases::activity::ActivityRecorder;
use crate::usecases::prompts;

/// Cooperative stop flag, polled between batches and cycles.
#[derive(Debug, Clone, Default)]
pub struct BotHandle {
    stop: Arc<AtomicBool>,
}

impl BotHandle {
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

pub struct TikTokBot {
    api: Arc<dyn TikTokApi>,
    decider: Option<Arc<dyn DecisionPort>>,
    config: BotConfig,
    recorder: ActivityRecorder,
    handle: BotHandle,
    /// Feed items requested so far; drives the trending pagination fields.
    videos_requested: u32,
}

impl TikTokBot {
    pub fn new(
        api: Arc<dyn TikTokApi>,
        activity_store: Arc<dyn ActivityLogPort>,
        decider: Option<Arc<dyn DecisionPort>>,
        config: BotConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;
        let config_value = serde_json::to_value(&config)
            .map_err(|e| DomainError::Config(format!("serialize bot config: {e}")))?;
        info!(
            max_cycles = config.max_cycles,
            like_probability = config.like_probability,
            follow_probability = config.follow_probability,
            agent = decider.is_some(),
            "Initialized TikTokBot"
        );
        Ok(Self {
            api,
            decider,
            config,
            recorder: ActivityRecorder::new(config_value, activity_store),
            handle: BotHandle::default(),
            videos_requested: 0,
        })
    }

    pub fn handle(&self) -> BotHandle {
        self.handle.clone()
    }

    pub fn activity(&self) -> &BotActivityLog {
        self.recorder.log()
    }

    /// Run cycles until `max_cycles`, an agent `quit`, or a stop request.
    pub async fn run(&mut self) -> &BotActivityLog {
        let mut cycle: u32 = 0;
        while !self.handle.is_stopped() {
            cycle += 1;
            info!(cycle, "[Cycle] Starting cycle");
            self.recorder.start_cycle(cycle).await;

            let videos = self.fetch_trending().await;
            if videos.is_empty() {
                warn!(cycle, "[Trending] No trending videos retrieved");
            } else {
                info!(count = videos.len(), "[Trending] Retrieved trending videos");
                if let Some(stats) = self.recorder.cycle_mut() {
                    stats.videos_collected = videos.iter().map(|v| v.id.clone()).collect();
                }
                self.process_batches(cycle, &videos).await;
            }

            // Asked before the cycle closes so a follow-up search lands in it.
            let quit = self.decider.is_some()
                && !self.handle.is_stopped()
                && self.end_of_cycle(cycle).await;

            if let Some(stats) = self.recorder.finish_cycle().await {
                info!(
                    cycle,
                    videos = stats.videos_processed,
                    follows = stats.follows_made,
                    diggs = stats.diggs_made,
                    loads = stats.loads_made,
                    "[Cycle] Complete"
                );
            }

            if quit {
                info!(cycle, "[Cycle] Quitting bot operation");
                break;
            }
            if cycle >= self.config.max_cycles {
                info!(cycle, "[Cycle] Maximum cycles reached");
                break;
            }
        }
        self.recorder.save().await;
        self.recorder.log()
    }

    async fn process_batches(&mut self, cycle: u32, videos: &[TikTokVideo]) {
        let batches = videos.len().div_ceil(self.config.process_batch);
        for (idx, batch) in videos.chunks(self.config.process_batch).enumerate() {
            if self.handle.is_stopped() {
                break;
            }
            info!(batch = idx + 1, of = batches, size = batch.len(), "[Batch] Processing batch");

            let handled = match self.decider.clone() {
                Some(decider) => self.agent_batch(decider.as_ref(), cycle, idx + 1, batch).await,
                None => {
                    self.probabilistic_batch(batch).await;
                    true
                }
            };
            if handled {
                if let Some(stats) = self.recorder.cycle_mut() {
                    stats.videos_processed += batch.len() as u32;
                }
            }
            self.sleep().await;
        }
    }

    async fn probabilistic_batch(&mut self, batch: &[TikTokVideo]) {
        let Some(video) = batch.first() else {
            return;
        };
        let draw: f64 = rand::thread_rng().gen_range(0.0..1.0);

        if draw < self.config.like_probability {
            self.digg(&video.id).await;
        }
        if draw < self.config.follow_probability {
            self.follow_author(video).await;
        }
        self.load_comments(&video.id).await;
    }

    /// Returns false when the batch was skipped for want of a usable decision.
    async fn agent_batch(
        &mut self,
        decider: &dyn DecisionPort,
        cycle: u32,
        batch_no: usize,
        batch: &[TikTokVideo],
    ) -> bool {
        let call_id = format!("decision_{cycle}_{batch_no}");
        let decision = decider
            .decide(
                &prompts::video_prompt(batch, &self.config),
                &VideoDecision::schema(),
            )
            .await
            .and_then(|v| {
                serde_json::from_value::<VideoDecision>(v)
                    .map_err(|e| DomainError::Decision(format!("malformed video decision: {e}")))
            });

        let decision = match decision {
            Ok(d) => {
                self.recorder
                    .record_api_call("decide", call_id, Ok(to_json(&d)))
                    .await;
                d
            }
            Err(e) => {
                warn!(batch = batch_no, error = %e, "[Decision] No decision made for batch");
                self.recorder.record_api_call("decide", call_id, Err(&e)).await;
                return false;
            }
        };

        for (video_id, choice) in &decision.actions {
            let Some(video) = batch.iter().find(|v| &v.id == video_id) else {
                warn!(video_id = %video_id, "[Decision] Video not in batch, skipping");
                continue;
            };
            info!(
                video_id = %video_id,
                action = choice.action.as_str(),
                reason = %choice.reason,
                "[Decision] Video action"
            );
            match choice.action {
                VideoAction::Noop => {
                    let details = Some(choice.reason.clone());
                    self.recorder
                        .record_action(video_id, VideoAction::Noop, true, details)
                        .await;
                }
                VideoAction::Digg => self.digg(video_id).await,
                VideoAction::Follow => self.follow_author(video).await,
                VideoAction::Load => self.load_comments(video_id).await,
                VideoAction::Unknown => {
                    warn!(video_id = %video_id, "[Decision] Unknown action, skipping");
                }
            }
        }
        true
    }

    /// Ask the agent what to do after a cycle. True means quit.
    async fn end_of_cycle(&mut self, cycle: u32) -> bool {
        let Some(decider) = self.decider.clone() else {
            return false;
        };
        let decision = decider
            .decide(&prompts::cycle_prompt(cycle), &EndOfCycleDecision::schema())
            .await
            .and_then(|v| {
                serde_json::from_value::<EndOfCycleDecision>(v)
                    .map_err(|e| DomainError::Decision(format!("malformed cycle decision: {e}")))
            });

        match decision {
            Ok(d) => match d.action {
                EndOfCycleAction::Continue => {
                    info!(cycle, "[Cycle] Continuing to next cycle");
                    false
                }
                EndOfCycleAction::Quit => true,
                EndOfCycleAction::Search => {
                    match d.search_keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
                        Some(keyword) => self.search(keyword).await,
                        None => warn!(cycle, "[Cycle] Search requested without a keyword"),
                    }
                    false
                }
                EndOfCycleAction::Unknown => {
                    warn!(cycle, "[Cycle] Unknown end-of-cycle action, continuing");
                    false
                }
            },
            Err(e) => {
                warn!(cycle, error = %e, "[Decision] No end-of-cycle decision, continuing");
                false
            }
        }
    }

    async fn fetch_trending(&mut self) -> Vec<TikTokVideo> {
        let mut params = TikTokParams::default_web();
        params.count = self.config.fetch_batch;
        let seen = self.videos_requested;
        params.history_len = rand::thread_rng().gen_range(seen / 2..=seen);
        params.vv_count_fyp = Presence::Value(seen);
        self.videos_requested += params.count;

        let call_id = format!("trending_batch_{}", self.videos_requested);
        match self.api.get_trending(&params).await {
            Ok(page) => {
                self.recorder
                    .record_api_call("get_trending", call_id, Ok(to_json(&page)))
                    .await;
                page.item_list
            }
            Err(e) => {
                warn!(error = %e, "[Error - Trending] Error fetching trending videos");
                self.recorder.record_api_call("get_trending", call_id, Err(&e)).await;
                Vec::new()
            }
        }
    }

    async fn digg(&mut self, video_id: &str) {
        let id = AwemeId::from(video_id);
        let call_id = format!("digg_{video_id}");
        let params = TikTokParams::default_web();
        let (success, details) = match self.api.digg_video(&id, &params).await {
            Ok(resp) => {
                let accepted = resp.is_success();
                self.recorder
                    .record_api_call("digg_video", call_id, Ok(to_json(&resp)))
                    .await;
                (accepted, (!accepted).then(|| "digg not accepted".to_string()))
            }
            Err(e) => {
                warn!(video_id, error = %e, "[Error - Digg] Error digging video");
                self.recorder.record_api_call("digg_video", call_id, Err(&e)).await;
                (false, Some(e.to_string()))
            }
        };
        if success {
            info!(video_id, "[Action] Digged video");
            if let Some(stats) = self.recorder.cycle_mut() {
                stats.diggs_made += 1;
            }
        }
        self.recorder
            .record_action(video_id, VideoAction::Digg, success, details)
            .await;
    }

    async fn follow_author(&mut self, video: &TikTokVideo) {
        let Some(user_id) = video.author_id().map(str::to_string) else {
            warn!(video_id = %video.id, "[Follow] Video has no author id, skipping");
            return;
        };
        let call_id = format!("follow_{user_id}");
        let (success, details) = match self
            .api
            .follow_user(&user_id, &TikTokParams::default_web())
            .await
        {
            Ok(resp) => {
                let following = resp.is_following();
                self.recorder
                    .record_api_call("follow_user", call_id, Ok(to_json(&resp)))
                    .await;
                (following, Some(format!("author {user_id}")))
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "[Error - Follow] Error following user");
                self.recorder.record_api_call("follow_user", call_id, Err(&e)).await;
                (false, Some(e.to_string()))
            }
        };
        if success {
            info!(user_id = %user_id, "[Action] Followed author");
            if let Some(stats) = self.recorder.cycle_mut() {
                stats.follows_made += 1;
            }
        }
        self.recorder
            .record_action(&video.id, VideoAction::Follow, success, details)
            .await;
    }

    async fn load_comments(&mut self, video_id: &str) {
        let id = AwemeId::from(video_id);
        let mut params = TikTokParams::default_web();
        params.count = self.config.comments_read;
        let call_id = format!("list_comments_{video_id}");
        let (success, details) = match self.api.list_comments(&id, &params).await {
            Ok(resp) => {
                let loaded = resp.comments().len();
                self.recorder
                    .record_api_call("list_comments", call_id, Ok(to_json(&resp)))
                    .await;
                (true, Some(format!("{loaded} comments")))
            }
            Err(e) => {
                warn!(video_id, error = %e, "[Error - Load] Error loading comments");
                self.recorder.record_api_call("list_comments", call_id, Err(&e)).await;
                (false, Some(e.to_string()))
            }
        };
        if success {
            info!(video_id, "[Action] Loaded comments");
            if let Some(stats) = self.recorder.cycle_mut() {
                stats.loads_made += 1;
            }
        }
        self.recorder
            .record_action(video_id, VideoAction::Load, success, details)
            .await;
    }

    async fn search(&mut self, keyword: &str) {
        info!(keyword, "[Cycle] Searching for specific content");
        let call_id = format!("search_{keyword}");
        match self.api.search(keyword, &TikTokParams::default_web()).await {
            Ok(resp) => {
                info!(keyword, videos = resp.videos().count(), "[Search] Results received");
                self.recorder
                    .record_api_call("search", call_id, Ok(to_json(&resp)))
                    .await;
            }
            Err(e) => {
                warn!(keyword, error = %e, "[Error - Search] Search failed");
                self.recorder.record_api_call("search", call_id, Err(&e)).await;
            }
        }
    }

    async fn sleep(&self) {
        let secs = rand::thread_rng()
            .gen_range(self.config.sleep_min_secs..=self.config.sleep_max_secs);
        if secs > 0 {
            info!(secs, "[Sleep] Sleeping");
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
