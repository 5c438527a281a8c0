//! Session activity recording for the bot.
//!
//! Owns the `BotActivityLog` and persists a full snapshot through
//! `ActivityLogPort` after every mutation.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::error;

use crate::domain::{
    ApiCallRecord, BotActivityLog, CycleStats, DomainError, VideoAction, VideoActionLog,
};
use crate::ports::ActivityLogPort;

pub struct ActivityRecorder {
    log: BotActivityLog,
    store: Arc<dyn ActivityLogPort>,
}

impl ActivityRecorder {
    pub fn new(config: Value, store: Arc<dyn ActivityLogPort>) -> Self {
        Self {
            log: BotActivityLog::new(config),
            store,
        }
    }

    pub fn log(&self) -> &BotActivityLog {
        &self.log
    }

    pub fn into_log(self) -> BotActivityLog {
        self.log
    }

    /// Open cycle, if any.
    pub fn cycle_mut(&mut self) -> Option<&mut CycleStats> {
        self.log.current_cycle_mut()
    }

    pub async fn start_cycle(&mut self, cycle_id: u32) {
        self.log.cycles.push(CycleStats::new(cycle_id));
        self.save().await;
    }

    /// Close the open cycle, roll its counters into the totals and save.
    pub async fn finish_cycle(&mut self) -> Option<CycleStats> {
        let finished = self.log.finish_cycle().cloned();
        self.save().await;
        finished
    }

    /// Append an API call outcome to the open cycle. Ignored outside a cycle.
    pub async fn record_api_call(
        &mut self,
        endpoint: &str,
        id: String,
        outcome: Result<Value, &DomainError>,
    ) -> Option<ApiCallRecord> {
        let cycle = self.log.current_cycle_mut()?;
        let (success, response_data, error) = match outcome {
            Ok(data) => (true, Some(data), None),
            Err(e) => (false, None, Some(e.to_string())),
        };
        let record = ApiCallRecord {
            id,
            endpoint: endpoint.to_string(),
            timestamp: Utc::now(),
            success,
            response_data,
            error,
        };
        cycle.api_responses.push(record.clone());
        self.save().await;
        Some(record)
    }

    pub async fn record_action(
        &mut self,
        video_id: &str,
        action_type: VideoAction,
        success: bool,
        details: Option<String>,
    ) {
        let Some(cycle) = self.log.current_cycle_mut() else {
            return;
        };
        cycle.actions.push(VideoActionLog {
            video_id: video_id.to_string(),
            action_type,
            timestamp: Utc::now(),
            success,
            details,
        });
        self.save().await;
    }

    /// A failed save is logged and the run goes on; the next save rewrites
    /// the whole log anyway.
    pub async fn save(&self) {
        if let Err(e) = self.store.save(&self.log).await {
            error!(session_id = %self.log.session_id, error = %e, "Failed to save activity log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryActivityLog;
    use serde_json::json;

    #[tokio::test]
    async fn test_every_mutation_is_saved() {
        let store = MemoryActivityLog::new();
        let mut recorder = ActivityRecorder::new(json!({}), store.clone());

        // Outside a cycle nothing is recorded.
        let err = DomainError::Transport("down".into());
        assert!(recorder.record_api_call("digg_video", "digg_1".into(), Err(&err)).await.is_none());
        assert_eq!(store.saves(), 0);

        recorder.start_cycle(1).await;
        let record = recorder
            .record_api_call("digg_video", "digg_1".into(), Err(&err))
            .await
            .unwrap();
        assert!(!record.success);
        assert_eq!(record.error.as_deref(), Some("Transport error: down"));
        recorder.record_action("1", VideoAction::Digg, false, None).await;
        recorder.cycle_mut().unwrap().videos_processed += 1;
        let finished = recorder.finish_cycle().await.unwrap();

        assert_eq!(finished.api_responses.len(), 1);
        assert_eq!(store.saves(), 4);
        let saved = store.last().unwrap();
        assert_eq!(saved.total_videos, 1);
        assert!(saved.cycles[0].end_time.is_some());
    }
}
