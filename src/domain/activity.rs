//! Session activity records written by the bot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::VideoAction;

/// One API call as the bot saw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCallRecord {
    /// Call id, e.g. `digg_7458012345678901234` or `trending_batch_3`.
    pub id: String,
    pub endpoint: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub response_data: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoActionLog {
    pub video_id: String,
    pub action_type: VideoAction,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    pub cycle_id: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub videos_processed: u32,
    pub diggs_made: u32,
    pub follows_made: u32,
    pub loads_made: u32,
    pub videos_collected: Vec<String>,
    pub actions: Vec<VideoActionLog>,
    pub api_responses: Vec<ApiCallRecord>,
}

impl CycleStats {
    pub fn new(cycle_id: u32) -> Self {
        Self {
            cycle_id,
            start_time: Utc::now(),
            end_time: None,
            videos_processed: 0,
            diggs_made: 0,
            follows_made: 0,
            loads_made: 0,
            videos_collected: Vec::new(),
            actions: Vec::new(),
            api_responses: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Whole-session log. Rewritten in full after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotActivityLog {
    pub session_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub cycles: Vec<CycleStats>,
    pub total_videos: u32,
    pub total_follows: u32,
    pub total_diggs: u32,
    pub total_loads: u32,
    pub config: Value,
}

impl BotActivityLog {
    pub fn new(config: Value) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            start_time: Utc::now(),
            cycles: Vec::new(),
            total_videos: 0,
            total_follows: 0,
            total_diggs: 0,
            total_loads: 0,
            config,
        }
    }

    pub fn current_cycle_mut(&mut self) -> Option<&mut CycleStats> {
        self.cycles.last_mut().filter(|c| c.is_open())
    }

    /// Close the open cycle and add its counters to the session totals.
    pub fn finish_cycle(&mut self) -> Option<&CycleStats> {
        let cycle = self.cycles.last_mut().filter(|c| c.is_open())?;
        cycle.end_time = Some(Utc::now());
        self.total_videos += cycle.videos_processed;
        self.total_diggs += cycle.diggs_made;
        self.total_follows += cycle.follows_made;
        self.total_loads += cycle.loads_made;
        self.cycles.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finish_cycle_rolls_totals() {
        let mut log = BotActivityLog::new(json!({ "max_cycles": 2 }));
        log.cycles.push(CycleStats::new(1));
        {
            let cycle = log.current_cycle_mut().unwrap();
            cycle.videos_processed = 3;
            cycle.diggs_made = 1;
            cycle.loads_made = 3;
        }
        let finished = log.finish_cycle().unwrap();
        assert!(finished.end_time.is_some());
        assert_eq!(
            (log.total_videos, log.total_diggs, log.total_loads, log.total_follows),
            (3, 1, 3, 0)
        );

        // Closed cycles are not counted twice.
        assert!(log.finish_cycle().is_none());
        assert!(log.current_cycle_mut().is_none());
        assert_eq!(log.total_videos, 3);
    }

    #[test]
    fn test_log_serializes_action_names() {
        let mut cycle = CycleStats::new(1);
        cycle.actions.push(VideoActionLog {
            video_id: "1".into(),
            action_type: VideoAction::Digg,
            timestamp: Utc::now(),
            success: true,
            details: None,
        });
        let value = serde_json::to_value(&cycle).unwrap();
        assert_eq!(value["actions"][0]["action_type"], "digg");
        assert!(value["end_time"].is_null());
    }
}
