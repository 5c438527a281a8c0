//! Mock decider for running the agent loop without API calls.

use std::collections::VecDeque;
use std::time::Duration;

use serde_json::{Map, Value, json};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::DomainError;
use crate::ports::DecisionPort;

/// Returns scripted answers first, then canned ones.
///
/// The canned video decision loads the comments of every video listed in the
/// prompt (one JSON object with an `id` per line); the canned end-of-cycle
/// decision is `continue`.
pub struct MockDecider {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    script: Mutex<VecDeque<Result<Value, DomainError>>>,
}

impl MockDecider {
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            script: Mutex::new(VecDeque::new()),
        }
    }

    pub fn scripted(answers: Vec<Result<Value, DomainError>>) -> Self {
        Self {
            delay_ms: 0,
            script: Mutex::new(answers.into()),
        }
    }

    fn canned(prompt: &str, schema: &Value) -> Value {
        let wants_actions = schema
            .get("properties")
            .and_then(|p| p.get("actions"))
            .is_some();
        if !wants_actions {
            return json!({ "action": "continue", "search_keyword": null });
        }

        let mut actions = Map::new();
        for line in prompt.lines() {
            let Ok(Value::Object(video)) = serde_json::from_str::<Value>(line.trim()) else {
                continue;
            };
            if let Some(Value::String(id)) = video.get("id") {
                actions.insert(
                    id.clone(),
                    json!({ "action": "load", "reason": "[MOCK] read the comments" }),
                );
            }
        }
        json!({ "actions": actions })
    }
}

impl Default for MockDecider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DecisionPort for MockDecider {
    async fn decide(&self, prompt: &str, schema: &Value) -> Result<Value, DomainError> {
        info!(prompt_len = prompt.len(), "[MOCK] Simulating decision");
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if let Some(answer) = self.script.lock().await.pop_front() {
            return answer;
        }
        Ok(Self::canned(prompt, schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EndOfCycleAction, EndOfCycleDecision, VideoAction, VideoDecision};

    #[tokio::test]
    async fn test_canned_video_decision_covers_listed_ids() {
        let decider = MockDecider::with_delay(0);
        let prompt = "Videos:\n{\"id\": \"111\", \"description\": \"a\"}\n{\"id\": \"222\"}\nPick.";
        let value = decider.decide(prompt, &VideoDecision::schema()).await.unwrap();
        let decision: VideoDecision = serde_json::from_value(value).unwrap();
        assert_eq!(decision.actions.len(), 2);
        assert_eq!(decision.actions["111"].action, VideoAction::Load);
    }

    #[tokio::test]
    async fn test_script_runs_before_canned() {
        let decider = MockDecider::scripted(vec![
            Ok(json!({ "action": "quit" })),
            Err(DomainError::Decision("down".into())),
        ]);
        let schema = EndOfCycleDecision::schema();

        let first: EndOfCycleDecision =
            serde_json::from_value(decider.decide("", &schema).await.unwrap()).unwrap();
        assert_eq!(first.action, EndOfCycleAction::Quit);
        assert!(decider.decide("", &schema).await.is_err());
        let canned: EndOfCycleDecision =
            serde_json::from_value(decider.decide("", &schema).await.unwrap()).unwrap();
        assert_eq!(canned.action, EndOfCycleAction::Continue);
    }
}
