//! Actions the bot can take and the structured decisions that pick them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Per-video action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoAction {
    Noop,
    Digg,
    Follow,
    /// Open the comment section.
    Load,
    /// Anything the decider returned that this build does not know.
    #[serde(other)]
    Unknown,
}

impl VideoAction {
    pub const KNOWN: [Self; 4] = [Self::Noop, Self::Digg, Self::Follow, Self::Load];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Digg => "digg",
            Self::Follow => "follow",
            Self::Load => "load",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfCycleAction {
    Continue,
    Search,
    Quit,
    #[serde(other)]
    Unknown,
}

impl EndOfCycleAction {
    pub const KNOWN: [Self; 3] = [Self::Continue, Self::Search, Self::Quit];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Search => "search",
            Self::Quit => "quit",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoActionDecision {
    pub action: VideoAction,
    #[serde(default)]
    pub reason: String,
}

/// Decision for a batch: video id to chosen action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoDecision {
    pub actions: BTreeMap<String, VideoActionDecision>,
}

impl VideoDecision {
    /// JSON schema handed to the decider alongside the prompt.
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "actions": {
                    "type": "object",
                    "additionalProperties": {
                        "type": "object",
                        "properties": {
                            "action": {
                                "type": "string",
                                "enum": ["noop", "digg", "follow", "load"]
                            },
                            "reason": { "type": "string" }
                        },
                        "required": ["action", "reason"]
                    }
                }
            },
            "required": ["actions"]
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndOfCycleDecision {
    pub action: EndOfCycleAction,
    #[serde(default)]
    pub search_keyword: Option<String>,
}

impl EndOfCycleDecision {
    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": { "type": "string", "enum": ["continue", "search", "quit"] },
                "search_keyword": { "type": ["string", "null"] }
            },
            "required": ["action"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_action_parses() {
        let decision: VideoDecision = serde_json::from_value(json!({
            "actions": {
                "1": { "action": "digg", "reason": "cute" },
                "2": { "action": "share", "reason": "new verb" }
            }
        }))
        .unwrap();
        assert_eq!(decision.actions["1"].action, VideoAction::Digg);
        assert_eq!(decision.actions["2"].action, VideoAction::Unknown);
    }

    #[test]
    fn test_missing_actions_is_an_error() {
        assert!(serde_json::from_value::<VideoDecision>(json!({ "foo": 1 })).is_err());
    }

    #[test]
    fn test_end_of_cycle_parse() {
        let raw = json!({ "action": "search", "search_keyword": "cats" });
        let decision: EndOfCycleDecision = serde_json::from_value(raw).unwrap();
        assert_eq!(decision.action, EndOfCycleAction::Search);
        assert_eq!(decision.search_keyword.as_deref(), Some("cats"));

        let quit: EndOfCycleDecision = serde_json::from_value(json!({ "action": "quit" })).unwrap();
        assert_eq!(quit.action, EndOfCycleAction::Quit);
    }

    #[test]
    fn test_action_names() {
        let names: Vec<&str> = VideoAction::KNOWN.iter().map(|a| a.as_str()).collect();
        assert_eq!(names, vec!["noop", "digg", "follow", "load"]);
        assert_eq!(serde_json::to_value(VideoAction::Load).unwrap(), json!("load"));
    }
}
