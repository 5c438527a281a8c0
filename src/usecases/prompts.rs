//! Prompt text for the decision agent.

use crate::domain::{EndOfCycleAction, TikTokVideo, VideoAction};
use crate::shared::config::BotConfig;

const BASE_PROMPT: &str = "You are a bot tasked with managing a TikTok account.\n\n\
Operating in cycles, you will receive batches of trending videos.\n\
Interact with each video only with the actions DIGG, LOAD and FOLLOW given the \
percentages for each. If none of them apply then NOOP.\n\n\
Each video should have an action.";

/// Action odds the agent is asked to follow. Comments are always loaded.
fn percentages(config: &BotConfig) -> String {
    format!(
        "Percentages: DIGG {:.1}%, FOLLOW {:.1}%, LOAD 100.0%.",
        config.like_probability * 100.0,
        config.follow_probability * 100.0
    )
}

/// System prompt with the action odds, and the persona when one is configured.
pub fn system_prompt(persona: Option<&str>, config: &BotConfig) -> String {
    let base = format!("{BASE_PROMPT}\n{}", percentages(config));
    match persona.map(str::trim).filter(|p| !p.is_empty()) {
        Some(persona) => format!("{base}\n\nThe bot's persona is defined as: {persona}"),
        None => base,
    }
}

/// One JSON line per video summary, then the action list.
pub fn video_prompt(videos: &[TikTokVideo], config: &BotConfig) -> String {
    let details: Vec<String> = videos
        .iter()
        .map(|v| {
            serde_json::to_string(&v.summary())
                .unwrap_or_else(|_| format!("{{\"id\":\"{}\"}}", v.id))
        })
        .collect();
    let actions: Vec<&str> = VideoAction::KNOWN.iter().map(|a| a.as_str()).collect();
    format!(
        "Trending videos:\n{}\n\n\
         Based purely on the given percentages, perform the appropriate actions of \
         DIGG, LOAD, FOLLOW. If none apply, NOOP.\n\
         {}\n\
         Available actions: {}.\n\
         Return one decision per video id.",
        details.join("\n"),
        percentages(config),
        actions.join(", ")
    )
}

pub fn cycle_prompt(cycle: u32) -> String {
    let options: Vec<&str> = EndOfCycleAction::KNOWN.iter().map(|a| a.as_str()).collect();
    format!(
        "Cycle {cycle} complete. Available options: {}. \
         Pick search together with a search_keyword to look for specific content.",
        options.join(", ")
    )
}
