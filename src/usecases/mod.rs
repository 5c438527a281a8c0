//! Application use cases. Orchestrate domain logic via ports.

pub mod activity;
pub mod bot;
pub mod collector;
pub mod prompts;

pub use activity::ActivityRecorder;
pub use bot::{BotHandle, TikTokBot};
pub use collector::{CollectorHandle, CollectorState, TrendingCollector};
