//! Implements InputPort. Inquire-based main menu for the bot and the collector.
//!
//! Ctrl-C during a run asks the running loop to stop at its next checkpoint;
//! the menu comes back once the loop has wound down.

use crate::adapters::persistence::ActivityJson;
use crate::domain::{BotActivityLog, DomainError, TikTokParams};
use crate::ports::{DecisionPort, FeedArchivePort, InputPort, TikTokApi};
use crate::shared::config::{BotConfig, CollectorConfig};
use crate::usecases::{TikTokBot, TrendingCollector};
use async_trait::async_trait;
use chrono::Utc;
use inquire::error::InquireError;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Bot,
    Collector,
    Exit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Bot => "Engagement bot",
            MenuItem::Collector => "Trending collector",
            MenuItem::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Neon theme for every inquire prompt in the process.
pub fn apply_theme() {
    let mut config = RenderConfig::default_colored();
    config.prompt_prefix = Styled::new("?").with_fg(Color::LightMagenta);
    config.highlighted_option_prefix = Styled::new(">").with_fg(Color::LightCyan);
    config.answer = StyleSheet::new()
        .with_attr(Attributes::BOLD)
        .with_fg(Color::LightCyan);
    config.help_message = StyleSheet::new().with_fg(Color::DarkGrey);
    inquire::set_global_render_config(config);
}

fn prompt_error(e: InquireError) -> DomainError {
    DomainError::Prompt(e.to_string())
}

/// Masked single-line input, for session cookies.
pub fn prompt_secret(label: &str) -> Result<String, DomainError> {
    Password::new(label)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .map_err(prompt_error)
}

pub fn prompt_text(label: &str, default: Option<&str>) -> Result<String, DomainError> {
    let mut text = Text::new(label);
    if let Some(d) = default {
        text = text.with_default(d);
    }
    text.prompt().map_err(prompt_error)
}

/// Empty input means "until stopped".
fn parse_cycles(input: &str) -> Result<Option<u32>, DomainError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<u32>() {
        Ok(0) | Err(_) => Err(DomainError::Prompt(format!(
            "expected a positive number of cycles, got {input:?}"
        ))),
        Ok(n) => Ok(Some(n)),
    }
}

fn session_summary(log: &BotActivityLog) -> String {
    format!(
        "{} cycles, {} videos, {} diggs, {} follows, {} comment loads",
        log.cycles.len(),
        log.total_videos,
        log.total_diggs,
        log.total_follows,
        log.total_loads
    )
}

/// Runs `on_stop` on the first Ctrl-C. Abort the returned task once the run ends.
fn stop_on_ctrl_c<F>(on_stop: F) -> tokio::task::JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, stopping after the current step");
            on_stop();
        }
    })
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    api: Arc<dyn TikTokApi>,
    archive: Arc<dyn FeedArchivePort>,
    decider: Option<Arc<dyn DecisionPort>>,
    bot_config: BotConfig,
    collector_config: CollectorConfig,
    data_dir: PathBuf,
}

impl TuiInputPort {
    pub fn new(
        api: Arc<dyn TikTokApi>,
        archive: Arc<dyn FeedArchivePort>,
        decider: Option<Arc<dyn DecisionPort>>,
        bot_config: BotConfig,
        collector_config: CollectorConfig,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api,
            archive,
            decider,
            bot_config,
            collector_config,
            data_dir: data_dir.into(),
        }
    }

    async fn run_bot(&self) -> Result<(), DomainError> {
        let store = ActivityJson::for_session(self.data_dir.join("activity"), Utc::now());
        info!(path = %store.path().display(), "activity log");
        let mut bot = TikTokBot::new(
            Arc::clone(&self.api),
            Arc::new(store),
            self.decider.clone(),
            self.bot_config.clone(),
        )?;
        let handle = bot.handle();
        let watcher = stop_on_ctrl_c(move || handle.stop());
        let log = bot.run().await;
        watcher.abort();
        println!("Session {} finished: {}", log.session_id, session_summary(log));
        Ok(())
    }

    async fn run_collector(&self) -> Result<(), DomainError> {
        let default_cycles = self
            .collector_config
            .cycles
            .map(|n| n.to_string())
            .unwrap_or_default();
        let answer = prompt_text(
            "Cycles to collect (empty = until Ctrl-C):",
            Some(&default_cycles),
        )?;
        let options = CollectorConfig {
            cycles: parse_cycles(&answer)?,
            ..self.collector_config.clone()
        };

        let collector = TrendingCollector::new(
            Arc::clone(&self.api),
            Arc::clone(&self.archive),
            TikTokParams::default_web(),
            self.data_dir.join("trending"),
        );
        let handle = collector.handle();
        let watcher = stop_on_ctrl_c(move || handle.stop());
        let result = collector.run(&options).await;
        watcher.abort();
        let output_dir = result?;
        println!(
            "Collector {:?}, output in {}",
            collector.state(),
            output_dir.display()
        );
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let items = vec![MenuItem::Bot, MenuItem::Collector, MenuItem::Exit];
        loop {
            let choice = match Select::new("Main menu", items.clone()).prompt() {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(());
                }
                Err(e) => return Err(prompt_error(e)),
            };
            let outcome = match choice {
                MenuItem::Bot => self.run_bot().await,
                MenuItem::Collector => self.run_collector().await,
                MenuItem::Exit => return Ok(()),
            };
            if let Err(e) = outcome {
                warn!(error = %e, "run ended with an error");
                println!("Error: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CycleStats;
    use serde_json::json;

    #[test]
    fn test_parse_cycles() {
        assert_eq!(parse_cycles("").unwrap(), None);
        assert_eq!(parse_cycles(" 12 ").unwrap(), Some(12));
        assert!(matches!(parse_cycles("0"), Err(DomainError::Prompt(_))));
        assert!(matches!(parse_cycles("ten"), Err(DomainError::Prompt(_))));
    }

    #[test]
    fn test_session_summary() {
        let mut log = BotActivityLog::new(json!({}));
        log.cycles.push(CycleStats::new(1));
        log.total_videos = 4;
        log.total_diggs = 1;
        log.total_loads = 4;
        assert_eq!(
            session_summary(&log),
            "1 cycles, 4 videos, 1 diggs, 0 follows, 4 comment loads"
        );
    }

    #[tokio::test]
    async fn test_stop_watcher_aborts_cleanly() {
        let watcher = stop_on_ctrl_c(|| {});
        watcher.abort();
        assert!(watcher.await.unwrap_err().is_cancelled());
    }
}
