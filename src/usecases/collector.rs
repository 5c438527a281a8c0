//! Trending collector use case: poll the For You feed on an interval and
//! archive every raw page.
//!
//! Output lives under `<root>/<run start>/`: `trending.jsonl` (one page per
//! line, call order) and `errors.jsonl` (one record per failed cycle).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use chrono::Utc;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::domain::{DomainError, Presence, TikTokParams};
use crate::ports::{FeedArchivePort, TikTokApi};
use crate::shared::config::CollectorConfig;

pub const OUTPUT_FILE: &str = "trending.jsonl";
pub const ERRORS_FILE: &str = "errors.jsonl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Running,
    Stopped,
    Error,
}

impl CollectorState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Running,
            2 => Self::Stopped,
            3 => Self::Error,
            _ => Self::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Stopped => 2,
            Self::Error => 3,
        }
    }
}

/// Shared view of a collector's state. Clone it into other tasks to stop the
/// collector; the running cycle always completes first.
#[derive(Debug, Clone, Default)]
pub struct CollectorHandle {
    state: Arc<AtomicU8>,
}

impl CollectorHandle {
    pub fn stop(&self) {
        self.set(CollectorState::Stopped);
    }

    pub fn state(&self) -> CollectorState {
        CollectorState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn set(&self, state: CollectorState) {
        self.state.store(state.as_u8(), Ordering::SeqCst);
    }

    /// Moves `from` to `to`; a no-op when the state has already moved on.
    fn transition(&self, from: CollectorState, to: CollectorState) {
        let _ = self.state.compare_exchange(
            from.as_u8(),
            to.as_u8(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }
}

pub struct TrendingCollector {
    api: Arc<dyn TikTokApi>,
    archive: Arc<dyn FeedArchivePort>,
    params: TikTokParams,
    output_root: PathBuf,
    handle: CollectorHandle,
}

impl TrendingCollector {
    pub fn new(
        api: Arc<dyn TikTokApi>,
        archive: Arc<dyn FeedArchivePort>,
        starting_params: TikTokParams,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api,
            archive,
            params: starting_params,
            output_root: output_root.into(),
            handle: CollectorHandle::default(),
        }
    }

    pub fn handle(&self) -> CollectorHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> CollectorState {
        self.handle.state()
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Run until `options.cycles` is reached, `stop()` is called, or a cycle
    /// fails with `skip_exceptions` off. Returns the run's output directory.
    pub async fn run(&self, options: &CollectorConfig) -> Result<PathBuf, DomainError> {
        options.validate()?;
        info!(
            cycles = ?options.cycles,
            batch_size = options.batch_size,
            interval_secs = options.interval_secs,
            "Starting the collector"
        );

        self.handle.set(CollectorState::Running);
        let output_dir = self
            .output_root
            .join(Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string());
        let mut params = self.params.clone();
        let mut cycle: u32 = 0;
        let mut last_error: Option<String> = None;

        while self.state() == CollectorState::Running && options.cycles.is_none_or(|n| cycle < n)
        {
            self.log_state(cycle, last_error.take());
            cycle += 1;

            params.count = options.batch_size;
            params.vv_count_fyp = Presence::Value((cycle - 1) * options.batch_size);

            if let Err(e) = self.collect_once(&params, &output_dir).await {
                error!(cycle, error = %e, "Error while running the collector");
                self.record_error(&output_dir, cycle, &e).await;
                last_error = Some(e.to_string());

                if !options.skip_exceptions {
                    // A stop requested during the failing cycle wins.
                    self.handle.transition(CollectorState::Running, CollectorState::Error);
                    break;
                }
            }

            if options.cycles.is_none_or(|n| cycle < n) {
                tokio::time::sleep(Duration::from_secs(options.interval_secs)).await;
            }
        }

        self.handle.transition(CollectorState::Running, CollectorState::Stopped);
        self.log_state(cycle, last_error);
        info!(path = %output_dir.display(), cycles = cycle, "Collector finished");
        Ok(output_dir)
    }

    async fn collect_once(
        &self,
        params: &TikTokParams,
        output_dir: &Path,
    ) -> Result<(), DomainError> {
        let response = self.api.get_trending(params).await?;
        let payload = serde_json::to_value(&response)
            .map_err(|e| DomainError::Parse(format!("re-serialize trending page: {e}")))?;
        self.write_to_output(output_dir, &payload).await
    }

    /// Append one payload to `<output_dir>/trending.jsonl`.
    pub async fn write_to_output(
        &self,
        output_dir: &Path,
        payload: &Value,
    ) -> Result<(), DomainError> {
        self.archive.append(&output_dir.join(OUTPUT_FILE), payload).await
    }

    async fn record_error(&self, output_dir: &Path, cycle: u32, err: &DomainError) {
        let record = json!({
            "cycle": cycle,
            "error": err.to_string(),
            "timestamp": Utc::now().to_rfc3339(),
        });
        if let Err(e) = self.archive.append(&output_dir.join(ERRORS_FILE), &record).await {
            warn!(cycle, error = %e, "Failed to record collector error");
        }
    }

    fn log_state(&self, cycle: u32, last_error: Option<String>) {
        info!(
            state = ?self.state(),
            cycle,
            error = last_error.as_deref().unwrap_or("None"),
            "Collector status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::JsonlFeedArchive;
    use crate::testing::{FakeApi, trending_page};

    fn collector(api: Arc<FakeApi>, root: &Path) -> TrendingCollector {
        TrendingCollector::new(
            api,
            Arc::new(JsonlFeedArchive::new()),
            TikTokParams::default_web(),
            root,
        )
    }

    fn options(cycles: u32, skip_exceptions: bool) -> CollectorConfig {
        CollectorConfig {
            batch_size: 2,
            interval_secs: 0,
            cycles: Some(cycles),
            skip_exceptions,
        }
    }

    #[tokio::test]
    async fn test_run_archives_each_page_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeApi::with_pages(vec![
            Ok(trending_page(&["1"])),
            Ok(trending_page(&["2"])),
            Ok(trending_page(&["3"])),
        ]);
        let collector = collector(api.clone(), dir.path());

        let out = collector.run(&options(3, false)).await.unwrap();

        assert_eq!(collector.state(), CollectorState::Stopped);
        let pages = JsonlFeedArchive::new().read_all(&out.join(OUTPUT_FILE)).await.unwrap();
        let ids: Vec<&str> = pages
            .iter()
            .map(|p| p["itemList"][0]["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        // Offset advances by the batch size each cycle.
        let offsets: Vec<_> = api
            .trending_params()
            .iter()
            .map(|p| (p.count, p.vv_count_fyp.value().copied()))
            .collect();
        assert_eq!(offsets, vec![(2, Some(0)), (2, Some(2)), (2, Some(4))]);
    }

    #[tokio::test]
    async fn test_write_to_output_appends() {
        let dir = tempfile::tempdir().unwrap();
        let collector = collector(FakeApi::new(), dir.path());
        let out = dir.path().join("run");

        collector.write_to_output(&out, &json!({ "test": "first" })).await.unwrap();
        collector.write_to_output(&out, &json!({ "test": "second" })).await.unwrap();

        let pages = JsonlFeedArchive::new().read_all(&out.join(OUTPUT_FILE)).await.unwrap();
        assert_eq!(pages, vec![json!({ "test": "first" }), json!({ "test": "second" })]);
    }

    #[tokio::test]
    async fn test_error_stops_run_without_skip() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeApi::new();
        api.fail("get_trending");
        let collector = collector(api.clone(), dir.path());

        let out = collector.run(&options(3, false)).await.unwrap();

        assert_eq!(collector.state(), CollectorState::Error);
        assert_eq!(api.count("get_trending"), 1);
        let errors = JsonlFeedArchive::new().read_all(&out.join(ERRORS_FILE)).await.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["cycle"], 1);
    }

    #[tokio::test]
    async fn test_stop_during_failing_cycle_stays_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeApi::new();
        api.fail("get_trending");
        let collector = collector(api.clone(), dir.path());
        let handle = collector.handle();
        api.on_trending(move || handle.stop());

        collector.run(&options(3, false)).await.unwrap();

        assert_eq!(collector.state(), CollectorState::Stopped);
        assert_eq!(api.count("get_trending"), 1);
    }

    #[tokio::test]
    async fn test_skip_exceptions_keeps_going() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeApi::with_pages(vec![
            Err(DomainError::Transport("timed out".into())),
            Ok(trending_page(&["2"])),
        ]);
        let collector = collector(api.clone(), dir.path());

        let out = collector.run(&options(2, true)).await.unwrap();

        assert_eq!(collector.state(), CollectorState::Stopped);
        assert_eq!(api.count("get_trending"), 2);
        let pages = JsonlFeedArchive::new().read_all(&out.join(OUTPUT_FILE)).await.unwrap();
        assert_eq!(pages.len(), 1);
        let errors = JsonlFeedArchive::new().read_all(&out.join(ERRORS_FILE)).await.unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_stop_ends_unbounded_run_after_current_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeApi::new();
        let collector = Arc::new(collector(api.clone(), dir.path()));
        let handle = collector.handle();

        let runner = {
            let collector = Arc::clone(&collector);
            tokio::spawn(async move {
                collector
                    .run(&CollectorConfig {
                        batch_size: 1,
                        interval_secs: 1,
                        cycles: None,
                        skip_exceptions: false,
                    })
                    .await
            })
        };

        while api.count("get_trending") == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        handle.stop();
        assert_eq!(handle.state(), CollectorState::Stopped);

        runner.await.unwrap().unwrap();
        assert_eq!(collector.state(), CollectorState::Stopped);
        assert_eq!(api.count("get_trending"), 1);
    }

    #[test]
    fn test_new_collector_is_idle() {
        let dir = tempfile::tempdir().unwrap();
        let collector = collector(FakeApi::new(), dir.path());
        assert_eq!(collector.state(), CollectorState::Idle);
        collector.stop();
        assert_eq!(collector.state(), CollectorState::Stopped);
    }
}
