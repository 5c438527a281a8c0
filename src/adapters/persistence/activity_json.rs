//! Implements ActivityLogPort using a JSON file.
//!
//! The whole session log is rewritten on every save.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::{BotActivityLog, DomainError};
use crate::ports::ActivityLogPort;

/// One JSON file per bot session.
pub struct ActivityJson {
    path: PathBuf,
}

impl ActivityJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<log_dir>/bot_activity_<YYYYmmdd_HHMMSS>.json`
    pub fn for_session(log_dir: impl AsRef<Path>, start: DateTime<Utc>) -> Self {
        let name = format!("bot_activity_{}.json", start.format("%Y%m%d_%H%M%S"));
        Self::new(log_dir.as_ref().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ActivityLogPort for ActivityJson {
    /// Write-replace: temp file, sync, rename over the target.
    async fn save(&self, log: &BotActivityLog) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Persistence(format!("create log dir: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(log)
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Persistence(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Persistence(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Persistence(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Persistence(format!("atomic rename failed: {}", e)))?;
        debug!(path = %self.path.display(), cycles = log.cycles.len(), "activity log saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CycleStats;
    use chrono::TimeZone;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_overwrites_whole_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = ActivityJson::new(dir.path().join("activity").join("log.json"));
        let mut log = BotActivityLog::new(json!({ "max_cycles": 1 }));
        store.save(&log).await.unwrap();

        log.cycles.push(CycleStats::new(1));
        store.save(&log).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let loaded: BotActivityLog = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded, log);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_session_file_name() {
        let start = Utc.with_ymd_and_hms(2025, 1, 12, 18, 5, 9).unwrap();
        let store = ActivityJson::for_session("data/activity", start);
        assert_eq!(
            store.path(),
            Path::new("data/activity/bot_activity_20250112_180509.json")
        );
    }
}
