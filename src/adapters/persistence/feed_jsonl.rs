//! Implements FeedArchivePort with JSON Lines files.
//! Append-only writes; one JSON document per line.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::DomainError;
use crate::ports::FeedArchivePort;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonlFeedArchive;

impl JsonlFeedArchive {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl FeedArchivePort for JsonlFeedArchive {
    async fn append(&self, location: &Path, record: &Value) -> Result<(), DomainError> {
        if let Some(parent) = location.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Persistence(e.to_string()))?;
        }
        let mut line =
            serde_json::to_string(record).map_err(|e| DomainError::Persistence(e.to_string()))?;
        line.push('\n');

        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(location)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        f.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        f.flush()
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        debug!(path = %location.display(), bytes = line.len(), "appended record");
        Ok(())
    }

    /// Blank lines are skipped; a corrupt line is an error.
    async fn read_all(&self, location: &Path) -> Result<Vec<Value>, DomainError> {
        let raw = match fs::read_to_string(location).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(DomainError::Persistence(e.to_string())),
        };
        raw.lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(i, l)| {
                serde_json::from_str(l).map_err(|e| {
                    let at = location.display();
                    DomainError::Persistence(format!("{at} line {}: {e}", i + 1))
                })
            })
            .collect()
    }
}
