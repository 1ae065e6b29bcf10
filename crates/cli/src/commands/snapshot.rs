//! Odds snapshots stored as JSON files.
//!
//! The file holds the same list of events the odds feed returns, so a
//! response saved by `scan --save-snapshot` can be replayed offline.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sports_arb_core::{OddsSource, RawEvent};
use std::path::{Path, PathBuf};

/// An [`OddsSource`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    name: String,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("snapshot:{}", path.display());
        Self { path, name }
    }

    /// Saves events in the format [`SnapshotFile`] reads.
    ///
    /// # Errors
    /// Returns error if serialization or the write fails.
    pub async fn save(path: &Path, events: &[RawEvent]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(events).context("Failed to serialize snapshot")?;
        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        tracing::info!(path = %path.display(), events = events.len(), "Snapshot saved");
        Ok(())
    }
}

#[async_trait]
impl OddsSource for SnapshotFile {
    async fn fetch_events(&self) -> Result<Vec<RawEvent>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;
        let events: Vec<RawEvent> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Snapshot is not a list of events: {}", self.path.display()))?;
        Ok(events)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::output::tests::sample_events;

    #[tokio::test]
    async fn test_save_then_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odds.json");
        let events = sample_events();

        SnapshotFile::save(&path, &events).await.unwrap();
        let loaded = SnapshotFile::new(&path).fetch_events().await.unwrap();

        assert_eq!(loaded, events);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let source = SnapshotFile::new("/nonexistent/odds.json");
        assert!(source.fetch_events().await.is_err());
        assert!(source.name().starts_with("snapshot:"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odds.json");
        std::fs::write(&path, r#"{"message": "quota reached"}"#).unwrap();

        let err = SnapshotFile::new(&path).fetch_events().await.unwrap_err();
        assert!(format!("{err:#}").contains("not a list"));
    }
}
