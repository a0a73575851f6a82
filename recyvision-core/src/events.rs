//! Append-only scan-event log backing the history calendar.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::model::ScanEvent;
use crate::ports::{EventStore, StoreError};

/// Append-only record of photo captures.
///
/// Events are only appended and read; there is no deletion or compaction,
/// so storage grows with use. Acceptable for one entry per capture.
pub struct ScanEventLog {
    store: Arc<dyn EventStore>,
    /// Keeps ids distinct when two scans land in the same millisecond.
    sequence: AtomicU64,
}

impl ScanEventLog {
    /// Create a log over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            sequence: AtomicU64::new(0),
        }
    }

    /// Append a fresh event and persist the updated sequence.
    ///
    /// Not idempotent: calling twice records two events.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the updated sequence cannot be
    /// persisted. The event is not recorded in that case.
    pub async fn record(&self) -> Result<ScanEvent, StoreError> {
        let now = Utc::now();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);

        let event = ScanEvent {
            id: format!("{}-{sequence}", now.timestamp_millis()),
            timestamp: now,
        };

        let mut events = match self.store.load().await {
            Ok(events) => events,
            Err(err) => {
                log::warn!("overwriting unreadable scan history: {err}");
                Vec::new()
            }
        };
        events.push(event.clone());
        self.store.save(&events).await?;

        Ok(event)
    }

    /// All persisted events, oldest first.
    ///
    /// Fails closed: a missing or unreadable blob yields an empty sequence,
    /// never an error.
    pub async fn list(&self) -> Vec<ScanEvent> {
        match self.store.load().await {
            Ok(events) => events,
            Err(err) => {
                log::warn!("treating scan history as empty: {err}");
                Vec::new()
            }
        }
    }

    /// Events captured on the given UTC calendar day.
    pub async fn on_date(&self, date: NaiveDate) -> Vec<ScanEvent> {
        self.list()
            .await
            .into_iter()
            .filter(|event| event.timestamp.date_naive() == date)
            .collect()
    }
}

/// [`EventStore`] persisting the event sequence as one JSON file.
pub struct JsonFileEventStore {
    path: PathBuf,
}

impl JsonFileEventStore {
    /// Create a store writing to `path`. Parent directories are created
    /// on the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EventStore for JsonFileEventStore {
    async fn load(&self) -> Result<Vec<ScanEvent>, StoreError> {
        let body = match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Read(err)),
        };

        serde_json::from_str(&body).map_err(StoreError::Decode)
    }

    async fn save(&self, events: &[ScanEvent]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StoreError::Write)?;
        }

        let body = serde_json::to_vec(events).map_err(StoreError::Encode)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(StoreError::Write)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn log_at(path: PathBuf) -> ScanEventLog {
        ScanEventLog::new(Arc::new(JsonFileEventStore::new(path)))
    }

    #[tokio::test]
    async fn recording_n_events_lists_n_distinct_ids() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log = log_at(dir.path().join("scan-events.json"));

        for _ in 0..3 {
            log.record().await.expect("record event");
        }

        let events = log.list().await;
        assert_eq!(events.len(), 3);

        let ids: HashSet<&str> = events.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn missing_storage_reads_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log = log_at(dir.path().join("does-not-exist.json"));

        assert!(log.list().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_storage_reads_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("scan-events.json");
        tokio::fs::write(&path, b"not json at all").await.expect("seed file");

        let log = log_at(path);
        assert!(log.list().await.is_empty());
    }

    #[tokio::test]
    async fn recording_over_corrupt_storage_starts_fresh() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("scan-events.json");
        tokio::fs::write(&path, b"{broken").await.expect("seed file");

        let log = log_at(path);
        let recorded = log.record().await.expect("record event");

        let events = log.list().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, recorded.id);
    }

    #[tokio::test]
    async fn events_survive_a_fresh_log_instance() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("scan-events.json");

        let recorded = log_at(path.clone()).record().await.expect("record event");

        let events = log_at(path).list().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, recorded.id);
    }

    #[tokio::test]
    async fn on_date_filters_by_utc_day() {
        let dir = tempfile::tempdir().expect("temp dir");
        let log = log_at(dir.path().join("scan-events.json"));

        let event = log.record().await.expect("record event");
        let today = event.timestamp.date_naive();

        assert_eq!(log.on_date(today).await.len(), 1);
        assert!(
            log.on_date(today.pred_opt().expect("valid date"))
                .await
                .is_empty()
        );
    }
}
