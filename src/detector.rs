// src/detector.rs
use std::sync::Arc;

use chrono::Utc;

use crate::fetch::PageFetcher;
use crate::fingerprint::content_digest;
use crate::notify::NotificationSink;
use crate::store::SnapshotStore;
use crate::types::{ChangeEvent, Snapshot, Source};

/// Result of one fetch-hash-compare-persist-notify cycle for a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Fetch returned nothing (or persistence failed); stored state untouched.
    Skipped,
    /// Digest matches the stored baseline; no writes, no notification.
    Unchanged,
    /// New baseline persisted and alert dispatched.
    Changed(ChangeEvent),
}

/// Orchestrates one cycle per source. Holds its collaborators behind traits so
/// tests can substitute fetchers, stores, and sinks.
pub struct ChangeDetector {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn SnapshotStore>,
    sink: Arc<dyn NotificationSink>,
}

impl ChangeDetector {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn SnapshotStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self { fetcher, store, sink }
    }

    /// One cycle for one source. Never returns an error: every failure mode is
    /// recovered locally and the next pass is the retry mechanism.
    pub async fn check_source(&self, source: &Source) -> CheckOutcome {
        tracing::info!(source = %source.name, url = %source.url, "checking");

        let Some(body) = self.fetcher.fetch(&source.url).await else {
            return CheckOutcome::Skipped;
        };

        let digest = content_digest(&body);

        let stored = match self.store.get_digest(&source.name).await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(source = %source.name, "digest read failed: {e:#}");
                return CheckOutcome::Skipped;
            }
        };

        // An absent baseline never equals a computed digest, so the first
        // observation of a source always lands in the changed branch.
        if stored.as_deref() == Some(digest.as_str()) {
            tracing::info!(source = %source.name, "no change");
            return CheckOutcome::Unchanged;
        }

        let snap = Snapshot {
            source: source.name.clone(),
            digest,
            body,
            captured_at: Utc::now(),
        };
        if let Err(e) = self.store.persist(&snap).await {
            // Prior state on disk remains the recovery baseline.
            tracing::warn!(source = %source.name, "persist failed: {e:#}");
            return CheckOutcome::Skipped;
        }

        let event = ChangeEvent {
            source: source.name.clone(),
            url: source.url.clone(),
            detected_at: snap.captured_at,
        };
        tracing::info!(source = %source.name, "change detected");
        if let Err(e) = self.sink.notify(&event.subject(), &event.body()).await {
            tracing::warn!(source = %source.name, "notify failed: {e:#}");
        }
        CheckOutcome::Changed(event)
    }
}
