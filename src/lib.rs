// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod detector;
pub mod fetch;
pub mod fingerprint;
pub mod notify;
pub mod scheduler;
pub mod store;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::config::{load_default, load_from, NotifyConfig, WatchConfig};
pub use crate::detector::{ChangeDetector, CheckOutcome};
pub use crate::fetch::{HttpFetcher, PageFetcher};
pub use crate::fingerprint::content_digest;
pub use crate::notify::{build_sink, NotificationSink, NullSink};
pub use crate::store::{FsStore, SnapshotStore};
pub use crate::types::{ChangeEvent, Snapshot, Source};
