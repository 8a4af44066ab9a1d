// src/scheduler.rs
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::detector::{ChangeDetector, CheckOutcome};
use crate::types::Source;

/// One sequential pass over the configured sources, config order. Returns the
/// number of changed sources, for the pass summary line.
pub async fn run_pass(detector: &ChangeDetector, sources: &[Source]) -> usize {
    let mut changed = 0;
    for source in sources {
        if let CheckOutcome::Changed(_) = detector.check_source(source).await {
            changed += 1;
        }
    }
    changed
}

/// Poll loop: pass, sleep, repeat until the shutdown signal flips. The sleep
/// is cancellable so a signal interrupts the idle period promptly instead of
/// waiting out the full interval.
pub async fn run(
    detector: &ChangeDetector,
    sources: &[Source],
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }
        let changed = run_pass(detector, sources).await;
        tracing::info!(
            sources = sources.len(),
            changed,
            "pass complete, sleeping {}s",
            interval.as_secs()
        );
        tokio::select! {
            changed = shutdown.changed() => {
                // a dropped sender counts as shutdown
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = time::sleep(interval) => {}
        }
    }
    tracing::info!("scheduler stopped");
}
