pub mod email;

use anyhow::Result;
use std::sync::Arc;

use crate::config::NotifyConfig;

/// Delivers a change alert. Implementations attempt delivery once; retry is
/// the next scheduled pass, not the sink's job.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> Result<()>;
}

/// Wired in when notifications are disabled: returns immediately, never opens
/// a connection.
pub struct NullSink;

#[async_trait::async_trait]
impl NotificationSink for NullSink {
    async fn notify(&self, _subject: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

/// Build the configured sink. Assumes the config has already been validated,
/// so SMTP fields are present when `enabled` is set.
pub fn build_sink(cfg: &NotifyConfig) -> Result<Arc<dyn NotificationSink>> {
    if !cfg.enabled {
        tracing::info!("notifications disabled");
        return Ok(Arc::new(NullSink));
    }
    Ok(Arc::new(email::EmailSink::from_config(cfg)?))
}
