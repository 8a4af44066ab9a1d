// src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::Source;

const ENV_PATH: &str = "TENDERWATCH_CONFIG_PATH";
const ENV_SMTP_PASS: &str = "SMTP_PASS";

/// Static process configuration, constructed once at startup and passed by
/// reference into the scheduler and detector.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Seconds between full passes over the source list. Default: 6 hours.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Directory holding per-source snapshot and digest files.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Ordered list of monitored pages; iteration order is config order.
    pub sources: Vec<Source>,
    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub enabled: bool,
    pub from: Option<String>,
    pub to: Option<String>,
    pub smtp_host: Option<String>,
    pub smtp_port: Option<u16>,
    /// May also be supplied via the SMTP_PASS env var, which takes precedence.
    pub password: Option<String>,
}

fn default_interval_secs() -> u64 {
    60 * 60 * 6
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("tender_alerts")
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    fn validate(mut self) -> Result<Self> {
        if self.sources.is_empty() {
            bail!("config has no sources");
        }
        let mut seen = HashSet::new();
        for s in &self.sources {
            if s.name.trim().is_empty() || s.url.trim().is_empty() {
                bail!("source entries need a non-empty name and url");
            }
            if !seen.insert(s.name.as_str()) {
                bail!("duplicate source name: {}", s.name);
            }
        }
        if self.interval_secs == 0 {
            bail!("interval_secs must be positive");
        }
        if self.notify.enabled {
            if let Ok(p) = std::env::var(ENV_SMTP_PASS) {
                self.notify.password = Some(p);
            }
            for (field, val) in [
                ("notify.from", &self.notify.from),
                ("notify.to", &self.notify.to),
                ("notify.smtp_host", &self.notify.smtp_host),
            ] {
                if val.as_deref().map_or(true, |v| v.trim().is_empty()) {
                    bail!("notifications enabled but {field} is missing");
                }
            }
            if self.notify.password.as_deref().map_or(true, str::is_empty) {
                bail!("notifications enabled but no credential (notify.password or SMTP_PASS)");
            }
        }
        Ok(self)
    }
}

/// Load config from an explicit path. Supports TOML or JSON.
pub fn load_from(path: &Path) -> Result<WatchConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg: WatchConfig = if ext == "json" {
        serde_json::from_str(&content)
            .with_context(|| format!("parsing JSON config {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("parsing TOML config {}", path.display()))?
    };
    cfg.validate()
}

/// Resolve the config path using env var + fallbacks:
/// 1) $TENDERWATCH_CONFIG_PATH
/// 2) config/watch.toml
/// 3) config/watch.json
pub fn load_default() -> Result<WatchConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        }
        return Err(anyhow!("{ENV_PATH} points to non-existent path"));
    }
    let toml_p = PathBuf::from("config/watch.toml");
    if toml_p.exists() {
        return load_from(&toml_p);
    }
    let json_p = PathBuf::from("config/watch.json");
    if json_p.exists() {
        return load_from(&json_p);
    }
    Err(anyhow!(
        "no config found: set {ENV_PATH} or provide config/watch.toml"
    ))
}
