//! tenderwatch — Binary entrypoint.
//! Loads the watch config, wires the fetcher/store/sink, and runs the poll
//! loop until SIGINT.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tenderwatch::{build_sink, config, scheduler, ChangeDetector, FsStore, HttpFetcher};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tenderwatch=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Optional positional config path; otherwise env var + config/ fallbacks.
    let cfg = match std::env::args().nth(1) {
        Some(p) => config::load_from(&PathBuf::from(p))?,
        None => config::load_default()?,
    };
    tracing::info!(
        sources = cfg.sources.len(),
        interval_secs = cfg.interval_secs,
        state_dir = %cfg.state_dir.display(),
        "loaded config"
    );

    let fetcher = Arc::new(HttpFetcher::new());
    let store = Arc::new(FsStore::new(cfg.state_dir.clone()));
    let sink = build_sink(&cfg.notify)?;
    let detector = ChangeDetector::new(fetcher, store, sink);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    scheduler::run(&detector, &cfg.sources, cfg.interval(), shutdown_rx).await;
    Ok(())
}
