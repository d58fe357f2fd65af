// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use crn_watch::config::Config;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    let shutdown = CancellationToken::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal_shutdown.cancel();
        }
    });

    match crn_watch::run(config, shutdown).await {
        Ok(summary) => {
            info!(
                runtime_seconds = summary.runtime_seconds,
                ticks_completed = summary.ticks_completed,
                "crn-watch exited cleanly"
            );
        }
        Err(err) => {
            error!("fatal: {err:#}");
            std::process::exit(1);
        }
    }
}
