// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! crn-watch: adaptive polling engine and notification fanout for
//! university course-registration seat tracking.

pub mod config;
pub mod detector;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod registrar;
pub mod scheduler;
pub mod secrets;
pub mod store;

use crate::config::Config;
use crate::dispatch::{Dispatcher, HttpSmsGateway, NoopPushGateway};
use crate::registrar::HttpRegistrarClient;
use crate::scheduler::{RunSummary, Scheduler};
use crate::secrets::EnvSecretStore;
use crate::store::json_file::JsonFileStore;
use crate::store::memory::InMemoryStore;
use crate::store::StoreGateway;
use std::sync::Arc;
use std::sync::Once;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

static CRYPTO_INIT: Once = Once::new();

/// Installs the process-wide rustls crypto provider. `reqwest`'s
/// `rustls-no-provider` feature requires this before the first TLS
/// connection; safe to call more than once.
pub fn ensure_crypto_provider() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Builds every collaborator from `config`, spawns the health endpoint,
/// and runs the tick loop to completion or until `shutdown` fires.
pub async fn run(config: Config, shutdown: CancellationToken) -> anyhow::Result<RunSummary> {
    ensure_crypto_provider();

    let secrets = EnvSecretStore::from_env();

    let store: Arc<dyn StoreGateway> = match &config.store_path {
        Some(path) => Arc::new(JsonFileStore::open(path).await?),
        None => Arc::new(InMemoryStore::new()),
    };

    let registrar = Arc::new(HttpRegistrarClient::new(
        config.registrar_base_url.clone(),
        config.term.clone(),
    )?);

    let sms = Arc::new(HttpSmsGateway::new(config.sms_endpoint.clone(), &secrets)?);
    let push = Arc::new(NoopPushGateway);
    let dispatcher = Dispatcher::new(Arc::clone(&store), sms, push);

    let scheduler = Scheduler::new(config.clone(), store, registrar, dispatcher);
    let handle = scheduler.handle();

    let health_addr = format!("{}:{}", config.health_host, config.health_port);
    let listener = TcpListener::bind(&health_addr).await?;
    let router = http::build_router(handle);
    let health_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router)
            .with_graceful_shutdown(health_shutdown.cancelled_owned())
            .await
        {
            tracing::error!(%err, "health endpoint terminated unexpectedly");
        }
    });

    info!(addr = %health_addr, "crn-watch running");
    Ok(scheduler.run(shutdown).await)
}
