// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adaptive Scheduler: owns the poll loop. Selects the universe of
//! tracked CRNs, issues concurrent fetches, drives the Detector and
//! Dispatcher, then computes the next sleep interval from aggregate CRN
//! metadata.

use crate::config::Config;
use crate::detector::{self, Transition};
use crate::dispatch::Dispatcher;
use crate::registrar::RegistrarClient;
use crate::store::{CrnRecord, StoreGateway};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// One of the four adaptive polling tiers, chosen fresh every tick from
/// aggregate CRN metadata (§4.5). No separate scheduler state is
/// persisted between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalTier {
    Fast,
    Open,
    Base,
    Slow,
}

/// Chooses the next sleep interval by evaluating `records` in the
/// priority order from §4.5's table; the first matching clause wins. An
/// empty collection always selects `Base`.
pub fn select_interval(records: &[CrnRecord], recently_changed_threshold: u32) -> IntervalTier {
    if records.is_empty() {
        return IntervalTier::Base;
    }
    if records
        .iter()
        .any(|r| r.consecutive_closed_checks <= recently_changed_threshold)
    {
        return IntervalTier::Fast;
    }
    if records.iter().any(|r| r.is_open) {
        return IntervalTier::Open;
    }
    let high_demand_closed = records
        .iter()
        .filter(|r| !r.is_open && r.tracking_users.len() >= 3)
        .count();
    let cold_closed = records
        .iter()
        .filter(|r| !r.is_open && r.consecutive_closed_checks >= 15)
        .count();
    if high_demand_closed > cold_closed {
        return IntervalTier::Base;
    }
    IntervalTier::Slow
}

impl IntervalTier {
    pub fn duration(self, config: &Config) -> Duration {
        match self {
            Self::Fast => config.fast_interval(),
            Self::Open => config.open_course_interval(),
            Self::Base => config.base_interval(),
            Self::Slow => config.slow_interval(),
        }
    }
}

/// Live counters exposed to the health endpoint without handing the HTTP
/// layer a back door into the store.
#[derive(Debug, Default)]
pub struct SchedulerHandle {
    pub(crate) ticks_completed: AtomicU64,
    pub(crate) active_crns: AtomicU64,
}

impl SchedulerHandle {
    pub fn ticks_completed(&self) -> u64 {
        self.ticks_completed.load(Ordering::Relaxed)
    }

    pub fn active_crns(&self) -> u64 {
        self.active_crns.load(Ordering::Relaxed)
    }
}

/// Outcome of a completed run, returned to the process entry point per
/// §6's `{runtime_seconds, ticks_completed}` process surface.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    pub runtime_seconds: u64,
    pub ticks_completed: u64,
}

pub struct Scheduler {
    config: Config,
    store: Arc<dyn StoreGateway>,
    registrar: Arc<dyn RegistrarClient>,
    dispatcher: Dispatcher,
    handle: Arc<SchedulerHandle>,
}

impl Scheduler {
    pub fn new(
        config: Config,
        store: Arc<dyn StoreGateway>,
        registrar: Arc<dyn RegistrarClient>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config,
            store,
            registrar,
            dispatcher,
            handle: Arc::new(SchedulerHandle::default()),
        }
    }

    pub fn handle(&self) -> Arc<SchedulerHandle> {
        Arc::clone(&self.handle)
    }

    /// Runs the tick loop until the runtime budget is spent or `cancel`
    /// fires, and returns the run summary.
    pub async fn run(&self, cancel: CancellationToken) -> RunSummary {
        let start = tokio::time::Instant::now();
        let max_runtime = self.config.max_runtime();
        let mut ticks_completed: u64 = 0;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let next_interval = match self.tick().await {
                Ok(interval) => {
                    ticks_completed += 1;
                    self.handle.ticks_completed.store(ticks_completed, Ordering::Relaxed);
                    interval
                }
                Err(err) => {
                    error!(%err, "tick failed, backing off");
                    self.config.tick_failure_backoff()
                }
            };

            let elapsed = start.elapsed();
            let remaining = max_runtime.checked_sub(elapsed).unwrap_or(Duration::ZERO);
            if remaining < next_interval {
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(next_interval) => {}
            }
        }

        RunSummary {
            runtime_seconds: start.elapsed().as_secs(),
            ticks_completed,
        }
    }

    /// One full iteration: select → fetch-all → detect-and-persist-all →
    /// dispatch → compute-next-interval. Returns the interval to sleep
    /// before the next tick. Exposed directly (not just via [`Scheduler::run`])
    /// so tests can drive and assert on individual ticks.
    pub async fn tick(&self) -> anyhow::Result<Duration> {
        let active = self.store.scan_active_crns().await?;
        self.handle.active_crns.store(active.len() as u64, Ordering::Relaxed);

        if active.is_empty() {
            return Ok(self.config.base_interval());
        }

        let crns: Vec<String> = active.iter().map(|r| r.crn.clone()).collect();
        let results = self
            .registrar
            .fetch_many(&crns, self.config.fetch_concurrency)
            .await;

        let mut by_crn: std::collections::HashMap<String, CrnRecord> =
            active.into_iter().map(|r| (r.crn.clone(), r)).collect();

        let mut post_tick = Vec::with_capacity(by_crn.len());

        for (crn, result) in results {
            let Some(prev) = by_crn.remove(&crn) else {
                continue;
            };
            let (transition, next) = detector::detect(prev, &result);

            if let Err(err) = self.store.put_crn(next.clone()).await {
                warn!(crn = %crn, err = %err, "store_transient: aborting this CRN's advance for the tick");
                continue;
            }

            match transition {
                Transition::Opened => {
                    if let Err(err) = self.dispatcher.on_opened(&next).await {
                        warn!(crn = %crn, err = %err, "dispatch failed");
                    }
                }
                Transition::Closed => {
                    if let Err(err) = self.dispatcher.on_closed(&next).await {
                        warn!(crn = %crn, err = %err, "failed to reset notification dedup on close");
                    }
                }
                Transition::Failed => {
                    info!(crn = %crn, checks = next.consecutive_closed_checks, "fetch failed this tick");
                }
                Transition::Unchanged | Transition::Metadata => {}
            }

            post_tick.push(next);
        }

        Ok(select_interval(&post_tick, self.config.recently_changed_threshold).duration(&self.config))
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
