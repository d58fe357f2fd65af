// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process configuration. Environment-borne per §6 ("no CLI flags on the
//! core; configuration is environment-borne"); CLI flags exist only as an
//! operational convenience layered on top, each with an environment
//! fallback, matching the teacher's `MuxConfig`.

use std::time::Duration;

/// Top-level configuration for the `crn-watch` engine.
#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "Adaptive course-seat polling engine")]
pub struct Config {
    /// Base URL of the registrar's detail-page endpoint.
    #[arg(long, env = "CRNWATCH_REGISTRAR_BASE_URL")]
    pub registrar_base_url: String,

    /// Six-digit registrar term code, e.g. 202508.
    #[arg(long, env = "CRNWATCH_TERM")]
    pub term: String,

    /// SMS provider endpoint to POST notification bodies to.
    #[arg(long, env = "CRNWATCH_SMS_ENDPOINT")]
    pub sms_endpoint: String,

    /// Path to the JSON snapshot file backing the store. If unset, the
    /// process runs with an in-memory store that does not survive restart.
    #[arg(long, env = "CRNWATCH_STORE_PATH")]
    pub store_path: Option<std::path::PathBuf>,

    /// Host to bind the health endpoint on.
    #[arg(long, default_value = "127.0.0.1", env = "CRNWATCH_HEALTH_HOST")]
    pub health_host: String,

    /// Port to bind the health endpoint on.
    #[arg(long, default_value_t = 8080, env = "CRNWATCH_HEALTH_PORT")]
    pub health_port: u16,

    /// Soft runtime budget in seconds; the tick loop exits once the
    /// remaining budget is less than the next sleep interval.
    #[arg(long, default_value_t = 780, env = "CRNWATCH_MAX_RUNTIME_SECS")]
    pub max_runtime_secs: u64,

    /// Steady-state poll interval in seconds.
    #[arg(long, default_value_t = 15, env = "CRNWATCH_BASE_INTERVAL_SECS")]
    pub base_interval_secs: u64,

    /// Poll interval in seconds right after a state change.
    #[arg(long, default_value_t = 5, env = "CRNWATCH_FAST_INTERVAL_SECS")]
    pub fast_interval_secs: u64,

    /// Poll interval in seconds when nothing is tracked or demand is low.
    #[arg(long, default_value_t = 20, env = "CRNWATCH_SLOW_INTERVAL_SECS")]
    pub slow_interval_secs: u64,

    /// Poll interval in seconds while a tracked CRN is stably open.
    #[arg(long, default_value_t = 30, env = "CRNWATCH_OPEN_COURSE_INTERVAL_SECS")]
    pub open_course_interval_secs: u64,

    /// consecutive_closed_checks at or below which a record counts as
    /// "recently changed" for interval selection.
    #[arg(long, default_value_t = 5, env = "CRNWATCH_RECENTLY_CHANGED_THRESHOLD")]
    pub recently_changed_threshold: u32,

    /// Maximum in-flight registrar HTTP requests per tick.
    #[arg(long, default_value_t = 50, env = "CRNWATCH_FETCH_CONCURRENCY")]
    pub fetch_concurrency: usize,

    /// Fixed sleep after a tick-level failure, in seconds.
    #[arg(long, default_value_t = 5, env = "CRNWATCH_TICK_FAILURE_BACKOFF_SECS")]
    pub tick_failure_backoff_secs: u64,
}

impl Config {
    pub fn max_runtime(&self) -> Duration {
        Duration::from_secs(self.max_runtime_secs)
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_secs(self.base_interval_secs)
    }

    pub fn fast_interval(&self) -> Duration {
        Duration::from_secs(self.fast_interval_secs)
    }

    pub fn slow_interval(&self) -> Duration {
        Duration::from_secs(self.slow_interval_secs)
    }

    pub fn open_course_interval(&self) -> Duration {
        Duration::from_secs(self.open_course_interval_secs)
    }

    pub fn tick_failure_backoff(&self) -> Duration {
        Duration::from_secs(self.tick_failure_backoff_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
