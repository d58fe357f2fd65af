// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal operational HTTP surface: a `/healthz` endpoint reporting live
//! scheduler counters. This is infrastructure for running the process,
//! not the CRUD surface the specification excludes.

use crate::scheduler::SchedulerHandle;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    ticks_completed: u64,
    active_crns: u64,
}

async fn healthz(State(handle): State<Arc<SchedulerHandle>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "running",
        ticks_completed: handle.ticks_completed(),
        active_crns: handle.active_crns(),
    })
}

pub fn build_router(handle: Arc<SchedulerHandle>) -> Router {
    Router::new().route("/healthz", get(healthz)).with_state(handle)
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;
