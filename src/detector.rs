// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transition Detector: diffs a fresh observation (or fetch failure)
//! against the previously stored [`CrnRecord`] and produces the record to
//! persist plus a classification of what changed.

use crate::error::FetchError;
use crate::registrar::Observation;
use crate::store::CrnRecord;
use chrono::Utc;

/// The five transition kinds the Detector can emit. Only [`Transition::Opened`]
/// triggers the Notification Dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Opened,
    Closed,
    Metadata,
    Failed,
}

/// Applies one fetch result to the previous record, returning the
/// classification and the new record to `put_crn`. `tracking_users` is
/// always preserved from `prev`.
pub fn detect(prev: CrnRecord, result: &Result<Observation, FetchError>) -> (Transition, CrnRecord) {
    match result {
        Err(_) => {
            let mut next = prev;
            next.consecutive_closed_checks += 1;
            next.last_updated = Utc::now();
            (Transition::Failed, next)
        }
        Ok(observation) => detect_observation(prev, observation),
    }
}

fn detect_observation(prev: CrnRecord, observation: &Observation) -> (Transition, CrnRecord) {
    let mut next = prev.clone();
    next.course_name = observation.course_name.clone();
    next.course_id = observation.course_id.clone();
    next.course_section = observation.course_section.clone();
    next.seats_remaining = observation.seats_remaining;
    next.total_seats = observation.total_seats;
    next.is_open = observation.is_open;
    next.last_updated = observation.observed_at;

    if prev.is_open == observation.is_open {
        next.consecutive_closed_checks = if observation.is_open {
            0
        } else {
            prev.consecutive_closed_checks + 1
        };
        let metadata_changed = prev.course_name != next.course_name
            || prev.course_id != next.course_id
            || prev.course_section != next.course_section
            || prev.total_seats != next.total_seats
            || prev.seats_remaining != next.seats_remaining;
        let transition = if metadata_changed {
            Transition::Metadata
        } else {
            Transition::Unchanged
        };
        return (transition, next);
    }

    if !prev.is_open && observation.is_open {
        next.last_status_change = Some(observation.observed_at);
        next.consecutive_closed_checks = 0;
        return (Transition::Opened, next);
    }

    // prev.is_open && !observation.is_open
    next.last_status_change = Some(observation.observed_at);
    next.consecutive_closed_checks = 1;
    (Transition::Closed, next)
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod detector_tests;
