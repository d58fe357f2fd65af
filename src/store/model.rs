// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage-agnostic entities: [`User`] and [`CrnRecord`].
//!
//! These are plain data, serializable so either shipped `StoreGateway`
//! backend can round-trip them without a bespoke mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A registered user: an external identity, an optional SMS destination,
/// and the two CRN sets that make up the bidirectional tracking index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_subscription: Option<String>,
    #[serde(default)]
    pub tracked_crns: BTreeSet<String>,
    #[serde(default)]
    pub notified_crns: BTreeSet<String>,
}

impl User {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            phone_number: None,
            push_subscription: None,
            tracked_crns: BTreeSet::new(),
            notified_crns: BTreeSet::new(),
        }
    }

    /// Whether this user has a usable SMS destination.
    pub fn has_sms_destination(&self) -> bool {
        self.phone_number.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Per-CRN state: course identity, open/closed flag, seat counts, the
/// tracking-user set, and adaptive-interval bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrnRecord {
    pub crn: String,
    pub course_name: String,
    pub course_id: String,
    pub course_section: String,
    pub is_open: bool,
    pub seats_remaining: u32,
    pub total_seats: u32,
    #[serde(default)]
    pub tracking_users: BTreeSet<String>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status_change: Option<DateTime<Utc>>,
    #[serde(default)]
    pub consecutive_closed_checks: u32,
}

impl CrnRecord {
    /// A freshly tracked CRN with no prior observation — `is_open=false`,
    /// zeroed seats, `consecutive_closed_checks=0`.
    pub fn new_untracked(crn: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            crn: crn.into(),
            course_name: String::new(),
            course_id: String::new(),
            course_section: String::new(),
            is_open: false,
            seats_remaining: 0,
            total_seats: 0,
            tracking_users: BTreeSet::new(),
            last_updated: now,
            last_status_change: None,
            consecutive_closed_checks: 0,
        }
    }
}
