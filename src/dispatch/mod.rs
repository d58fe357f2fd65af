// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification Dispatcher: on a closed→open transition, attempts both
//! push (if the user has a subscription) and SMS (if the user has a
//! phone number) delivery per tracked user, and records the dedup entry
//! once either channel succeeds.

pub mod gateway;

pub use gateway::{HttpSmsGateway, NoopPushGateway, PushGateway, SmsGateway};

use crate::store::{CrnRecord, StoreGateway};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the SMS body for a just-opened CRN, per the fixed template.
fn message_for(record: &CrnRecord) -> String {
    format!(
        "\u{26a0}\u{fe0f} COURSE OPEN \u{26a0}\u{fe0f}\n{} - (CRN {})\nSeats open: {}\nRegister in OSCAR and update your courses in the Reaper app",
        record.course_name, record.crn, record.seats_remaining
    )
}

/// Dispatches notifications for a single `OPENED` transition on `record`.
/// `record.tracking_users` must already reflect the just-written state.
pub async fn dispatch_opened(
    store: &dyn StoreGateway,
    sms: &dyn SmsGateway,
    push: &dyn PushGateway,
    record: &CrnRecord,
) -> Result<(), crate::error::StoreError> {
    let message = message_for(record);
    let user_ids: Vec<String> = record.tracking_users.iter().cloned().collect();

    let sends = user_ids.into_iter().map(|user_id| {
        let message = message.clone();
        let crn = record.crn.clone();
        async move {
            notify_one(store, sms, push, &user_id, &crn, &message).await;
        }
    });
    join_all(sends).await;
    Ok(())
}

async fn notify_one(
    store: &dyn StoreGateway,
    sms: &dyn SmsGateway,
    push: &dyn PushGateway,
    user_id: &str,
    crn: &str,
    message: &str,
) {
    let Ok(Some(mut user)) = store.get_user(user_id).await else {
        warn!(user_id = %user_id, "user record missing at dispatch time, skipping");
        return;
    };

    // Defensive re-check of the bidirectional invariant.
    if !user.tracked_crns.contains(crn) {
        warn!(user_id = %user_id, crn = %crn, "bidirectional invariant violated, skipping dispatch");
        return;
    }
    if user.notified_crns.contains(crn) {
        return;
    }

    let mut delivered = false;

    if let Some(subscription) = user.push_subscription.clone() {
        let payload = serde_json::json!({ "title": "Course open", "body": message });
        match push.send(&subscription, &payload).await {
            Ok(()) => delivered = true,
            Err(err) => {
                warn!(user_id = %user_id, crn = %crn, err = %err, "push gateway delivery failed, falling back to SMS");
            }
        }
    }

    if user.has_sms_destination() {
        let phone = user.phone_number.clone().unwrap_or_default();
        match sms.send(&phone, message).await {
            Ok(()) => delivered = true,
            Err(err) => {
                warn!(user_id = %user_id, crn = %crn, err = %err, "SMS gateway failure, leaving notified_crns untouched");
            }
        }
    }

    if delivered {
        user.notified_crns.insert(crn.to_string());
        if let Err(err) = store.put_user(user).await {
            warn!(user_id = %user_id, crn = %crn, err = %err, "failed to persist notified_crns after successful send");
        } else {
            info!(user_id = %user_id, crn = %crn, "notification sent and dedup recorded");
        }
    }
}

/// On a `CLOSED` transition, clears `crn` from every tracking user's
/// `notified_crns` so the next opening re-notifies (§9, dedup reset on
/// close).
pub async fn reset_dedup_on_close(
    store: &dyn StoreGateway,
    record: &CrnRecord,
) -> Result<(), crate::error::StoreError> {
    for user_id in &record.tracking_users {
        if let Some(mut user) = store.get_user(user_id).await? {
            if user.notified_crns.remove(&record.crn) {
                store.put_user(user).await?;
            }
        }
    }
    Ok(())
}

/// Convenience wrapper pairing a store with the gateways needed for
/// dispatch, so the Scheduler doesn't have to thread three references
/// through every call site. Cheap to clone: every field is an `Arc`.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn StoreGateway>,
    sms: Arc<dyn SmsGateway>,
    push: Arc<dyn PushGateway>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn StoreGateway>, sms: Arc<dyn SmsGateway>, push: Arc<dyn PushGateway>) -> Self {
        Self { store, sms, push }
    }

    pub async fn on_opened(&self, record: &CrnRecord) -> Result<(), crate::error::StoreError> {
        dispatch_opened(self.store.as_ref(), self.sms.as_ref(), self.push.as_ref(), record).await
    }

    pub async fn on_closed(&self, record: &CrnRecord) -> Result<(), crate::error::StoreError> {
        reset_dedup_on_close(self.store.as_ref(), record).await
    }
}
