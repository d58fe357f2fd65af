// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process [`StoreGateway`] backed by `RwLock`-guarded maps.
//!
//! Grounded on the teacher's `MuxState` (`RwLock<HashMap<SessionId,
//! SessionEntry>>`): one lock per table, held only for the duration of the
//! read or write, never across an await on an external call.

use super::{CrnRecord, StoreGateway, User};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Default runtime store and the store used throughout the test suite.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, User>>,
    crns: RwLock<HashMap<String, CrnRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreGateway for InMemoryStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn put_user(&self, user: User) -> Result<(), StoreError> {
        self.users.write().await.insert(user.user_id.clone(), user);
        Ok(())
    }

    async fn scan_active_crns(&self) -> Result<Vec<CrnRecord>, StoreError> {
        Ok(self
            .crns
            .read()
            .await
            .values()
            .filter(|record| !record.tracking_users.is_empty())
            .cloned()
            .collect())
    }

    async fn get_crn(&self, crn: &str) -> Result<Option<CrnRecord>, StoreError> {
        Ok(self.crns.read().await.get(crn).cloned())
    }

    async fn put_crn(&self, record: CrnRecord) -> Result<(), StoreError> {
        self.crns.write().await.insert(record.crn.clone(), record);
        Ok(())
    }

    async fn delete_crn(&self, crn: &str) -> Result<(), StoreError> {
        self.crns.write().await.remove(crn);
        Ok(())
    }

    async fn add_user_to_crn(&self, crn: &str, user_id: &str) -> Result<(), StoreError> {
        {
            let mut crns = self.crns.write().await;
            let record = crns
                .entry(crn.to_string())
                .or_insert_with(|| CrnRecord::new_untracked(crn, Utc::now()));
            record.tracking_users.insert(user_id.to_string());
        }
        {
            let mut users = self.users.write().await;
            let user = users
                .entry(user_id.to_string())
                .or_insert_with(|| User::new(user_id));
            user.tracked_crns.insert(crn.to_string());
        }
        Ok(())
    }

    async fn remove_user_from_crn(&self, crn: &str, user_id: &str) -> Result<(), StoreError> {
        let should_delete_crn = {
            let mut crns = self.crns.write().await;
            match crns.get_mut(crn) {
                Some(record) => {
                    record.tracking_users.remove(user_id);
                    record.tracking_users.is_empty()
                }
                None => false,
            }
        };
        if should_delete_crn {
            self.crns.write().await.remove(crn);
        }
        if let Some(user) = self.users.write().await.get_mut(user_id) {
            user.tracked_crns.remove(crn);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
