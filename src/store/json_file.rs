// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-snapshot [`StoreGateway`] backend.
//!
//! Grounded on the teacher's `credential/persist.rs`: the whole snapshot is
//! read into memory, mutated, then written back atomically via a
//! write-to-`.tmp`-then-`rename`, so a crash mid-write never leaves a
//! corrupt file in place. Good enough for a single-instance deployment or
//! local development; a hosted KV/document store is the production target
//! (§9, single-writer scheduler).

use super::{CrnRecord, StoreGateway, User};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    users: HashMap<String, User>,
    #[serde(default)]
    crns: HashMap<String, CrnRecord>,
}

/// Single-file JSON store. All operations serialize through one mutex
/// since every write re-serializes and persists the entire snapshot.
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: Mutex<Snapshot>,
}

impl JsonFileStore {
    /// Loads the snapshot at `path` if it exists, or starts empty.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = load(&path).await?;
        Ok(Self {
            path,
            snapshot: Mutex::new(snapshot),
        })
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        save(&self.path, snapshot).await
    }
}

async fn load(path: &Path) -> Result<Snapshot, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|err| StoreError(format!("corrupt snapshot at {}: {err}", path.display()))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Snapshot::default()),
        Err(err) => Err(StoreError(format!(
            "reading snapshot {}: {err}",
            path.display()
        ))),
    }
}

async fn save(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(snapshot)
        .map_err(|err| StoreError(format!("encoding snapshot: {err}")))?;
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, &bytes)
        .await
        .map_err(|err| StoreError(format!("writing {}: {err}", tmp_path.display())))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|err| StoreError(format!("renaming {} to {}: {err}", tmp_path.display(), path.display())))
}

#[async_trait]
impl StoreGateway for JsonFileStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.snapshot.lock().await.users.get(user_id).cloned())
    }

    async fn put_user(&self, user: User) -> Result<(), StoreError> {
        let mut guard = self.snapshot.lock().await;
        guard.users.insert(user.user_id.clone(), user);
        self.persist(&guard).await
    }

    async fn scan_active_crns(&self) -> Result<Vec<CrnRecord>, StoreError> {
        Ok(self
            .snapshot
            .lock()
            .await
            .crns
            .values()
            .filter(|record| !record.tracking_users.is_empty())
            .cloned()
            .collect())
    }

    async fn get_crn(&self, crn: &str) -> Result<Option<CrnRecord>, StoreError> {
        Ok(self.snapshot.lock().await.crns.get(crn).cloned())
    }

    async fn put_crn(&self, record: CrnRecord) -> Result<(), StoreError> {
        let mut guard = self.snapshot.lock().await;
        guard.crns.insert(record.crn.clone(), record);
        self.persist(&guard).await
    }

    async fn delete_crn(&self, crn: &str) -> Result<(), StoreError> {
        let mut guard = self.snapshot.lock().await;
        guard.crns.remove(crn);
        self.persist(&guard).await
    }

    async fn add_user_to_crn(&self, crn: &str, user_id: &str) -> Result<(), StoreError> {
        let mut guard = self.snapshot.lock().await;
        guard
            .crns
            .entry(crn.to_string())
            .or_insert_with(|| CrnRecord::new_untracked(crn, Utc::now()))
            .tracking_users
            .insert(user_id.to_string());
        guard
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| User::new(user_id))
            .tracked_crns
            .insert(crn.to_string());
        self.persist(&guard).await
    }

    async fn remove_user_from_crn(&self, crn: &str, user_id: &str) -> Result<(), StoreError> {
        let mut guard = self.snapshot.lock().await;
        let delete_crn = match guard.crns.get_mut(crn) {
            Some(record) => {
                record.tracking_users.remove(user_id);
                record.tracking_users.is_empty()
            }
            None => false,
        };
        if delete_crn {
            guard.crns.remove(crn);
        }
        if let Some(user) = guard.users.get_mut(user_id) {
            user.tracked_crns.remove(crn);
        }
        self.persist(&guard).await
    }
}

#[cfg(test)]
#[path = "json_file_tests.rs"]
mod json_file_tests;
