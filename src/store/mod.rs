// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store Gateway: the narrow persistence contract every other component
//! goes through. No component but this one touches entity storage
//! directly — callers hold only short-lived local copies.

pub mod json_file;
pub mod memory;
pub mod model;

pub use model::{CrnRecord, User};

use crate::error::StoreError;
use async_trait::async_trait;

/// Persistent state interface for [`User`] and [`CrnRecord`] entities.
///
/// Implementations must maintain the bidirectional invariant: for every
/// user `U` and CRN `C`, `C ∈ U.tracked_crns ⇔ U ∈ CrnRecord[C].tracking_users`.
/// `add_user_to_crn` / `remove_user_from_crn` must read-modify-write,
/// re-reading `tracking_users` immediately before the write, so a
/// concurrent writer's membership change is never silently clobbered by a
/// full-record `put_crn` issued from elsewhere (see DESIGN.md).
#[async_trait]
pub trait StoreGateway: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError>;

    /// Full-record write. Implementations must preserve fields the caller
    /// did not touch when the backing store lacks partial updates.
    async fn put_user(&self, user: User) -> Result<(), StoreError>;

    /// Every CRN whose `tracking_users` is non-empty.
    async fn scan_active_crns(&self) -> Result<Vec<CrnRecord>, StoreError>;

    async fn get_crn(&self, crn: &str) -> Result<Option<CrnRecord>, StoreError>;

    /// Full-record write.
    async fn put_crn(&self, record: CrnRecord) -> Result<(), StoreError>;

    async fn delete_crn(&self, crn: &str) -> Result<(), StoreError>;

    /// Adds `user_id` to `CrnRecord[crn].tracking_users` (creating the
    /// record if absent) and `crn` to `User[user_id].tracked_crns`.
    async fn add_user_to_crn(&self, crn: &str, user_id: &str) -> Result<(), StoreError>;

    /// Removes the membership in both directions; deletes the CRN record
    /// if `tracking_users` becomes empty.
    async fn remove_user_from_crn(&self, crn: &str, user_id: &str) -> Result<(), StoreError>;
}
