// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secret Store: name→string mapping, read at startup, refreshable only
//! by restart (§6).

use std::collections::HashMap;

/// Required keys: `CRNWATCH_SMS_API_KEY`. Optional: the VAPID keypair for
/// push (`CRNWATCH_VAPID_PUBLIC_KEY` / `CRNWATCH_VAPID_PRIVATE_KEY`).
pub trait SecretStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads secrets from the process environment at construction time.
pub struct EnvSecretStore {
    values: HashMap<String, String>,
}

impl EnvSecretStore {
    const KEYS: &'static [&'static str] = &[
        "CRNWATCH_SMS_API_KEY",
        "CRNWATCH_VAPID_PUBLIC_KEY",
        "CRNWATCH_VAPID_PRIVATE_KEY",
    ];

    /// Snapshots the known secret keys from the environment. Does not
    /// itself fail on a missing required key — callers that need a
    /// specific secret (e.g. the SMS gateway) enforce that at their own
    /// construction time, matching the "fail fast; the core will not
    /// start" policy in §7.
    pub fn from_env() -> Self {
        let values = Self::KEYS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();
        Self { values }
    }
}

impl SecretStore for EnvSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod secrets_tests;
