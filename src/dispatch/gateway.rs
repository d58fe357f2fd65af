// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SMS and push delivery gateways.

use crate::error::DispatchError;
use crate::secrets::SecretStore;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// `send(phone_number_e164, message_text) → {success, error?}`, per §6.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, phone_number_e164: &str, message_text: &str) -> Result<(), DispatchError>;
}

/// Accepts a subscription descriptor + JSON payload. Optional: if
/// unavailable, callers must treat failure as a silent skip, not an error.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, subscription: &str, payload: &serde_json::Value) -> Result<(), DispatchError>;
}

/// Production `SmsGateway`: POSTs to a configurable provider endpoint with
/// a bearer token pulled from the [`SecretStore`] at construction time.
pub struct HttpSmsGateway {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl HttpSmsGateway {
    pub fn new(endpoint: impl Into<String>, secrets: &dyn SecretStore) -> anyhow::Result<Self> {
        let api_key = secrets
            .get("CRNWATCH_SMS_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("missing required secret CRNWATCH_SMS_API_KEY"))?;
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send(&self, phone_number_e164: &str, message_text: &str) -> Result<(), DispatchError> {
        let body = serde_json::json!({
            "to": phone_number_e164,
            "body": message_text,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| DispatchError::Transient(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status.is_server_error() {
            return Err(DispatchError::Transient(format!("gateway returned {status}")));
        }
        let detail = response.text().await.unwrap_or_default();
        Err(DispatchError::Permanent(status.as_u16(), detail))
    }
}

/// Default `PushGateway`: push is optional per §6, so this silently
/// no-ops rather than erroring when no real provider is configured.
pub struct NoopPushGateway;

#[async_trait]
impl PushGateway for NoopPushGateway {
    async fn send(&self, _subscription: &str, _payload: &serde_json::Value) -> Result<(), DispatchError> {
        Ok(())
    }
}
