// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registrar Client: fetches one CRN's detail page and extracts course
//! identity + seat row.

pub mod parser;

pub use parser::Observation;

use crate::error::FetchError;
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the registrar's per-CRN detail page.
#[async_trait]
pub trait RegistrarClient: Send + Sync {
    async fn fetch(&self, crn: &str) -> Result<Observation, FetchError>;

    /// Concurrent batch fetch bounded by `concurrency`, preserving the
    /// pairing between each CRN and its result but not input order.
    async fn fetch_many(
        &self,
        crns: &[String],
        concurrency: usize,
    ) -> Vec<(String, Result<Observation, FetchError>)> {
        stream::iter(crns.iter().cloned())
            .map(|crn| async move {
                let result = self.fetch(&crn).await;
                (crn, result)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await
    }
}

/// Production `RegistrarClient` backed by `reqwest`, talking to a single
/// deterministic endpoint parameterized by a fixed term code and the CRN.
pub struct HttpRegistrarClient {
    base_url: String,
    term: String,
    client: Client,
}

impl HttpRegistrarClient {
    pub fn new(base_url: impl Into<String>, term: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into(),
            term: term.into(),
            client,
        })
    }

    fn url(&self, crn: &str) -> String {
        format!("{}?term_in={}&crn_in={}", self.base_url, self.term, crn)
    }
}

#[async_trait]
impl RegistrarClient for HttpRegistrarClient {
    async fn fetch(&self, crn: &str) -> Result<Observation, FetchError> {
        let response = self
            .client
            .get(self.url(crn))
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        parser::parse(&html)
    }
}
