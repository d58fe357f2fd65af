// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the polling engine.
//!
//! Mirrors the kind/policy table in the specification: each external
//! collaborator (registrar, store, dispatch gateway) gets its own narrow
//! error enum rather than one grab-bag type, so the scheduler can match on
//! "is this retryable" without string-sniffing.

use std::fmt;

/// Errors surfaced by [`crate::registrar::RegistrarClient::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network/IO failure talking to the registrar.
    Transport(String),
    /// Registrar responded with a non-200 status.
    HttpStatus(u16),
    /// The identity row was absent — the CRN no longer exists upstream.
    NotFound,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::HttpStatus(status) => write!(f, "registrar returned HTTP {status}"),
            Self::NotFound => write!(f, "CRN not found on registrar"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Errors surfaced by [`crate::dispatch::SmsGateway::send`] /
/// [`crate::dispatch::PushGateway::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Timeout, connection failure, or 5xx — safe to retry on the next
    /// open episode.
    Transient(String),
    /// 4xx from the gateway. Source behavior is ambiguous here (see
    /// DESIGN.md); treated the same as transient for dedup purposes.
    Permanent(u16, String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient(msg) => write!(f, "gateway transient failure: {msg}"),
            Self::Permanent(status, msg) => write!(f, "gateway rejected ({status}): {msg}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Errors surfaced by [`crate::store::StoreGateway`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

/// Machine-readable classification surfaced on the health endpoint and in
/// structured logs; not load-bearing for control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CoreErrorKind {
    Transport,
    HttpStatus,
    NotFound,
    ParseMissingSeats,
    StoreTransient,
    DispatchTransient,
    DispatchPermanent,
    Config,
}

impl CoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "TRANSPORT",
            Self::HttpStatus => "HTTP_STATUS",
            Self::NotFound => "NOT_FOUND",
            Self::ParseMissingSeats => "PARSE_MISSING_SEATS",
            Self::StoreTransient => "STORE_TRANSIENT",
            Self::DispatchTransient => "DISPATCH_TRANSIENT",
            Self::DispatchPermanent => "DISPATCH_PERMANENT",
            Self::Config => "CONFIG",
        }
    }
}

impl fmt::Display for CoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
