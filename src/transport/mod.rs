// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-shot request/response transport.
//!
//! A transport yields the parsed JSON reply of any completed HTTP exchange, whatever its
//! status code, and fails only when no reply was obtained. There is no retry, no queueing,
//! and no timeout.

use std::fmt;

use serde_json::Value;

use crate::protocol::Request;

pub mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpTransport;

#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &Request) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No reply at all (connection refused, reset, DNS, ...).
    Unreachable(String),
    /// A reply arrived but its body is not JSON.
    InvalidJson(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(reason) => write!(f, "server unreachable: {reason}"),
            Self::InvalidJson(reason) => write!(f, "reply is not valid JSON: {reason}"),
        }
    }
}

impl std::error::Error for TransportError {}
