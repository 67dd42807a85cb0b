// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Transport, TransportError};
use crate::config::ClientConfig;
use crate::protocol::{Method, Request};

/// HTTP transport against one fixed base endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.server_url())
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &Request) -> String {
        format!("{}{}", self.base_url, request.route().path())
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Value, TransportError> {
        let url = self.url_for(request);
        let mut builder = match request.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = request.body() {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body.to_string());
        }

        debug!(method = %request.method(), route = %request.route(), "sending request");
        let response = builder.send().await.map_err(|err| {
            warn!(route = %request.route(), error = %err, "request failed");
            TransportError::Unreachable(err.to_string())
        })?;

        // Success and failure are encoded in the body; the status is only logged.
        let status = response.status();
        let text = response.text().await.map_err(|err| {
            warn!(route = %request.route(), error = %err, "reading reply failed");
            TransportError::Unreachable(err.to_string())
        })?;
        debug!(route = %request.route(), %status, bytes = text.len(), "reply received");

        serde_json::from_str(&text).map_err(|err| {
            warn!(route = %request.route(), %status, error = %err, "reply is not JSON");
            TransportError::InvalidJson(err.to_string())
        })
    }
}
