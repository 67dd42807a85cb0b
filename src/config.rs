// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client configuration resolved from CLI flags, environment, and defaults.

use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const SERVER_URL_ENV: &str = "EGVIZ_SERVER";
pub const LOG_DIR_ENV: &str = "EGVIZ_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    server_url: String,
    log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { server_url: DEFAULT_SERVER_URL.to_owned(), log_dir: None }
    }
}

impl ClientConfig {
    /// Flags win over environment values, which win over defaults.
    pub fn resolve(
        server_flag: Option<String>,
        log_dir_flag: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let server_url = server_flag
            .or_else(|| env(SERVER_URL_ENV).filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned());
        let log_dir = log_dir_flag.or_else(|| {
            env(LOG_DIR_ENV).filter(|value| !value.trim().is_empty()).map(PathBuf::from)
        });

        let mut config = Self { server_url: normalize_server_url(&server_url)?, log_dir };
        if config.log_dir.as_deref().is_some_and(|dir| dir.as_os_str().is_empty()) {
            config.log_dir = None;
        }
        Ok(config)
    }

    pub fn from_env(
        server_flag: Option<String>,
        log_dir_flag: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::resolve(server_flag, log_dir_flag, |key| std::env::var(key).ok())
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidServerUrl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidServerUrl { value } => {
                write!(f, "server url must start with http:// or https:// (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn normalize_server_url(value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let has_scheme = ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme));
    if !has_scheme {
        return Err(ConfigError::InvalidServerUrl { value: value.to_owned() });
    }
    Ok(value.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use super::{ClientConfig, ConfigError, DEFAULT_SERVER_URL, LOG_DIR_ENV, SERVER_URL_ENV};
    use std::path::{Path, PathBuf};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_to_local_engine() {
        let config = ClientConfig::resolve(None, None, no_env).expect("config");
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.log_dir(), None);
    }

    #[test]
    fn flag_beats_environment() {
        let env = |key: &str| match key {
            SERVER_URL_ENV => Some("http://env:9000".to_owned()),
            LOG_DIR_ENV => Some("/tmp/env-logs".to_owned()),
            _ => None,
        };
        let config = ClientConfig::resolve(Some("http://flag:1/".to_owned()), None, env)
            .expect("config");
        assert_eq!(config.server_url(), "http://flag:1");
        assert_eq!(config.log_dir(), Some(Path::new("/tmp/env-logs")));

        let config =
            ClientConfig::resolve(None, Some(PathBuf::from("/tmp/flag-logs")), env).expect("config");
        assert_eq!(config.server_url(), "http://env:9000");
        assert_eq!(config.log_dir(), Some(Path::new("/tmp/flag-logs")));
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let env = |_: &str| Some("  ".to_owned());
        let config = ClientConfig::resolve(None, None, env).expect("config");
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn rejects_urls_without_http_scheme() {
        let err = ClientConfig::resolve(Some("127.0.0.1:8000".to_owned()), None, no_env)
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidServerUrl { value: "127.0.0.1:8000".to_owned() });
        ClientConfig::resolve(Some("http://".to_owned()), None, no_env).unwrap_err();
    }
}
