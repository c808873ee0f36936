use std::fs;
use std::path::Path;
use std::time::Duration;

use chat_engine::Credentials;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "chat_client.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
}

/// User-facing settings, stored as RON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    /// Log in with this nick on startup. Without it the session cookie must be set.
    pub nick: Option<String>,
    pub email: String,
    /// Raw `Set-Cookie`-style value seeded into the cookie jar, e.g. `user="..."`.
    pub session_cookie: Option<String>,
    pub title: String,
    pub viewport_rows: u32,
    pub backoff_floor_ms: u64,
    pub backoff_cap_ms: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let core = chat_core::ClientSettings::default();
        let engine = chat_engine::ClientSettings::default();
        Self {
            server_url: engine.base_url,
            nick: None,
            email: String::new(),
            session_cookie: None,
            title: "Chat".to_string(),
            viewport_rows: 24,
            backoff_floor_ms: duration_ms(core.backoff_floor),
            backoff_cap_ms: duration_ms(core.backoff_cap),
            request_timeout_secs: engine.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
            verbose: false,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl ClientConfig {
    /// Zero delays are raised to 1 so a failing server is never polled in a tight loop.
    pub fn core_settings(&self) -> chat_core::ClientSettings {
        chat_core::ClientSettings {
            backoff_floor: Duration::from_millis(self.backoff_floor_ms.max(1)),
            backoff_cap: Duration::from_millis(self.backoff_cap_ms.max(1)),
            ..chat_core::ClientSettings::default()
        }
    }

    pub fn engine_settings(&self) -> chat_engine::ClientSettings {
        chat_engine::ClientSettings {
            base_url: self.server_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..chat_engine::ClientSettings::default()
        }
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.nick
            .as_ref()
            .filter(|nick| !nick.trim().is_empty())
            .map(|nick| Credentials {
                nick: nick.clone(),
                email: self.email.clone(),
            })
    }
}

/// Reads the config at `path`. A missing file yields `Ok(None)`.
pub fn load_config(path: &Path) -> Result<Option<ClientConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
}
