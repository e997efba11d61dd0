//! Provider credentials and transport settings.
//!
//! Settings are resolved once by the host application and injected into the
//! provider strategies; nothing in the crate reads process state on its own.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::comment::domain::GITHUB_WEB_HOST;

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// Default timeout applied to every provider call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the GitHub token.
pub const ENV_GITHUB_TOKEN: &str = "TEKO_GITHUB_TOKEN";
/// Environment variable overriding the GitHub API base URL.
pub const ENV_GITHUB_API_BASE: &str = "TEKO_GITHUB_API_BASE";
/// Environment variable naming the web host of GitHub issue links.
pub const ENV_GITHUB_WEB_HOST: &str = "TEKO_GITHUB_WEB_HOST";
/// Environment variable holding the Jira account email.
pub const ENV_JIRA_EMAIL: &str = "TEKO_JIRA_EMAIL";
/// Environment variable holding the Jira API token.
pub const ENV_JIRA_TOKEN: &str = "TEKO_JIRA_TOKEN";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_SYNC_TIMEOUT_SECS: &str = "TEKO_SYNC_TIMEOUT_SECS";

/// GitHub settings.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// Bearer token; `None` disables GitHub sync.
    pub token: Option<String>,
    /// REST API base URL.
    pub api_base: String,
    /// Host that serves issue links, e.g. a GitHub Enterprise Server name.
    pub web_host: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: None,
            api_base: DEFAULT_GITHUB_API_BASE.to_owned(),
            web_host: GITHUB_WEB_HOST.to_owned(),
        }
    }
}

impl fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("web_host", &self.web_host)
            .finish()
    }
}

/// Jira Cloud settings.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JiraSettings {
    /// Account email used for basic auth.
    pub email: Option<String>,
    /// API token used for basic auth.
    pub token: Option<String>,
}

impl fmt::Debug for JiraSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraSettings")
            .field("email", &self.email)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Settings for the comment synchronization workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// GitHub settings.
    pub github: GitHubSettings,
    /// Jira settings.
    pub jira: JiraSettings,
    /// Timeout applied to each outbound call.
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            github: GitHubSettings::default(),
            jira: JiraSettings::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SyncConfig {
    /// Reads settings from `TEKO_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// Blank values count as unset. An unparsable timeout falls back to
    /// [`DEFAULT_REQUEST_TIMEOUT`].
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let request_timeout = read(ENV_SYNC_TIMEOUT_SECS)
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs);

        Self {
            github: GitHubSettings {
                token: read(ENV_GITHUB_TOKEN),
                api_base: read(ENV_GITHUB_API_BASE)
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_owned()),
                web_host: read(ENV_GITHUB_WEB_HOST)
                    .unwrap_or_else(|| GITHUB_WEB_HOST.to_owned()),
            },
            jira: JiraSettings {
                email: read(ENV_JIRA_EMAIL),
                token: read(ENV_JIRA_TOKEN),
            },
            request_timeout,
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
