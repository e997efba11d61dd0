//! Provider tags and synchronization actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External issue tracker a task is linked to.
///
/// Parsing never fails: unknown values are kept as
/// [`IssueProvider::Unsupported`] so dispatch can skip them with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueProvider {
    /// GitHub issues.
    #[serde(rename = "github")]
    GitHub,
    /// Jira Cloud issues.
    Jira,
    /// Any provider this crate cannot synchronize with.
    Unsupported(String),
}

impl IssueProvider {
    /// Parses a stored provider tag.
    ///
    /// Only the exact storage names `github` and `jira` select a strategy.
    /// Any other spelling, including a different case or padding, is kept
    /// verbatim as unsupported.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "github" => Self::GitHub,
            "jira" => Self::Jira,
            _ => Self::Unsupported(value.to_owned()),
        }
    }

    /// Returns provider name in canonical storage format.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GitHub => "github",
            Self::Jira => "jira",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Returns `true` for providers with a known strategy.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl From<&str> for IssueProvider {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for IssueProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Local mutation that triggered a synchronization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// A comment was created locally.
    Create,
    /// A comment's content was edited locally.
    Update,
    /// A comment was removed locally.
    Delete,
}

impl SyncAction {
    /// Returns the canonical action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
