//! Issue locators parsed from the external URL stored on a task.

use super::IssueUrlError;
use regex::Regex;
use std::sync::LazyLock;

/// Web host of public GitHub issue links.
pub const GITHUB_WEB_HOST: &str = "github.com";

#[expect(clippy::expect_used, reason = "literal pattern covered by locator tests")]
static GITHUB_ISSUE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:https?://)?([^/\s]+)/([^/\s]+)/([^/\s]+)/issues/(\d+)")
        .expect("GitHub issue pattern compiles")
});

#[expect(clippy::expect_used, reason = "literal pattern covered by locator tests")]
static JIRA_ISSUE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://([^/]+)/browse/([^/?#]+)").expect("Jira browse pattern compiles")
});

/// GitHub issue coordinates extracted from
/// `https://<host>/<owner>/<repo>/issues/<number>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubIssueLocator {
    host: String,
    owner: String,
    repo: String,
    issue_number: u64,
}

impl GitHubIssueLocator {
    /// Parses a public `github.com` issue URL.
    ///
    /// # Errors
    ///
    /// Returns [`IssueUrlError`] when the URL is not an issue link on
    /// [`GITHUB_WEB_HOST`].
    pub fn parse(url: &str) -> Result<Self, IssueUrlError> {
        Self::parse_on_host(url, GITHUB_WEB_HOST)
    }

    /// Parses an issue URL served by `web_host`, such as a GitHub
    /// Enterprise Server instance.
    ///
    /// Subdomains of `web_host` are accepted too. Hosts compare
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`IssueUrlError`] when the URL does not contain an
    /// owner/repo/issues/number path on `web_host`.
    pub fn parse_on_host(url: &str, web_host: &str) -> Result<Self, IssueUrlError> {
        let invalid = || IssueUrlError {
            provider: "GitHub",
            url: url.to_owned(),
        };
        let captures = GITHUB_ISSUE_URL.captures(url).ok_or_else(invalid)?;
        let (Some(host), Some(owner), Some(repo), Some(number)) = (
            captures.get(1),
            captures.get(2),
            captures.get(3),
            captures.get(4),
        ) else {
            return Err(invalid());
        };
        if !host_matches(host.as_str(), web_host) {
            return Err(invalid());
        }
        let issue_number = number.as_str().parse().map_err(|_| invalid())?;
        Ok(Self {
            host: host.as_str().to_ascii_lowercase(),
            owner: owner.as_str().to_owned(),
            repo: repo.as_str().to_owned(),
            issue_number,
        })
    }

    /// Returns the web host the issue lives on.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn issue_number(&self) -> u64 {
        self.issue_number
    }
}

/// Jira issue coordinates extracted from `https://<domain>/browse/<KEY>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraIssueLocator {
    domain: String,
    issue_key: String,
}

impl JiraIssueLocator {
    /// Parses a Jira browse URL.
    ///
    /// # Errors
    ///
    /// Returns [`IssueUrlError`] when the URL is not an https `/browse/` link.
    pub fn parse(url: &str) -> Result<Self, IssueUrlError> {
        let invalid = || IssueUrlError {
            provider: "Jira",
            url: url.to_owned(),
        };
        let captures = JIRA_ISSUE_URL.captures(url).ok_or_else(invalid)?;
        let (Some(domain), Some(issue_key)) = (captures.get(1), captures.get(2)) else {
            return Err(invalid());
        };
        Ok(Self {
            domain: domain.as_str().to_owned(),
            issue_key: issue_key.as_str().to_owned(),
        })
    }

    /// Returns the Jira site host.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the issue key, e.g. `PROJ-7`.
    #[must_use]
    pub fn issue_key(&self) -> &str {
        &self.issue_key
    }
}

fn host_matches(host: &str, web_host: &str) -> bool {
    let actual = host.to_ascii_lowercase();
    let expected = web_host.trim().to_ascii_lowercase();
    !expected.is_empty()
        && (actual == expected
            || actual
                .strip_suffix(expected.as_str())
                .is_some_and(|prefix| prefix.ends_with('.')))
}
