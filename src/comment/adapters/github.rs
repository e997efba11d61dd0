//! GitHub issue-comment strategy.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::remote::{ensure_success, external_id_field, json_body};
use crate::comment::{
    domain::{
        Comment, ExternalCommentId, GitHubIssueLocator, IssueProvider, RemoteComment, SyncTarget,
    },
    ports::{
        CommentSyncError, CommentSyncProvider, CommentSyncResult, HttpAuth, HttpMethod,
        HttpRequest, HttpTransport,
    },
};
use crate::config::GitHubSettings;

const PROVIDER: &str = "GitHub";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Mirrors comments to the comment thread of a GitHub issue.
#[derive(Clone)]
pub struct GitHubCommentProvider<T>
where
    T: HttpTransport,
{
    transport: Arc<T>,
    token: Option<String>,
    api_base: String,
    web_host: String,
}

impl<T> GitHubCommentProvider<T>
where
    T: HttpTransport,
{
    /// Creates a strategy using the given settings.
    #[must_use]
    pub fn new(transport: Arc<T>, settings: &GitHubSettings) -> Self {
        Self {
            transport,
            token: settings
                .token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(ToOwned::to_owned),
            api_base: settings.api_base.trim_end_matches('/').to_owned(),
            web_host: settings.web_host.trim().to_owned(),
        }
    }

    /// Resolves the comments endpoint and auth for a target, failing before
    /// any network access when either is unavailable.
    fn prepare(&self, target: &SyncTarget) -> CommentSyncResult<(String, HttpAuth)> {
        let issue = GitHubIssueLocator::parse_on_host(target.external_url(), &self.web_host)?;
        let token = self
            .token
            .as_ref()
            .ok_or(CommentSyncError::MissingCredentials { provider: PROVIDER })?;
        let endpoint = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base,
            issue.owner(),
            issue.repo(),
            issue.issue_number()
        );
        Ok((endpoint, HttpAuth::Bearer(token.clone())))
    }

    fn request(method: HttpMethod, url: String, auth: HttpAuth) -> HttpRequest {
        HttpRequest::new(method, url, auth)
            .with_header("Accept", GITHUB_ACCEPT)
            .with_header("X-GitHub-Api-Version", GITHUB_API_VERSION)
    }
}

#[async_trait]
impl<T> CommentSyncProvider for GitHubCommentProvider<T>
where
    T: HttpTransport,
{
    fn provider(&self) -> IssueProvider {
        IssueProvider::GitHub
    }

    async fn create(
        &self,
        target: &SyncTarget,
        comment: &Comment,
    ) -> CommentSyncResult<RemoteComment> {
        let (endpoint, auth) = self.prepare(target)?;
        let request = Self::request(HttpMethod::Post, endpoint, auth)
            .with_json(json!({ "body": comment.content() }));
        let response = ensure_success(PROVIDER, "create", self.transport.send(request).await?)?;

        let body = json_body(PROVIDER, &response)?;
        let external_id = external_id_field(PROVIDER, &body)?;
        let external_url = body
            .get("html_url")
            .and_then(serde_json::Value::as_str)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CommentSyncError::MalformedResponse {
                provider: PROVIDER,
                reason: "missing html_url".to_owned(),
            })?;

        Ok(RemoteComment {
            external_id,
            external_url: external_url.to_owned(),
        })
    }

    async fn update(
        &self,
        target: &SyncTarget,
        external_id: &ExternalCommentId,
        comment: &Comment,
    ) -> CommentSyncResult<()> {
        let (endpoint, auth) = self.prepare(target)?;
        let request = Self::request(HttpMethod::Patch, format!("{endpoint}/{external_id}"), auth)
            .with_json(json!({ "body": comment.content() }));
        ensure_success(PROVIDER, "update", self.transport.send(request).await?)?;
        Ok(())
    }

    async fn delete(
        &self,
        target: &SyncTarget,
        external_id: &ExternalCommentId,
    ) -> CommentSyncResult<()> {
        let (endpoint, auth) = self.prepare(target)?;
        let request = Self::request(HttpMethod::Delete, format!("{endpoint}/{external_id}"), auth);
        ensure_success(PROVIDER, "delete", self.transport.send(request).await?)?;
        Ok(())
    }
}
