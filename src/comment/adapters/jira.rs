//! Jira Cloud issue-comment strategy.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::remote::{ensure_success, external_id_field, json_body};
use crate::comment::{
    domain::{
        AdfDocument, Comment, ExternalCommentId, IssueProvider, JiraIssueLocator, RemoteComment,
        SyncTarget,
    },
    ports::{
        CommentSyncError, CommentSyncProvider, CommentSyncResult, HttpAuth, HttpMethod,
        HttpRequest, HttpTransport,
    },
};
use crate::config::JiraSettings;

const PROVIDER: &str = "Jira";

#[derive(Clone)]
struct JiraCredentials {
    email: String,
    token: String,
}

/// Mirrors comments to a Jira Cloud issue using ADF bodies.
#[derive(Clone)]
pub struct JiraCommentProvider<T>
where
    T: HttpTransport,
{
    transport: Arc<T>,
    credentials: Option<JiraCredentials>,
}

impl<T> JiraCommentProvider<T>
where
    T: HttpTransport,
{
    /// Creates a strategy using the given settings.
    ///
    /// Both email and token must be set; otherwise every call fails with
    /// [`CommentSyncError::MissingCredentials`].
    #[must_use]
    pub fn new(transport: Arc<T>, settings: &JiraSettings) -> Self {
        let non_blank = |value: Option<&String>| {
            value
                .map(|inner| inner.trim().to_owned())
                .filter(|inner| !inner.is_empty())
        };
        let credentials = non_blank(settings.email.as_ref())
            .zip(non_blank(settings.token.as_ref()))
            .map(|(email, token)| JiraCredentials { email, token });
        Self {
            transport,
            credentials,
        }
    }

    fn prepare(&self, target: &SyncTarget) -> CommentSyncResult<(String, HttpAuth)> {
        let issue = JiraIssueLocator::parse(target.external_url())?;
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(CommentSyncError::MissingCredentials { provider: PROVIDER })?;
        let endpoint = format!(
            "https://{}/rest/api/3/issue/{}/comment",
            issue.domain(),
            issue.issue_key()
        );
        let auth = HttpAuth::Basic {
            username: credentials.email.clone(),
            password: credentials.token.clone(),
        };
        Ok((endpoint, auth))
    }

    fn body(comment: &Comment) -> serde_json::Value {
        json!({ "body": AdfDocument::paragraph(comment.content()) })
    }
}

#[async_trait]
impl<T> CommentSyncProvider for JiraCommentProvider<T>
where
    T: HttpTransport,
{
    fn provider(&self) -> IssueProvider {
        IssueProvider::Jira
    }

    async fn create(
        &self,
        target: &SyncTarget,
        comment: &Comment,
    ) -> CommentSyncResult<RemoteComment> {
        let (endpoint, auth) = self.prepare(target)?;
        let request =
            HttpRequest::new(HttpMethod::Post, endpoint, auth).with_json(Self::body(comment));
        let response = ensure_success(PROVIDER, "create", self.transport.send(request).await?)?;

        let body = json_body(PROVIDER, &response)?;
        let external_id = external_id_field(PROVIDER, &body)?;
        let external_url = format!(
            "{}?focusedCommentId={external_id}",
            target.external_url()
        );
        Ok(RemoteComment {
            external_id,
            external_url,
        })
    }

    async fn update(
        &self,
        target: &SyncTarget,
        external_id: &ExternalCommentId,
        comment: &Comment,
    ) -> CommentSyncResult<()> {
        let (endpoint, auth) = self.prepare(target)?;
        let request = HttpRequest::new(HttpMethod::Put, format!("{endpoint}/{external_id}"), auth)
            .with_json(Self::body(comment));
        ensure_success(PROVIDER, "update", self.transport.send(request).await?)?;
        Ok(())
    }

    async fn delete(
        &self,
        target: &SyncTarget,
        external_id: &ExternalCommentId,
    ) -> CommentSyncResult<()> {
        let (endpoint, auth) = self.prepare(target)?;
        let request = HttpRequest::new(HttpMethod::Delete, format!("{endpoint}/{external_id}"), auth);
        ensure_success(PROVIDER, "delete", self.transport.send(request).await?)?;
        Ok(())
    }
}
