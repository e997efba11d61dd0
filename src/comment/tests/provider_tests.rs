//! Wire-level tests for the GitHub and Jira strategies.

use std::sync::Arc;

use crate::comment::{
    adapters::{GitHubCommentProvider, JiraCommentProvider, memory::RecordingTransport},
    domain::{
        Comment, CommentableRef, ExternalCommentId, NewComment, SyncTarget, TaskId, TrackedTask,
    },
    ports::{
        CommentSyncError, CommentSyncProvider, HttpAuth, HttpMethod, HttpResponse,
        TransportError,
    },
};
use crate::config::{GitHubSettings, JiraSettings};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Map, json};

const GITHUB_ISSUE_URL: &str = "https://github.com/acme/widgets/issues/42";
const JIRA_ISSUE_URL: &str = "https://acme.atlassian.net/browse/PROJ-7";

#[fixture]
fn transport() -> Arc<RecordingTransport> {
    Arc::new(RecordingTransport::new())
}

fn target(provider: &str, url: &str) -> SyncTarget {
    TrackedTask::new(TaskId::new(), "Tracked")
        .with_external_issue(provider, "EXT-1", url)
        .sync_target()
        .expect("fully tracked task")
}

fn comment(content: &str) -> Comment {
    Comment::new(
        NewComment {
            content: content.to_owned(),
            commentable: CommentableRef::task(TaskId::new()),
            parent_id: None,
            author_id: None,
            metadata: Map::new(),
        },
        &DefaultClock,
    )
    .expect("valid comment")
}

fn external_id(raw: &str) -> ExternalCommentId {
    ExternalCommentId::new(raw).expect("valid external id")
}

fn github(transport: &Arc<RecordingTransport>) -> GitHubCommentProvider<RecordingTransport> {
    GitHubCommentProvider::new(
        Arc::clone(transport),
        &GitHubSettings {
            token: Some("ghp_test".to_owned()),
            ..GitHubSettings::default()
        },
    )
}

fn jira(transport: &Arc<RecordingTransport>) -> JiraCommentProvider<RecordingTransport> {
    JiraCommentProvider::new(
        Arc::clone(transport),
        &JiraSettings {
            email: Some("bot@acme.test".to_owned()),
            token: Some("jira-token".to_owned()),
        },
    )
}

#[rstest]
#[tokio::test]
async fn github_create_posts_body_and_returns_remote_ids(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::json(
        201,
        &json!({"id": 999, "html_url": "https://github.com/acme/widgets/issues/42#comment-999"}),
    ));

    let remote = github(&transport)
        .create(&target("github", GITHUB_ISSUE_URL), &comment("LGTM"))
        .await
        .expect("create should succeed");

    assert_eq!(remote.external_id.as_str(), "999");
    assert_eq!(
        remote.external_url,
        "https://github.com/acme/widgets/issues/42#comment-999"
    );
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = requests.first().expect("one request");
    assert_eq!(request.method(), HttpMethod::Post);
    assert_eq!(
        request.url(),
        "https://api.github.com/repos/acme/widgets/issues/42/comments"
    );
    assert_eq!(request.body(), Some(&json!({"body": "LGTM"})));
    assert_eq!(request.auth(), &HttpAuth::Bearer("ghp_test".to_owned()));
    assert!(
        request
            .headers()
            .iter()
            .any(|(name, value)| name == "Accept" && value == "application/vnd.github+json")
    );
}

#[rstest]
#[tokio::test]
async fn github_update_patches_existing_comment(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::json(200, &json!({"id": 999})));

    github(&transport)
        .update(
            &target("github", GITHUB_ISSUE_URL),
            &external_id("999"),
            &comment("edited"),
        )
        .await
        .expect("update should succeed");

    let requests = transport.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.method(), HttpMethod::Patch);
    assert_eq!(
        request.url(),
        "https://api.github.com/repos/acme/widgets/issues/42/comments/999"
    );
    assert_eq!(request.body(), Some(&json!({"body": "edited"})));
}

#[rstest]
#[tokio::test]
async fn github_delete_sends_delete_without_body(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::new(204, ""));

    github(&transport)
        .delete(&target("github", GITHUB_ISSUE_URL), &external_id("999"))
        .await
        .expect("delete should succeed");

    let requests = transport.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.method(), HttpMethod::Delete);
    assert!(request.body().is_none());
}

#[rstest]
#[tokio::test]
async fn github_missing_token_fails_before_network(transport: Arc<RecordingTransport>) {
    let provider = GitHubCommentProvider::new(Arc::clone(&transport), &GitHubSettings::default());

    let result = provider
        .create(&target("github", GITHUB_ISSUE_URL), &comment("LGTM"))
        .await;

    assert!(matches!(
        result,
        Err(CommentSyncError::MissingCredentials { provider: "GitHub" })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[rstest]
#[tokio::test]
async fn github_invalid_url_fails_before_network(transport: Arc<RecordingTransport>) {
    let result = github(&transport)
        .create(
            &target("github", "https://github.com/acme/widgets/pull/42"),
            &comment("LGTM"),
        )
        .await;

    let err = result.expect_err("invalid URL must fail");
    assert!(err.is_pre_flight());
    assert!(err.to_string().contains("invalid GitHub URL format"));
    assert_eq!(transport.request_count(), 0);
}

#[rstest]
#[tokio::test]
async fn github_enterprise_issue_uses_configured_hosts(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::json(
        201,
        &json!({"id": 31, "html_url": "https://ghe.acme.corp/platform/api/issues/7#issuecomment-31"}),
    ));
    let provider = GitHubCommentProvider::new(
        Arc::clone(&transport),
        &GitHubSettings {
            token: Some("ghp_enterprise".to_owned()),
            api_base: "https://ghe.acme.corp/api/v3/".to_owned(),
            web_host: "ghe.acme.corp".to_owned(),
        },
    );

    let remote = provider
        .create(
            &target("github", "https://ghe.acme.corp/platform/api/issues/7"),
            &comment("Deployed"),
        )
        .await
        .expect("create should succeed");

    assert_eq!(remote.external_id.as_str(), "31");
    let requests = transport.requests();
    let request = requests.first().expect("one request");
    assert_eq!(
        request.url(),
        "https://ghe.acme.corp/api/v3/repos/platform/api/issues/7/comments"
    );
}

#[rstest]
#[tokio::test]
async fn github_default_host_rejects_enterprise_issue(transport: Arc<RecordingTransport>) {
    let result = github(&transport)
        .create(
            &target("github", "https://ghe.acme.corp/platform/api/issues/7"),
            &comment("Deployed"),
        )
        .await;

    let err = result.expect_err("foreign host must fail");
    assert!(err.is_pre_flight());
    assert_eq!(transport.request_count(), 0);
}

#[rstest]
#[tokio::test]
async fn github_error_status_is_reported(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::new(403, "Resource not accessible"));

    let result = github(&transport)
        .create(&target("github", GITHUB_ISSUE_URL), &comment("LGTM"))
        .await;

    assert!(matches!(
        result,
        Err(CommentSyncError::RemoteStatus {
            provider: "GitHub",
            action: "create",
            status: 403,
            ..
        })
    ));
}

#[rstest]
#[tokio::test]
async fn github_success_without_html_url_is_malformed(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::json(201, &json!({"id": 5})));

    let result = github(&transport)
        .create(&target("github", GITHUB_ISSUE_URL), &comment("LGTM"))
        .await;

    assert!(matches!(
        result,
        Err(CommentSyncError::MalformedResponse { provider: "GitHub", .. })
    ));
}

#[rstest]
#[tokio::test]
async fn github_network_failure_is_transport_error(transport: Arc<RecordingTransport>) {
    transport.push_failure(TransportError::network(std::io::Error::other("reset")));

    let result = github(&transport)
        .create(&target("github", GITHUB_ISSUE_URL), &comment("LGTM"))
        .await;

    assert!(matches!(result, Err(CommentSyncError::Transport(_))));
}

#[rstest]
#[tokio::test]
async fn jira_create_posts_adf_body_and_builds_focused_url(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::json(201, &json!({"id": "10042"})));

    let remote = jira(&transport)
        .create(&target("jira", JIRA_ISSUE_URL), &comment("Deployed to staging"))
        .await
        .expect("create should succeed");

    assert_eq!(remote.external_id.as_str(), "10042");
    assert_eq!(
        remote.external_url,
        "https://acme.atlassian.net/browse/PROJ-7?focusedCommentId=10042"
    );
    let requests = transport.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.method(), HttpMethod::Post);
    assert_eq!(
        request.url(),
        "https://acme.atlassian.net/rest/api/3/issue/PROJ-7/comment"
    );
    assert_eq!(
        request.body(),
        Some(&json!({
            "body": {
                "type": "doc",
                "version": 1,
                "content": [{
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "Deployed to staging"}]
                }]
            }
        }))
    );
    assert_eq!(
        request.auth(),
        &HttpAuth::Basic {
            username: "bot@acme.test".to_owned(),
            password: "jira-token".to_owned(),
        }
    );
}

#[rstest]
#[tokio::test]
async fn jira_update_puts_to_comment_id(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::json(200, &json!({"id": "10042"})));

    jira(&transport)
        .update(
            &target("jira", JIRA_ISSUE_URL),
            &external_id("10042"),
            &comment("edited"),
        )
        .await
        .expect("update should succeed");

    let requests = transport.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.method(), HttpMethod::Put);
    assert_eq!(
        request.url(),
        "https://acme.atlassian.net/rest/api/3/issue/PROJ-7/comment/10042"
    );
}

#[rstest]
#[tokio::test]
async fn jira_delete_targets_comment_id(transport: Arc<RecordingTransport>) {
    transport.push_response(HttpResponse::new(204, ""));

    jira(&transport)
        .delete(&target("jira", JIRA_ISSUE_URL), &external_id("10042"))
        .await
        .expect("delete should succeed");

    let requests = transport.requests();
    let request = requests.first().expect("one request");
    assert_eq!(request.method(), HttpMethod::Delete);
    assert_eq!(
        request.url(),
        "https://acme.atlassian.net/rest/api/3/issue/PROJ-7/comment/10042"
    );
}

#[rstest]
#[case::no_email(None, Some("token"))]
#[case::no_token(Some("bot@acme.test"), None)]
#[case::blank_token(Some("bot@acme.test"), Some("  "))]
#[tokio::test]
async fn jira_incomplete_credentials_fail_before_network(
    transport: Arc<RecordingTransport>,
    #[case] email: Option<&str>,
    #[case] token: Option<&str>,
) {
    let provider = JiraCommentProvider::new(
        Arc::clone(&transport),
        &JiraSettings {
            email: email.map(ToOwned::to_owned),
            token: token.map(ToOwned::to_owned),
        },
    );

    let result = provider
        .create(&target("jira", JIRA_ISSUE_URL), &comment("hi"))
        .await;

    assert!(matches!(
        result,
        Err(CommentSyncError::MissingCredentials { provider: "Jira" })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[rstest]
#[tokio::test]
async fn jira_url_without_browse_fails_before_network(transport: Arc<RecordingTransport>) {
    let result = jira(&transport)
        .create(
            &target("jira", "https://acme.atlassian.net/issues/PROJ-7"),
            &comment("hi"),
        )
        .await;

    assert!(matches!(result, Err(CommentSyncError::InvalidExternalUrl(_))));
    assert_eq!(transport.request_count(), 0);
}
