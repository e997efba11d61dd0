//! In-memory integration tests for comment lifecycle and mirroring.

use rstest::rstest;
use teko::comment::{
    domain::{CommentableRef, ExternalCommentId},
    ports::{CommentSyncError, HttpMethod},
    services::{CreateCommentRequest, SyncOutcome, UpdateCommentRequest},
};

use super::helpers::{GITHUB_ISSUE_URL, JIRA_ISSUE_URL, SyncHarness, harness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn jira_comment_lifecycle_uses_put_and_delete(harness: SyncHarness) {
    harness.jira_accepts("10042");
    let created = harness
        .service
        .create(CreateCommentRequest::new(
            CommentableRef::task(harness.jira_task),
            "Deployed to staging",
        ))
        .await
        .expect("create should succeed");
    assert_eq!(
        created.comment.sync_state().external_url(),
        Some(format!("{JIRA_ISSUE_URL}?focusedCommentId=10042").as_str())
    );

    harness.respond(200);
    let updated = harness
        .service
        .update(
            created.comment.id(),
            UpdateCommentRequest::new("Deployed to production"),
        )
        .await
        .expect("update should succeed");
    assert!(matches!(updated.sync, SyncOutcome::Updated));

    harness.respond(204);
    let deleted = harness
        .service
        .delete(created.comment.id())
        .await
        .expect("delete should succeed");
    assert!(matches!(deleted.sync, SyncOutcome::Deleted));

    let methods: Vec<HttpMethod> = harness
        .transport
        .requests()
        .iter()
        .map(|request| request.method())
        .collect();
    assert_eq!(
        methods,
        vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]
    );
    assert!(
        harness
            .transport
            .requests()
            .iter()
            .skip(1)
            .all(|request| request.url()
                == "https://acme.atlassian.net/rest/api/3/issue/PROJ-7/comment/10042")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_registry_routes_each_task_to_its_provider(harness: SyncHarness) {
    harness.github_accepts(1);
    harness.jira_accepts("2");

    let on_github = harness
        .service
        .create(CreateCommentRequest::new(
            CommentableRef::task(harness.github_task),
            "first",
        ))
        .await
        .expect("create should succeed");
    let on_jira = harness
        .service
        .create(CreateCommentRequest::new(
            CommentableRef::task(harness.jira_task),
            "second",
        ))
        .await
        .expect("create should succeed");

    assert_eq!(
        on_github.comment.sync_state().external_url(),
        Some(format!("{GITHUB_ISSUE_URL}#issuecomment-1").as_str())
    );
    assert_eq!(
        on_jira.comment.external_id().map(ExternalCommentId::as_str),
        Some("2")
    );
    let urls: Vec<String> = harness
        .transport
        .requests()
        .iter()
        .map(|request| request.url().to_owned())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://api.github.com/repos/acme/widgets/issues/42/comments".to_owned(),
            "https://acme.atlassian.net/rest/api/3/issue/PROJ-7/comment".to_owned(),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn untracked_task_comments_stay_local(harness: SyncHarness) {
    let created = harness
        .service
        .create(CreateCommentRequest::new(
            CommentableRef::task(harness.local_task),
            "note to self",
        ))
        .await
        .expect("create should succeed");
    let deleted = harness
        .service
        .delete(created.comment.id())
        .await
        .expect("delete should succeed");

    assert!(matches!(created.sync, SyncOutcome::NotApplicable));
    assert!(matches!(deleted.sync, SyncOutcome::NotApplicable));
    assert_eq!(harness.transport.request_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replies_are_mirrored_as_separate_comments(harness: SyncHarness) {
    harness.github_accepts(10);
    harness.github_accepts(11);
    let owner = CommentableRef::task(harness.github_task);
    let parent = harness
        .service
        .create(CreateCommentRequest::new(owner.clone(), "question"))
        .await
        .expect("parent create should succeed");

    let reply = harness
        .service
        .create(CreateCommentRequest::new(owner.clone(), "answer").with_parent(parent.comment.id()))
        .await
        .expect("reply create should succeed");

    assert_eq!(
        reply.comment.external_id().map(ExternalCommentId::as_str),
        Some("11")
    );
    let threads = harness
        .service
        .list_threads(&owner)
        .await
        .expect("listing should succeed");
    assert_eq!(threads.len(), 1);
    let thread = threads.first().expect("one thread");
    assert_eq!(thread.comment.id(), parent.comment.id());
    assert_eq!(thread.replies.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_rejection_is_reported_with_status(harness: SyncHarness) {
    harness.respond(401);

    let created = harness
        .service
        .create(CreateCommentRequest::new(
            CommentableRef::task(harness.github_task),
            "denied",
        ))
        .await
        .expect("local create must succeed");

    let Some(CommentSyncError::RemoteStatus { status, action, .. }) = created.sync.error() else {
        panic!("expected remote status error, got {:?}", created.sync);
    };
    assert_eq!(*status, 401);
    assert_eq!(*action, "create");
    assert!(
        harness
            .service
            .find_by_id(created.comment.id())
            .await
            .expect("lookup should succeed")
            .is_some()
    );
}
