//! Shared fixtures for in-memory comment integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;
use teko::comment::{
    adapters::memory::{InMemoryCommentRepository, InMemoryTaskLookup, RecordingTransport},
    domain::{TaskId, TrackedTask},
    ports::HttpResponse,
    services::{CommentLifecycleService, ProviderRegistry},
};
use teko::config::{GitHubSettings, JiraSettings, SyncConfig};

/// Lifecycle service wired to in-memory adapters.
pub type TestService =
    CommentLifecycleService<InMemoryCommentRepository, InMemoryTaskLookup, DefaultClock>;

/// GitHub issue used by the seeded GitHub task.
pub const GITHUB_ISSUE_URL: &str = "https://github.com/acme/widgets/issues/42";

/// Jira ticket used by the seeded Jira task.
pub const JIRA_ISSUE_URL: &str = "https://acme.atlassian.net/browse/PROJ-7";

/// In-memory service plus handles for inspecting its collaborators.
pub struct SyncHarness {
    pub service: TestService,
    pub transport: Arc<RecordingTransport>,
    /// Task linked to [`GITHUB_ISSUE_URL`].
    pub github_task: TaskId,
    /// Task linked to [`JIRA_ISSUE_URL`].
    pub jira_task: TaskId,
    /// Task with no external issue.
    pub local_task: TaskId,
}

impl SyncHarness {
    /// Queues a successful GitHub create response.
    pub fn github_accepts(&self, id: u64) {
        self.transport.push_response(HttpResponse::json(
            201,
            &json!({
                "id": id,
                "html_url": format!("{GITHUB_ISSUE_URL}#issuecomment-{id}"),
            }),
        ));
    }

    /// Queues a successful Jira create response.
    pub fn jira_accepts(&self, id: &str) {
        self.transport
            .push_response(HttpResponse::json(201, &json!({"id": id})));
    }

    /// Queues an empty response with the given status.
    pub fn respond(&self, status: u16) {
        self.transport.push_response(HttpResponse::new(status, ""));
    }
}

/// Provides a harness with one GitHub task, one Jira task and one untracked
/// task, and credentials for both providers.
#[fixture]
pub fn harness() -> SyncHarness {
    let tasks = Arc::new(InMemoryTaskLookup::new());
    let github_task = TaskId::new();
    let jira_task = TaskId::new();
    let local_task = TaskId::new();
    for task in [
        TrackedTask::new(github_task, "Fix login").with_external_issue(
            "github",
            "42",
            GITHUB_ISSUE_URL,
        ),
        TrackedTask::new(jira_task, "Ship release").with_external_issue(
            "jira",
            "PROJ-7",
            JIRA_ISSUE_URL,
        ),
        TrackedTask::new(local_task, "Local chore"),
    ] {
        tasks.insert(task).expect("seed task");
    }

    let transport = Arc::new(RecordingTransport::new());
    let config = SyncConfig {
        github: GitHubSettings {
            token: Some("ghp_test".to_owned()),
            ..GitHubSettings::default()
        },
        jira: JiraSettings {
            email: Some("bot@acme.test".to_owned()),
            token: Some("jira-token".to_owned()),
        },
        ..SyncConfig::default()
    };
    let service = CommentLifecycleService::new(
        Arc::new(InMemoryCommentRepository::new()),
        tasks,
        ProviderRegistry::from_config(Arc::clone(&transport), &config),
        Arc::new(DefaultClock),
    );

    SyncHarness {
        service,
        transport,
        github_task,
        jira_task,
        local_task,
    }
}
