//! Response checks shared by the provider strategies.

use serde_json::Value;

use crate::comment::{
    domain::ExternalCommentId,
    ports::{CommentSyncError, HttpResponse},
};

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Turns a non-2xx response into [`CommentSyncError::RemoteStatus`].
pub(super) fn ensure_success(
    provider: &'static str,
    action: &'static str,
    response: HttpResponse,
) -> Result<HttpResponse, CommentSyncError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(CommentSyncError::RemoteStatus {
        provider,
        action,
        status: response.status(),
        body: truncate_for_error(response.body()),
    })
}

/// Reads the comment `id` field, which GitHub sends as a number and Jira as a
/// string.
pub(super) fn external_id_field(
    provider: &'static str,
    body: &Value,
) -> Result<ExternalCommentId, CommentSyncError> {
    let raw = match body.get("id") {
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) => text.clone(),
        _ => {
            return Err(CommentSyncError::MalformedResponse {
                provider,
                reason: "missing comment id".to_owned(),
            });
        }
    };
    ExternalCommentId::new(raw).map_err(|err| CommentSyncError::MalformedResponse {
        provider,
        reason: err.to_string(),
    })
}

/// Decodes a success body as JSON.
pub(super) fn json_body(
    provider: &'static str,
    response: &HttpResponse,
) -> Result<Value, CommentSyncError> {
    response
        .decode::<Value>()
        .map_err(|err| CommentSyncError::MalformedResponse {
            provider,
            reason: err.to_string(),
        })
}

fn truncate_for_error(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_owned();
    }
    let mut truncated: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}
