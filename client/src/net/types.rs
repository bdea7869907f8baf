//! Wire types for the REST API.
//!
//! Field names and shapes mirror the server's JSON responses exactly; these
//! types only ever deserialize in the client, so they carry no skip/rename
//! attributes beyond what the server emits.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::Deserialize;
use uuid::Uuid;

/// Authenticated account as returned inside auth responses.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Envelope for `get-session` and the credential endpoints: `{"user": ...}`
/// where `user` is `null` for anonymous callers.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionEnvelope {
    pub user: Option<User>,
}

/// One row of `GET /api/projects`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub updated_at: i64,
}

/// Full payload of `GET /api/projects/{id}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProjectDetail {
    pub id: Uuid,
    pub name: String,
    pub current_code: Option<String>,
    pub is_published: bool,
    pub conversation: Vec<ConversationMessage>,
    pub versions: Vec<ProjectVersion>,
}

/// One turn of the build conversation, oldest first.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: String,
    pub content: String,
    pub created_at: i64,
}

/// One saved code snapshot, newest first.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ProjectVersion {
    pub id: Uuid,
    pub code: String,
    pub created_at: i64,
}

/// Response of `POST /api/projects/{id}/publish`.
#[derive(Clone, Debug, Deserialize)]
pub struct PublishResponse {
    pub is_published: bool,
}
