//! Project service — listing, fetching, saving, publishing, exporting.
//!
//! DESIGN
//! ======
//! Projects are owner-scoped rows holding the latest generated HTML in
//! `current_code`. Every save appends a version row, so earlier generations
//! stay recoverable. Export is the one operation with anonymous access:
//! published projects export without a session, everything else requires the
//! owner. Timestamps are surfaced as epoch seconds computed in SQL.

use sqlx::{PgPool, Row};
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("project not found: {0}")]
    NotFound(Uuid),
    #[error("not the project owner")]
    Forbidden,
    #[error("project has no code yet")]
    NoCode,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Summary row for the project list.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    /// Last update, epoch seconds.
    pub updated_at: i64,
}

/// Full project payload for the editor view.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectDetail {
    pub id: Uuid,
    pub name: String,
    pub current_code: Option<String>,
    pub is_published: bool,
    pub conversation: Vec<ConversationMessage>,
    pub versions: Vec<ProjectVersion>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: String,
    pub content: String,
    /// Creation time, epoch seconds.
    pub created_at: i64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectVersion {
    pub id: Uuid,
    pub code: String,
    /// Creation time, epoch seconds.
    pub created_at: i64,
}

/// Export artifact: the stored code with instrumentation stripped, plus the
/// project name for the attachment filename.
#[derive(Debug, Clone)]
pub struct ExportedProject {
    pub name: String,
    pub code: String,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// List the caller's projects, most recently updated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_projects(pool: &PgPool, owner_id: Uuid) -> Result<Vec<ProjectSummary>, ProjectError> {
    let rows = sqlx::query(
        "SELECT id, name, is_published, extract(epoch FROM updated_at)::bigint AS updated_at
         FROM projects
         WHERE owner_id = $1
         ORDER BY updated_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| ProjectSummary {
            id: r.get("id"),
            name: r.get("name"),
            is_published: r.get("is_published"),
            updated_at: r.get("updated_at"),
        })
        .collect())
}

/// Fetch one project with its conversation transcript and saved versions.
///
/// # Errors
///
/// Returns [`ProjectError::NotFound`] for a missing project,
/// [`ProjectError::Forbidden`] when the caller is not the owner, and a
/// database error otherwise.
pub async fn get_project(pool: &PgPool, project_id: Uuid, owner_id: Uuid) -> Result<ProjectDetail, ProjectError> {
    let row = sqlx::query(
        "SELECT owner_id, name, current_code, is_published FROM projects WHERE id = $1",
    )
    .bind(project_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ProjectError::NotFound(project_id))?;

    let row_owner: Uuid = row.get("owner_id");
    if row_owner != owner_id {
        return Err(ProjectError::Forbidden);
    }

    let conversation = sqlx::query(
        "SELECT id, role, content, extract(epoch FROM created_at)::bigint AS created_at
         FROM conversation_messages
         WHERE project_id = $1
         ORDER BY created_at ASC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|r| ConversationMessage {
        id: r.get("id"),
        role: r.get("role"),
        content: r.get("content"),
        created_at: r.get("created_at"),
    })
    .collect();

    let versions = sqlx::query(
        "SELECT id, code, extract(epoch FROM created_at)::bigint AS created_at
         FROM project_versions
         WHERE project_id = $1
         ORDER BY created_at DESC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|r| ProjectVersion { id: r.get("id"), code: r.get("code"), created_at: r.get("created_at") })
    .collect();

    Ok(ProjectDetail {
        id: project_id,
        name: row.get("name"),
        current_code: row.get("current_code"),
        is_published: row.get("is_published"),
        conversation,
        versions,
    })
}

/// Persist new code for a project and append a version row.
///
/// The update and the version insert commit together: a save either stores
/// the code with its matching version row or leaves the project untouched.
///
/// # Errors
///
/// Returns [`ProjectError::NotFound`] when the project does not exist or is
/// not owned by the caller, and a database error otherwise.
pub async fn save_code(pool: &PgPool, project_id: Uuid, owner_id: Uuid, code: &str) -> Result<(), ProjectError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE projects SET current_code = $3, updated_at = now() WHERE id = $1 AND owner_id = $2",
    )
    .bind(project_id)
    .bind(owner_id)
    .bind(code)
    .execute(tx.as_mut())
    .await?;

    if updated.rows_affected() == 0 {
        return Err(ProjectError::NotFound(project_id));
    }

    sqlx::query("INSERT INTO project_versions (id, project_id, code) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(project_id)
        .bind(code)
        .execute(tx.as_mut())
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Flip the publish flag, returning the new value.
///
/// # Errors
///
/// Returns [`ProjectError::NotFound`] when the project does not exist or is
/// not owned by the caller, and a database error otherwise.
pub async fn toggle_publish(pool: &PgPool, project_id: Uuid, owner_id: Uuid) -> Result<bool, ProjectError> {
    let row = sqlx::query(
        "UPDATE projects SET is_published = NOT is_published, updated_at = now()
         WHERE id = $1 AND owner_id = $2
         RETURNING is_published",
    )
    .bind(project_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ProjectError::NotFound(project_id))?;

    Ok(row.get("is_published"))
}

/// Export a project's stored code as a static artifact.
///
/// Instrumentation is stripped here as a second enforcement point — the
/// client already strips before saving, but stored code from any source must
/// never export editing chrome. Published projects export for anyone;
/// unpublished ones only for the owner.
///
/// # Errors
///
/// Returns [`ProjectError::NotFound`], [`ProjectError::Forbidden`], or
/// [`ProjectError::NoCode`] per the rules above, and a database error
/// otherwise.
pub async fn export_code(
    pool: &PgPool,
    project_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<ExportedProject, ProjectError> {
    let row = sqlx::query("SELECT owner_id, name, current_code, is_published FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ProjectError::NotFound(project_id))?;

    let owner_id: Uuid = row.get("owner_id");
    let is_published: bool = row.get("is_published");
    if !is_published && viewer_id != Some(owner_id) {
        return Err(ProjectError::Forbidden);
    }

    let code: Option<String> = row.get("current_code");
    let code = code.filter(|c| !c.is_empty()).ok_or(ProjectError::NoCode)?;

    Ok(ExportedProject {
        name: row.get("name"),
        code: preview::instrument::strip_html(&code),
    })
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
