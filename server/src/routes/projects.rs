//! Project routes — list, fetch, save, publish, export.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::auth::{AuthUser, MaybeAuthUser};
use crate::services::project::{self, ProjectDetail, ProjectError, ProjectSummary};
use crate::state::AppState;

fn project_error_to_status(error: &ProjectError) -> StatusCode {
    match error {
        ProjectError::NotFound(_) | ProjectError::NoCode => StatusCode::NOT_FOUND,
        ProjectError::Forbidden => StatusCode::FORBIDDEN,
        ProjectError::Database(e) => {
            tracing::error!(error = %e, "project store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/projects` — the caller's projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ProjectSummary>>, StatusCode> {
    let rows = project::list_projects(&state.pool, auth.user.id)
        .await
        .map_err(|e| project_error_to_status(&e))?;
    Ok(Json(rows))
}

/// `GET /api/projects/:id` — full project with conversation and versions.
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<ProjectDetail>, StatusCode> {
    let detail = project::get_project(&state.pool, project_id, auth.user.id)
        .await
        .map_err(|e| project_error_to_status(&e))?;
    Ok(Json(detail))
}

#[derive(Deserialize)]
pub struct SaveCodeBody {
    pub code: String,
}

/// `PUT /api/projects/:id/code` — persist code and append a version.
pub async fn save_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
    Json(body): Json<SaveCodeBody>,
) -> Result<StatusCode, StatusCode> {
    project::save_code(&state.pool, project_id, auth.user.id, &body.code)
        .await
        .map_err(|e| project_error_to_status(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/projects/:id/publish` — flip the publish flag.
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let is_published = project::toggle_publish(&state.pool, project_id, auth.user.id)
        .await
        .map_err(|e| project_error_to_status(&e))?;
    Ok(Json(serde_json::json!({ "is_published": is_published })))
}

/// `GET /api/projects/:id/export` — stored code as a `text/html` attachment.
///
/// Anonymous callers are allowed when the project is published; stripping
/// happens in the service layer.
pub async fn export(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Response, StatusCode> {
    let exported = project::export_code(&state.pool, project_id, user.map(|u| u.id))
        .await
        .map_err(|e| project_error_to_status(&e))?;

    let filename = format!("{}.html", slug(&exported.name));
    let response = (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        exported.code,
    )
        .into_response();
    Ok(response)
}

/// Reduce a project name to a safe attachment filename stem.
pub(crate) fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "project".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
