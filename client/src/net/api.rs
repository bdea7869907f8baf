//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, always with
//! credentials so the session cookie rides along. Server-side: stubs
//! returning `None`/error since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so fetch failures
//! degrade UI behavior without crashing the app.

#![allow(clippy::unused_async)]

use uuid::Uuid;

use super::types::{ProjectDetail, ProjectSummary, User};

#[cfg(feature = "hydrate")]
use super::types::{PublishResponse, SessionEnvelope};

#[cfg(feature = "hydrate")]
fn get(url: &str) -> gloo_net::http::RequestBuilder {
    gloo_net::http::Request::get(url).credentials(web_sys::RequestCredentials::Include)
}

#[cfg(feature = "hydrate")]
fn post(url: &str) -> gloo_net::http::RequestBuilder {
    gloo_net::http::Request::post(url).credentials(web_sys::RequestCredentials::Include)
}

/// Read `{"error": "..."}` from a failed response, falling back to the status.
#[cfg(feature = "hydrate")]
async fn error_body(resp: gloo_net::http::Response) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }
    match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed: {}", resp.status()),
    }
}

/// Probe `/api/auth/get-session`. Returns `None` when anonymous or on error.
pub async fn fetch_session() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = get("/api/auth/get-session").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<SessionEnvelope>().await.ok()?.user
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in with email and password.
///
/// # Errors
///
/// Returns the server's error message when the credentials are rejected.
pub async fn sign_in(email: &str, password: &str) -> Result<User, String> {
    credential_request("/api/auth/sign-in/email", None, email, password).await
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns the server's error message when the account cannot be created.
pub async fn sign_up(name: &str, email: &str, password: &str) -> Result<User, String> {
    credential_request("/api/auth/sign-up/email", Some(name), email, password).await
}

async fn credential_request(
    url: &str,
    name: Option<&str>,
    email: &str,
    password: &str,
) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = serde_json::json!({
            "name": name.unwrap_or_default(),
            "email": email,
            "password": password,
        });
        let resp = post(url)
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_body(resp).await);
        }
        let envelope: SessionEnvelope = resp.json().await.map_err(|e| e.to_string())?;
        envelope.user.ok_or_else(|| "no user in response".to_owned())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, name, email, password);
        Err("not available on server".to_owned())
    }
}

/// End the session via `POST /api/auth/sign-out`.
pub async fn sign_out() {
    #[cfg(feature = "hydrate")]
    {
        let _ = post("/api/auth/sign-out").send().await;
    }
}

/// Fetch the caller's projects.
///
/// # Errors
///
/// Returns a display-ready message when the list cannot be loaded.
pub async fn fetch_projects() -> Result<Vec<ProjectSummary>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = get("/api/projects").send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(match resp.status() {
                401 => "sign in to see your projects".to_owned(),
                status => format!("request failed: {status}"),
            });
        }
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch one project with its conversation and versions.
///
/// # Errors
///
/// Returns a display-ready message when the project cannot be loaded.
pub async fn fetch_project(project_id: Uuid) -> Result<ProjectDetail, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/projects/{project_id}");
        let resp = get(&url).send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(match resp.status() {
                401 => "sign in to open this project".to_owned(),
                403 => "this project belongs to another account".to_owned(),
                404 => "project not found".to_owned(),
                status => format!("request failed: {status}"),
            });
        }
        resp.json().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = project_id;
        Err("not available on server".to_owned())
    }
}

/// Persist the project's code via `PUT /api/projects/{id}/code`.
///
/// # Errors
///
/// Returns an error string when the save is rejected.
pub async fn save_code(project_id: Uuid, code: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/projects/{project_id}/code");
        let body = serde_json::json!({ "code": code });
        let resp = gloo_net::http::Request::put(&url)
            .credentials(web_sys::RequestCredentials::Include)
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if resp.ok() {
            Ok(())
        } else {
            Err(format!("save failed: {}", resp.status()))
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (project_id, code);
        Err("not available on server".to_owned())
    }
}

/// Fetch a project's exported HTML, as served to downloads.
///
/// Anonymous callers succeed only for published projects.
///
/// # Errors
///
/// Returns a display-ready message when the export is unavailable.
pub async fn fetch_export(project_id: Uuid) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/projects/{project_id}/export");
        let resp = get(&url).send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(match resp.status() {
                403 | 404 => "this site is not published".to_owned(),
                status => format!("request failed: {status}"),
            });
        }
        resp.text().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = project_id;
        Err("not available on server".to_owned())
    }
}

/// Flip the publish flag. Returns the new state.
///
/// # Errors
///
/// Returns an error string when the request is rejected.
pub async fn toggle_publish(project_id: Uuid) -> Result<bool, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("/api/projects/{project_id}/publish");
        let resp = post(&url).send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("publish failed: {}", resp.status()));
        }
        let body: PublishResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.is_published)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = project_id;
        Err("not available on server".to_owned())
    }
}
