//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server is a pure REST API: the browser client is served from its own
//! origin, so every browser-facing route sits behind a credentialed CORS
//! allow-list (`TRUSTED_ORIGINS`). `/api/auth/*` is a single wildcard that
//! delegates to the identity-provider dispatch; everything else is the
//! project surface.

pub mod auth;
pub mod projects;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::response::Json;
use axum::routing::{any, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Parse a comma-separated origin list, dropping empty and malformed entries.
fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|origin| {
            let origin = origin.trim();
            if origin.is_empty() {
                return None;
            }
            HeaderValue::from_str(origin).ok()
        })
        .collect()
}

fn trusted_origins() -> Vec<HeaderValue> {
    parse_origins(&std::env::var("TRUSTED_ORIGINS").unwrap_or_default())
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    // Credentialed CORS: only origins on the allow-list may send the session
    // cookie. A wildcard origin is not valid with credentials.
    let cors = CorsLayer::new()
        .allow_origin(trusted_origins())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .route("/api/auth/{*action}", any(auth::dispatch))
        .route("/api/projects", get(projects::list_projects))
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/api/projects/{id}/code", put(projects::save_code))
        .route("/api/projects/{id}/publish", post(projects::toggle_publish))
        .route("/api/projects/{id}/export", get(projects::export))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /` — liveness probe. The body is a compatibility contract.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "hey" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("https://app.example.com, http://localhost:5173");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://app.example.com");
        assert_eq!(origins[1], "http://localhost:5173");
    }

    #[test]
    fn parse_origins_drops_empty_entries() {
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ,").is_empty());
    }

    #[test]
    fn parse_origins_drops_malformed_values() {
        let origins = parse_origins("https://ok.example.com,bad\nvalue");
        assert_eq!(origins.len(), 1);
    }
}
