use uuid::Uuid;

use super::{SaveCodeBody, project_error_to_status, slug};
use crate::services::project::ProjectError;
use axum::http::StatusCode;

// ===== SLUG =====

#[test]
fn slug_lowercases_and_dashes() {
    assert_eq!(slug("My Landing Page"), "my-landing-page");
}

#[test]
fn slug_collapses_runs_of_separators() {
    assert_eq!(slug("a  --  b"), "a-b");
}

#[test]
fn slug_trims_leading_and_trailing_separators() {
    assert_eq!(slug("  hello!  "), "hello");
}

#[test]
fn slug_falls_back_when_nothing_survives() {
    assert_eq!(slug("!!!"), "project");
    assert_eq!(slug(""), "project");
}

// ===== ERROR MAPPING =====

#[test]
fn not_found_and_no_code_map_to_404() {
    let status = project_error_to_status(&ProjectError::NotFound(Uuid::nil()));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        project_error_to_status(&ProjectError::NoCode),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn forbidden_maps_to_403() {
    assert_eq!(
        project_error_to_status(&ProjectError::Forbidden),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn database_error_maps_to_500() {
    let status = project_error_to_status(&ProjectError::Database(sqlx::Error::PoolClosed));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ===== BODY SHAPES =====

#[test]
fn save_code_body_requires_code_field() {
    let body: SaveCodeBody = serde_json::from_str(r#"{"code": "<html></html>"}"#)
        .expect("valid body should parse");
    assert_eq!(body.code, "<html></html>");

    let missing = serde_json::from_str::<SaveCodeBody>("{}");
    assert!(missing.is_err());
}
