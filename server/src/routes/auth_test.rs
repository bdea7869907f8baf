use super::*;
use crate::state::test_helpers;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_EB_INVALID_411__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_411__"), None);
}

// =============================================================================
// Cookie contract
// =============================================================================

#[test]
fn session_cookie_carries_contract_attributes() {
    let rendered = session_cookie("tok-123".to_owned(), true).to_string();
    assert!(rendered.starts_with("auth_session=tok-123"));
    assert!(rendered.contains("HttpOnly"));
    assert!(rendered.contains("SameSite=None"));
    assert!(rendered.contains("Secure"));
    assert!(rendered.contains("Path=/"));
}

#[test]
fn session_cookie_omits_secure_outside_production() {
    let rendered = session_cookie("tok-123".to_owned(), false).to_string();
    assert!(!rendered.contains("Secure"));
}

#[test]
fn clear_cookie_expires_immediately() {
    let rendered = clear_session_cookie(false).to_string();
    assert!(rendered.starts_with("auth_session="));
    assert!(rendered.contains("Max-Age=0"));
}

// =============================================================================
// Action normalization
// =============================================================================

#[test]
fn normalize_action_passes_plain_actions() {
    assert_eq!(normalize_action("sign-up"), "sign-up");
    assert_eq!(normalize_action("get-session"), "get-session");
}

#[test]
fn normalize_action_strips_email_suffix() {
    assert_eq!(normalize_action("sign-up/email"), "sign-up");
    assert_eq!(normalize_action("sign-in/email"), "sign-in");
}

#[test]
fn normalize_action_trims_slashes() {
    assert_eq!(normalize_action("/sign-out/"), "sign-out");
}

// =============================================================================
// Dispatch (no live DB; only paths that never reach the pool)
// =============================================================================

fn credentials_body() -> Option<Json<Credentials>> {
    Some(Json(Credentials {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "correct horse".to_owned(),
    }))
}

#[tokio::test]
async fn sign_up_without_provider_is_not_implemented() {
    let state = test_helpers::test_app_state();
    let response = dispatch(
        State(state),
        Path("sign-up".to_owned()),
        Method::POST,
        CookieJar::new(),
        credentials_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn sign_in_without_provider_is_not_implemented() {
    let state = test_helpers::test_app_state();
    let response = dispatch(
        State(state),
        Path("sign-in/email".to_owned()),
        Method::POST,
        CookieJar::new(),
        credentials_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn unknown_action_is_not_found() {
    let state = test_helpers::test_app_state();
    let response = dispatch(
        State(state),
        Path("forgot-password".to_owned()),
        Method::POST,
        CookieJar::new(),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn known_action_with_wrong_method_is_rejected() {
    let state = test_helpers::test_app_state();
    let response = dispatch(
        State(state),
        Path("sign-out".to_owned()),
        Method::GET,
        CookieJar::new(),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn get_session_without_cookie_is_anonymous() {
    let state = test_helpers::test_app_state();
    let response = dispatch(
        State(state),
        Path("get-session".to_owned()),
        Method::GET,
        CookieJar::new(),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.expect("body");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(value, serde_json::json!({ "user": null }));
}

// =============================================================================
// Provider error mapping
// =============================================================================

#[test]
fn provider_errors_map_to_expected_statuses() {
    assert_eq!(
        provider_error_response(&ProviderError::InvalidEmail).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        provider_error_response(&ProviderError::WeakPassword).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        provider_error_response(&ProviderError::EmailTaken).status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        provider_error_response(&ProviderError::InvalidCredentials).status(),
        StatusCode::UNAUTHORIZED
    );
}

// =============================================================================
// Provider delegation (mock provider; error paths never reach the pool)
// =============================================================================

struct RejectingProvider;

#[async_trait::async_trait]
impl IdentityProvider for RejectingProvider {
    async fn sign_up(
        &self,
        _pool: &sqlx::PgPool,
        _name: &str,
        _email: &str,
        _password: &str,
    ) -> Result<ProviderUser, ProviderError> {
        Err(ProviderError::EmailTaken)
    }

    async fn sign_in(
        &self,
        _pool: &sqlx::PgPool,
        _email: &str,
        _password: &str,
    ) -> Result<ProviderUser, ProviderError> {
        Err(ProviderError::InvalidCredentials)
    }
}

#[tokio::test]
async fn dispatch_delegates_sign_up_to_the_provider() {
    let state = test_helpers::test_app_state_with_provider(std::sync::Arc::new(RejectingProvider));
    let response = dispatch(
        State(state),
        Path("sign-up/email".to_owned()),
        Method::POST,
        CookieJar::new(),
        credentials_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn dispatch_delegates_sign_in_to_the_provider() {
    let state = test_helpers::test_app_state_with_provider(std::sync::Arc::new(RejectingProvider));
    let response = dispatch(
        State(state),
        Path("sign-in".to_owned()),
        Method::POST,
        CookieJar::new(),
        credentials_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn credential_action_without_body_is_bad_request() {
    let state = test_helpers::test_app_state_with_provider(std::sync::Arc::new(RejectingProvider));
    let response = dispatch(
        State(state),
        Path("sign-in".to_owned()),
        Method::POST,
        CookieJar::new(),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
