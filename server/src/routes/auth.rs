//! Auth routes — identity-provider dispatch and the session cookie contract.
//!
//! The route layer owns the cookie: HTTP-only, `SameSite=None` (the client
//! runs on its own origin), `Secure` in production, path `/`. Credential
//! handling itself is delegated to whatever [`IdentityProvider`] the server
//! was started with; without one, sign-up and sign-in answer 501 while
//! sign-out and get-session keep working against the session store.

use axum::extract::{FromRef, Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::provider::{IdentityProvider, ProviderError, ProviderUser};
use crate::services::session;
use crate::state::AppState;

const COOKIE_NAME: &str = "auth_session";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("APP_ENV")
        .map(|env| env.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

/// Build the session cookie with the contract attributes.
fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .secure(secure)
        .build()
}

/// Session cookie with immediate expiry, for sign-out.
fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTORS
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

/// Like [`AuthUser`] but never rejects: yields `None` for anonymous callers.
/// Used by the export route, where published projects are public.
pub struct MaybeAuthUser(pub Option<session::SessionUser>);

impl<S> axum::extract::FromRequestParts<S> for MaybeAuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Ok(Self(None));
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok(Self(user))
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

#[derive(Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Reduce a wildcard capture like `sign-up/email` to the provider action.
pub(crate) fn normalize_action(action: &str) -> &str {
    let action = action.trim_matches('/');
    action.strip_suffix("/email").unwrap_or(action)
}

/// `ANY /api/auth/{*action}` — the whole auth surface behind one wildcard.
pub async fn dispatch(
    State(state): State<AppState>,
    Path(action): Path<String>,
    method: Method,
    jar: CookieJar,
    body: Option<Json<Credentials>>,
) -> Response {
    match normalize_action(&action) {
        "sign-up" if method == Method::POST => credential_action(&state, body, true).await,
        "sign-in" if method == Method::POST => credential_action(&state, body, false).await,
        "sign-out" if method == Method::POST => sign_out(&state, jar).await,
        "get-session" if method == Method::GET => get_session(&state, jar).await,
        "sign-up" | "sign-in" | "sign-out" | "get-session" => {
            StatusCode::METHOD_NOT_ALLOWED.into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn credential_action(state: &AppState, body: Option<Json<Credentials>>, is_sign_up: bool) -> Response {
    let Some(provider) = state.provider.as_deref() else {
        return (
            StatusCode::NOT_IMPLEMENTED,
            Json(serde_json::json!({ "error": "identity provider not configured" })),
        )
            .into_response();
    };
    let Some(Json(creds)) = body else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "missing credentials" })),
        )
            .into_response();
    };

    let result = if is_sign_up {
        provider.sign_up(&state.pool, &creds.name, &creds.email, &creds.password).await
    } else {
        provider.sign_in(&state.pool, &creds.email, &creds.password).await
    };

    match result {
        Ok(user) => issue_session(state, user).await,
        Err(e) => provider_error_response(&e),
    }
}

/// Create a session for a provider-issued user and set the cookie.
async fn issue_session(state: &AppState, user: ProviderUser) -> Response {
    let token = match session::create_session(&state.pool, user.id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let jar = CookieJar::new().add(session_cookie(token, cookie_secure()));
    let body = serde_json::json!({
        "user": { "id": user.id, "name": user.name, "email": user.email }
    });
    (jar, Json(body)).into_response()
}

async fn sign_out(state: &AppState, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        let _ = session::delete_session(&state.pool, cookie.value()).await;
    }

    let jar = CookieJar::new().add(clear_session_cookie(cookie_secure()));
    (jar, StatusCode::NO_CONTENT).into_response()
}

async fn get_session(state: &AppState, jar: CookieJar) -> Response {
    let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
    if token.is_empty() {
        return Json(serde_json::json!({ "user": null })).into_response();
    }

    match session::validate_session(&state.pool, token).await {
        Ok(user) => Json(serde_json::json!({ "user": user })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "session validation failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn provider_error_response(error: &ProviderError) -> Response {
    let status = match error {
        ProviderError::InvalidEmail | ProviderError::WeakPassword => StatusCode::BAD_REQUEST,
        ProviderError::EmailTaken => StatusCode::CONFLICT,
        ProviderError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ProviderError::Database(e) => {
            tracing::error!(error = %e, "provider store failure");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    (status, Json(serde_json::json!({ "error": error.to_string() }))).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
