//! Identity provider seam behind `/api/auth/*`.
//!
//! DESIGN
//! ======
//! Sign-up and sign-in are delegated to an [`IdentityProvider`] trait object
//! so the credential mechanics stay swappable (and mockable in tests). The
//! shipped implementation is [`PasswordProvider`]: email + password with a
//! salted, peppered SHA-256 digest stored on the user row. Sign-out and
//! get-session never touch the provider — they run against the session
//! store directly.

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::session::bytes_to_hex;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password too short")]
    WeakPassword,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error returned when the provider cannot be constructed from the
/// environment.
#[derive(Debug, thiserror::Error)]
#[error("missing env var: {0}")]
pub struct ProviderConfigError(&'static str);

/// A user as issued by the identity provider.
#[derive(Debug, Clone)]
pub struct ProviderUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Async seam for credential handling. Enables mocking in tests.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] for rejected input, a taken email, or a
    /// store failure.
    async fn sign_up(
        &self,
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderUser, ProviderError>;

    /// Authenticate an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidCredentials`] for an unknown email or
    /// wrong password, and a store error otherwise.
    async fn sign_in(&self, pool: &PgPool, email: &str, password: &str) -> Result<ProviderUser, ProviderError>;
}

// =============================================================================
// PASSWORD PROVIDER
// =============================================================================

/// Email + password provider. The `AUTH_SECRET` env var peppers every
/// digest, so a leaked table alone is not enough to test candidate
/// passwords offline.
pub struct PasswordProvider {
    secret: String,
}

impl PasswordProvider {
    /// Build the provider from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `AUTH_SECRET` is unset or empty.
    pub fn from_env() -> Result<Self, ProviderConfigError> {
        let secret = std::env::var("AUTH_SECRET").unwrap_or_default();
        if secret.is_empty() {
            return Err(ProviderConfigError("AUTH_SECRET"));
        }
        Ok(Self { secret })
    }

    #[cfg(test)]
    pub(crate) fn with_secret(secret: &str) -> Self {
        Self { secret: secret.to_owned() }
    }

    fn hash_password(&self, salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        bytes_to_hex(&hasher.finalize())
    }

    /// Produce a `salt$digest` record for storage.
    fn encode_password(&self, password: &str) -> String {
        let salt_bytes: [u8; 16] = rand::rng().random();
        let salt = bytes_to_hex(&salt_bytes);
        let digest = self.hash_password(&salt, password);
        format!("{salt}${digest}")
    }

    /// Check a password against a stored `salt$digest` record.
    fn verify_password(&self, stored: &str, password: &str) -> bool {
        let Some((salt, digest)) = stored.split_once('$') else {
            return false;
        };
        self.hash_password(salt, password) == digest
    }
}

#[async_trait::async_trait]
impl IdentityProvider for PasswordProvider {
    async fn sign_up(
        &self,
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderUser, ProviderError> {
        let email = normalize_email(email).ok_or(ProviderError::InvalidEmail)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ProviderError::WeakPassword);
        }
        let name = if name.trim().is_empty() { email.clone() } else { name.trim().to_owned() };

        let id = Uuid::new_v4();
        let inserted = sqlx::query(
            "INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(id)
        .bind(&name)
        .bind(&email)
        .bind(self.encode_password(password))
        .execute(pool)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(ProviderError::EmailTaken);
        }

        Ok(ProviderUser { id, name, email })
    }

    async fn sign_in(&self, pool: &PgPool, email: &str, password: &str) -> Result<ProviderUser, ProviderError> {
        let email = normalize_email(email).ok_or(ProviderError::InvalidCredentials)?;

        let row = sqlx::query("SELECT id, name, password_hash FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await?
            .ok_or(ProviderError::InvalidCredentials)?;

        let stored: Option<String> = row.get("password_hash");
        let stored = stored.ok_or(ProviderError::InvalidCredentials)?;
        if !self.verify_password(&stored, password) {
            return Err(ProviderError::InvalidCredentials);
        }

        Ok(ProviderUser { id: row.get("id"), name: row.get("name"), email })
    }
}

/// Lowercase and sanity-check an email address. Returns `None` for anything
/// without exactly one `@` separating two non-empty parts.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
