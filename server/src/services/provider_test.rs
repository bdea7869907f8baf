use super::*;

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(
        normalize_email("  Ada@Example.COM  "),
        Some("ada@example.com".to_owned())
    );
}

#[test]
fn normalize_email_rejects_missing_at() {
    assert_eq!(normalize_email("ada.example.com"), None);
}

#[test]
fn normalize_email_rejects_empty_parts() {
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("ada@"), None);
    assert_eq!(normalize_email(""), None);
}

#[test]
fn normalize_email_rejects_double_at() {
    assert_eq!(normalize_email("a@b@c"), None);
}

// =============================================================================
// Password hashing
// =============================================================================

#[test]
fn encode_password_embeds_salt_and_verifies() {
    let provider = PasswordProvider::with_secret("pepper");
    let stored = provider.encode_password("hunter22");
    assert!(stored.contains('$'));
    assert!(provider.verify_password(&stored, "hunter22"));
    assert!(!provider.verify_password(&stored, "hunter23"));
}

#[test]
fn encode_password_salts_differently_each_time() {
    let provider = PasswordProvider::with_secret("pepper");
    assert_ne!(provider.encode_password("pw"), provider.encode_password("pw"));
}

#[test]
fn verify_password_depends_on_secret() {
    let a = PasswordProvider::with_secret("pepper-a");
    let b = PasswordProvider::with_secret("pepper-b");
    let stored = a.encode_password("hunter22");
    assert!(!b.verify_password(&stored, "hunter22"));
}

#[test]
fn verify_password_rejects_malformed_record() {
    let provider = PasswordProvider::with_secret("pepper");
    assert!(!provider.verify_password("no-separator", "pw"));
    assert!(!provider.verify_password("", "pw"));
}

// =============================================================================
// Live-DB sign-up / sign-in (cargo test --features live-db-tests)
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    async fn live_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        PgPoolOptions::new().connect(&url).await.expect("connect")
    }

    fn unique_email() -> String {
        format!("{}@example.com", Uuid::new_v4())
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_round_trip() {
        let pool = live_pool().await;
        let provider = PasswordProvider::with_secret("pepper");
        let email = unique_email();

        let created = provider
            .sign_up(&pool, "Ada", &email, "correct horse")
            .await
            .expect("sign up");
        let signed_in = provider
            .sign_in(&pool, &email, "correct horse")
            .await
            .expect("sign in");
        assert_eq!(signed_in.id, created.id);
        assert_eq!(signed_in.name, "Ada");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = live_pool().await;
        let provider = PasswordProvider::with_secret("pepper");
        let email = unique_email();

        provider
            .sign_up(&pool, "Ada", &email, "correct horse")
            .await
            .expect("sign up");
        let err = provider
            .sign_up(&pool, "Eve", &email, "correct horse")
            .await
            .expect_err("duplicate");
        assert!(matches!(err, ProviderError::EmailTaken));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let pool = live_pool().await;
        let provider = PasswordProvider::with_secret("pepper");
        let email = unique_email();

        provider
            .sign_up(&pool, "Ada", &email, "correct horse")
            .await
            .expect("sign up");
        let err = provider
            .sign_in(&pool, &email, "wrong horse")
            .await
            .expect_err("should fail");
        assert!(matches!(err, ProviderError::InvalidCredentials));
    }
}
