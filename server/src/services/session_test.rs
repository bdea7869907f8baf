use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// Live-DB round trips (require a local Postgres; cargo test --features live-db-tests)
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    async fn live_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        PgPoolOptions::new().connect(&url).await.expect("connect")
    }

    async fn seed_user(pool: &PgPool) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, name, email) VALUES ($1, $2, $3)")
            .bind(id)
            .bind("Test User")
            .bind(format!("{id}@example.com"))
            .execute(pool)
            .await
            .expect("insert user");
        id
    }

    #[tokio::test]
    async fn session_round_trip_validates_and_deletes() {
        let pool = live_pool().await;
        let user_id = seed_user(&pool).await;

        let token = create_session(&pool, user_id).await.expect("create");
        let user = validate_session(&pool, &token)
            .await
            .expect("validate")
            .expect("session should be live");
        assert_eq!(user.id, user_id);

        delete_session(&pool, &token).await.expect("delete");
        assert!(validate_session(&pool, &token).await.expect("validate").is_none());
    }

    #[tokio::test]
    async fn unknown_token_is_not_a_session() {
        let pool = live_pool().await;
        assert!(
            validate_session(&pool, "not-a-real-token")
                .await
                .expect("validate")
                .is_none()
        );
    }
}
