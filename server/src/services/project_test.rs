use super::*;

#[test]
fn project_summary_serializes_expected_fields() {
    let summary = ProjectSummary {
        id: Uuid::nil(),
        name: "landing page".to_owned(),
        is_published: false,
        updated_at: 1_700_000_000,
    };
    let json = serde_json::to_value(&summary).expect("serialize");
    assert_eq!(json["name"], "landing page");
    assert_eq!(json["is_published"], false);
    assert_eq!(json["updated_at"], 1_700_000_000);
}

#[test]
fn project_detail_serializes_nested_collections() {
    let detail = ProjectDetail {
        id: Uuid::nil(),
        name: "landing page".to_owned(),
        current_code: Some("<html></html>".to_owned()),
        is_published: true,
        conversation: vec![ConversationMessage {
            id: Uuid::nil(),
            role: "assistant".to_owned(),
            content: "Here is your hero section.".to_owned(),
            created_at: 1,
        }],
        versions: vec![ProjectVersion { id: Uuid::nil(), code: "<html></html>".to_owned(), created_at: 1 }],
    };
    let json = serde_json::to_value(&detail).expect("serialize");
    assert_eq!(json["conversation"][0]["role"], "assistant");
    assert_eq!(json["versions"].as_array().map(Vec::len), Some(1));
}

// =============================================================================
// Live-DB operations (cargo test --features live-db-tests)
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
            .bind("Owner")
            .bind(format!("{id}@example.com"))
            .execute(pool)
            .await
            .expect("insert user");
        id
    }

    async fn seed_project(pool: &PgPool, owner_id: Uuid, code: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO projects (id, owner_id, name, current_code) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(owner_id)
            .bind("test project")
            .bind(code)
            .execute(pool)
            .await
            .expect("insert project");
        id
    }

    #[tokio::test]
    async fn save_code_appends_a_version_each_time() {
        let pool = live_pool().await;
        let owner = seed_user(&pool).await;
        let project = seed_project(&pool, owner, None).await;

        save_code(&pool, project, owner, "<html>v1</html>").await.expect("save v1");
        save_code(&pool, project, owner, "<html>v2</html>").await.expect("save v2");

        let detail = get_project(&pool, project, owner).await.expect("get");
        assert_eq!(detail.current_code.as_deref(), Some("<html>v2</html>"));
        assert_eq!(detail.versions.len(), 2);
    }

    #[tokio::test]
    async fn save_code_rolls_back_when_version_insert_fails() {
        let pool = live_pool().await;
        let owner = seed_user(&pool).await;
        let project = seed_project(&pool, owner, Some("<html>old</html>")).await;

        // Block version inserts for this project only, so a failure after the
        // code update must leave the project untouched.
        sqlx::query(
            "CREATE OR REPLACE FUNCTION reject_version_rows() RETURNS trigger AS $$
             BEGIN RAISE EXCEPTION 'version insert disabled'; END;
             $$ LANGUAGE plpgsql",
        )
        .execute(&pool)
        .await
        .expect("create function");
        let trigger = format!("reject_versions_{}", project.simple());
        sqlx::query(&format!(
            "CREATE TRIGGER {trigger} BEFORE INSERT ON project_versions
             FOR EACH ROW WHEN (NEW.project_id = '{project}')
             EXECUTE FUNCTION reject_version_rows()"
        ))
        .execute(&pool)
        .await
        .expect("create trigger");

        let err = save_code(&pool, project, owner, "<html>new</html>")
            .await
            .expect_err("insert blocked");
        assert!(matches!(err, ProjectError::Database(_)));

        let detail = get_project(&pool, project, owner).await.expect("get");
        assert_eq!(detail.current_code.as_deref(), Some("<html>old</html>"));
        assert!(detail.versions.is_empty());

        sqlx::query(&format!("DROP TRIGGER {trigger} ON project_versions"))
            .execute(&pool)
            .await
            .expect("drop trigger");
    }

    #[tokio::test]
    async fn save_code_rejects_non_owner() {
        let pool = live_pool().await;
        let owner = seed_user(&pool).await;
        let intruder = seed_user(&pool).await;
        let project = seed_project(&pool, owner, None).await;

        let err = save_code(&pool, project, intruder, "<html></html>")
            .await
            .expect_err("should fail");
        assert!(matches!(err, ProjectError::NotFound(_)));
    }

    #[tokio::test]
    async fn toggle_publish_flips_each_call() {
        let pool = live_pool().await;
        let owner = seed_user(&pool).await;
        let project = seed_project(&pool, owner, None).await;

        assert!(toggle_publish(&pool, project, owner).await.expect("first"));
        assert!(!toggle_publish(&pool, project, owner).await.expect("second"));
    }

    #[tokio::test]
    async fn export_requires_owner_until_published() {
        let pool = live_pool().await;
        let owner = seed_user(&pool).await;
        let project = seed_project(&pool, owner, Some("<html><body>Hi</body></html>")).await;

        let err = export_code(&pool, project, None).await.expect_err("anonymous");
        assert!(matches!(err, ProjectError::Forbidden));

        toggle_publish(&pool, project, owner).await.expect("publish");
        let exported = export_code(&pool, project, None).await.expect("export");
        assert_eq!(exported.code, "<html><body>Hi</body></html>");
    }

    #[tokio::test]
    async fn export_strips_stored_instrumentation() {
        let pool = live_pool().await;
        let owner = seed_user(&pool).await;
        let dirty = preview::inject::inject("<html><body>Hi</body></html>", true);
        let project = seed_project(&pool, owner, Some(&dirty)).await;

        let exported = export_code(&pool, project, Some(owner)).await.expect("export");
        assert!(!exported.code.contains("ai-preview-script"));
    }

    #[tokio::test]
    async fn export_without_code_is_no_code() {
        let pool = live_pool().await;
        let owner = seed_user(&pool).await;
        let project = seed_project(&pool, owner, None).await;

        let err = export_code(&pool, project, Some(owner)).await.expect_err("no code");
        assert!(matches!(err, ProjectError::NoCode));
    }
}
