mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::provider::{IdentityProvider, PasswordProvider};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Initialize the identity provider (non-fatal: sign-up/sign-in return 501
    // when the provider is missing; existing sessions keep working).
    let provider: Option<Arc<dyn IdentityProvider>> = match PasswordProvider::from_env() {
        Ok(p) => {
            tracing::info!("password identity provider initialized");
            Some(Arc::new(p))
        }
        Err(e) => {
            tracing::warn!(error = %e, "identity provider not configured; sign-in disabled");
            None
        }
    };

    let state = state::AppState::new(pool, provider);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "siteforge listening");
    axum::serve(listener, app).await.expect("server failed");
}
