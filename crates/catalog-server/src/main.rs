use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use storefront::ServiceConfig;

use catalog_server::adapters::{PgCategoryRepository, PgOfferRepository, PgTagRepository};
use catalog_server::AppState;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Catalog service initializing...");

    let config = ServiceConfig::from_lookup(|key| secrets.get(key))?;
    tracing::info!(
        timeout_secs = config.request_timeout.as_secs(),
        cors_permissive = config.cors_permissive,
        "Configuration loaded"
    );

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let state = AppState::new(
        Arc::new(PgOfferRepository::new(pool.clone())),
        Arc::new(PgCategoryRepository::new(pool.clone())),
        Arc::new(PgTagRepository::new(pool)),
    );

    let router = catalog_server::app(state, &config);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Catalog service ready");

    Ok(router.into())
}
