use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;
use storefront::ServiceConfig;

use inventory_server::adapters::PgOrderRepository;
use inventory_server::AppState;

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Inventory service initializing...");

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

    let state = AppState::new(Arc::new(PgOrderRepository::new(pool)));
    let router = inventory_server::app(state, &config);

    tracing::info!("Swagger UI: /swagger-ui");
    tracing::info!("Inventory service ready");

    Ok(router.into())
}
