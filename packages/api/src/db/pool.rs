//! Database connection pool, initialised once per process.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::config::server_config;
use crate::error::ApiError;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get or initialize the database connection pool.
pub async fn get_pool() -> Result<&'static PgPool, ApiError> {
    POOL.get_or_try_init(|| async {
        let config = server_config()?;
        tracing::info!(
            "Opening database pool ({} connections)",
            config.max_connections
        );
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(pool)
    })
    .await
}
