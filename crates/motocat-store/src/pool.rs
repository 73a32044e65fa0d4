use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StoreResult;

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout_secs: 10,
        }
    }
}

/// Open a pool against `url`. The caller owns the pool and hands it to
/// [`crate::PgCatalog::new`].
pub async fn connect(url: &str, config: &PoolConfig) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(url)
        .await?;

    tracing::debug!(
        event = "pool_connected",
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs
    );

    Ok(pool)
}
