//! Embedded DDL and seed rows.

use sqlx::{PgConnection, PgPool};

use crate::error::{StoreError, StoreResult};

const SCHEMA_SQL: &str = include_str!("../sql/001_schema.sql");
const SEED_SQL: &str = include_str!("../sql/002_seed.sql");
const DROP_SQL: &str = "drop table if exists motorcycles, brands, categories cascade";

/// Create the catalog tables when they do not exist yet.
pub async fn apply_schema(pool: &PgPool) -> StoreResult<()> {
    let mut tx = pool.begin().await?;
    run_script(&mut tx, "001_schema.sql", SCHEMA_SQL).await?;
    tx.commit().await?;
    tracing::info!(event = "schema_applied");
    Ok(())
}

/// Insert the seed categories, brands and motorcycles in one transaction.
/// Rows that already exist are left untouched and seed motorcycles look up
/// their brand and category by name.
pub async fn seed(pool: &PgPool) -> StoreResult<()> {
    let mut tx = pool.begin().await?;
    run_script(&mut tx, "002_seed.sql", SEED_SQL).await?;
    tx.commit().await?;
    tracing::info!(event = "seed_applied");
    Ok(())
}

/// Drop every catalog table, recreate the schema and seed it, all in one
/// transaction. Identity sequences restart, so seed rows get ids 1 and 2.
pub async fn reset(pool: &PgPool) -> StoreResult<()> {
    let mut tx = pool.begin().await?;
    run_script(&mut tx, "drop", DROP_SQL).await?;
    run_script(&mut tx, "001_schema.sql", SCHEMA_SQL).await?;
    run_script(&mut tx, "002_seed.sql", SEED_SQL).await?;
    tx.commit().await?;
    tracing::warn!(event = "catalog_reset");
    Ok(())
}

async fn run_script(conn: &mut PgConnection, script: &'static str, sql: &str) -> StoreResult<()> {
    for statement in statements(sql) {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .map_err(|source| StoreError::Script { script, source })?;
    }
    Ok(())
}

fn statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
}
