use thiserror::Error;

/// Failures while bootstrapping storage (pool, schema, seed).
///
/// Catalog operations never return this type; they report
/// [`motocat_core::CatalogError`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error or connection failure.
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    /// A statement of an embedded SQL script failed.
    #[error("script {script} failed: {source}")]
    Script {
        script: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Result type for storage bootstrap operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
