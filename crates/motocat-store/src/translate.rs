//! Classification of storage failures.
//!
//! This is the only place that inspects `sqlx` errors. Query functions hand
//! every failure to [`translate`] and every optional row lookup to
//! [`require`], so all call sites agree on what a duplicate, a missing row and
//! an internal failure look like.

use motocat_core::{CatalogError, Entity, Result};

/// SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE for `check_violation`.
pub const CHECK_VIOLATION: &str = "23514";

/// Kind of constraint a database error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Unique,
    ForeignKey,
    Check,
    None,
}

/// Classify a SQLSTATE code.
pub fn classify(code: Option<&str>) -> Violation {
    match code {
        Some(UNIQUE_VIOLATION) => Violation::Unique,
        Some(FOREIGN_KEY_VIOLATION) => Violation::ForeignKey,
        Some(CHECK_VIOLATION) => Violation::Check,
        _ => Violation::None,
    }
}

/// Translate a storage failure on `entity` into a [`CatalogError`].
pub fn translate(entity: Entity, err: sqlx::Error) -> CatalogError {
    let db = match err {
        sqlx::Error::Database(db) => db,
        other => {
            tracing::error!(
                event = "storage_failure",
                table = entity.table(),
                error = %other
            );
            return CatalogError::Internal {
                entity,
                detail: other.to_string(),
            };
        }
    };

    let constraint = db.constraint().map(str::to_string);
    match classify(db.code().as_deref()) {
        Violation::Unique => {
            tracing::info!(
                event = "duplicate_entry",
                entity = %entity,
                constraint = constraint.as_deref().unwrap_or("")
            );
            CatalogError::DuplicateEntry { entity, constraint }
        }
        violation @ (Violation::ForeignKey | Violation::Check) => {
            tracing::warn!(
                event = "constraint_violation",
                table = entity.table(),
                violation = ?violation,
                constraint = constraint.as_deref().unwrap_or(""),
                error = %db.message()
            );
            CatalogError::Internal {
                entity,
                detail: db.message().to_string(),
            }
        }
        Violation::None => {
            tracing::error!(
                event = "storage_failure",
                table = entity.table(),
                code = db.code().as_deref().unwrap_or(""),
                error = %db.message()
            );
            CatalogError::Internal {
                entity,
                detail: db.message().to_string(),
            }
        }
    }
}

/// Resolve an id lookup, mapping an absent row to `NotFound`.
pub(crate) fn require<T>(entity: Entity, id: i32, row: Option<T>) -> Result<T> {
    row.ok_or_else(|| {
        tracing::debug!(event = "not_found", entity = %entity, id = id);
        CatalogError::not_found(entity, id)
    })
}
