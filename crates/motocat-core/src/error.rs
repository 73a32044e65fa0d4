use thiserror::Error;

use crate::model::Entity;
use crate::validation::InvalidForm;

/// Error taxonomy returned by every catalog operation.
///
/// Storage failures are classified into these variants before they leave the
/// store; callers never see a raw database error.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The submitted form violated one or more field rules.
    #[error("invalid input: {0}")]
    MissingField(InvalidForm),
    /// A unique constraint rejected the write.
    #[error("Entry must be unique")]
    DuplicateEntry {
        entity: Entity,
        constraint: Option<String>,
    },
    /// The requested id does not resolve to a row.
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },
    /// Any other storage failure. `detail` is for logs only.
    #[error("Something went wrong")]
    Internal { entity: Entity, detail: String },
}

/// Fieldless discriminant of [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    DuplicateEntry,
    NotFound,
    InternalError,
}

impl ErrorKind {
    /// HTTP status the presentation layer answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::MissingField => 400,
            ErrorKind::DuplicateEntry => 409,
            ErrorKind::NotFound => 404,
            ErrorKind::InternalError => 500,
        }
    }
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MissingField(_) => ErrorKind::MissingField,
            CatalogError::DuplicateEntry { .. } => ErrorKind::DuplicateEntry,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::Internal { .. } => ErrorKind::InternalError,
        }
    }

    pub fn not_found(entity: Entity, id: i32) -> Self {
        CatalogError::NotFound { entity, id }
    }

    /// Message safe to show an end user. Never includes storage details.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::MissingField(_) => "Please correct the highlighted fields.".to_string(),
            CatalogError::DuplicateEntry { .. } => "Entry must be unique".to_string(),
            CatalogError::NotFound { entity, id } => {
                format!("{} with id {id} was not found.", entity.label())
            }
            CatalogError::Internal { .. } => "Something went wrong".to_string(),
        }
    }

    /// Field errors when this is a validation failure.
    pub fn invalid_form(&self) -> Option<&InvalidForm> {
        match self {
            CatalogError::MissingField(form) => Some(form),
            _ => None,
        }
    }
}

impl From<InvalidForm> for CatalogError {
    fn from(form: InvalidForm) -> Self {
        CatalogError::MissingField(form)
    }
}

/// Convenience alias for catalog results.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_detail() {
        let err = CatalogError::Internal {
            entity: Entity::Brand,
            detail: "connection reset by peer".to_string(),
        };
        assert_eq!(err.to_string(), "Something went wrong");
        assert!(!err.user_message().contains("connection"));
        assert_eq!(err.kind().status_code(), 500);
    }

    #[test]
    fn kinds_map_to_statuses() {
        let dup = CatalogError::DuplicateEntry {
            entity: Entity::Category,
            constraint: Some("categories_name_key".to_string()),
        };
        assert_eq!(dup.kind(), ErrorKind::DuplicateEntry);
        assert_eq!(dup.kind().status_code(), 409);
        assert_eq!(dup.user_message(), "Entry must be unique");

        let missing = CatalogError::not_found(Entity::Category, 999);
        assert_eq!(missing.kind().status_code(), 404);
        assert_eq!(missing.to_string(), "category 999 not found");
        assert_eq!(missing.user_message(), "Category with id 999 was not found.");
    }
}
