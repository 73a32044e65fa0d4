//! Core contracts for the motorcycle catalog.
//!
//! This crate defines the entity records, the error taxonomy shared by the
//! store and its callers, and the form validation rules applied before any
//! mutation reaches storage. It performs no I/O.

pub mod error;
pub mod model;
pub mod sanitize;
pub mod validation;

pub use error::{CatalogError, ErrorKind, Result};
pub use model::{Brand, Category, Entity, Motorcycle};
pub use sanitize::escape_html;
pub use validation::{
    BrandInput, CategoryInput, FieldError, FormInput, InvalidForm, MotorcycleInput,
};
