//! PostgreSQL storage for the motorcycle catalog.
//!
//! `PgCatalog` implements the [`Catalog`] contract over an explicitly
//! constructed pool. Every operation is a single parameterized statement and
//! every storage failure passes through [`translate`] before it reaches the
//! caller.

pub mod catalog;
pub mod error;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod translate;

pub use catalog::Catalog;
pub use error::{StoreError, StoreResult};
pub use pool::{connect, PoolConfig};
pub use postgres::PgCatalog;
pub use schema::{apply_schema, reset, seed};
pub use translate::{classify, translate, Violation};

pub use motocat_core::{CatalogError, ErrorKind, Result};
