use async_trait::async_trait;

use motocat_core::{
    Brand, BrandInput, Category, CategoryInput, Motorcycle, MotorcycleInput, Result,
};

/// Data access contract for the catalog.
///
/// Every method is exactly one round-trip to the store. Failures are already
/// classified into [`motocat_core::CatalogError`]. Deletes are idempotent:
/// removing an id that does not exist succeeds.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert a category and return its generated id.
    async fn create_category(&self, input: &CategoryInput) -> Result<i32>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn get_category(&self, id: i32) -> Result<Category>;

    /// Motorcycles filed under `category_id`. Does not check that the
    /// category exists; an unknown id yields an empty list.
    async fn list_motorcycles_by_category(&self, category_id: i32) -> Result<Vec<Motorcycle>>;

    async fn update_category(&self, id: i32, input: &CategoryInput) -> Result<Category>;

    /// Delete a category and, by cascade, its motorcycles.
    async fn delete_category(&self, id: i32) -> Result<()>;

    /// Insert a brand and return its generated id.
    async fn create_brand(&self, input: &BrandInput) -> Result<i32>;

    async fn list_brands(&self) -> Result<Vec<Brand>>;

    async fn get_brand(&self, id: i32) -> Result<Brand>;

    /// Motorcycles made by `brand_id`. An unknown id yields an empty list.
    async fn list_motorcycles_by_brand(&self, brand_id: i32) -> Result<Vec<Motorcycle>>;

    async fn update_brand(&self, id: i32, input: &BrandInput) -> Result<Brand>;

    /// Delete a brand and, by cascade, its motorcycles.
    async fn delete_brand(&self, id: i32) -> Result<()>;

    /// Insert a motorcycle and return its generated id. A missing stock
    /// quantity stores 0.
    async fn create_motorcycle(&self, input: &MotorcycleInput) -> Result<i32>;

    async fn list_motorcycles(&self) -> Result<Vec<Motorcycle>>;

    async fn get_motorcycle(&self, id: i32) -> Result<Motorcycle>;

    /// Overwrite a motorcycle. Stock quantity, description and image url keep
    /// their stored values when the input leaves them out.
    async fn update_motorcycle(&self, id: i32, input: &MotorcycleInput) -> Result<Motorcycle>;

    async fn delete_motorcycle(&self, id: i32) -> Result<()>;
}
