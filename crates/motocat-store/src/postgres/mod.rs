use async_trait::async_trait;
use sqlx::PgPool;

use motocat_core::{
    Brand, BrandInput, Category, CategoryInput, Motorcycle, MotorcycleInput, Result,
};

use crate::catalog::Catalog;

mod brands;
mod categories;
mod motorcycles;
mod rows;

/// Catalog backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a catalog over a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn create_category(&self, input: &CategoryInput) -> Result<i32> {
        categories::insert(&self.pool, input).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        categories::list(&self.pool).await
    }

    async fn get_category(&self, id: i32) -> Result<Category> {
        categories::get(&self.pool, id).await
    }

    async fn list_motorcycles_by_category(&self, category_id: i32) -> Result<Vec<Motorcycle>> {
        motorcycles::list_by_category(&self.pool, category_id).await
    }

    async fn update_category(&self, id: i32, input: &CategoryInput) -> Result<Category> {
        categories::update(&self.pool, id, input).await
    }

    async fn delete_category(&self, id: i32) -> Result<()> {
        categories::delete(&self.pool, id).await
    }

    async fn create_brand(&self, input: &BrandInput) -> Result<i32> {
        brands::insert(&self.pool, input).await
    }

    async fn list_brands(&self) -> Result<Vec<Brand>> {
        brands::list(&self.pool).await
    }

    async fn get_brand(&self, id: i32) -> Result<Brand> {
        brands::get(&self.pool, id).await
    }

    async fn list_motorcycles_by_brand(&self, brand_id: i32) -> Result<Vec<Motorcycle>> {
        motorcycles::list_by_brand(&self.pool, brand_id).await
    }

    async fn update_brand(&self, id: i32, input: &BrandInput) -> Result<Brand> {
        brands::update(&self.pool, id, input).await
    }

    async fn delete_brand(&self, id: i32) -> Result<()> {
        brands::delete(&self.pool, id).await
    }

    async fn create_motorcycle(&self, input: &MotorcycleInput) -> Result<i32> {
        motorcycles::insert(&self.pool, input).await
    }

    async fn list_motorcycles(&self) -> Result<Vec<Motorcycle>> {
        motorcycles::list(&self.pool).await
    }

    async fn get_motorcycle(&self, id: i32) -> Result<Motorcycle> {
        motorcycles::get(&self.pool, id).await
    }

    async fn update_motorcycle(&self, id: i32, input: &MotorcycleInput) -> Result<Motorcycle> {
        motorcycles::update(&self.pool, id, input).await
    }

    async fn delete_motorcycle(&self, id: i32) -> Result<()> {
        motorcycles::delete(&self.pool, id).await
    }
}
