use rust_decimal::Decimal;
use sqlx::FromRow;

use motocat_core::{Brand, Category, Motorcycle};

#[derive(Debug, FromRow)]
pub struct CategoryRow {
    pub category_id: i32,
    pub name: String,
    pub description: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.category_id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct BrandRow {
    pub brand_id: i32,
    pub name: String,
    pub country_of_origin: String,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        Brand {
            id: row.brand_id,
            name: row.name,
            country_of_origin: row.country_of_origin,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct MotorcycleRow {
    pub motorcycle_id: i32,
    pub model_name: String,
    pub brand_id: i32,
    pub category_id: i32,
    pub year: i32,
    pub engine_cc: i32,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<MotorcycleRow> for Motorcycle {
    fn from(row: MotorcycleRow) -> Self {
        Motorcycle {
            id: row.motorcycle_id,
            model_name: row.model_name,
            brand_id: row.brand_id,
            category_id: row.category_id,
            year: row.year,
            engine_cc: row.engine_cc,
            price: row.price,
            stock_quantity: row.stock_quantity,
            description: row.description,
            image_url: row.image_url,
        }
    }
}

pub fn map_all<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}
