use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entities persisted by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Category,
    Brand,
    Motorcycle,
}

impl Entity {
    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Category => "categories",
            Entity::Brand => "brands",
            Entity::Motorcycle => "motorcycles",
        }
    }

    /// Capitalized name used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Entity::Category => "Category",
            Entity::Brand => "Brand",
            Entity::Motorcycle => "Motorcycle",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Category => "category",
            Entity::Brand => "brand",
            Entity::Motorcycle => "motorcycle",
        };
        f.write_str(name)
    }
}

/// A row of the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "category_id")]
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// A row of the `brands` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "brand_id")]
    pub id: i32,
    pub name: String,
    pub country_of_origin: String,
}

/// A row of the `motorcycles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motorcycle {
    #[serde(rename = "motorcycle_id")]
    pub id: i32,
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
