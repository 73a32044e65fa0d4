use std::env;

use anyhow::{anyhow, Context, Result};
use motocat_core::{
    BrandInput, CatalogError, CategoryInput, Entity, ErrorKind, FormInput, MotorcycleInput,
};
use motocat_store::{connect, reset, seed, translate, Catalog, PgCatalog, PoolConfig};
use rust_decimal::Decimal;
use tokio::sync::{Mutex, MutexGuard};

// Every scenario resets the same database, so they run one at a time.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

fn database_url() -> Result<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .context("set TEST_DATABASE_URL or DATABASE_URL for integration tests")
}

async fn fresh_catalog() -> Result<(MutexGuard<'static, ()>, PgCatalog)> {
    let url = database_url()?;

    let guard = DB_LOCK.lock().await;
    let pool = connect(&url, &PoolConfig::default())
        .await
        .context("connecting to Postgres")?;
    reset(&pool).await.context("resetting catalog tables")?;

    Ok((guard, PgCatalog::new(pool)))
}

fn ninja_form(brand_id: i32, category_id: i32) -> FormInput {
    FormInput::new()
        .with("model_name", "Ninja 650")
        .with("brand_id", brand_id.to_string())
        .with("category_id", category_id.to_string())
        .with("year", "2023")
        .with("engine_cc", "649")
        .with("price", "7999.99")
        .with("stock_quantity", "10")
}

#[tokio::test]
async fn seeded_catalog_lists_every_entity() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let names: Vec<String> = catalog
        .list_categories()
        .await?
        .into_iter()
        .map(|category| category.name)
        .collect();
    assert_eq!(names, vec!["Standard Bikes", "Cruiser"]);

    let brands = catalog.list_brands().await?;
    assert_eq!(brands.len(), 2);
    assert_eq!(brands[1].name, "Kawasaki");
    assert_eq!(brands[1].country_of_origin, "Japan");

    let motorcycles = catalog.list_motorcycles().await?;
    assert_eq!(motorcycles.len(), 2);
    let ninja = &motorcycles[1];
    assert_eq!(ninja.model_name, "Ninja 650");
    assert_eq!(ninja.price, Decimal::new(799_999, 2));
    assert_eq!(ninja.stock_quantity, 10);

    Ok(())
}

#[tokio::test]
async fn created_category_reads_back() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let input = CategoryInput::new("Adventure", "Long-distance bikes for mixed terrain")?;
    let id = catalog.create_category(&input).await?;

    let category = catalog.get_category(id).await?;
    assert_eq!(category.id, id);
    assert_eq!(category.name, "Adventure");
    assert_eq!(category.description, "Long-distance bikes for mixed terrain");

    Ok(())
}

#[tokio::test]
async fn duplicate_names_are_reported() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let input = CategoryInput::new("Touring", "Built for comfort over distance")?;
    catalog.create_category(&input).await?;
    let err = catalog
        .create_category(&input)
        .await
        .expect_err("second category with the same name");
    assert_eq!(err.kind(), ErrorKind::DuplicateEntry);

    let err = catalog
        .create_brand(&BrandInput::new("Kawasaki", "Japan")?)
        .await
        .expect_err("seeded brand name");
    match err {
        CatalogError::DuplicateEntry { entity, constraint } => {
            assert_eq!(entity, Entity::Brand);
            assert_eq!(constraint.as_deref(), Some("brands_name_key"));
        }
        other => return Err(anyhow!("expected duplicate entry, got {other:?}")),
    }

    let err = catalog
        .update_category(1, &CategoryInput::new("Cruiser", "Renamed")?)
        .await
        .expect_err("rename onto an existing category");
    assert_eq!(err.kind(), ErrorKind::DuplicateEntry);

    Ok(())
}

#[tokio::test]
async fn duplicate_motorcycle_entry_is_rejected() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let input = MotorcycleInput::from_form(&ninja_form(1, 1))?;
    let id = catalog.create_motorcycle(&input).await?;
    assert!(id > 2, "seed rows take the first ids");

    let err = catalog
        .create_motorcycle(&input)
        .await
        .expect_err("same model, brand and year");
    match err {
        CatalogError::DuplicateEntry { constraint, .. } => {
            assert_eq!(constraint.as_deref(), Some("unique_motorcycle_entry"));
        }
        other => return Err(anyhow!("expected duplicate entry, got {other:?}")),
    }

    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let err = catalog.get_category(999).await.expect_err("no category 999");
    assert!(matches!(
        err,
        CatalogError::NotFound {
            entity: Entity::Category,
            id: 999
        }
    ));

    let err = catalog.get_brand(999).await.expect_err("no brand 999");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = catalog
        .update_brand(999, &BrandInput::new("Ducati", "Italy")?)
        .await
        .expect_err("no brand 999 to update");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = catalog
        .update_motorcycle(999, &MotorcycleInput::from_form(&ninja_form(1, 1))?)
        .await
        .expect_err("no motorcycle 999 to update");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert!(catalog.list_motorcycles_by_category(999).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn non_positive_engine_displacement_never_writes() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let err = MotorcycleInput::from_form(&ninja_form(1, 1).with("engine_cc", "0"))
        .expect_err("form rejects zero displacement");
    assert_eq!(err.kind(), ErrorKind::MissingField);

    let err = sqlx::query(
        "insert into motorcycles (model_name, brand_id, category_id, year, engine_cc, price) \
         values ($1, $2, $3, $4, $5, $6)",
    )
    .bind("Ghost")
    .bind(1_i32)
    .bind(1_i32)
    .bind(2024_i32)
    .bind(-1_i32)
    .bind(Decimal::new(100, 0))
    .execute(catalog.pool())
    .await
    .expect_err("store check rejects negative displacement");
    let err = translate(Entity::Motorcycle, err);
    assert_eq!(err.kind(), ErrorKind::InternalError);
    assert_eq!(err.to_string(), "Something went wrong");

    assert_eq!(catalog.list_motorcycles().await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn deleting_a_brand_cascades_to_motorcycles() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let before = catalog.list_motorcycles_by_brand(1).await?;
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].model_name, "Sportster S");

    catalog.delete_brand(1).await?;

    assert!(catalog.list_motorcycles_by_brand(1).await?.is_empty());
    let err = catalog.get_brand(1).await.expect_err("brand 1 was deleted");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(catalog.list_motorcycles().await?.len(), 1);

    catalog.delete_brand(1).await?;

    Ok(())
}

#[tokio::test]
async fn deleting_a_category_cascades_to_motorcycles() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    assert_eq!(catalog.list_motorcycles_by_category(1).await?.len(), 1);
    catalog.delete_category(1).await?;
    assert!(catalog.list_motorcycles_by_category(1).await?.is_empty());

    catalog.delete_motorcycle(1).await?;
    catalog.delete_motorcycle(1).await?;
    assert!(catalog.list_motorcycles().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn update_motorcycle_keeps_omitted_optional_fields() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let form = FormInput::new()
        .with("model_name", "Ninja 650 KRT")
        .with("brand_id", "2")
        .with("category_id", "2")
        .with("year", "2024")
        .with("engine_cc", "650")
        .with("price", "8299.00");
    let updated = catalog
        .update_motorcycle(2, &MotorcycleInput::from_form(&form)?)
        .await?;

    assert_eq!(updated.model_name, "Ninja 650 KRT");
    assert_eq!(updated.category_id, 2);
    assert_eq!(updated.year, 2024);
    assert_eq!(updated.engine_cc, 650);
    assert_eq!(updated.price, Decimal::new(8299, 0));
    assert_eq!(updated.stock_quantity, 10);
    assert_eq!(
        updated.description.as_deref(),
        Some("Agile standard bike with parallel-twin engine")
    );
    assert_eq!(
        updated.image_url.as_deref(),
        Some("https://example.com/ninja-650.jpg")
    );

    let restocked = catalog
        .update_motorcycle(
            2,
            &MotorcycleInput::from_form(&form.clone().with("stock_quantity", "3"))?,
        )
        .await?;
    assert_eq!(restocked.stock_quantity, 3);
    assert_eq!(catalog.get_motorcycle(2).await?, restocked);

    Ok(())
}

#[tokio::test]
async fn created_motorcycle_defaults_stock_to_zero() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let form = FormInput::new()
        .with("model_name", "Z900")
        .with("brand_id", "2")
        .with("category_id", "1")
        .with("year", "2024")
        .with("engine_cc", "948")
        .with("price", "9399.00");
    let id = catalog
        .create_motorcycle(&MotorcycleInput::from_form(&form)?)
        .await?;

    let motorcycle = catalog.get_motorcycle(id).await?;
    assert_eq!(motorcycle.stock_quantity, 0);
    assert_eq!(motorcycle.description, None);
    assert_eq!(motorcycle.image_url, None);

    let by_brand: Vec<i32> = catalog
        .list_motorcycles_by_brand(2)
        .await?
        .into_iter()
        .map(|motorcycle| motorcycle.id)
        .collect();
    assert_eq!(by_brand, vec![2, id]);

    Ok(())
}

#[tokio::test]
async fn missing_references_are_internal_errors() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let err = catalog
        .create_motorcycle(&MotorcycleInput::from_form(&ninja_form(999, 1))?)
        .await
        .expect_err("brand 999 does not exist");
    assert_eq!(err.kind(), ErrorKind::InternalError);
    assert_eq!(err.user_message(), "Something went wrong");

    let err = catalog
        .create_motorcycle(&MotorcycleInput::from_form(
            &ninja_form(1, 999).with("model_name", "Ninja 400"),
        )?)
        .await
        .expect_err("category 999 does not exist");
    assert_eq!(err.kind(), ErrorKind::InternalError);
    assert_eq!(catalog.list_motorcycles().await?.len(), 2);

    let before = catalog.get_motorcycle(2).await?;
    let err = catalog
        .update_motorcycle(2, &MotorcycleInput::from_form(&ninja_form(999, 1))?)
        .await
        .expect_err("moving to brand 999");
    assert_eq!(err.kind(), ErrorKind::InternalError);
    assert_eq!(catalog.get_motorcycle(2).await?, before);

    Ok(())
}

#[tokio::test]
async fn update_onto_existing_motorcycle_entry_is_duplicate() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    let before = catalog.get_motorcycle(2).await?;
    let form = FormInput::new()
        .with("model_name", "Sportster S")
        .with("brand_id", "1")
        .with("category_id", "2")
        .with("year", "2023")
        .with("engine_cc", "1250")
        .with("price", "15999.99");
    let err = catalog
        .update_motorcycle(2, &MotorcycleInput::from_form(&form)?)
        .await
        .expect_err("same model, brand and year as motorcycle 1");
    match err {
        CatalogError::DuplicateEntry { entity, constraint } => {
            assert_eq!(entity, Entity::Motorcycle);
            assert_eq!(constraint.as_deref(), Some("unique_motorcycle_entry"));
        }
        other => return Err(anyhow!("expected duplicate entry, got {other:?}")),
    }
    assert_eq!(catalog.get_motorcycle(2).await?, before);

    Ok(())
}

#[tokio::test]
async fn reseeding_restores_a_deleted_seed_brand() -> Result<()> {
    let (_guard, catalog) = fresh_catalog().await?;

    catalog.delete_brand(1).await?;
    seed(catalog.pool()).await.context("seeding after delete")?;

    let brands: Vec<(i32, String)> = catalog
        .list_brands()
        .await?
        .into_iter()
        .map(|brand| (brand.id, brand.name))
        .collect();
    assert_eq!(
        brands,
        vec![(2, "Kawasaki".to_string()), (3, "Harley-Davidson".to_string())]
    );

    let restored = catalog.list_motorcycles_by_brand(3).await?;
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].model_name, "Sportster S");
    assert_eq!(restored[0].category_id, 2);

    seed(catalog.pool()).await.context("seeding twice")?;
    assert_eq!(catalog.list_brands().await?.len(), 2);
    assert_eq!(catalog.list_categories().await?.len(), 2);
    assert_eq!(catalog.list_motorcycles().await?.len(), 2);

    Ok(())
}
