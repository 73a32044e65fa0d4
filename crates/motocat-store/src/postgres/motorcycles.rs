use sqlx::PgPool;

use motocat_core::{Entity, Motorcycle, MotorcycleInput, Result};

use super::rows::{map_all, MotorcycleRow};
use crate::translate::{require, translate};

const ENTITY: Entity = Entity::Motorcycle;

/// Static select over every motorcycle column followed by `$tail`.
macro_rules! select_motorcycles {
    ($tail:literal) => {
        concat!(
            "select motorcycle_id, model_name, brand_id, category_id, year, engine_cc, ",
            "price, stock_quantity, description, image_url ",
            "from motorcycles ",
            $tail
        )
    };
}

pub async fn insert(pool: &PgPool, input: &MotorcycleInput) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        insert into motorcycles (
          model_name, brand_id, category_id, year, engine_cc,
          price, stock_quantity, description, image_url
        )
        values ($1, $2, $3, $4, $5, $6, coalesce($7::integer, 0), $8, $9)
        returning motorcycle_id
        "#,
    )
    .bind(input.model_name())
    .bind(input.brand_id())
    .bind(input.category_id())
    .bind(input.year())
    .bind(input.engine_cc())
    .bind(input.price())
    .bind(input.stock_quantity())
    .bind(input.description())
    .bind(input.image_url())
    .fetch_one(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    tracing::info!(event = "created", entity = %ENTITY, id = id);
    Ok(id)
}

pub async fn list(pool: &PgPool) -> Result<Vec<Motorcycle>> {
    let rows = sqlx::query_as::<_, MotorcycleRow>(select_motorcycles!("order by motorcycle_id"))
        .fetch_all(pool)
        .await
        .map_err(|err| translate(ENTITY, err))?;

    Ok(map_all(rows))
}

pub async fn list_by_category(pool: &PgPool, category_id: i32) -> Result<Vec<Motorcycle>> {
    let rows = sqlx::query_as::<_, MotorcycleRow>(select_motorcycles!(
        "where category_id = $1 order by motorcycle_id"
    ))
    .bind(category_id)
    .fetch_all(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    Ok(map_all(rows))
}

pub async fn list_by_brand(pool: &PgPool, brand_id: i32) -> Result<Vec<Motorcycle>> {
    let rows = sqlx::query_as::<_, MotorcycleRow>(select_motorcycles!(
        "where brand_id = $1 order by motorcycle_id"
    ))
    .bind(brand_id)
    .fetch_all(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    Ok(map_all(rows))
}

pub async fn get(pool: &PgPool, id: i32) -> Result<Motorcycle> {
    let row = sqlx::query_as::<_, MotorcycleRow>(select_motorcycles!("where motorcycle_id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| translate(ENTITY, err))?;

    require(ENTITY, id, row).map(Motorcycle::from)
}

pub async fn update(pool: &PgPool, id: i32, input: &MotorcycleInput) -> Result<Motorcycle> {
    let row = sqlx::query_as::<_, MotorcycleRow>(
        r#"
        update motorcycles
        set model_name = $2,
            brand_id = $3,
            category_id = $4,
            year = $5,
            engine_cc = $6,
            price = $7,
            stock_quantity = coalesce($8::integer, stock_quantity),
            description = coalesce($9::text, description),
            image_url = coalesce($10::text, image_url)
        where motorcycle_id = $1
        returning motorcycle_id, model_name, brand_id, category_id, year, engine_cc,
                  price, stock_quantity, description, image_url
        "#,
    )
    .bind(id)
    .bind(input.model_name())
    .bind(input.brand_id())
    .bind(input.category_id())
    .bind(input.year())
    .bind(input.engine_cc())
    .bind(input.price())
    .bind(input.stock_quantity())
    .bind(input.description())
    .bind(input.image_url())
    .fetch_optional(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    let motorcycle = require(ENTITY, id, row).map(Motorcycle::from)?;
    tracing::info!(event = "updated", entity = %ENTITY, id = id);
    Ok(motorcycle)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<()> {
    let result = sqlx::query("delete from motorcycles where motorcycle_id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|err| translate(ENTITY, err))?;

    tracing::info!(
        event = "deleted",
        entity = %ENTITY,
        id = id,
        rows = result.rows_affected()
    );
    Ok(())
}
