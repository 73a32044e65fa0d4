use sqlx::PgPool;

use motocat_core::{Brand, BrandInput, Entity, Result};

use super::rows::{map_all, BrandRow};
use crate::translate::{require, translate};

const ENTITY: Entity = Entity::Brand;

pub async fn insert(pool: &PgPool, input: &BrandInput) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        insert into brands (name, country_of_origin)
        values ($1, $2)
        returning brand_id
        "#,
    )
    .bind(input.name())
    .bind(input.country_of_origin())
    .fetch_one(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    tracing::info!(event = "created", entity = %ENTITY, id = id);
    Ok(id)
}

pub async fn list(pool: &PgPool) -> Result<Vec<Brand>> {
    let rows = sqlx::query_as::<_, BrandRow>(
        r#"
        select brand_id, name, country_of_origin
        from brands
        order by brand_id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    Ok(map_all(rows))
}

pub async fn get(pool: &PgPool, id: i32) -> Result<Brand> {
    let row = sqlx::query_as::<_, BrandRow>(
        r#"
        select brand_id, name, country_of_origin
        from brands
        where brand_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    require(ENTITY, id, row).map(Brand::from)
}

pub async fn update(pool: &PgPool, id: i32, input: &BrandInput) -> Result<Brand> {
    let row = sqlx::query_as::<_, BrandRow>(
        r#"
        update brands
        set name = $2, country_of_origin = $3
        where brand_id = $1
        returning brand_id, name, country_of_origin
        "#,
    )
    .bind(id)
    .bind(input.name())
    .bind(input.country_of_origin())
    .fetch_optional(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    let brand = require(ENTITY, id, row).map(Brand::from)?;
    tracing::info!(event = "updated", entity = %ENTITY, id = id);
    Ok(brand)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<()> {
    let result = sqlx::query("delete from brands where brand_id = $1")
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
