use sqlx::PgPool;

use motocat_core::{Category, CategoryInput, Entity, Result};

use super::rows::{map_all, CategoryRow};
use crate::translate::{require, translate};

const ENTITY: Entity = Entity::Category;

pub async fn insert(pool: &PgPool, input: &CategoryInput) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        insert into categories (name, description)
        values ($1, $2)
        returning category_id
        "#,
    )
    .bind(input.name())
    .bind(input.description())
    .fetch_one(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    tracing::info!(event = "created", entity = %ENTITY, id = id);
    Ok(id)
}

pub async fn list(pool: &PgPool) -> Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, CategoryRow>(
        r#"
        select category_id, name, description
        from categories
        order by category_id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    Ok(map_all(rows))
}

pub async fn get(pool: &PgPool, id: i32) -> Result<Category> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        select category_id, name, description
        from categories
        where category_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    require(ENTITY, id, row).map(Category::from)
}

pub async fn update(pool: &PgPool, id: i32, input: &CategoryInput) -> Result<Category> {
    let row = sqlx::query_as::<_, CategoryRow>(
        r#"
        update categories
        set name = $2, description = $3
        where category_id = $1
        returning category_id, name, description
        "#,
    )
    .bind(id)
    .bind(input.name())
    .bind(input.description())
    .fetch_optional(pool)
    .await
    .map_err(|err| translate(ENTITY, err))?;

    let category = require(ENTITY, id, row).map(Category::from)?;
    tracing::info!(event = "updated", entity = %ENTITY, id = id);
    Ok(category)
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<()> {
    let result = sqlx::query("delete from categories where category_id = $1")
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
