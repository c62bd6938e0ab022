//! Menu item queries

use shared::models::{Branch, MenuItem};
use sqlx::{PgExecutor, PgPool};

const COLUMNS: &str = "id, category, name, description, price_sedati, price_tawangsari, \
     sold_sedati, sold_tawangsari";

/// Menu items ordered by category then name, optionally filtered by a
/// case-insensitive name substring
pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items \
         WHERE ($1::text IS NULL OR strpos(lower(name), lower($1)) > 0) \
         ORDER BY category, name"
    ))
    .bind(search)
    .fetch_all(pool)
    .await
}

pub async fn find(db: impl PgExecutor<'_>, id: i64) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {COLUMNS} FROM menu_items WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn find_many(db: impl PgExecutor<'_>, ids: &[i64]) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {COLUMNS} FROM menu_items WHERE id = ANY($1)"))
        .bind(ids)
        .fetch_all(db)
        .await
}

pub async fn create(
    db: impl PgExecutor<'_>,
    category: &str,
    name: &str,
    description: Option<&str>,
    price_sedati: Option<i64>,
    price_tawangsari: Option<i64>,
) -> Result<MenuItem, sqlx::Error> {
    sqlx::query_as(&format!(
        "INSERT INTO menu_items (category, name, description, price_sedati, price_tawangsari) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(category)
    .bind(name)
    .bind(description)
    .bind(price_sedati)
    .bind(price_tawangsari)
    .fetch_one(db)
    .await
}

/// Write the editable fields of `item`; sold counters are left alone
pub async fn update(db: impl PgExecutor<'_>, item: &MenuItem) -> Result<MenuItem, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE menu_items SET category = $2, name = $3, description = $4, \
         price_sedati = $5, price_tawangsari = $6 WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(item.id)
    .bind(&item.category)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.price_sedati)
    .bind(item.price_tawangsari)
    .fetch_one(db)
    .await
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Add `qty` units to the branch's sold counter
pub async fn add_sold(
    db: impl PgExecutor<'_>,
    id: i64,
    branch: Branch,
    qty: i64,
) -> Result<(), sqlx::Error> {
    let sql = match branch {
        Branch::Sedati => "UPDATE menu_items SET sold_sedati = sold_sedati + $2 WHERE id = $1",
        Branch::Tawangsari => {
            "UPDATE menu_items SET sold_tawangsari = sold_tawangsari + $2 WHERE id = $1"
        }
    };
    sqlx::query(sql).bind(id).bind(qty).execute(db).await?;
    Ok(())
}
