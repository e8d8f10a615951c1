use sqlx::SqliteConnection;

use crate::traits::CatalogApiError;

/// Resolves a SKU to the catalog product id, or `None` when no product carries the SKU.
pub async fn product_id_by_sku(sku: &str, conn: &mut SqliteConnection) -> Result<Option<i64>, CatalogApiError> {
    let id = sqlx::query_scalar("SELECT id FROM catalog_products WHERE sku = $1")
        .bind(sku)
        .fetch_optional(conn)
        .await?;
    Ok(id)
}

/// Registers (or renames) a catalog product for the given SKU, returning its id. Used by provisioning and tests.
pub async fn upsert_product(sku: &str, name: &str, conn: &mut SqliteConnection) -> Result<i64, CatalogApiError> {
    let id = sqlx::query_scalar(
        r#"
            INSERT INTO catalog_products (sku, name) VALUES ($1, $2)
            ON CONFLICT (sku) DO UPDATE SET name = excluded.name
            RETURNING id;
        "#,
    )
    .bind(sku)
    .bind(name)
    .fetch_one(conn)
    .await?;
    Ok(id)
}
