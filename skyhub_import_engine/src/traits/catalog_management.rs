use thiserror::Error;

/// SKU resolution against the local product catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    /// Resolves a marketplace SKU to a local catalog product id. `Ok(None)` means no catalog product carries the
    /// SKU; the product matcher silently drops such items rather than failing the import.
    async fn product_id_by_sku(&self, sku: &str) -> Result<Option<i64>, CatalogApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}
