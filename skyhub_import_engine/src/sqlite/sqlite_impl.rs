//! `SqliteDatabase` is a concrete implementation of a SkyHub import engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the repository traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{catalog, customers, new_pool, orders};
use crate::{
    db_types::{Customer, MarketplaceCode, NewCustomer, NewOrderRequest, Order, OrderStatusType},
    traits::{
        CatalogApiError,
        CatalogManagement,
        CustomerApiError,
        CustomerManagement,
        OrderApiError,
        OrderImportDatabase,
        OrderManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool with the given maximum number of connections and returns the handle.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Registers a product SKU in the catalog, returning its product id. Provisioning/test helper; the import
    /// pipeline itself only reads the catalog.
    pub async fn register_catalog_product(&self, sku: &str, name: &str) -> Result<i64, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        catalog::upsert_product(sku, name, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_order_by_marketplace_code(
        &self,
        code: &MarketplaceCode,
    ) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_marketplace_code(code, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn insert_order(&self, order: NewOrderRequest) -> Result<Order, OrderApiError> {
        let mut tx = self.pool.begin().await?;
        if orders::order_exists(&order.marketplace_code, &mut tx).await?.is_some() {
            return Err(OrderApiError::OrderAlreadyExists(order.marketplace_code));
        }
        let inserted = orders::insert_order(order, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order [{}] has been saved in the DB with id {}", inserted.marketplace_code, inserted.id);
        Ok(inserted)
    }

    async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order_status(id, status, &mut conn).await
    }
}

impl CustomerManagement for SqliteDatabase {
    async fn fetch_customer_by_email(
        &self,
        email: &str,
        website_id: i64,
    ) -> Result<Option<Customer>, CustomerApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        customers::fetch_customer_by_email(email, website_id, &mut conn).await
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, CustomerApiError> {
        let mut tx = self.pool.begin().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        let inserted = customers::insert_customer(customer, &mut tx).await?;
        tx.commit().await.map_err(|e| CustomerApiError::DatabaseError(e.to_string()))?;
        debug!("🗃️ Customer {} has been saved in the DB with id {}", inserted.email, inserted.id);
        Ok(inserted)
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn product_id_by_sku(&self, sku: &str) -> Result<Option<i64>, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        catalog::product_id_by_sku(sku, &mut conn).await
    }
}

impl OrderImportDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn close(&mut self) -> Result<(), OrderApiError> {
        self.pool.close().await;
        Ok(())
    }
}
