use thiserror::Error;

use crate::db_types::{MarketplaceCode, NewOrderRequest, Order, OrderStatusType};

/// Access to the local order ledger.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Looks up the local order that was created for the given marketplace code, if any. This is the idempotency
    /// gate: at most one order exists per code.
    async fn fetch_order_by_marketplace_code(&self, code: &MarketplaceCode) -> Result<Option<Order>, OrderApiError>;

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, OrderApiError>;

    /// Persists the assembled order in a single atomic transaction, items included. The backend must enforce the
    /// uniqueness of the marketplace code and fail with [`OrderApiError::OrderAlreadyExists`] on a duplicate.
    async fn insert_order(&self, order: NewOrderRequest) -> Result<Order, OrderApiError>;

    async fn update_order_status(&self, id: i64, status: OrderStatusType) -> Result<Order, OrderApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Cannot insert order, since one already exists for marketplace code {0}")]
    OrderAlreadyExists(MarketplaceCode),
    #[error("The requested order (internal id {0}) does not exist")]
    OrderNotFound(i64),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}
