use thiserror::Error;

use crate::{
    db_types::MarketplaceCode,
    traits::{CatalogApiError, CustomerApiError, GatewayError, OrderApiError},
};

#[derive(Debug, Error)]
pub enum OrderImportError {
    #[error("None of the marketplace items of order {0} could be matched with a catalog product")]
    EmptyProductSet(MarketplaceCode),
    #[error("Order assembly is incomplete. {0}")]
    IncompleteAssembly(String),
    #[error("Customer repository error: {0}")]
    CustomerError(#[from] CustomerApiError),
    #[error("Order repository error: {0}")]
    OrderError(#[from] OrderApiError),
    #[error("Catalog lookup error: {0}")]
    CatalogError(#[from] CatalogApiError),
    #[error("Marketplace gateway error: {0}")]
    GatewayError(#[from] GatewayError),
    #[error("Could not serialize the marketplace payload: {0}")]
    PayloadSerialization(String),
}

impl OrderImportError {
    /// True for the "no line item matched the catalog" failure, which the admin surface reports with a dedicated
    /// warning instead of the generic one.
    pub fn is_empty_product_set(&self) -> bool {
        matches!(self, OrderImportError::EmptyProductSet(_))
    }
}
