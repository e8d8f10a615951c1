use thiserror::Error;

use crate::marketplace_objects::MarketplaceOrder;

/// The marketplace API, reduced to what the importer needs: fetching one structured order payload by reference code.
///
/// `Ok(None)` means the reference does not exist on the marketplace. Callers treat that as a per-reference warning,
/// not an error; the error type is reserved for transport and payload failures.
#[allow(async_fn_in_trait)]
pub trait MarketplaceGateway {
    async fn fetch_order(&self, reference: &str) -> Result<Option<MarketplaceOrder>, GatewayError>;
}

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Marketplace request failed: {0}")]
    Network(String),
    #[error("Marketplace returned an unusable payload: {0}")]
    InvalidPayload(String),
}
