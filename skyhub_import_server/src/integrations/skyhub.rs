//! The engine's marketplace gateway, implemented over the SkyHub REST client.
use skyhub_import_engine::{
    marketplace_objects::MarketplaceOrder,
    traits::{GatewayError, MarketplaceGateway},
};
use skyhub_tools::{SkyHubApi, SkyHubApiError, SkyHubConfig};

use crate::skyhub_order::to_marketplace_order;

#[derive(Clone)]
pub struct SkyHubGateway {
    api: SkyHubApi,
}

impl SkyHubGateway {
    pub fn new(config: SkyHubConfig) -> Result<Self, SkyHubApiError> {
        let api = SkyHubApi::new(config)?;
        Ok(Self { api })
    }
}

impl MarketplaceGateway for SkyHubGateway {
    async fn fetch_order(&self, reference: &str) -> Result<Option<MarketplaceOrder>, GatewayError> {
        let order = self.api.get_order(reference).await.map_err(|e| match e {
            SkyHubApiError::JsonError(e) => GatewayError::InvalidPayload(e),
            e => GatewayError::Network(e.to_string()),
        })?;
        Ok(order.map(to_marketplace_order))
    }
}
