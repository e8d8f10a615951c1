use mockall::mock;
use skyhub_import_engine::{
    marketplace_objects::MarketplaceOrder,
    traits::{GatewayError, MarketplaceGateway},
};

mock! {
    pub Gateway {}
    impl MarketplaceGateway for Gateway {
        async fn fetch_order(&self, reference: &str) -> Result<Option<MarketplaceOrder>, GatewayError>;
    }
}
