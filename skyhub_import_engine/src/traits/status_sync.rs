use crate::{
    db_types::{MarketplaceCode, Order},
    marketplace_objects::MarketplaceStatusKind,
    traits::OrderApiError,
};

/// Applies a marketplace status onto a local order.
///
/// Invoked by the orchestrator after an order has been created. Implementations decide which marketplace statuses
/// translate to which local state transitions; unmapped statuses must be skipped, not failed. Returns the updated
/// order when a transition was applied, `None` when the status resulted in a no-op.
#[allow(async_fn_in_trait)]
pub trait StatusSynchronization {
    async fn process_order_status(
        &self,
        code: &MarketplaceCode,
        kind: &MarketplaceStatusKind,
        order: &Order,
    ) -> Result<Option<Order>, OrderApiError>;
}
