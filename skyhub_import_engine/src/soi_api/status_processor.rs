//! Maps marketplace order statuses onto local order state transitions.
use log::*;

use crate::{
    db_types::{MarketplaceCode, Order, OrderStatusType},
    marketplace_objects::MarketplaceStatusKind,
    traits::{OrderApiError, OrderManagement, StatusSynchronization},
};

/// The default status synchronizer.
///
/// | Marketplace | Local       |
/// |-------------|-------------|
/// | NEW         | New         |
/// | APPROVED    | Processing  |
/// | SHIPPED     | Complete    |
/// | DELIVERED   | Complete    |
/// | CANCELED    | Canceled    |
/// | anything else | skipped   |
///
/// Transitions that would not change the order's current status are skipped as no-ops.
pub struct StatusProcessor<B> {
    db: B,
}

impl<B> StatusProcessor<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

/// The local status a marketplace status maps to, or `None` for statuses the importer does not act on.
pub fn local_status_for(kind: &MarketplaceStatusKind) -> Option<OrderStatusType> {
    match kind {
        MarketplaceStatusKind::New => Some(OrderStatusType::New),
        MarketplaceStatusKind::Approved => Some(OrderStatusType::Processing),
        MarketplaceStatusKind::Shipped | MarketplaceStatusKind::Delivered => Some(OrderStatusType::Complete),
        MarketplaceStatusKind::Canceled => Some(OrderStatusType::Canceled),
        MarketplaceStatusKind::Other(_) => None,
    }
}

impl<B> StatusSynchronization for StatusProcessor<B>
where B: OrderManagement
{
    async fn process_order_status(
        &self,
        code: &MarketplaceCode,
        kind: &MarketplaceStatusKind,
        order: &Order,
    ) -> Result<Option<Order>, OrderApiError> {
        let Some(target) = local_status_for(kind) else {
            warn!("🚦️ Order [{code}] carries unmapped marketplace status {kind}. Leaving the order as {}.", order.status);
            return Ok(None);
        };
        if order.status == target {
            trace!("🚦️ Order [{code}] is already {target}. Nothing to do.");
            return Ok(None);
        }
        let updated = self.db.update_order_status(order.id, target).await?;
        info!("🚦️ Order [{code}] moved from {} to {} following marketplace status {kind}", order.status, target);
        Ok(Some(updated))
    }
}
