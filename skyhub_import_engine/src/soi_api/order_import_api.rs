use std::{fmt::Debug, sync::Arc};

use log::*;
use soi_common::Money;

use crate::{
    db_types::{AddressRole, MarketplaceCode, Order},
    events::{EventProducers, ImportFailedEvent, OrderImportedEvent},
    marketplace_objects::MarketplaceOrder,
    soi_api::{
        address_builder::AddressBook,
        errors::OrderImportError,
        import_objects::{ImportOutcome, StoreScope},
        order_assembler::OrderAssembly,
        status_processor::StatusProcessor,
    },
    traits::{CustomerAttributeMapping, NoopAttributeMapper, OrderImportDatabase, StatusSynchronization},
};

/// `OrderImportApi` is the entry point for translating marketplace orders into local orders.
///
/// The API is idempotent per marketplace code: re-importing a reference that already produced a local order returns
/// that order unchanged, with no side effects. Failures inside the creation path are reported through the
/// failed-import event (carrying the verbatim payload for diagnostics and replay) and returned to the caller, who
/// treats them as a skipped reference.
pub struct OrderImportApi<B> {
    pub(crate) db: B,
    producers: EventProducers,
    status: StatusProcessor<B>,
    pub(crate) attribute_mapper: Arc<dyn CustomerAttributeMapping>,
}

impl<B> Debug for OrderImportApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderImportApi")
    }
}

impl<B: Clone> OrderImportApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        let status = StatusProcessor::new(db.clone());
        Self { db, producers, status, attribute_mapper: Arc::new(NoopAttributeMapper) }
    }

    /// Replaces the customer attribute mapper. The default is a no-op; see
    /// [`crate::traits::CustomerAttributeMapping`].
    pub fn with_attribute_mapper(mut self, mapper: Arc<dyn CustomerAttributeMapping>) -> Self {
        self.attribute_mapper = mapper;
        self
    }
}

impl<B> OrderImportApi<B>
where B: OrderImportDatabase
{
    /// Imports one marketplace order, creating the local order if the marketplace code has not been imported before.
    ///
    /// The flow is: idempotency gate → customer resolution → product matching → assembly → persistence → status
    /// synchronization. Any failure after the gate is logged, published as an [`ImportFailedEvent`] and returned;
    /// nothing is persisted in that case, so the reference can safely be retried.
    pub async fn import_order(
        &self,
        scope: &StoreScope,
        payload: MarketplaceOrder,
    ) -> Result<ImportOutcome, OrderImportError> {
        let code = payload.code.clone();
        if let Some(order) = self.db.fetch_order_by_marketplace_code(&code).await? {
            info!("📦️ Order [{code}] was already imported as #{}. Returning the existing record.", order.id);
            return Ok(ImportOutcome::AlreadyImported(order));
        }
        let order = match self.create_order(scope, &payload).await {
            Ok(order) => order,
            Err(e) => {
                error!("📦️ Could not import marketplace order [{code}]. {e}");
                self.call_import_failed_hook(&code, &e, &payload).await;
                return Err(e);
            },
        };
        self.call_order_imported_hook(&order).await;
        self.status.process_order_status(&code, &payload.status.kind, &order).await?;
        Ok(ImportOutcome::Created(order))
    }

    /// Fetches the local order previously imported for the given marketplace code, if any. This is the same lookup
    /// the idempotency gate uses.
    pub async fn fetch_order(&self, code: &MarketplaceCode) -> Result<Option<Order>, OrderImportError> {
        let order = self.db.fetch_order_by_marketplace_code(code).await?;
        Ok(order)
    }

    async fn create_order(&self, scope: &StoreScope, payload: &MarketplaceOrder) -> Result<Order, OrderImportError> {
        let snapshot =
            serde_json::to_string(payload).map_err(|e| OrderImportError::PayloadSerialization(e.to_string()))?;
        let mut book = AddressBook::default();
        let customer = self
            .resolve_customer(
                scope,
                &payload.customer,
                payload.billing_address.as_ref(),
                payload.shipping_address.as_ref(),
                &mut book,
            )
            .await?;
        trace!("📦️ Customer #{} resolved for order [{}]", customer.id, payload.code);
        let products = self.match_items(&payload.items).await?;

        let (method, carrier) =
            scope.shipping_policy.resolve(payload.shipping_method.as_deref(), payload.shipping_carrier.as_deref());
        let mut assembly = OrderAssembly::new(scope.currency.clone());
        assembly
            .set_customer(customer.id)
            .set_shipping_method(&method, &carrier, Money::from_float(payload.shipping_cost))
            .set_payment_method(&scope.payment_method)
            .set_discount_amount(Money::from_float(payload.discount))
            .set_interest_amount(Money::from_float(payload.interest))
            .set_comment(&scope.order_comment);
        if scope.use_marketplace_increment_id {
            assembly.set_increment_id(payload.code.as_str());
        }
        if let Some(billing) = book.billing() {
            assembly.add_order_address(billing.clone(), AddressRole::Billing);
        }
        if let Some(shipping) = book.shipping() {
            assembly.add_order_address(shipping.clone(), AddressRole::Shipping);
        }
        for product in products {
            assembly.add_product(product);
        }

        let request = assembly.into_request(&payload.code, &payload.channel, snapshot)?;
        let order = self.db.insert_order(request).await?;
        debug!("📦️ Order [{}] created with id {}", payload.code, order.id);
        Ok(order)
    }

    async fn call_order_imported_hook(&self, order: &Order) {
        for emitter in &self.producers.order_imported_producer {
            debug!("📦️ Notifying order imported hook subscribers");
            let event = OrderImportedEvent { order: order.clone() };
            emitter.publish_event(event).await;
        }
    }

    async fn call_import_failed_hook(&self, code: &MarketplaceCode, error: &OrderImportError, payload: &MarketplaceOrder) {
        let payload_json = serde_json::to_value(payload).unwrap_or_default();
        for emitter in &self.producers.import_failed_producer {
            debug!("📦️ Notifying import failed hook subscribers");
            let event = ImportFailedEvent {
                code: code.clone(),
                error: error.to_string(),
                payload: payload_json.clone(),
            };
            emitter.publish_event(event).await;
        }
    }
}
