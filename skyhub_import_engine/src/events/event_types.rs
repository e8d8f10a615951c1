use serde::{Deserialize, Serialize};

use crate::db_types::{MarketplaceCode, Order};

/// Emitted after a marketplace order has been persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderImportedEvent {
    pub order: Order,
}

impl OrderImportedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}

/// Emitted when the creation path for a reference fails. Carries the verbatim marketplace payload so subscribers
/// can persist it for diagnostics or replay the import after fixing the cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportFailedEvent {
    pub code: MarketplaceCode,
    pub error: String,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventType {
    OrderImported(OrderImportedEvent),
    ImportFailed(ImportFailedEvent),
}
