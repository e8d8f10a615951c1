use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::db_types::Order;

pub const FREE_SHIPPING_CODE: &str = "freeshipping";
pub const DEFAULT_PAYMENT_METHOD: &str = "skyhub_standard";
pub const DEFAULT_ORDER_COMMENT: &str = "This order was automatically created by the SkyHub import process.";

/// What to do with the shipping method/carrier the marketplace reports.
///
/// The integration historically forced free shipping regardless of the marketplace values; that behaviour is now an
/// explicit policy choice and remains the default. The marketplace shipping *cost* is honoured in both modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingPolicy {
    #[default]
    FixedFree,
    Passthrough,
}

impl ShippingPolicy {
    /// Resolves the `(method, carrier)` pair to put on the order.
    pub fn resolve(&self, method: Option<&str>, carrier: Option<&str>) -> (String, String) {
        match self {
            ShippingPolicy::FixedFree => (FREE_SHIPPING_CODE.to_string(), FREE_SHIPPING_CODE.to_string()),
            ShippingPolicy::Passthrough => (
                method.unwrap_or(FREE_SHIPPING_CODE).to_string(),
                carrier.unwrap_or(FREE_SHIPPING_CODE).to_string(),
            ),
        }
    }
}

impl FromStr for ShippingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed_free" | "fixedfree" | "free" => Ok(Self::FixedFree),
            "passthrough" => Ok(Self::Passthrough),
            other => Err(format!("Unknown shipping policy: {other}")),
        }
    }
}

impl Display for ShippingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShippingPolicy::FixedFree => write!(f, "fixed_free"),
            ShippingPolicy::Passthrough => write!(f, "passthrough"),
        }
    }
}

/// The store context an import runs under.
///
/// Every store-dependent configuration read (street-line count, default country, currency, shipping policy) goes
/// through this value, and it is threaded explicitly through the pipeline so that processing one reference can never
/// leak configuration into the next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreScope {
    pub store_id: i64,
    pub website_id: i64,
    /// How many street lines customer addresses use on this store (1-4).
    pub street_lines: u8,
    pub default_country: String,
    pub currency: String,
    pub shipping_policy: ShippingPolicy,
    pub payment_method: String,
    /// When true, the marketplace code is forced as the local order's increment id, which keeps operator-facing
    /// order numbers aligned with marketplace references.
    pub use_marketplace_increment_id: bool,
    pub order_comment: String,
}

impl Default for StoreScope {
    fn default() -> Self {
        Self {
            store_id: 1,
            website_id: 1,
            street_lines: 2,
            default_country: "BR".to_string(),
            currency: soi_common::DEFAULT_CURRENCY_CODE.to_string(),
            shipping_policy: ShippingPolicy::default(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            use_marketplace_increment_id: true,
            order_comment: DEFAULT_ORDER_COMMENT.to_string(),
        }
    }
}

impl StoreScope {
    /// Street-line count clamped to the 1-4 range the address schema supports.
    pub fn street_line_count(&self) -> u8 {
        self.street_lines.clamp(1, 4)
    }
}

/// The result of pushing one reference through the import pipeline.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    /// The order was created by this call.
    Created(Order),
    /// An order already existed for the marketplace code; it is returned unchanged and no side effects ran.
    AlreadyImported(Order),
}

impl ImportOutcome {
    pub fn order(&self) -> &Order {
        match self {
            ImportOutcome::Created(order) | ImportOutcome::AlreadyImported(order) => order,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, ImportOutcome::Created(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shipping_policy_resolution() {
        let (method, carrier) = ShippingPolicy::FixedFree.resolve(Some("SEDEX"), Some("Correios"));
        assert_eq!(method, "freeshipping");
        assert_eq!(carrier, "freeshipping");
        let (method, carrier) = ShippingPolicy::Passthrough.resolve(Some("SEDEX"), Some("Correios"));
        assert_eq!(method, "SEDEX");
        assert_eq!(carrier, "Correios");
        let (method, carrier) = ShippingPolicy::Passthrough.resolve(None, None);
        assert_eq!(method, "freeshipping");
        assert_eq!(carrier, "freeshipping");
    }

    #[test]
    fn street_line_count_is_clamped() {
        let mut scope = StoreScope::default();
        scope.street_lines = 0;
        assert_eq!(scope.street_line_count(), 1);
        scope.street_lines = 9;
        assert_eq!(scope.street_line_count(), 4);
    }
}
