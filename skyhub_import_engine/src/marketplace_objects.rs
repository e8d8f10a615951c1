//! The structured marketplace order payload consumed by the import pipeline.
//!
//! These types are the engine's view of a marketplace order. The wire format of a particular marketplace lives in
//! its client crate; the boundary converts wire orders into this model before handing them to the pipeline. The
//! whole payload serializes back to JSON so the orchestrator can store a verbatim snapshot on the imported order.
use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db_types::MarketplaceCode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceOrder {
    pub code: MarketplaceCode,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub placed_at: Option<String>,
    #[serde(default)]
    pub status: MarketplaceStatus,
    pub customer: MarketplaceCustomer,
    #[serde(default)]
    pub billing_address: Option<MarketplaceAddress>,
    #[serde(default)]
    pub shipping_address: Option<MarketplaceAddress>,
    #[serde(default)]
    pub items: Vec<MarketplaceItem>,
    #[serde(default)]
    pub shipping_carrier: Option<String>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub interest: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketplaceStatus {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub kind: MarketplaceStatusKind,
}

/// The marketplace's order status taxonomy. Unknown statuses must never fail an import, so the enum carries an
/// `Other` escape hatch instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MarketplaceStatusKind {
    New,
    Approved,
    Canceled,
    Shipped,
    Delivered,
    Other(String),
}

impl Default for MarketplaceStatusKind {
    fn default() -> Self {
        Self::New
    }
}

impl FromStr for MarketplaceStatusKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_uppercase().as_str() {
            "NEW" => Self::New,
            "APPROVED" => Self::Approved,
            "CANCELED" | "CANCELLED" => Self::Canceled,
            "SHIPPED" => Self::Shipped,
            "DELIVERED" => Self::Delivered,
            _ => Self::Other(s.to_string()),
        };
        Ok(kind)
    }
}

impl Display for MarketplaceStatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::Shipped => write!(f, "SHIPPED"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<String> for MarketplaceStatusKind {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Other(value))
    }
}

impl From<MarketplaceStatusKind> for String {
    fn from(value: MarketplaceStatusKind) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketplaceCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketplaceAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketplaceItem {
    /// The specific (child) SKU ordered, for composite/variant products.
    #[serde(default)]
    pub id: Option<String>,
    /// The parent SKU as listed on the marketplace.
    pub product_id: String,
    #[serde(default)]
    pub qty: f64,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub special_price: Option<f64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_kind_parsing() {
        assert_eq!("APPROVED".parse::<MarketplaceStatusKind>().unwrap(), MarketplaceStatusKind::Approved);
        assert_eq!("cancelled".parse::<MarketplaceStatusKind>().unwrap(), MarketplaceStatusKind::Canceled);
        assert_eq!(
            "WAITING_PICKUP".parse::<MarketplaceStatusKind>().unwrap(),
            MarketplaceStatusKind::Other("WAITING_PICKUP".to_string())
        );
    }

    #[test]
    fn status_kind_serde_round_trip() {
        let kind: MarketplaceStatusKind = serde_json::from_str("\"SHIPPED\"").unwrap();
        assert_eq!(kind, MarketplaceStatusKind::Shipped);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"SHIPPED\"");
    }
}
