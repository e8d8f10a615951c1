use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use soi_common::Money;
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   MarketplaceCode   ---------------------------------------------------------
/// The marketplace's unique order reference. This is the sole idempotency key for imports: at most one local order
/// exists per code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct MarketplaceCode(pub String);

impl FromStr for MarketplaceCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for MarketplaceCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for MarketplaceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl MarketplaceCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   OrderStatusType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been created locally and no marketplace status has been applied yet.
    New,
    /// Payment was approved on the marketplace; the order is being prepared.
    Processing,
    /// The order has been shipped or delivered.
    Complete,
    /// The order was cancelled on the marketplace.
    Canceled,
    /// The order was closed after completion (refunds, returns).
    Closed,
    /// The order is on hold pending operator action.
    Holded,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::New => write!(f, "New"),
            OrderStatusType::Processing => write!(f, "Processing"),
            OrderStatusType::Complete => write!(f, "Complete"),
            OrderStatusType::Canceled => write!(f, "Canceled"),
            OrderStatusType::Closed => write!(f, "Closed"),
            OrderStatusType::Holded => write!(f, "Holded"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Processing" => Ok(Self::Processing),
            "Complete" => Ok(Self::Complete),
            "Canceled" => Ok(Self::Canceled),
            "Closed" => Ok(Self::Closed),
            "Holded" => Ok(Self::Holded),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to New");
            OrderStatusType::New
        })
    }
}

//--------------------------------------       Gender        ---------------------------------------------------------
/// Customer gender, stored with the platform's legacy numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn code(&self) -> i64 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }
}

//--------------------------------------    AddressRole      ---------------------------------------------------------
/// The role an address plays on an order. One address instance may hold both roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    Billing,
    Shipping,
}

impl Display for AddressRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressRole::Billing => write!(f, "billing"),
            AddressRole::Shipping => write!(f, "shipping"),
        }
    }
}

//--------------------------------------     NewAddress      ---------------------------------------------------------
/// A normalized address that has not been persisted yet. Street is 1-4 lines, depending on the store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub firstname: String,
    pub lastname: String,
    pub telephone: Option<String>,
    pub street: Vec<String>,
    pub city: String,
    pub region: Option<String>,
    pub postcode: String,
    pub country_id: String,
}

//--------------------------------------  CustomerAddress    ---------------------------------------------------------
/// A customer address as stored in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    pub id: i64,
    pub customer_id: i64,
    pub firstname: String,
    pub lastname: String,
    pub telephone: Option<String>,
    pub street: Vec<String>,
    pub city: String,
    pub region: Option<String>,
    pub postcode: String,
    pub country_id: String,
}

impl From<&CustomerAddress> for NewAddress {
    fn from(address: &CustomerAddress) -> Self {
        Self {
            firstname: address.firstname.clone(),
            lastname: address.lastname.clone(),
            telephone: address.telephone.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            region: address.region.clone(),
            postcode: address.postcode.clone(),
            country_id: address.country_id.clone(),
        }
    }
}

//--------------------------------------      Customer       ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub website_id: i64,
    pub store_id: i64,
    pub email: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub telephone: Option<String>,
    /// Taxpayer id. Carried through from the marketplace but not interpreted; attribute mapping is an inert
    /// extension point (see [`crate::traits::CustomerAttributeMapping`]).
    pub taxvat: Option<String>,
    pub default_billing: Option<i64>,
    pub default_shipping: Option<i64>,
    pub addresses: Vec<CustomerAddress>,
    pub created_at: DateTime<Utc>,
}

/// An address attached to a new customer record, with its role markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomerAddress {
    pub address: NewAddress,
    pub is_default_billing: bool,
    pub is_default_shipping: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    pub website_id: i64,
    pub store_id: i64,
    pub email: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub lastname: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub telephone: Option<String>,
    pub taxvat: Option<String>,
    pub addresses: Vec<NewCustomerAddress>,
}

//--------------------------------------    ProductMatch     ---------------------------------------------------------
/// A marketplace item resolved against the local catalog. When the ordered item is a variant of a composite product,
/// the specific child SKU rides along as a [`ChildMatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    pub product_id: i64,
    pub product_sku: String,
    pub qty: f64,
    pub price: Money,
    pub special_price: Money,
    pub final_price: Money,
    pub child: Option<ChildMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildMatch {
    pub product_id: i64,
    pub product_sku: String,
}

//--------------------------------------  NewOrderRequest    ---------------------------------------------------------
/// Everything the order assembler accumulated, ready to be committed by the backend in one transaction.
#[derive(Debug, Clone)]
pub struct NewOrderRequest {
    pub increment_id: Option<String>,
    pub send_confirmation: bool,
    pub customer_id: i64,
    pub currency: String,
    pub billing_address: NewAddress,
    pub shipping_address: NewAddress,
    pub shipping_method: String,
    pub shipping_carrier: String,
    pub shipping_cost: Money,
    pub payment_method: String,
    pub subtotal: Money,
    pub discount: Money,
    pub interest: Money,
    pub grand_total: Money,
    pub comment: Option<String>,
    pub items: Vec<ProductMatch>,
    pub marketplace_code: MarketplaceCode,
    pub marketplace_channel: Option<String>,
    /// Verbatim JSON snapshot of the marketplace payload, stored for audit and replay.
    pub marketplace_payload: String,
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub increment_id: Option<String>,
    pub customer_id: i64,
    pub status: OrderStatusType,
    pub currency: String,
    pub subtotal: Money,
    pub shipping_cost: Money,
    pub discount: Money,
    pub interest: Money,
    pub grand_total: Money,
    pub shipping_method: String,
    pub shipping_carrier: String,
    pub payment_method: String,
    pub comment: Option<String>,
    /// JSON snapshot of the billing address as assembled at import time.
    pub billing_address: String,
    /// JSON snapshot of the shipping address as assembled at import time.
    pub shipping_address: String,
    pub from_marketplace: bool,
    pub marketplace_code: MarketplaceCode,
    pub marketplace_channel: Option<String>,
    pub marketplace_payload: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn order_status_round_trip() {
        for status in [
            OrderStatusType::New,
            OrderStatusType::Processing,
            OrderStatusType::Complete,
            OrderStatusType::Canceled,
            OrderStatusType::Closed,
            OrderStatusType::Holded,
        ] {
            let parsed: OrderStatusType = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("Refunded".parse::<OrderStatusType>().is_err());
    }

    #[test]
    fn gender_codes() {
        assert_eq!(Gender::Male.code(), 1);
        assert_eq!(Gender::Female.code(), 2);
        assert_eq!(Gender::from_code(2), Some(Gender::Female));
        assert_eq!(Gender::from_code(7), None);
    }
}
